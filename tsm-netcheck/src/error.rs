use std::io;
use thiserror::Error;


/// Conditions that terminate the whole program.
/// Probe failures are not errors, they end up in the probe history.
#[derive(Error, Debug)]
pub enum NetcheckError {
    #[error("Failed to spawn {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("Probe process {pid} ({label}) did not terminate normally")]
    AbnormalTermination {
        pid: u32,
        label: String,
    },

    #[error("Failed to reap probe processes: {0}")]
    Reap(#[source] io::Error),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Failed to write to terminal: {0}")]
    Output(#[from] io::Error),
}


impl NetcheckError {
    /// Process exit code used when this error terminates the program.
    pub fn exit_code(&self) -> i32 {
        match self {
            NetcheckError::UnsupportedPlatform(_) => 11,
            NetcheckError::Spawn { .. } => 20,
            NetcheckError::AbnormalTermination { .. } => 21,
            NetcheckError::Reap(_) => 22,
            NetcheckError::Output(_) => 23,
        }
    }
}
