use std::collections::HashMap;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use log::{debug, trace, warn};

use crate::error::NetcheckError;
use crate::probe::ProbeCommand;


/// A child process that has terminated.
/// `exit_code` is None when the process was killed by a signal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Reaped {
    pub pid: u32,
    pub exit_code: Option<i32>,
}


/// Spawns probe processes and collects the ones that have finished.
pub trait ProcessDriver {
    /// Starts the command detached from our terminal and returns its pid
    fn spawn(&mut self, command: &ProbeCommand) -> Result<u32, NetcheckError>;

    /// Collects every child that has already exited. Must not block.
    fn reap(&mut self) -> Result<Vec<Reaped>, NetcheckError>;

    /// Kills and collects every child that is still outstanding
    fn terminate_all(&mut self);
}


/// ProcessDriver backed by std::process.
#[derive(Debug, Default)]
pub struct SystemDriver {
    children: HashMap<u32, Child>,
}


impl SystemDriver {
    pub fn new() -> SystemDriver {
        return SystemDriver {
            children: HashMap::new(),
        };
    }

    #[cfg(test)]
    pub fn outstanding(&self) -> usize {
        self.children.len()
    }
}


impl ProcessDriver for SystemDriver {
    fn spawn(&mut self, command: &ProbeCommand) -> Result<u32, NetcheckError> {
        let child = Command::new(&command.executable)
            .args(&command.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // keep Ctrl-C on our terminal away from the probes
            .process_group(0)
            .spawn();

        match child {
            Ok(child) => {
                let pid = child.id();
                debug!("Process {} {} was started (pid={})", command.executable, command.arguments.join(" "), pid);
                self.children.insert(pid, child);
                Ok(pid)
            }
            Err(error) => {
                Err(NetcheckError::Spawn {
                    executable: command.executable.clone(),
                    source: error,
                })
            }
        }
    }

    fn reap(&mut self) -> Result<Vec<Reaped>, NetcheckError> {
        let mut reaped = Vec::new();

        for (pid, child) in self.children.iter_mut() {
            match child.try_wait() {
                Ok(Some(status)) => {
                    trace!("Process {} exited with {}", pid, status);
                    reaped.push(Reaped {
                        pid: *pid,
                        exit_code: status.code(),
                    });
                }
                Ok(None) => {}
                Err(error) => {
                    return Err(NetcheckError::Reap(error));
                }
            }
        }

        for entry in &reaped {
            self.children.remove(&entry.pid);
        }

        return Ok(reaped);
    }

    fn terminate_all(&mut self) {
        for (pid, mut child) in self.children.drain() {
            match child.kill() {
                Ok(_) => debug!("Process {} was killed", pid),
                Err(error) => warn!("Failed to kill process {}: {}", pid, error),
            }

            match child.wait() {
                Ok(status) => trace!("Process {} collected with {}", pid, status),
                Err(error) => warn!("Failed to collect process {}: {}", pid, error),
            }
        }
    }
}
