use serde::Deserialize;
use crate::config::LogLevel;


#[derive(Deserialize, Debug, Default)]
pub struct Application {
    log_level: Option<LogLevel>,
    log_file: Option<String>,
}


impl Application {
    pub fn get_log_level(&self) -> LogLevel {
        return self.log_level.unwrap_or_default();
    }

    /// Log records go to this file instead of stderr
    pub fn get_log_file(&self) -> Option<String> {
        return self.log_file.clone();
    }
}
