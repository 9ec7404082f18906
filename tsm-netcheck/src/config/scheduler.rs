use std::time::Duration;
use serde::Deserialize;


#[derive(Deserialize, Debug, Default)]
pub struct Scheduler {
    interval: Option<String>,
    history_limit: Option<usize>,
}


impl Scheduler {
    /// Cycle length, e.g. "1s" or "500ms". Defaults to one second.
    pub fn get_interval(&self) -> Result<Duration, String> {
        let interval = match &self.interval {
            Some(interval) => interval,
            None => return Ok(Duration::from_secs(1)),
        };

        return match humantime::parse_duration(interval) {
            Ok(duration) if duration.is_zero() => {
                Err(format!("Scheduler interval must be greater than zero: {}", interval))
            }
            Ok(duration) => Ok(duration),
            Err(error) => Err(format!("Invalid scheduler interval {}: {}", interval, error)),
        };
    }

    /// Outcomes kept per probe, None keeps everything
    pub fn get_history_limit(&self) -> Option<usize> {
        return self.history_limit;
    }
}
