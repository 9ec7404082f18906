use crate::probe::{History, Outcome, ProbeDefinition};


/// Runtime state of one probe. Idle when no process is outstanding.
#[derive(Debug, Clone)]
pub struct ProbeState {
    definition: ProbeDefinition,
    running_pid: Option<u32>,
    failure_code: i32,
    history: History,
}


impl ProbeState {
    pub fn new(definition: ProbeDefinition, failure_code: i32, history_limit: Option<usize>) -> ProbeState {
        return ProbeState {
            definition,
            running_pid: None,
            failure_code,
            history: History::with_limit(history_limit),
        };
    }

    pub fn get_definition(&self) -> &ProbeDefinition {
        &self.definition
    }

    #[cfg(test)]
    pub fn get_kind(&self) -> crate::probe::ProbeKind {
        self.definition.get_kind()
    }

    #[cfg(test)]
    pub fn get_target(&self) -> &str {
        self.definition.get_target()
    }

    pub fn label(&self) -> String {
        self.definition.label()
    }

    #[cfg(test)]
    pub fn get_running_pid(&self) -> Option<u32> {
        self.running_pid
    }

    pub fn is_running(&self) -> bool {
        self.running_pid.is_some()
    }

    #[cfg(test)]
    pub fn get_failure_code(&self) -> i32 {
        self.failure_code
    }

    pub fn get_history(&self) -> &History {
        &self.history
    }

    pub(crate) fn set_running(&mut self, pid: u32, failure_code: i32) {
        self.running_pid = Some(pid);
        self.failure_code = failure_code;
    }

    /// Clears the running pid and records the classified exit code
    pub(crate) fn complete(&mut self, exit_code: i32) -> Outcome {
        self.running_pid = None;
        let outcome = Outcome::classify(exit_code, self.failure_code);
        self.history.push(outcome);
        outcome
    }

    pub(crate) fn mark_pending(&mut self) {
        self.history.push(Outcome::Pending);
    }

    pub(crate) fn clear_running(&mut self) {
        self.running_pid = None;
    }
}
