use std::collections::HashMap;
use log::{debug, trace, warn};

use crate::error::NetcheckError;
use crate::probe::{ProbeRegistry, ProbeState, ProcessDriver, Reaped, ToolSet};


/// Owns the runtime state of every probe and drives their processes.
/// Each probe has at most one outstanding process.
pub struct ProbeScheduler<D: ProcessDriver> {
    states: Vec<ProbeState>,
    // pid of every outstanding process -> index into states
    running: HashMap<u32, usize>,
    toolset: ToolSet,
    driver: D,
}


impl<D: ProcessDriver> ProbeScheduler<D> {
    pub fn new(
        registry: &ProbeRegistry,
        toolset: ToolSet,
        driver: D,
        history_limit: Option<usize>,
    ) -> ProbeScheduler<D> {
        let states = registry
            .iter()
            .map(|definition| {
                let failure_code = toolset.failure_code(definition.get_kind());
                ProbeState::new(definition.clone(), failure_code, history_limit)
            })
            .collect();

        return ProbeScheduler {
            states,
            running: HashMap::new(),
            toolset,
            driver,
        };
    }

    pub fn states(&self) -> &[ProbeState] {
        &self.states
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    #[cfg(test)]
    pub fn get_driver(&self) -> &D {
        &self.driver
    }

    #[cfg(test)]
    pub fn get_driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Spawns one process for every probe that has none outstanding.
    /// Returns the number of spawned processes. A spawn failure is fatal.
    pub fn dispatch_idle_probes(&mut self) -> Result<usize, NetcheckError> {
        let mut dispatched = 0;

        for (index, state) in self.states.iter_mut().enumerate() {
            if state.is_running() {
                continue;
            }

            let command = self.toolset.command_for(state.get_definition());
            let pid = self.driver.spawn(&command)?;

            debug!("Dispatched probe {} (pid={})", state.label(), pid);
            state.set_running(pid, command.failure_code);
            self.running.insert(pid, index);
            dispatched += 1;
        }

        return Ok(dispatched);
    }

    /// Records the outcome of every process that has exited since the last
    /// poll and marks all other probes as pending. Never waits for a process.
    pub fn poll_completions(&mut self) -> Result<(), NetcheckError> {
        let reaped: Vec<Reaped> = self.driver.reap()?;
        let mut completed = vec![false; self.states.len()];

        for entry in reaped {
            // a child killed by a signal is fatal, whoever it belongs to
            let exit_code = match entry.exit_code {
                Some(exit_code) => exit_code,
                None => {
                    let label = match self.running.get(&entry.pid) {
                        Some(index) => self.states[*index].label(),
                        None => String::from("unknown"),
                    };
                    return Err(NetcheckError::AbnormalTermination {
                        pid: entry.pid,
                        label,
                    });
                }
            };

            let index = match self.running.remove(&entry.pid) {
                Some(index) => index,
                None => {
                    warn!("Reaped process {} does not belong to any probe", entry.pid);
                    continue;
                }
            };

            let state = &mut self.states[index];
            let outcome = state.complete(exit_code);
            completed[index] = true;
            debug!("Probe {} finished with exit code {} ({:?})", state.label(), exit_code, outcome);
        }

        for (index, state) in self.states.iter_mut().enumerate() {
            if !completed[index] {
                state.mark_pending();
            }
        }

        trace!("{} probe processes still outstanding", self.running.len());
        return Ok(());
    }

    /// Kills every outstanding probe process. All probes are idle afterwards.
    pub fn shutdown(&mut self) {
        debug!("Terminating {} outstanding probe processes", self.running.len());
        self.driver.terminate_all();
        self.running.clear();

        for state in self.states.iter_mut() {
            state.clear_running();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use crate::probe::{Platform, ProbeCommand, ProbeDefinition, ProbeKind};

    #[derive(Debug, Default)]
    struct ScriptedDriver {
        next_pid: u32,
        spawned: Vec<ProbeCommand>,
        exits: Vec<Reaped>,
        missing_executable: Option<String>,
        terminated: bool,
    }

    impl ScriptedDriver {
        fn exit(&mut self, pid: u32, exit_code: i32) {
            self.exits.push(Reaped { pid, exit_code: Some(exit_code) });
        }

        fn kill(&mut self, pid: u32) {
            self.exits.push(Reaped { pid, exit_code: None });
        }
    }

    impl ProcessDriver for ScriptedDriver {
        fn spawn(&mut self, command: &ProbeCommand) -> Result<u32, NetcheckError> {
            if self.missing_executable.as_deref() == Some(command.executable.as_str()) {
                return Err(NetcheckError::Spawn {
                    executable: command.executable.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                });
            }

            self.next_pid += 1;
            self.spawned.push(command.clone());
            Ok(self.next_pid)
        }

        fn reap(&mut self) -> Result<Vec<Reaped>, NetcheckError> {
            Ok(self.exits.drain(..).collect())
        }

        fn terminate_all(&mut self) {
            self.terminated = true;
        }
    }

    fn build_scheduler(definitions: Vec<ProbeDefinition>) -> ProbeScheduler<ScriptedDriver> {
        let registry = ProbeRegistry::new(definitions);
        let toolset = ToolSet::for_platform(Platform::Linux);
        ProbeScheduler::new(&registry, toolset, ScriptedDriver::default(), None)
    }

    fn ping(target: &str) -> ProbeDefinition {
        ProbeDefinition::new(ProbeKind::Ping, String::from(target))
    }

    fn dns(target: &str) -> ProbeDefinition {
        ProbeDefinition::new(ProbeKind::DnsLookup, String::from(target))
    }

    fn cycle(scheduler: &mut ProbeScheduler<ScriptedDriver>) {
        scheduler.dispatch_idle_probes().unwrap();
        scheduler.poll_completions().unwrap();
    }

    #[test]
    fn new_should_create_idle_states() {
        let scheduler = build_scheduler(vec![ping("192.168.1.1"), dns("8.8.8.8")]);

        assert_eq!(scheduler.states().len(), 2);
        assert_eq!(scheduler.running_count(), 0);
        assert!(scheduler.states().iter().all(|s| !s.is_running() && s.get_history().is_empty()));
    }

    #[test]
    fn dispatch_should_spawn_one_process_per_idle_probe() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1"), dns("8.8.8.8")]);

        assert_eq!(scheduler.dispatch_idle_probes().unwrap(), 2);
        assert_eq!(scheduler.dispatch_idle_probes().unwrap(), 0);

        let spawned = &scheduler.get_driver().spawned;
        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned[0].executable, "/bin/ping");
        assert_eq!(spawned[1].executable, "/usr/bin/host");
        assert_eq!(scheduler.running_count(), 2);
        assert_eq!(scheduler.states()[0].get_running_pid(), Some(1));
        assert_eq!(scheduler.states()[1].get_running_pid(), Some(2));
    }

    #[test]
    fn ping_failure_after_pending_cycles_should_record_fail() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1")]);

        for _ in 0..4 {
            cycle(&mut scheduler);
        }
        assert_eq!(scheduler.states()[0].get_history().to_string(), "....");
        assert_eq!(scheduler.states()[0].get_running_pid(), Some(1));

        scheduler.get_driver_mut().exit(1, 1);
        scheduler.poll_completions().unwrap();

        assert_eq!(scheduler.states()[0].get_history().to_string(), "....X");
        assert!(!scheduler.states()[0].is_running());
        assert_eq!(scheduler.get_driver().spawned.len(), 1);
    }

    #[test]
    fn dns_success_after_pending_cycles_should_record_success() {
        let mut scheduler = build_scheduler(vec![dns("8.8.8.8")]);

        for _ in 0..3 {
            cycle(&mut scheduler);
        }
        scheduler.dispatch_idle_probes().unwrap();
        scheduler.get_driver_mut().exit(1, 0);
        scheduler.poll_completions().unwrap();

        assert_eq!(scheduler.states()[0].get_history().to_string(), "...*");
    }

    #[test]
    fn unexpected_exit_code_should_record_unknown() {
        let mut scheduler = build_scheduler(vec![ping("8.8.8.8"), dns("8.8.4.4")]);
        scheduler.dispatch_idle_probes().unwrap();

        scheduler.get_driver_mut().exit(1, 2);
        scheduler.get_driver_mut().exit(2, 1);
        scheduler.poll_completions().unwrap();

        assert_eq!(scheduler.states()[0].get_history().to_string(), "?");
        assert_eq!(scheduler.states()[1].get_history().to_string(), "X");
    }

    #[test]
    fn every_cycle_should_append_exactly_one_symbol() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1"), ping("8.8.8.8"), dns("8.8.8.8")]);

        for round in 0..10 {
            scheduler.dispatch_idle_probes().unwrap();

            // complete the first probe every cycle, the second every third cycle
            let first_pid = scheduler.states()[0].get_running_pid().unwrap();
            scheduler.get_driver_mut().exit(first_pid, 0);
            if round % 3 == 2 {
                let second_pid = scheduler.states()[1].get_running_pid().unwrap();
                scheduler.get_driver_mut().exit(second_pid, 1);
            }

            scheduler.poll_completions().unwrap();
        }

        for state in scheduler.states() {
            assert_eq!(state.get_history().recorded(), 10);
        }
        assert_eq!(scheduler.states()[0].get_history().to_string(), "**********");
        assert_eq!(scheduler.states()[1].get_history().to_string(), "..X..X..X.");
        assert_eq!(scheduler.states()[2].get_history().to_string(), "..........");
    }

    #[test]
    fn dispatch_should_never_spawn_for_running_probe() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1"), dns("8.8.8.8")]);

        for _ in 0..5 {
            cycle(&mut scheduler);
        }

        assert_eq!(scheduler.get_driver().spawned.len(), 2);
        assert_eq!(scheduler.running_count(), 2);
    }

    #[test]
    fn completed_probe_should_be_dispatched_again() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1")]);
        scheduler.dispatch_idle_probes().unwrap();
        scheduler.get_driver_mut().exit(1, 0);
        scheduler.poll_completions().unwrap();

        scheduler.dispatch_idle_probes().unwrap();

        assert_eq!(scheduler.get_driver().spawned.len(), 2);
        assert_eq!(scheduler.states()[0].get_running_pid(), Some(2));
    }

    #[test]
    fn poll_when_unknown_pid_reaped_should_ignore_it() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1")]);
        scheduler.dispatch_idle_probes().unwrap();

        scheduler.get_driver_mut().exit(999, 0);
        scheduler.poll_completions().unwrap();

        assert_eq!(scheduler.states()[0].get_history().to_string(), ".");
        assert_eq!(scheduler.states()[0].get_running_pid(), Some(1));
    }

    #[test]
    fn poll_when_unknown_pid_killed_by_signal_should_return_error() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1")]);
        scheduler.dispatch_idle_probes().unwrap();

        scheduler.get_driver_mut().kill(999);
        let result = scheduler.poll_completions();

        assert!(matches!(result, Err(NetcheckError::AbnormalTermination { pid: 999, ref label }) if label == "unknown"));
        assert_eq!(scheduler.states()[0].get_running_pid(), Some(1));
    }

    #[test]
    fn poll_when_process_killed_by_signal_should_return_error() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1")]);
        scheduler.dispatch_idle_probes().unwrap();

        scheduler.get_driver_mut().kill(1);
        let result = scheduler.poll_completions();

        assert!(matches!(result, Err(NetcheckError::AbnormalTermination { pid: 1, ref label }) if label == "Ping 192.168.1.1"));
    }

    #[test]
    fn dispatch_when_spawn_fails_should_return_error() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1"), dns("8.8.8.8")]);
        scheduler.get_driver_mut().missing_executable = Some(String::from("/usr/bin/host"));

        let result = scheduler.dispatch_idle_probes();

        assert!(matches!(result, Err(NetcheckError::Spawn { ref executable, .. }) if executable == "/usr/bin/host"));
    }

    #[test]
    fn shutdown_should_terminate_outstanding_processes() {
        let mut scheduler = build_scheduler(vec![ping("192.168.1.1"), dns("8.8.8.8")]);
        cycle(&mut scheduler);

        scheduler.shutdown();

        assert!(scheduler.get_driver().terminated);
        assert_eq!(scheduler.running_count(), 0);
        assert!(scheduler.states().iter().all(|s| !s.is_running()));
    }

    #[test]
    fn history_limit_should_cap_retained_outcomes() {
        let registry = ProbeRegistry::new(vec![ping("192.168.1.1")]);
        let toolset = ToolSet::for_platform(Platform::Linux);
        let mut scheduler = ProbeScheduler::new(&registry, toolset, ScriptedDriver::default(), Some(3));

        for _ in 0..5 {
            cycle(&mut scheduler);
        }

        assert_eq!(scheduler.states()[0].get_history().len(), 3);
        assert_eq!(scheduler.states()[0].get_history().recorded(), 5);
    }
}
