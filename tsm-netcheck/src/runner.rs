use std::io::Write;
use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::Duration;
use log::{debug, error, info, trace};

use crate::error::NetcheckError;
use crate::probe::{ProbeScheduler, ProcessDriver};
use crate::render::TableRenderer;


pub type StopRequestRef = Arc<Mutex<bool>>;


/// Drives the probe cycle: render, dispatch, sleep, poll, rewind.
pub struct Runner<D: ProcessDriver> {
    scheduler: ProbeScheduler<D>,
    renderer: TableRenderer,
    interval: Duration,
    max_cycles: u64,
    stop_requested: StopRequestRef,
}


impl<D: ProcessDriver> Runner<D> {
    /// max_cycles: 0 means run until a stop is requested
    pub fn new(
        scheduler: ProbeScheduler<D>,
        renderer: TableRenderer,
        interval: Duration,
        max_cycles: u64,
    ) -> Runner<D> {
        return Runner {
            scheduler,
            renderer,
            interval,
            max_cycles,
            stop_requested: Arc::new(Mutex::new(false)),
        };
    }

    #[cfg(test)]
    pub fn get_scheduler(&self) -> &ProbeScheduler<D> {
        &self.scheduler
    }

    /// Shared flag, e.g. for a Ctrl-C handler
    pub fn stop_request(&self) -> StopRequestRef {
        self.stop_requested.clone()
    }

    #[cfg(test)]
    pub fn request_stop(&self) {
        match self.stop_requested.lock() {
            Ok(mut stop_requested) => *stop_requested = true,
            Err(e) => error!("Error acquiring lock while requesting stop: {}", e),
        };
    }

    fn stop_requested(&self) -> bool {
        return match self.stop_requested.lock() {
            Ok(stop_requested) => *stop_requested,
            Err(e) => {
                error!("Error acquiring lock while testing stop_request: {}", e);
                false
            }
        };
    }

    /// Runs cycles until stopped and returns the number of completed cycles.
    /// Outstanding probe processes are killed before returning.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<u64, NetcheckError> {
        debug!("Running {} probes every {:?}", self.scheduler.states().len(), self.interval);

        let result = self.run_cycles(out);

        debug!("Shutting down {} outstanding probes", self.scheduler.running_count());
        self.scheduler.shutdown();

        for state in self.scheduler.states() {
            info!("Probe {}: {} cycles recorded", state.label(), state.get_history().recorded());
        }

        return result;
    }

    fn run_cycles<W: Write>(&mut self, out: &mut W) -> Result<u64, NetcheckError> {
        let mut cycles: u64 = 0;

        loop {
            let lines = self.renderer.render(out, self.scheduler.states())?;

            // the last frame stays on screen
            if self.stop_requested() {
                debug!("Stop requested after {} cycles", cycles);
                break;
            }

            if self.max_cycles > 0 && cycles >= self.max_cycles {
                debug!("Cycle limit of {} reached", self.max_cycles);
                break;
            }

            let dispatched = self.scheduler.dispatch_idle_probes()?;
            trace!("Cycle {}: dispatched {} probes, {} outstanding", cycles, dispatched, self.scheduler.running_count());

            sleep(self.interval);

            self.scheduler.poll_completions()?;
            self.renderer.rewind(out, lines)?;
            cycles += 1;
        }

        return Ok(cycles);
    }
}
