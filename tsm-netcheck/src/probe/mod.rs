mod kind;
pub use kind::ProbeKind;

mod definition;
pub use definition::{ProbeDefinition, ProbeRegistry};

mod outcome;
pub use outcome::Outcome;

mod history;
pub use history::History;

mod toolset;
pub use toolset::{Platform, ProbeCommand, ToolSet};

mod process;
pub use process::{ProcessDriver, Reaped, SystemDriver};

mod state;
pub use state::ProbeState;

mod scheduler;
pub use scheduler::ProbeScheduler;
