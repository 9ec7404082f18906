mod configuration;
pub use configuration::Configuration;

mod application;
pub use application::Application;

mod log_level;
pub use log_level::LogLevel;

mod scheduler;
pub use scheduler::Scheduler;

mod display;
pub use display::Display;

mod tools;
pub use tools::Tools;

mod probe;
pub use probe::Probe;
