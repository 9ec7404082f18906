use std::fs;
use std::time::Duration;
use serde::Deserialize;

use crate::config::{Application, Display, Probe, Scheduler, Tools};
use crate::probe::{Platform, ProbeRegistry, ToolSet};
use crate::render::TableRenderer;


const BUILTIN_CONFIGURATION: &str = include_str!("../../resources/tsm-netcheck.toml");


#[derive(Deserialize, Debug)]
pub struct Configuration {
    #[serde(default)]
    application: Application,
    #[serde(default)]
    scheduler: Scheduler,
    #[serde(default)]
    display: Display,
    #[serde(default)]
    tools: Tools,
    probes: Vec<Probe>,
}


impl Configuration {
    pub fn from_file(file_path: String) -> Result<Configuration, String> {
        return match fs::read_to_string(file_path) {
            Ok(content) => {
                Configuration::from_string(content)
            },
            Err(error) => {
                Err(format!("Error reading configuration file: {}", error))
            }
        }
    }

    pub fn from_string(content: String) -> Result<Configuration, String> {
        let configuration: Configuration = match toml::from_str(&content) {
            Ok(configuration) => configuration,
            Err(error) => {
                return Err(format!("Error parsing configuration file: {}", error));
            }
        };

        if configuration.probes.is_empty() {
            return Err(String::from("Error parsing configuration file: no probes configured"));
        }

        configuration.scheduler.get_interval()?;

        // a capped history must still fill the history column
        if let Some(limit) = configuration.get_history_limit() {
            let column_width = TableRenderer::column_width_for(&configuration.build_registry());
            let budget = configuration.get_terminal_width().saturating_sub(column_width);
            if limit < budget {
                return Err(format!(
                    "Error parsing configuration file: history_limit {} is below the display width of {}",
                    limit, budget,
                ));
            }
        }

        return Ok(configuration);
    }

    /// The probe table compiled into the binary
    pub fn builtin() -> Result<Configuration, String> {
        Configuration::from_string(String::from(BUILTIN_CONFIGURATION))
    }

    pub fn get_application(&self) -> &Application {
        return &self.application;
    }

    pub fn get_interval(&self) -> Result<Duration, String> {
        return self.scheduler.get_interval();
    }

    pub fn get_history_limit(&self) -> Option<usize> {
        return self.scheduler.get_history_limit();
    }

    pub fn get_terminal_width(&self) -> usize {
        return self.display.get_terminal_width();
    }

    pub fn build_registry(&self) -> ProbeRegistry {
        let definitions = self.probes
            .iter()
            .map(|probe| probe.build_definition())
            .collect();

        return ProbeRegistry::new(definitions);
    }

    pub fn build_toolset(&self, platform: Platform) -> ToolSet {
        return self.tools.build_toolset(platform);
    }
}
