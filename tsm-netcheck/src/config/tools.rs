use serde::Deserialize;
use crate::probe::{Platform, ToolSet};


/// Overrides for the platform defaults of the probe utilities
#[derive(Deserialize, Debug, Default)]
pub struct Tools {
    ping: Option<String>,
    ping_timeout_s: Option<u32>,
    ping_failure_code: Option<i32>,
    host: Option<String>,
    host_failure_code: Option<i32>,
    dns_query_hostname: Option<String>,
}


impl Tools {
    pub fn build_toolset(&self, platform: Platform) -> ToolSet {
        let mut toolset = ToolSet::for_platform(platform);

        if let Some(ping) = &self.ping {
            toolset.set_ping_executable(ping.clone());
        }

        if let Some(timeout_s) = self.ping_timeout_s {
            toolset.set_ping_timeout_s(timeout_s);
        }

        if let Some(failure_code) = self.ping_failure_code {
            toolset.set_ping_failure_code(failure_code);
        }

        if let Some(host) = &self.host {
            toolset.set_host_executable(host.clone());
        }

        if let Some(failure_code) = self.host_failure_code {
            toolset.set_host_failure_code(failure_code);
        }

        if let Some(hostname) = &self.dns_query_hostname {
            toolset.set_dns_query_hostname(hostname.clone());
        }

        return toolset;
    }
}
