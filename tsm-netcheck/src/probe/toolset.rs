use crate::error::NetcheckError;
use crate::probe::{ProbeDefinition, ProbeKind};


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Platform {
    Linux,
    MacOs,
}


impl Platform {
    /// Resolves the platform of the running host
    pub fn detect() -> Result<Platform, NetcheckError> {
        Platform::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Platform, NetcheckError> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            _ => Err(NetcheckError::UnsupportedPlatform(os.to_string())),
        }
    }
}


/// A fully resolved probe invocation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProbeCommand {
    pub executable: String,
    pub arguments: Vec<String>,
    pub failure_code: i32,
}


/// External utilities used by the probes, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ToolSet {
    ping_executable: String,
    ping_timeout_flag: String,
    ping_timeout_s: u32,
    ping_failure_code: i32,
    host_executable: String,
    host_failure_code: i32,
    dns_query_hostname: String,
}


impl ToolSet {
    pub fn for_platform(platform: Platform) -> ToolSet {
        // ping exits with 1 (Linux) or 2 (macOS) when no reply arrived,
        // other nonzero codes are usage or system errors.
        let (ping_executable, ping_timeout_flag, ping_failure_code) = match platform {
            Platform::Linux => ("/bin/ping", "-W", 1),
            Platform::MacOs => ("/sbin/ping", "-t", 2),
        };

        return ToolSet {
            ping_executable: ping_executable.to_string(),
            ping_timeout_flag: ping_timeout_flag.to_string(),
            ping_timeout_s: 5,
            ping_failure_code,
            host_executable: String::from("/usr/bin/host"),
            host_failure_code: 1,
            dns_query_hostname: String::from("plunk.org"),
        };
    }

    pub fn set_ping_executable(&mut self, executable: String) {
        self.ping_executable = executable;
    }

    pub fn set_ping_timeout_s(&mut self, timeout_s: u32) {
        self.ping_timeout_s = timeout_s;
    }

    pub fn set_ping_failure_code(&mut self, failure_code: i32) {
        self.ping_failure_code = failure_code;
    }

    pub fn set_host_executable(&mut self, executable: String) {
        self.host_executable = executable;
    }

    pub fn set_host_failure_code(&mut self, failure_code: i32) {
        self.host_failure_code = failure_code;
    }

    pub fn set_dns_query_hostname(&mut self, hostname: String) {
        self.dns_query_hostname = hostname;
    }

    pub fn failure_code(&self, kind: ProbeKind) -> i32 {
        match kind {
            ProbeKind::Ping => self.ping_failure_code,
            ProbeKind::DnsLookup => self.host_failure_code,
        }
    }

    pub fn command_for(&self, definition: &ProbeDefinition) -> ProbeCommand {
        let target = definition.get_target().to_string();

        match definition.get_kind() {
            ProbeKind::Ping => ProbeCommand {
                executable: self.ping_executable.clone(),
                arguments: vec![
                    String::from("-n"),
                    String::from("-c"),
                    String::from("1"),
                    String::from("-q"),
                    self.ping_timeout_flag.clone(),
                    self.ping_timeout_s.to_string(),
                    target,
                ],
                failure_code: self.ping_failure_code,
            },
            ProbeKind::DnsLookup => ProbeCommand {
                executable: self.host_executable.clone(),
                arguments: vec![
                    String::from("-t"),
                    String::from("a"),
                    self.dns_query_hostname.clone(),
                    target,
                ],
                failure_code: self.host_failure_code,
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_os_should_work() {
        assert_eq!(Platform::from_os("linux").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::MacOs);
    }

    #[test]
    fn from_os_when_unknown_should_return_error() {
        let result = Platform::from_os("windows");

        assert!(matches!(result, Err(NetcheckError::UnsupportedPlatform(ref os)) if os == "windows"));
    }

    #[test]
    fn command_for_ping_on_linux_should_work() {
        let toolset = ToolSet::for_platform(Platform::Linux);
        let definition = ProbeDefinition::new(ProbeKind::Ping, String::from("192.168.1.1"));

        let command = toolset.command_for(&definition);

        assert_eq!(command.executable, "/bin/ping");
        assert_eq!(command.arguments, vec!["-n", "-c", "1", "-q", "-W", "5", "192.168.1.1"]);
        assert_eq!(command.failure_code, 1);
    }

    #[test]
    fn command_for_ping_on_macos_should_work() {
        let toolset = ToolSet::for_platform(Platform::MacOs);
        let definition = ProbeDefinition::new(ProbeKind::Ping, String::from("8.8.8.8"));

        let command = toolset.command_for(&definition);

        assert_eq!(command.executable, "/sbin/ping");
        assert_eq!(command.arguments, vec!["-n", "-c", "1", "-q", "-t", "5", "8.8.8.8"]);
        assert_eq!(command.failure_code, 2);
    }

    #[test]
    fn command_for_dns_should_query_fixed_hostname() {
        let mut toolset = ToolSet::for_platform(Platform::Linux);
        toolset.set_dns_query_hostname(String::from("example.org"));
        let definition = ProbeDefinition::new(ProbeKind::DnsLookup, String::from("8.8.4.4"));

        let command = toolset.command_for(&definition);

        assert_eq!(command.executable, "/usr/bin/host");
        assert_eq!(command.arguments, vec!["-t", "a", "example.org", "8.8.4.4"]);
        assert_eq!(command.failure_code, 1);
    }

    #[test]
    fn setters_should_override_defaults() {
        let mut toolset = ToolSet::for_platform(Platform::Linux);
        toolset.set_ping_executable(String::from("/usr/bin/ping"));
        toolset.set_ping_timeout_s(2);
        toolset.set_ping_failure_code(3);
        toolset.set_host_failure_code(4);
        let definition = ProbeDefinition::new(ProbeKind::Ping, String::from("1.1.1.1"));

        let command = toolset.command_for(&definition);

        assert_eq!(command.executable, "/usr/bin/ping");
        assert_eq!(command.arguments[5], "2");
        assert_eq!(toolset.failure_code(ProbeKind::Ping), 3);
        assert_eq!(toolset.failure_code(ProbeKind::DnsLookup), 4);
    }
}
