use std::fmt;
use std::str::FromStr;
use serde::Deserialize;
use serde::de::Error;


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProbeKind {
    Ping,
    DnsLookup,
}


impl ProbeKind {
    /// Label shown in the first column of the table
    pub fn label(&self) -> &'static str {
        match self {
            ProbeKind::Ping => "Ping",
            ProbeKind::DnsLookup => "DNS",
        }
    }
}


impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}


impl<'de> Deserialize<'de> for ProbeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProbeKind::from_str(&s).map_err(Error::custom)
    }
}


impl FromStr for ProbeKind {
    type Err = String;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind.to_lowercase().as_str() {
            "ping" => {
                Ok(ProbeKind::Ping)
            }
            "dns" | "lookup" => {
                Ok(ProbeKind::DnsLookup)
            }
            _ => {
                Err(format!("Invalid probe kind: {}", kind))
            }
        }
    }
}
