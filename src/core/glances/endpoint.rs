use std::fmt;

/// REST endpoints consumed on the Glances host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Cpu,
    Mem,
    Sensors,
    Fs,
    Uptime,
    Network,
    Load,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Cpu => "/api/4/cpu",
            Endpoint::Mem => "/api/4/mem",
            Endpoint::Sensors => "/api/4/sensors",
            Endpoint::Fs => "/api/4/fs",
            Endpoint::Uptime => "/api/4/uptime",
            Endpoint::Network => "/api/4/network",
            Endpoint::Load => "/api/4/load",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
