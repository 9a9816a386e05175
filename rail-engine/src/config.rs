//! Server configuration from the environment.

use std::net::SocketAddr;

/// Which trains the server starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FleetSeed {
    /// The three demo trains with the standard composition
    #[default]
    Standard,
    /// No trains; every booking fails until some are added
    Empty,
}

impl FleetSeed {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(FleetSeed::Standard),
            "empty" => Ok(FleetSeed::Empty),
            _ => Err(ConfigError::UnknownFleet(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen address {value:?}: {message}")]
    InvalidAddr { value: String, message: String },

    #[error("unknown fleet seed {0:?} (expected \"standard\" or \"empty\")")]
    UnknownFleet(String),
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Initial fleet
    pub fleet: FleetSeed,
}

impl ServerConfig {
    /// Read `RAIL_ENGINE_ADDR` and `RAIL_ENGINE_FLEET`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("RAIL_ENGINE_ADDR") {
            config.addr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidAddr {
                    value: value.clone(),
                    message: e.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup("RAIL_ENGINE_FLEET") {
            config.fleet = FleetSeed::parse(&value)?;
        }

        Ok(config)
    }

    /// Set a custom listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            fleet: FleetSeed::Standard,
        }
    }
}
