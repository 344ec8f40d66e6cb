use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::error::ConfigError;

/// Default target when none is given
pub const DEFAULT_ADDR: &str = "127.0.0.1:80";

/// Default maximum TTL
pub const DEFAULT_MAX_TTL: u8 = 64;

/// Default per-attempt timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// Address family restriction for target resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AddrFamily {
    /// Any family, IPv4 preferred
    #[default]
    Any,
    V4,
    V6,
}

impl AddrFamily {
    fn accepts(self, ip: &IpAddr) -> bool {
        match self {
            AddrFamily::Any => true,
            AddrFamily::V4 => ip.is_ipv4(),
            AddrFamily::V6 => ip.is_ipv6(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            AddrFamily::Any => "IP",
            AddrFamily::V4 => "IPv4",
            AddrFamily::V6 => "IPv6",
        }
    }
}

/// A validated probe target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// The string the user typed
    pub original: String,
    /// Resolved socket address
    pub addr: SocketAddr,
}

impl Target {
    pub fn new(original: String, addr: SocketAddr) -> Self {
        Self { original, addr }
    }
}

/// Immutable configuration for one probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub target: Target,
    /// Highest TTL to try (inclusive; the sweep starts at 0)
    pub max_ttl: u8,
    /// Deadline for each connect attempt
    #[serde(with = "duration_serde")]
    pub timeout: Duration,
}

impl ProbeConfig {
    pub fn new(target: Target, max_ttl: u8, timeout: Duration) -> Self {
        Self {
            target,
            max_ttl,
            timeout,
        }
    }
}

/// Parse and resolve a `host:port` string into a [`Target`].
///
/// IPv6 literals must be bracketed (`[::1]:443`). Hosts that are not IP
/// literals go through the system resolver; when `family` is `Any` an IPv4
/// result is preferred.
pub fn parse_target(input: &str, family: AddrFamily) -> Result<Target, ConfigError> {
    let (host, port_str) = split_host_port(input)?;

    let port: u16 = match port_str.parse::<u32>() {
        Ok(p) if (1..=65535).contains(&p) => p as u16,
        _ => return Err(ConfigError::InvalidPort(port_str.to_string())),
    };

    if let Ok(ip) = host.parse::<IpAddr>() {
        if !family.accepts(&ip) {
            return Err(ConfigError::FamilyMismatch {
                ip: ip.to_string(),
                family: family.label(),
            });
        }
        return Ok(Target::new(input.to_string(), SocketAddr::new(ip, port)));
    }

    // Dotted digits that failed to parse are a bad literal, not a hostname
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(ConfigError::InvalidIp(host.to_string()));
    }

    let ip = resolve_host(host, port, family)?;
    Ok(Target::new(input.to_string(), SocketAddr::new(ip, port)))
}

/// Split `host:port`, accepting `[v6]:port`
fn split_host_port(input: &str) -> Result<(&str, &str), ConfigError> {
    let invalid = || ConfigError::InvalidAddress(input.to_string());

    let (host, port) = input.rsplit_once(':').ok_or_else(invalid)?;

    let host = if let Some(inner) = host.strip_prefix('[') {
        inner.strip_suffix(']').ok_or_else(invalid)?
    } else if host.contains(':') || host.contains(['[', ']']) {
        return Err(invalid());
    } else {
        host
    };

    if host.is_empty() {
        return Err(invalid());
    }

    Ok((host, port))
}

fn resolve_host(host: &str, port: u16, family: AddrFamily) -> Result<IpAddr, ConfigError> {
    let addrs: Vec<IpAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| ConfigError::Resolve {
            host: host.to_string(),
            reason: e.to_string(),
        })?
        .map(|s| s.ip())
        .filter(|ip| family.accepts(ip))
        .collect();

    // Prefer IPv4 by default if no preference
    if family == AddrFamily::Any
        && let Some(v4) = addrs.iter().find(|ip| ip.is_ipv4())
    {
        return Ok(*v4);
    }

    addrs.first().copied().ok_or_else(|| ConfigError::NoAddress {
        host: host.to_string(),
        family: family.label(),
    })
}

/// Serde helper for Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
