//! Error types for target validation.
//!
//! Only configuration problems are errors in this crate. Transport failures
//! during probing are folded into the attempt outcome by the engine and never
//! surface here.

use thiserror::Error;

/// Errors raised while turning user input into a probe target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Input is not of the form `host:port` (or `[v6]:port`).
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Port is not a number in 1..=65535.
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// Host looks like an IPv4 literal but does not parse as one.
    #[error("invalid IP: {0}")]
    InvalidIp(String),

    /// Hostname lookup failed.
    #[error("failed to resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    /// Lookup succeeded but produced no address of the requested family.
    #[error("no {family} address found for {host}")]
    NoAddress { host: String, family: &'static str },

    /// An IP literal of one family was given while the other was forced.
    #[error("{ip} is not an {family} address")]
    FamilyMismatch { ip: String, family: &'static str },
}
