use clap::{ArgAction, Parser};
use std::time::Duration;

use tcp_ttl_probe::config::{AddrFamily, DEFAULT_ADDR, DEFAULT_MAX_TTL, DEFAULT_TIMEOUT_SECS};

/// Find how many hops away a TCP endpoint is by sweeping the TTL on connect attempts
#[derive(Parser, Debug, Clone)]
#[command(name = "tcp-ttl-probe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Combined host:port to connect to ([v6]:port for IPv6 literals)
    #[arg(long = "addr", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Maximum TTL value to use
    #[arg(long = "ttl", default_value_t = DEFAULT_MAX_TTL)]
    pub max_ttl: u8,

    /// Number of seconds before an attempt times out
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Force IPv4
    #[arg(short = '4', long = "ipv4", conflicts_with = "ipv6")]
    pub ipv4: bool,

    /// Force IPv6
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// Output JSON after the run instead of per-attempt lines
    #[arg(long = "json", conflicts_with = "csv")]
    pub json: bool,

    /// Output CSV after the run instead of per-attempt lines
    #[arg(long = "csv")]
    pub csv: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Requested address family
    pub fn family(&self) -> AddrFamily {
        if self.ipv4 {
            AddrFamily::V4
        } else if self.ipv6 {
            AddrFamily::V6
        } else {
            AddrFamily::Any
        }
    }

    /// Check if running in batch mode (output after the run)
    pub fn is_batch_mode(&self) -> bool {
        self.json || self.csv
    }

    /// Validate arguments
    pub fn validate(&self) -> Result<(), String> {
        if self.ipv4 && self.ipv6 {
            return Err("Cannot specify both -4 and -6".into());
        }

        if self.timeout == 0 {
            return Err("Timeout must be positive".into());
        }

        if self.max_ttl == 0 {
            return Err("Max TTL must be at least 1".into());
        }

        Ok(())
    }
}
