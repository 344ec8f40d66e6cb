use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Result of a single connect attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Handshake completed
    Success {
        peer: SocketAddr,
        #[serde(with = "duration_serde")]
        elapsed: Duration,
    },
    /// Connect failed or hit the deadline. All failure kinds land here.
    TimedOut { reason: String },
}

/// One TTL-scoped connect trial and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub ttl: u8,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Attempt {
    pub fn success(ttl: u8, peer: SocketAddr, elapsed: Duration) -> Self {
        Self {
            ttl,
            outcome: Outcome::Success { peer, elapsed },
        }
    }

    pub fn timed_out(ttl: u8, reason: impl Into<String>) -> Self {
        Self {
            ttl,
            outcome: Outcome::TimedOut {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        match self.outcome {
            Outcome::Success { peer, .. } => Some(peer),
            Outcome::TimedOut { .. } => None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self.outcome {
            Outcome::Success { elapsed, .. } => Some(elapsed),
            Outcome::TimedOut { .. } => None,
        }
    }
}

/// Serde helper for Duration (float seconds)
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
