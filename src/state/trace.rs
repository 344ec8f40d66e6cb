use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;
use crate::state::Attempt;

/// Record of one probe run, in TTL order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRun {
    pub config: ProbeConfig,
    pub started_at: DateTime<Utc>,
    pub attempts: Vec<Attempt>,
    /// TTL at which the handshake first succeeded
    pub reached: Option<u8>,
}

impl TraceRun {
    pub fn new(config: ProbeConfig) -> Self {
        let capacity = config.max_ttl as usize + 1;
        Self {
            config,
            started_at: Utc::now(),
            attempts: Vec::with_capacity(capacity),
            reached: None,
        }
    }

    /// Append an attempt; the first success marks the run as reached
    pub fn push(&mut self, attempt: Attempt) {
        if attempt.is_success() && self.reached.is_none() {
            self.reached = Some(attempt.ttl);
        }
        self.attempts.push(attempt);
    }

    /// Number of attempts that did not connect
    pub fn timeouts(&self) -> usize {
        self.attempts.iter().filter(|a| !a.is_success()).count()
    }

    /// The successful attempt, if any
    pub fn success(&self) -> Option<&Attempt> {
        self.attempts.iter().find(|a| a.is_success())
    }
}
