use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::probe::{Connection, Connector};
use crate::state::{Attempt, TraceRun};

/// The probe engine sweeps the TTL from 0 to `max_ttl`, one connect at a time
///
/// It stops at the first completed handshake. Intermediate routers are never
/// identified: nothing listens for ICMP Time Exceeded, so a success at TTL `k`
/// only shows that the endpoint is reachable within `k` hops.
pub struct ProbeEngine<C> {
    config: ProbeConfig,
    connector: C,
    cancel: CancellationToken,
}

impl<C: Connector> ProbeEngine<C> {
    pub fn new(config: ProbeConfig, connector: C, cancel: CancellationToken) -> Self {
        Self {
            config,
            connector,
            cancel,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run the sweep, calling `on_attempt` once per finished attempt in TTL order
    ///
    /// Returns the collected run. Cancellation ends the sweep early; an
    /// attempt interrupted by cancellation is dropped without being reported.
    pub async fn run<F>(&self, mut on_attempt: F) -> TraceRun
    where
        F: FnMut(&Attempt),
    {
        let mut run = TraceRun::new(self.config.clone());

        for ttl in 0..=self.config.max_ttl {
            let attempt = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(ttl, "probe cancelled");
                    break;
                }
                attempt = self.probe(ttl) => attempt,
            };

            on_attempt(&attempt);

            let reached = attempt.is_success();
            run.push(attempt);
            if reached {
                info!(ttl, target = %self.config.target.addr, "destination reached");
                break;
            }
        }

        run
    }

    /// One attempt at `ttl`, bounded by its own deadline
    async fn probe(&self, ttl: u8) -> Attempt {
        let addr = self.config.target.addr;
        let timeout = self.config.timeout;

        let start = Instant::now();
        let result = tokio::time::timeout(timeout, self.connector.connect(addr, ttl)).await;
        let elapsed = start.elapsed();

        match result {
            Ok(Ok(conn)) => {
                let peer = conn.peer_addr().unwrap_or(addr);
                if let Err(e) = conn.close().await {
                    warn!(ttl, error = %e, "error closing connection");
                }
                Attempt::success(ttl, peer, elapsed)
            }
            Ok(Err(e)) => {
                debug!(ttl, error = %e, ?elapsed, "connect failed");
                Attempt::timed_out(ttl, e.to_string())
            }
            Err(_) => {
                debug!(ttl, ?timeout, "connect deadline exceeded");
                Attempt::timed_out(ttl, format!("no handshake within {:?}", timeout))
            }
        }
    }
}
