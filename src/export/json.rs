use anyhow::Result;
use std::io::Write;

use crate::state::TraceRun;

/// Export a run as pretty-printed JSON
pub fn export_json<W: Write>(run: &TraceRun, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, run)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProbeConfig, Target};
    use crate::state::Attempt;
    use std::net::SocketAddr;
    use std::time::Duration;

    #[test]
    fn test_export_json_roundtrip_fields() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let config = ProbeConfig::new(Target::new("127.0.0.1:8080".into(), addr), 4, Duration::from_secs(2));
        let mut run = TraceRun::new(config);
        run.push(Attempt::timed_out(0, "Invalid argument (os error 22)"));
        run.push(Attempt::success(1, addr, Duration::from_millis(1)));

        let mut buf = Vec::new();
        export_json(&run, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["reached"], 1);
        assert_eq!(value["config"]["target"]["original"], "127.0.0.1:8080");
        assert_eq!(value["attempts"][0]["status"], "timed_out");
        assert_eq!(value["attempts"][1]["peer"], "127.0.0.1:8080");

        let loaded: TraceRun = serde_json::from_slice(&buf).unwrap();
        assert_eq!(loaded.attempts, run.attempts);
    }
}
