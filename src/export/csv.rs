use anyhow::Result;
use std::io::Write;

use crate::state::{Outcome, TraceRun};

/// Export a run to CSV format, one row per attempt
pub fn export_csv<W: Write>(run: &TraceRun, mut writer: W) -> Result<()> {
    writeln!(writer, "ttl,status,peer,elapsed_ms,reason")?;

    for attempt in &run.attempts {
        match &attempt.outcome {
            Outcome::Success { peer, elapsed } => writeln!(
                writer,
                "{},success,{},{:.3},",
                attempt.ttl,
                peer,
                elapsed.as_secs_f64() * 1000.0
            )?,
            Outcome::TimedOut { reason } => writeln!(
                writer,
                "{},timed_out,,,{}",
                attempt.ttl,
                escape_csv(reason)
            )?,
        }
    }

    Ok(())
}

/// Escape a string for CSV (quote if contains comma, quote, or newline)
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProbeConfig, Target};
    use crate::state::Attempt;
    use std::net::SocketAddr;
    use std::time::Duration;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_export_csv_rows() {
        let addr: SocketAddr = "[::1]:443".parse().unwrap();
        let config = ProbeConfig::new(Target::new("[::1]:443".into(), addr), 3, Duration::from_secs(2));
        let mut run = TraceRun::new(config);
        run.push(Attempt::timed_out(0, "refused, twice"));
        run.push(Attempt::success(1, addr, Duration::from_micros(2500)));

        let mut buf = Vec::new();
        export_csv(&run, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ttl,status,peer,elapsed_ms,reason");
        assert_eq!(lines[1], "0,timed_out,,,\"refused, twice\"");
        assert_eq!(lines[2], "1,success,[::1]:443,2.500,");
    }
}
