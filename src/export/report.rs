use std::io::Write;

use crate::config::Target;
use crate::state::{Attempt, Outcome};

/// Write the banner printed once before probing starts
pub fn write_header<W: Write>(target: &Target, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "Traceroute to '{}'", target.original)
}

/// Write the line for one attempt
///
/// `" 3 10.0.0.1:80 (10.0.0.1:80) 1.234ms"` on success, `" 3 Timeout out"` otherwise.
pub fn write_attempt<W: Write>(attempt: &Attempt, mut writer: W) -> std::io::Result<()> {
    write!(writer, "{:2} ", attempt.ttl)?;
    match &attempt.outcome {
        Outcome::Success { peer, elapsed } => {
            writeln!(writer, "{} ({}) {:?}", peer, peer, elapsed)
        }
        Outcome::TimedOut { .. } => writeln!(writer, "Timeout out"),
    }
}

/// Render one attempt line to a string (without trailing newline)
pub fn format_attempt(attempt: &Attempt) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_attempt(attempt, &mut buf);
    String::from_utf8_lossy(&buf).trim_end().to_string()
}
