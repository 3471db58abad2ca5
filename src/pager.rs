//! Output through an external pager
//!
//! When the pager is on, output is piped into `$PAGER` (`less` when unset).
//! If the pager cannot be started the text goes to stdout instead. Once it
//! has started, the pager owns the output even if it exits early.

use std::io::Write;
use std::process::{Child, Command, Stdio};

use tracing::warn;

use crate::error::Result;

/// Pager used when `$PAGER` is unset or empty
pub const DEFAULT_PAGER: &str = "less";

/// Pager command line from an optional `$PAGER` value
///
/// # Returns
/// * `(String, Vec<String>)` - Program and its arguments
pub fn pager_command(env_value: Option<&str>) -> (String, Vec<String>) {
    let mut parts = env_value
        .map(str::split_whitespace)
        .into_iter()
        .flatten()
        .map(str::to_string);

    match parts.next() {
        Some(program) => (program, parts.collect()),
        None => (DEFAULT_PAGER.to_string(), Vec::new()),
    }
}

/// Print `text` followed by a newline, through the pager when enabled
///
/// # Arguments
/// * `text` - Text to show
/// * `use_pager` - Whether to pipe through the pager
pub fn print_output(text: &str, use_pager: bool) -> Result<()> {
    if use_pager {
        let env_value = std::env::var("PAGER").ok();
        let (program, args) = pager_command(env_value.as_deref());
        match spawn_pager(&program, &args) {
            Ok(child) => return Ok(feed_pager(child, text)?),
            Err(e) => warn!(pager = %program, error = %e, "pager failed to start, writing to stdout"),
        }
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

fn spawn_pager(program: &str, args: &[String]) -> std::io::Result<Child> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
}

/// Write `text` to the pager and wait for it to exit
///
/// The child is reaped even when the write fails.
fn feed_pager(mut child: Child, text: &str) -> std::io::Result<()> {
    let written = match child.stdin.take() {
        // The user may quit the pager before reading everything
        Some(mut stdin) => match writeln!(stdin, "{text}") {
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        },
        None => Ok(()),
    };

    // stdin is dropped by now, so the pager sees EOF
    child.wait()?;
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pager() {
        assert_eq!(pager_command(None), ("less".to_string(), Vec::new()));
        assert_eq!(pager_command(Some("  ")), ("less".to_string(), Vec::new()));
    }

    #[test]
    fn test_pager_with_arguments() {
        assert_eq!(
            pager_command(Some("less -R -F")),
            ("less".to_string(), vec!["-R".to_string(), "-F".to_string()])
        );
    }

    #[test]
    fn test_missing_pager_program_is_an_error() {
        assert!(spawn_pager("fscli-no-such-pager", &[]).is_err());
    }

    #[test]
    fn test_pager_reads_all_text() {
        let args = vec!["-c".to_string(), "cat > /dev/null".to_string()];
        let child = spawn_pager("sh", &args).unwrap();
        assert!(feed_pager(child, "hello").is_ok());
    }

    #[test]
    fn test_pager_quitting_early_is_not_an_error() {
        let child = spawn_pager("true", &[]).unwrap();
        assert!(feed_pager(child, &"x".repeat(1 << 20)).is_ok());
    }
}
