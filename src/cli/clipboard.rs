//! Clipboard access through the platform's command-line tools

use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{KeysmithError, Result};

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Pipes text into the first clipboard tool that works on this platform
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
const TOOLS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const TOOLS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut failures = Vec::new();

        for (program, args) in TOOLS {
            match pipe_to(program, args, text) {
                Ok(()) => {
                    debug!("copied to clipboard via {}", program);
                    return Ok(());
                }
                Err(e) => {
                    debug!("clipboard tool {} failed: {}", program, e);
                    failures.push(format!("{}: {}", program, e));
                }
            }
        }

        Err(KeysmithError::Clipboard(failures.join("; ")))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Close stdin and reap the child even when the write fails
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait()?;
    written?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::new(io::ErrorKind::Other, format!("exited with {}", status)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_to_tool_reading_stdin() {
        assert!(pipe_to("cat", &[], "ssh-rsa AAAA test").is_ok());
    }

    #[test]
    fn test_pipe_to_tool_ignoring_stdin_fails() {
        // Far more than a pipe buffer, so the write hits a closed pipe
        let text = "x".repeat(4 * 1024 * 1024);
        assert!(pipe_to("true", &[], &text).is_err());
    }

    #[test]
    fn test_pipe_to_failing_tool() {
        assert!(pipe_to("false", &[], "").is_err());
        assert!(pipe_to("keysmith-no-such-tool", &[], "").is_err());
    }
}
