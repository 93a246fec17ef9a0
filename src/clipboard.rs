/*!
 * Clipboard support for codemd
 *
 * Copies the generated document to the system clipboard by piping it to
 * whichever external clipboard tool the platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the clipboard command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Copy text to the system clipboard.
///
/// Tries the platform's clipboard commands in order of preference and
/// pipes the text to the first one that exists on PATH.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (cmd, args) in candidate_commands() {
        if command_exists(cmd) {
            return pipe_to_command(cmd, args, text);
        }
    }
    Err(ClipboardError::NoClipboardFound)
}

/// Check if a command exists on PATH
pub fn command_exists(command: &str) -> bool {
    env::var("PATH")
        .map(|paths| {
            paths
                .split(':')
                .any(|dir| Path::new(dir).join(command).exists())
        })
        .unwrap_or(false)
}

/// Clipboard commands to try, most specific platform first
fn candidate_commands() -> Vec<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        vec![("pbcopy", &[][..])]
    } else if cfg!(target_os = "windows") || env::var("WSL_DISTRO_NAME").is_ok() {
        vec![("clip.exe", &[][..])]
    } else {
        // Wayland first, then X11 mechanisms
        vec![
            ("wl-copy", &[][..]),
            ("xsel", &["-b", "-i"][..]),
            ("xclip", &["-selection", "clipboard", "-in"][..]),
        ]
    }
}

fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|_| ClipboardError::CommandFailed(format!("Failed to spawn {}", cmd)))?;

    let stdin = child.stdin.as_mut().ok_or_else(|| {
        ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
    })?;

    stdin
        .write_all(text.as_bytes())
        .map_err(|_| ClipboardError::CommandFailed(format!("Failed to write to {}", cmd)))?;

    let status = child
        .wait()
        .map_err(|_| ClipboardError::CommandFailed(format!("Failed to wait for {}", cmd)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("ls"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_candidate_commands_nonempty() {
        assert!(!candidate_commands().is_empty());
    }
}
