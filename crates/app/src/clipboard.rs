use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use istilam_core::{Clipboard, ClipboardError};

/// Clipboard helpers tried in order, with the arguments that make them read stdin.
const TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// Pipes text into whichever platform clipboard tool is installed.
pub struct SystemClipboard {
    program: PathBuf,
    args: &'static [&'static str],
}

impl SystemClipboard {
    pub fn detect() -> Result<Self, ClipboardError> {
        TOOLS
            .iter()
            .find_map(|&(name, args)| {
                which::which(name).ok().map(|program| Self { program, args })
            })
            .ok_or(ClipboardError::Unavailable)
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ClipboardError::Write(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::Write(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        if !output.status.success() {
            return Err(ClipboardError::Write(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        tracing::debug!(tool = %self.program.display(), "report copied");
        Ok(())
    }
}
