//! Clipboard plumbing for text and rendered cards.
//!
//! Uses whichever system clipboard tool is installed, probed in order of
//! image capability. Without any tool, text still lands on the clipboard
//! through an OSC 52 escape sequence, and image copies degrade to writing
//! a temp file and copying its path.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolKind {
    WlCopy,
    Xclip,
    Xsel,
    Pbcopy,
}

/// A clipboard tool found on `PATH`.
#[derive(Debug, Clone)]
pub struct ClipboardTool {
    kind: ToolKind,
    path: PathBuf,
}

/// Probe `PATH` for a usable clipboard tool. Image-capable tools win.
pub fn detect() -> Option<ClipboardTool> {
    let candidates = [
        ("wl-copy", ToolKind::WlCopy),
        ("xclip", ToolKind::Xclip),
        ("xsel", ToolKind::Xsel),
        ("pbcopy", ToolKind::Pbcopy),
    ];
    candidates.iter().find_map(|(name, kind)| {
        which::which(name)
            .ok()
            .map(|path| ClipboardTool { kind: *kind, path })
    })
}

impl ClipboardTool {
    pub fn name(&self) -> &'static str {
        match self.kind {
            ToolKind::WlCopy => "wl-copy",
            ToolKind::Xclip => "xclip",
            ToolKind::Xsel => "xsel",
            ToolKind::Pbcopy => "pbcopy",
        }
    }

    /// Whether the tool can take PNG data directly.
    pub fn supports_image(&self) -> bool {
        matches!(self.kind, ToolKind::WlCopy | ToolKind::Xclip)
    }

    fn text_args(&self) -> &'static [&'static str] {
        match self.kind {
            ToolKind::WlCopy | ToolKind::Pbcopy => &[],
            ToolKind::Xclip => &["-selection", "clipboard"],
            ToolKind::Xsel => &["--clipboard", "--input"],
        }
    }

    fn image_args(&self) -> &'static [&'static str] {
        match self.kind {
            ToolKind::WlCopy => &["--type", PNG_MIME],
            ToolKind::Xclip => &["-selection", "clipboard", "-t", PNG_MIME],
            ToolKind::Xsel | ToolKind::Pbcopy => &[],
        }
    }

    pub async fn copy_text(&self, text: &str) -> Result<()> {
        self.pipe(self.text_args(), text.as_bytes()).await
    }

    pub async fn copy_image(&self, png: &[u8]) -> Result<()> {
        self.pipe(self.image_args(), png).await
    }

    async fn pipe(&self, args: &[&str], data: &[u8]) -> Result<()> {
        let mut child = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("spawning {}", self.name()))?;

        let mut stdin = child
            .stdin
            .take()
            .with_context(|| format!("{} provided no stdin", self.name()))?;
        stdin
            .write_all(data)
            .await
            .with_context(|| format!("writing to {}", self.name()))?;
        drop(stdin);

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for {}", self.name()))?;
        if !status.success() {
            bail!("{} exited with {status}", self.name());
        }
        Ok(())
    }
}

// ── High-level copy flows ─────────────────────────────────────────────────

/// How a card copy actually landed on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// PNG data went straight to the clipboard.
    Image,
    /// No image-capable tool: the card was written to `path` and the path
    /// copied as text.
    TextFallback { path: PathBuf },
}

/// Copy text, falling back to OSC 52 when no tool is installed.
pub async fn copy_text(text: &str) -> Result<()> {
    match detect() {
        Some(tool) => {
            tracing::debug!("copying text via {}", tool.name());
            tool.copy_text(text).await
        }
        None => {
            tracing::debug!("no clipboard tool on PATH, emitting OSC 52");
            emit_osc52(text)
        }
    }
}

/// Copy a rendered card. Degrades to a temp file plus path copy when no
/// tool on `PATH` accepts PNG data.
pub async fn copy_card(png: &[u8], now: chrono::DateTime<chrono::Utc>) -> Result<CopyOutcome> {
    if let Some(tool) = detect() {
        if tool.supports_image() {
            tool.copy_image(png).await?;
            return Ok(CopyOutcome::Image);
        }
    }

    let path = std::env::temp_dir().join(super::card_file_name(now));
    std::fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
    copy_text(&path.display().to_string()).await?;
    Ok(CopyOutcome::TextFallback { path })
}

/// OSC 52 clipboard write for terminals that honor it.
fn emit_osc52(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| stdout.flush())
        .context("writing OSC 52 sequence")
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        let seq = osc52_sequence("hello");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with('\x07'));
        assert!(seq.contains(&STANDARD.encode("hello")));
    }

    #[test]
    fn test_image_capability_by_tool() {
        let tool = |kind| ClipboardTool {
            kind,
            path: PathBuf::from("/usr/bin/test"),
        };
        assert!(tool(ToolKind::WlCopy).supports_image());
        assert!(tool(ToolKind::Xclip).supports_image());
        assert!(!tool(ToolKind::Xsel).supports_image());
        assert!(!tool(ToolKind::Pbcopy).supports_image());
    }

    #[test]
    fn test_tool_argument_tables() {
        let tool = ClipboardTool {
            kind: ToolKind::Xclip,
            path: PathBuf::from("/usr/bin/xclip"),
        };
        assert_eq!(tool.text_args(), ["-selection", "clipboard"]);
        assert_eq!(
            tool.image_args(),
            ["-selection", "clipboard", "-t", "image/png"]
        );
    }
}
