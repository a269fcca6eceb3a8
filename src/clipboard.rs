use std::io;
use std::process::Stdio;

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

type Tool = (&'static str, &'static [&'static str]);

/// System clipboard tools, tried in order.
const CLIPBOARD_TOOLS: &[Tool] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// How the text was handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// A clipboard tool accepted the text.
    System(&'static str),
    /// OSC 52 was written; whether the terminal honours it is unknown.
    Terminal,
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found in PATH")]
    NoTool,
    #[error("{tool} exited with {status}")]
    ToolFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("clipboard tool {tool} failed: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("terminal clipboard sequence failed: {0}")]
    Terminal(#[source] io::Error),
}

/// Copy `text`, falling back to the terminal's OSC 52 sequence when no
/// system clipboard tool works.
pub async fn copy(text: &str) -> Result<CopyMethod, ClipboardError> {
    match copy_with_tools(text, CLIPBOARD_TOOLS).await {
        Ok(tool) => Ok(CopyMethod::System(tool)),
        Err(err) => {
            tracing::warn!(error = %err, "system clipboard unavailable, using terminal fallback");
            copy_with_terminal(text)?;
            Ok(CopyMethod::Terminal)
        }
    }
}

/// Try every installed tool in order; the last failure is returned.
async fn copy_with_tools(text: &str, tools: &[Tool]) -> Result<&'static str, ClipboardError> {
    let mut last_err = ClipboardError::NoTool;

    for &(tool, args) in tools {
        if which::which(tool).is_err() {
            continue;
        }
        match copy_with_tool(text, tool, args).await {
            Ok(()) => {
                tracing::debug!(tool, "copied with system clipboard tool");
                return Ok(tool);
            }
            Err(err) => {
                tracing::debug!(tool, error = %err, "clipboard tool failed");
                last_err = err;
            }
        }
    }

    Err(last_err)
}

async fn copy_with_tool(
    text: &str,
    tool: &'static str,
    args: &'static [&'static str],
) -> Result<(), ClipboardError> {
    let spawn_err = |source: io::Error| ClipboardError::Spawn { tool, source };

    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_err)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await.map_err(spawn_err)?;
        stdin.shutdown().await.map_err(spawn_err)?;
    }

    let status = child.wait().await.map_err(spawn_err)?;
    if !status.success() {
        return Err(ClipboardError::ToolFailed { tool, status });
    }
    Ok(())
}

fn copy_with_terminal(text: &str) -> Result<(), ClipboardError> {
    execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text))
        .map_err(ClipboardError::Terminal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_are_listed_once() {
        let mut names: Vec<_> = CLIPBOARD_TOOLS.iter().map(|(t, _)| *t).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CLIPBOARD_TOOLS.len());
    }

    #[test]
    fn errors_name_the_tool() {
        let err = ClipboardError::Spawn {
            tool: "xclip",
            source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        assert_eq!(err.to_string(), "clipboard tool xclip failed: pipe closed");
    }

    #[tokio::test]
    async fn missing_tools_report_no_tool() {
        let tools: &[Tool] = &[("calendar-link-no-such-tool", &[])];
        let err = copy_with_tools("x", tools).await.unwrap_err();
        assert!(matches!(err, ClipboardError::NoTool));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_tool_falls_through_to_next_one() {
        let tools: &[Tool] = &[("false", &[]), ("cat", &[])];
        let tool = copy_with_tools("https://example.com", tools).await.unwrap();
        assert_eq!(tool, "cat");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn last_failure_is_returned_when_every_tool_fails() {
        let tools: &[Tool] = &[("false", &[])];
        let err = copy_with_tools("x", tools).await.unwrap_err();
        assert!(matches!(
            err,
            ClipboardError::ToolFailed { tool: "false", .. } | ClipboardError::Spawn { tool: "false", .. }
        ));
    }
}
