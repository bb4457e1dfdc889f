//! Clipboard reading
//!
//! Tries the native clipboard first, then each configured external tool
//! (`pbpaste`, `xclip`, `xsel`, `wl-paste` by default) in order. Every
//! mechanism runs under the same deadline. Tools are killed when they
//! overrun; a stuck native read is abandoned on its blocking thread. The first
//! non-empty answer wins; total failure reads as an empty clipboard.

use crate::config::ClipboardConfig;
use crate::error::{Error, Result};
use crate::platform::traits::ClipboardOps;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Failure of a single clipboard mechanism
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("native clipboard: {0}")]
    Native(#[from] arboard::Error),

    #[error("native clipboard task failed: {0}")]
    NativeTask(#[from] tokio::task::JoinError),

    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}")]
    Failed {
        tool: String,
        status: std::process::ExitStatus,
    },

    #[error("'{tool}' timed out after {timeout:?}")]
    Timeout { tool: String, timeout: Duration },

    #[error("'{tool}' returned no text")]
    Empty { tool: String },
}

type NativeSource = fn() -> std::result::Result<String, ClipboardError>;

const NATIVE_TOOL: &str = "native";

/// Clipboard reader driven by [`ClipboardConfig`]
#[derive(Debug, Clone)]
pub struct ClipboardReader {
    config: ClipboardConfig,
    native: NativeSource,
}

impl ClipboardReader {
    /// Create a reader for the given mechanisms and deadline
    pub fn new(config: ClipboardConfig) -> Self {
        Self {
            config,
            native: read_native,
        }
    }

    /// Read the clipboard, reporting why every mechanism failed
    ///
    /// Must not be called from inside an async runtime; it drives its own
    /// single-threaded runtime for every mechanism.
    pub fn try_read(&self) -> Result<String> {
        let mut failures = Vec::new();

        if self.config.use_native || !self.config.mechanisms.is_empty() {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| Error::ClipboardUnavailable {
                    reason: format!("cannot start runtime: {}", e),
                })?;

            let timeout = self.config.timeout();
            let outcome = runtime.block_on(async {
                if self.config.use_native {
                    match run_native(self.native, timeout).await {
                        Ok(text) => return Some(text),
                        Err(e) => failures.push(e),
                    }
                }
                for argv in &self.config.mechanisms {
                    match run_tool(argv, timeout).await {
                        Ok(text) => return Some(text),
                        Err(e) => failures.push(e),
                    }
                }
                None
            });
            // A native read past its deadline still holds a blocking thread
            runtime.shutdown_background();

            if let Some(text) = outcome {
                return Ok(text);
            }
        }

        for failure in &failures {
            debug!("Clipboard mechanism failed: {}", failure);
        }
        Err(Error::ClipboardUnavailable {
            reason: format!("{} mechanism(s) failed", failures.len()),
        })
    }
}

impl ClipboardOps for ClipboardReader {
    fn read_text(&self) -> String {
        self.try_read().unwrap_or_else(|e| {
            warn!("{}", e);
            String::new()
        })
    }
}

fn read_native() -> std::result::Result<String, ClipboardError> {
    let text = arboard::Clipboard::new()?.get_text()?;
    if text.is_empty() {
        return Err(ClipboardError::Empty {
            tool: NATIVE_TOOL.to_string(),
        });
    }
    Ok(text)
}

async fn run_native(
    source: NativeSource,
    timeout: Duration,
) -> std::result::Result<String, ClipboardError> {
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(source)).await {
        Ok(joined) => {
            let text = joined??;
            trace!("Clipboard read natively ({} bytes)", text.len());
            Ok(text)
        }
        Err(_) => Err(ClipboardError::Timeout {
            tool: NATIVE_TOOL.to_string(),
            timeout,
        }),
    }
}

async fn run_tool(argv: &[String], timeout: Duration) -> std::result::Result<String, ClipboardError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(ClipboardError::Empty {
            tool: String::new(),
        });
    };

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(ClipboardError::Spawn {
                tool: program.clone(),
                source,
            })
        }
        Err(_) => {
            return Err(ClipboardError::Timeout {
                tool: program.clone(),
                timeout,
            })
        }
    };

    if !output.status.success() {
        return Err(ClipboardError::Failed {
            tool: program.clone(),
            status: output.status,
        });
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    if text.is_empty() {
        return Err(ClipboardError::Empty {
            tool: program.clone(),
        });
    }

    trace!("Clipboard read via '{}' ({} bytes)", program, text.len());
    Ok(text)
}
