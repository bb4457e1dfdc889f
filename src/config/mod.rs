//! Configuration management for pasteport
//!
//! Every designated token the classifier and planner rely on lives here:
//! the wrapper and remote-shell command names, the upload root, the transfer
//! and manual-copy command templates and the clipboard tool chain. Defaults
//! match kitty's `kitten ssh` / `kitten transfer` workflow.

pub mod loader;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for pasteport
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote destination and command templates
    pub upload: UploadConfig,

    /// Process names that mark a session as remote
    pub detection: DetectionConfig,

    /// Clipboard access
    pub clipboard: ClipboardConfig,
}

impl Config {
    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file without validating it, picking the format
    /// from its extension
    pub fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "JSON".to_string(),
                reason: e.to_string(),
            })?,
            _ => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            })?,
        };

        Ok(config)
    }

    /// Check values the planner and clipboard reader depend on
    pub fn validate(&self) -> Result<()> {
        let root = self.upload.upload_root.trim();
        if !root.starts_with('/') {
            return Err(Error::ConfigValidationFailed {
                field: "upload.upload_root".to_string(),
                reason: "Upload root must be an absolute remote path".to_string(),
            });
        }
        if root.chars().any(char::is_whitespace) {
            return Err(Error::ConfigValidationFailed {
                field: "upload.upload_root".to_string(),
                reason: "Upload root cannot contain whitespace".to_string(),
            });
        }

        let required = [
            ("upload.transfer_command", &self.upload.transfer_command),
            ("upload.manual_copy_command", &self.upload.manual_copy_command),
            ("upload.host_placeholder", &self.upload.host_placeholder),
            ("detection.wrapper_command", &self.detection.wrapper_command),
            ("detection.remote_shell_command", &self.detection.remote_shell_command),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::ConfigValidationFailed {
                    field: field.to_string(),
                    reason: "Value cannot be empty".to_string(),
                });
            }
        }

        if self.detection.wrapper_subcommands.is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "detection.wrapper_subcommands".to_string(),
                reason: "At least one wrapper subcommand is required".to_string(),
            });
        }

        if self.clipboard.timeout_ms == 0 || self.clipboard.timeout_ms > 30_000 {
            return Err(Error::ConfigValidationFailed {
                field: "clipboard.timeout_ms".to_string(),
                reason: "Clipboard timeout must be between 1 and 30000 ms".to_string(),
            });
        }

        if self.clipboard.mechanisms.iter().any(|argv| argv.is_empty()) {
            return Err(Error::ConfigValidationFailed {
                field: "clipboard.mechanisms".to_string(),
                reason: "Clipboard mechanisms must name a program".to_string(),
            });
        }

        Ok(())
    }
}

/// Remote destination and command templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Remote directory receiving uploads
    pub upload_root: String,

    /// Command run on the remote side to pull one file: `<cmd> <local> <remote>`
    pub transfer_command: String,

    /// Command suggested in the manual-copy hint for plain remote sessions
    pub manual_copy_command: String,

    /// Host shown in the hint when none could be extracted
    pub host_placeholder: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_root: "/tmp/uploads".to_string(),
            transfer_command: "kitten transfer --direction=upload".to_string(),
            manual_copy_command: "scp".to_string(),
            host_placeholder: "HOST".to_string(),
        }
    }
}

/// Process names that mark a session as remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Remote-shell wrapper offering a transfer subcommand
    pub wrapper_command: String,

    /// `argv[1]` values showing the wrapper launched a remote session
    pub wrapper_subcommands: Vec<String>,

    /// Plain remote shell
    pub remote_shell_command: String,

    /// Remote multiplexing clients (no host extraction)
    pub multiplexer_commands: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            wrapper_command: "kitten".to_string(),
            wrapper_subcommands: vec!["ssh".to_string(), "run-shell".to_string()],
            remote_shell_command: "ssh".to_string(),
            multiplexer_commands: vec!["mosh".to_string(), "mosh-client".to_string()],
        }
    }
}

/// Clipboard access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Deadline for each external clipboard tool in milliseconds
    pub timeout_ms: u64,

    /// Try the native clipboard before the external tools
    pub use_native: bool,

    /// External tools tried in order, each as a full argument vector
    pub mechanisms: Vec<Vec<String>>,
}

impl ClipboardConfig {
    /// Per-tool deadline
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        let argv = |parts: &[&str]| parts.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        Self {
            timeout_ms: 2000,
            use_native: true,
            mechanisms: vec![
                argv(&["pbpaste"]),
                argv(&["xclip", "-selection", "clipboard", "-o"]),
                argv(&["xsel", "--clipboard", "--output"]),
                argv(&["wl-paste"]),
            ],
        }
    }
}
