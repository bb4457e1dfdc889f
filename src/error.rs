//! Error types and Result aliases for pasteport
//!
//! Only the edges of the crate can fail: loading configuration, snapshotting
//! the OS process table and driving clipboard tools. Extraction,
//! classification and planning never return errors; their callers turn edge
//! failures into the plain-paste fallback.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for pasteport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pasteport
#[derive(Debug)]
pub enum Error {
    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to save configuration file
    ConfigSaveFailed { path: PathBuf, reason: String },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    ConfigSerializationFailed { format: String, reason: String },

    /// Failed to parse configuration
    ConfigParseFailed { format: String, reason: String },

    // === Process snapshot errors ===
    /// The process table could not be read for a session
    ProcessSnapshotFailed { pid: u32, reason: String },

    /// The session's shell process does not exist (anymore)
    ProcessNotFound { pid: u32 },

    // === Clipboard errors ===
    /// No clipboard mechanism produced text
    ClipboardUnavailable { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigSaveFailed { path, reason } => {
                write!(f, "Failed to save config to '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // Process snapshot errors
            Error::ProcessSnapshotFailed { pid, reason } => {
                write!(f, "Failed to read foreground processes of pid {}: {}", pid, reason)
            }
            Error::ProcessNotFound { pid } => {
                write!(f, "Process {} not found", pid)
            }

            // Clipboard errors
            Error::ClipboardUnavailable { reason } => {
                write!(f, "Clipboard unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for Error {}
