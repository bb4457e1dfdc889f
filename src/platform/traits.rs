//! Platform-specific operation traits
//!
//! The capabilities the dispatcher consumes from the host machine. Keeping
//! them behind traits lets tests and embedding terminals substitute their
//! own sources.

use crate::error::Result;
use crate::models::ProcessDescriptor;

/// Best-effort clipboard access
pub trait ClipboardOps: Send + Sync {
    /// Current clipboard text, or an empty string when nothing could be read
    ///
    /// Never blocks longer than the configured per-mechanism deadline times
    /// the number of mechanisms, the native clipboard counting as one.
    fn read_text(&self) -> String;
}

/// Foreground process snapshots
pub trait ProcessOps: Send + Sync {
    /// Foreground processes of the terminal that `shell_pid` runs in,
    /// oldest first so a wrapper precedes the processes it spawned
    fn foreground_processes(&self, shell_pid: u32) -> Result<Vec<ProcessDescriptor>>;
}
