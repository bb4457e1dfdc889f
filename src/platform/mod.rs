//! Platform abstraction layer
//!
//! Clipboard reading and foreground-process snapshots differ per OS. The
//! rest of the crate only sees the traits in [`traits`].

pub mod clipboard;
mod traits;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod generic;

pub use clipboard::{ClipboardError, ClipboardReader};
pub use traits::*;

use crate::config::ClipboardConfig;

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the clipboard reader for this machine
    pub fn clipboard(config: &ClipboardConfig) -> Box<dyn ClipboardOps> {
        Box::new(ClipboardReader::new(config.clone()))
    }

    /// Get the platform-specific foreground process operations
    pub fn processes() -> Box<dyn ProcessOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixProcessTable::new())
        }

        #[cfg(not(unix))]
        {
            Box::new(generic::NoProcessTable)
        }
    }
}
