//! Process Descriptor Definitions
//!
//! A snapshot of one process in a session's foreground chain. Snapshots are
//! taken once per paste or drop and may already be stale when classified;
//! that is an accepted limitation of inspecting live argument vectors.

use serde::{Deserialize, Serialize};

/// One process in a session's foreground process chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Process identifier
    pub pid: u32,
    /// Command name as reported by the host (may be a full path)
    pub command_name: String,
    /// Full argument vector, `argv[0]` included
    pub argv: Vec<String>,
}

impl ProcessDescriptor {
    /// Create a descriptor from its parts
    pub fn new(pid: u32, command_name: impl Into<String>, argv: Vec<String>) -> Self {
        Self {
            pid,
            command_name: command_name.into(),
            argv,
        }
    }

    /// Create a descriptor whose command name is taken from `argv[0]`
    pub fn from_argv<I, S>(pid: u32, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let command_name = argv.first().cloned().unwrap_or_default();
        Self {
            pid,
            command_name,
            argv,
        }
    }

    /// Lowercased, path-stripped command name
    ///
    /// Falls back to `argv[0]` when the host supplied no command name.
    /// Returns `None` when neither is available.
    pub fn base_name(&self) -> Option<String> {
        let raw = if self.command_name.trim().is_empty() {
            self.argv.first()?.as_str()
        } else {
            self.command_name.as_str()
        };

        let base = raw
            .trim()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        if base.is_empty() {
            None
        } else {
            Some(base)
        }
    }

    /// Argument at `index`, if present
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.argv.get(index).map(String::as_str)
    }
}
