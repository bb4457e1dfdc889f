//! Session Kind Definitions
//!
//! How a terminal session reaches the machine its shell runs on, as far as
//! the foreground process chain reveals it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection type of a terminal session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionKind {
    /// No remote indicator found
    #[default]
    Local,
    /// Remote shell or multiplexer without a native transfer channel
    PlainRemote { host: Option<String> },
    /// Remote session launched through a wrapper that can pull local files
    TransferCapableRemote { host: Option<String> },
}

impl SessionKind {
    /// Host identifier extracted from the matching process, if any
    pub fn host(&self) -> Option<&str> {
        match self {
            SessionKind::Local => None,
            SessionKind::PlainRemote { host } | SessionKind::TransferCapableRemote { host } => {
                host.as_deref()
            }
        }
    }

    /// Whether the session talks to another machine
    pub fn is_remote(&self) -> bool {
        !matches!(self, SessionKind::Local)
    }

    /// Whether files can be pushed through the session itself
    pub fn supports_transfer(&self) -> bool {
        matches!(self, SessionKind::TransferCapableRemote { .. })
    }

    /// Short label used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Local => "local",
            SessionKind::PlainRemote { .. } => "plain-remote",
            SessionKind::TransferCapableRemote { .. } => "transfer-capable-remote",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host() {
            Some(host) => write!(f, "{} ({})", self.as_str(), host),
            None => f.write_str(self.as_str()),
        }
    }
}

/// Result of classifying a session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Connection type, carrying the host when one was found
    pub kind: SessionKind,
    /// Pid of the process that decided the classification
    pub pid: Option<u32>,
}

impl SessionInfo {
    /// A local session with no deciding process
    pub fn local() -> Self {
        Self::default()
    }

    /// Host identifier, if any
    pub fn host(&self) -> Option<&str> {
        self.kind.host()
    }
}
