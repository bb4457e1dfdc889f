//! Session classification from foreground processes
//!
//! Decides whether a terminal session is local, a plain remote shell, or a
//! remote session opened through a wrapper with a file-transfer subcommand.
//! The decision is a pure function of the process snapshot handed in.
//!
//! Processes are examined in the order supplied and the first process
//! matching a family decides. Process tables list the foreground group
//! oldest first, so a wrapper is seen before the `ssh` it spawned and the
//! session resolves to how it was opened. An empty or unrecognized chain is
//! `Local`: treating a remote session as local only falls back to a plain
//! paste, while the opposite would upload files nobody asked for.

use crate::config::DetectionConfig;
use crate::models::{ProcessDescriptor, SessionInfo, SessionKind};

/// Classifies sessions by their foreground process chain
#[derive(Debug, Clone)]
pub struct SessionClassifier {
    wrapper_command: String,
    wrapper_subcommands: Vec<String>,
    remote_shell_command: String,
    multiplexer_commands: Vec<String>,
}

impl SessionClassifier {
    /// Create a classifier from the detection tokens
    pub fn new(detection: &DetectionConfig) -> Self {
        Self {
            wrapper_command: detection.wrapper_command.to_lowercase(),
            wrapper_subcommands: detection.wrapper_subcommands.clone(),
            remote_shell_command: detection.remote_shell_command.to_lowercase(),
            multiplexer_commands: detection
                .multiplexer_commands
                .iter()
                .map(|cmd| cmd.to_lowercase())
                .collect(),
        }
    }

    /// Classify a session from its foreground processes, in snapshot order
    pub fn classify(&self, processes: &[ProcessDescriptor]) -> SessionInfo {
        for process in processes {
            if let Some(kind) = self.match_process(process) {
                debug!(
                    "Session classified as {} by pid {} ({:?})",
                    kind, process.pid, process.command_name
                );
                return SessionInfo {
                    kind,
                    pid: Some(process.pid),
                };
            }
        }

        debug!(
            "No remote indicator among {} foreground process(es)",
            processes.len()
        );
        SessionInfo::local()
    }

    /// Match one process against the three families, in priority order
    fn match_process(&self, process: &ProcessDescriptor) -> Option<SessionKind> {
        let name = process.base_name()?;

        if name == self.wrapper_command {
            let launched_remote = process
                .arg(1)
                .is_some_and(|sub| self.wrapper_subcommands.iter().any(|s| s == sub));
            // A wrapper running some other subcommand is not a remote session;
            // keep looking further out.
            return launched_remote.then(|| SessionKind::TransferCapableRemote {
                host: wrapper_host(&process.argv),
            });
        }

        if name == self.remote_shell_command {
            return Some(SessionKind::PlainRemote {
                host: remote_shell_host(&process.argv),
            });
        }

        if self.multiplexer_commands.iter().any(|cmd| *cmd == name) {
            return Some(SessionKind::PlainRemote { host: None });
        }

        None
    }
}

impl Default for SessionClassifier {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

/// First positional argument after the subcommand that looks like a host
fn wrapper_host(argv: &[String]) -> Option<String> {
    argv.iter()
        .skip(2)
        .find(|arg| !arg.starts_with('-') && (arg.contains('@') || arg.contains('.')))
        .cloned()
}

/// Last positional argument, where the destination conventionally sits
fn remote_shell_host(argv: &[String]) -> Option<String> {
    argv.iter()
        .skip(1)
        .rev()
        .find(|arg| !arg.starts_with('-'))
        .cloned()
}
