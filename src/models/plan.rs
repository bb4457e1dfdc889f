//! Upload Plan Definitions

use super::LocalPath;

/// A local source paired with its synthesized remote destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Existing local file or directory
    pub local: LocalPath,
    /// Destination path on the remote host, unique within one plan
    pub remote: String,
}

/// What to deliver to the terminal for one paste or drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPlan {
    /// Default paste behavior: deliver the text unchanged
    PlainPaste(String),
    /// Files are pulled to the remote host by `command_text`
    TransferSequence {
        items: Vec<UploadItem>,
        command_text: String,
    },
    /// No transfer channel: the quoted local paths plus a commented manual-copy hint
    ManualCopyHint { paths_text: String, hint: String },
}

impl UploadPlan {
    /// Text payloads in delivery order
    ///
    /// The transfer command gets a trailing newline so the remote shell runs
    /// it. The hint stays on the command line without one; nothing runs
    /// until the user presses enter.
    pub fn payloads(&self) -> Vec<String> {
        match self {
            UploadPlan::PlainPaste(text) => vec![text.clone()],
            UploadPlan::TransferSequence { command_text, .. } => {
                vec![format!("{}\n", command_text)]
            }
            UploadPlan::ManualCopyHint { paths_text, hint } => {
                vec![paths_text.clone(), hint.clone()]
            }
        }
    }

    /// Whether this plan is the default-paste passthrough
    pub fn is_passthrough(&self) -> bool {
        matches!(self, UploadPlan::PlainPaste(_))
    }

    /// Planned uploads; empty unless this is a transfer sequence
    pub fn items(&self) -> &[UploadItem] {
        match self {
            UploadPlan::TransferSequence { items, .. } => items,
            _ => &[],
        }
    }

    /// Short label used in logs
    pub fn kind_str(&self) -> &'static str {
        match self {
            UploadPlan::PlainPaste(_) => "plain-paste",
            UploadPlan::TransferSequence { .. } => "transfer-sequence",
            UploadPlan::ManualCopyHint { .. } => "manual-copy-hint",
        }
    }
}
