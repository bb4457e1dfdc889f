//! Paste and drop entry points
//!
//! [`Dispatcher`] wires extraction, classification and planning together
//! and hands the resulting payloads to a [`TerminalWindow`]. Both entry
//! points share one pipeline; they differ only in where the text comes from
//! and in what happens when nothing needs uploading:
//!
//! - a paste always delivers something, falling back to the original text
//! - a drop either handles the event or defers to the host's default drop
//!   handling untouched

use crate::classify::SessionClassifier;
use crate::config::Config;
use crate::extract::{PathExtractor, URI_LIST_MIME};
use crate::models::{LocalPath, ProcessDescriptor, SessionKind, UploadPlan};
use crate::planner::UploadPlanner;
use crate::platform::ClipboardOps;
use std::collections::HashMap;

/// The terminal window a paste or drop targets
pub trait TerminalWindow {
    /// Foreground processes of the window's session, oldest first
    fn foreground_processes(&self) -> Vec<ProcessDescriptor>;

    /// Inject text as if the user had pasted it
    fn paste_text(&mut self, text: &str);

    /// The window's own selection text, consulted when the clipboard is empty
    fn selection_text(&self) -> Option<String> {
        None
    }
}

/// Result of offering a drop event to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Payloads were injected; the host must not process the drop further
    Handled(UploadPlan),
    /// The host should run its default drop handling
    Deferred,
}

impl DropOutcome {
    /// Whether the drop was consumed
    pub fn is_handled(&self) -> bool {
        matches!(self, DropOutcome::Handled(_))
    }
}

/// Orchestrates extraction, classification and planning
pub struct Dispatcher {
    extractor: PathExtractor,
    classifier: SessionClassifier,
    planner: UploadPlanner,
}

impl Dispatcher {
    /// Create a dispatcher from configuration
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            PathExtractor::new(),
            SessionClassifier::new(&config.detection),
            UploadPlanner::new(config.upload.clone()),
        )
    }

    /// Create a dispatcher from prepared components
    pub fn from_parts(
        extractor: PathExtractor,
        classifier: SessionClassifier,
        planner: UploadPlanner,
    ) -> Self {
        Self {
            extractor,
            classifier,
            planner,
        }
    }

    /// Path extractor used for pastes and drops
    pub fn extractor(&self) -> &PathExtractor {
        &self.extractor
    }

    /// Session classifier, also used by `pasteport classify`
    pub fn classifier(&self) -> &SessionClassifier {
        &self.classifier
    }

    /// Upload planner holding the upload root and clock
    pub fn planner(&self) -> &UploadPlanner {
        &self.planner
    }

    /// Plan a paste of `raw_text` into a session running `processes`
    ///
    /// Text naming no existing local file passes through unchanged and the
    /// session is never classified.
    pub fn plan_paste(&self, raw_text: &str, processes: &[ProcessDescriptor]) -> UploadPlan {
        self.plan_paste_with(raw_text, || processes.to_vec())
    }

    /// Handle a paste request for `window`
    ///
    /// Reads `clipboard`, falling back to the window's selection when the
    /// clipboard is empty. Returns the delivered plan, or `None` when there
    /// was nothing to paste.
    pub fn on_paste_requested(
        &self,
        clipboard: &dyn ClipboardOps,
        window: &mut dyn TerminalWindow,
    ) -> Option<UploadPlan> {
        let mut text = clipboard.read_text();
        if text.is_empty() {
            text = window.selection_text().unwrap_or_default();
        }
        if text.is_empty() {
            debug!("Nothing to paste: clipboard and selection are empty");
            return None;
        }

        let plan = self.plan_paste_with(&text, || window.foreground_processes());
        deliver(&plan, window);
        Some(plan)
    }

    /// Decide how to handle a drop payload keyed by MIME type
    ///
    /// Returns `None` to defer: no `text/uri-list` entry, no existing local
    /// file in it, or a local session.
    pub fn decide_drop(
        &self,
        payload: &HashMap<String, Vec<u8>>,
        processes: &[ProcessDescriptor],
    ) -> Option<UploadPlan> {
        self.decide_drop_with(payload, || processes.to_vec())
    }

    /// Handle a drop event on `window`
    pub fn on_drop(
        &self,
        payload: &HashMap<String, Vec<u8>>,
        window: &mut dyn TerminalWindow,
    ) -> DropOutcome {
        match self.decide_drop_with(payload, || window.foreground_processes()) {
            Some(plan) => {
                deliver(&plan, window);
                DropOutcome::Handled(plan)
            }
            None => DropOutcome::Deferred,
        }
    }

    fn plan_paste_with<F>(&self, raw_text: &str, processes: F) -> UploadPlan
    where
        F: FnOnce() -> Vec<ProcessDescriptor>,
    {
        let files = self.extractor.extract(raw_text);
        if files.is_empty() {
            return UploadPlan::PlainPaste(raw_text.to_string());
        }

        let session = self.classifier.classify(&processes()).kind;
        self.planner.plan(raw_text, &files, &session)
    }

    fn decide_drop_with<F>(&self, payload: &HashMap<String, Vec<u8>>, processes: F) -> Option<UploadPlan>
    where
        F: FnOnce() -> Vec<ProcessDescriptor>,
    {
        let Some(raw) = payload.get(URI_LIST_MIME) else {
            trace!("Drop has no {} entry; deferring", URI_LIST_MIME);
            return None;
        };
        let uri_list = String::from_utf8_lossy(raw);

        let files = self.extractor.extract_uri_list(&uri_list);
        if files.is_empty() {
            debug!("Drop names no existing local file; deferring");
            return None;
        }

        let session = self.classifier.classify(&processes()).kind;
        if session == SessionKind::Local {
            debug!("Drop into local session; deferring");
            return None;
        }

        Some(self.planner.plan(&drop_text(&files), &files, &session))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Inject every payload of `plan`, in order
pub fn deliver(plan: &UploadPlan, window: &mut dyn TerminalWindow) {
    for payload in plan.payloads() {
        window.paste_text(&payload);
    }
}

/// Space-separated local paths, the text a plain drop would have produced
fn drop_text(files: &[LocalPath]) -> String {
    files
        .iter()
        .map(|file| crate::planner::shell_quote(&file.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}
