//! Mock Clipboard Implementation for Testing

use pasteport::ClipboardOps;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Clipboard returning fixed text and counting reads
#[derive(Debug, Default)]
pub struct MockClipboard {
    text: String,
    reads: AtomicUsize,
}

impl MockClipboard {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reads: AtomicUsize::new(0),
        }
    }

    /// A clipboard that reads as empty, like one whose tools all failed
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ClipboardOps for MockClipboard {
    fn read_text(&self) -> String {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.text.clone()
    }
}
