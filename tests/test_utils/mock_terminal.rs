//! Mock Terminal Implementation for Testing

use pasteport::{ProcessDescriptor, TerminalWindow};
use std::cell::Cell;

/// Terminal window recording every injected payload
#[derive(Debug, Default)]
pub struct MockTerminal {
    pub processes: Vec<ProcessDescriptor>,
    pub selection: Option<String>,
    pub pasted: Vec<String>,
    snapshots: Cell<usize>,
}

impl MockTerminal {
    /// Create a mock terminal running the given foreground processes
    pub fn new(processes: Vec<ProcessDescriptor>) -> Self {
        Self {
            processes,
            ..Default::default()
        }
    }

    /// Set the window's own selection text
    pub fn with_selection(mut self, text: &str) -> Self {
        self.selection = Some(text.to_string());
        self
    }

    /// How often the process table was consulted
    pub fn snapshots(&self) -> usize {
        self.snapshots.get()
    }

    /// Everything injected, concatenated
    pub fn transcript(&self) -> String {
        self.pasted.concat()
    }
}

impl TerminalWindow for MockTerminal {
    fn foreground_processes(&self) -> Vec<ProcessDescriptor> {
        self.snapshots.set(self.snapshots.get() + 1);
        self.processes.clone()
    }

    fn paste_text(&mut self, text: &str) {
        self.pasted.push(text.to_string());
    }

    fn selection_text(&self) -> Option<String> {
        self.selection.clone()
    }
}
