//! Test Utilities and Mocks
//!
//! Shared helpers for the unit, integration and property test targets.

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_clipboard;
pub mod mock_terminal;

// Re-exports for convenience
pub use fixtures::{kitten_ssh_session, local_session, plain_ssh_session, test_planner, FileFixture};
pub use mock_clipboard::MockClipboard;
pub use mock_terminal::MockTerminal;
