//! Core data models for pasteport
//!
//! Paths extracted from paste or drop text, process snapshots of a session,
//! the session classification and the resulting upload plan.

pub mod local_path;
pub mod plan;
pub mod process;
pub mod session;

// Re-exports for convenience
pub use local_path::LocalPath;
pub use plan::{UploadItem, UploadPlan};
pub use process::ProcessDescriptor;
pub use session::{SessionInfo, SessionKind};
