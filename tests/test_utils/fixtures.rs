//! Test Fixtures
//!
//! Real files on disk and common session process chains.

use pasteport::config::UploadConfig;
use pasteport::planner::SteppingClock;
use pasteport::{LocalPath, ProcessDescriptor, UploadPlanner};
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary directory holding files created on demand
pub struct FileFixture {
    dir: TempDir,
}

impl FileFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Create a file and return its canonical path
    pub fn file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, b"fixture").expect("Failed to write fixture file");
        path.canonicalize().expect("Failed to canonicalize fixture")
    }

    /// Create a subdirectory and return its canonical path
    pub fn dir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(&path).expect("Failed to create fixture dir");
        path.canonicalize().expect("Failed to canonicalize fixture")
    }

    /// Create a file and wrap it as an extracted path
    pub fn local(&self, name: &str) -> LocalPath {
        LocalPath::from_existing(self.file(name)).expect("Fixture file must exist")
    }

    /// A path inside the fixture that does not exist
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for FileFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// No remote indicator at all
pub fn local_session() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::from_argv(100, ["-zsh"]),
        ProcessDescriptor::from_argv(200, ["vim", "notes.md"]),
    ]
}

/// `ssh -p 22 user@box` in the foreground
pub fn plain_ssh_session() -> Vec<ProcessDescriptor> {
    vec![ProcessDescriptor::from_argv(300, ["ssh", "-p", "22", "user@box"])]
}

/// `kitten ssh user@box` and the `ssh` it spawned, as a snapshot lists them
pub fn kitten_ssh_session() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::from_argv(400, ["kitten", "ssh", "user@box"]),
        ProcessDescriptor::from_argv(
            401,
            ["ssh", "-t", "--", "user@box", "sh -c 'exec \"$SHELL\"'"],
        ),
    ]
}

/// Planner with default settings and a deterministic clock
pub fn test_planner() -> UploadPlanner {
    UploadPlanner::with_clock(UploadConfig::default(), Box::new(SteppingClock::starting_at(1)))
}
