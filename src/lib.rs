//! pasteport - local file uploads for pastes and drops into remote terminals
//!
//! When a user pastes or drops local file paths into a terminal whose shell
//! runs on another machine, the paths are useless there. This library
//! recognizes that situation and rewrites the input into something that
//! works on the remote side.
//!
//! ## Module Organization
//!
//! - [`extract`] - Existing local paths from paste text and `text/uri-list` drops
//! - [`classify`] - Local / plain remote / transfer-capable remote sessions
//! - [`planner`] - Destination names and the upload command or manual-copy hint
//! - [`dispatch`] - Paste and drop entry points tying the above together
//! - [`platform`] - Clipboard tools and foreground process snapshots
//! - [`config`] - Designated tokens, upload root and clipboard settings
//! - [`models`] - Data structures (LocalPath, ProcessDescriptor, UploadPlan)
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use pasteport::{init, Dispatcher, ProcessDescriptor};
//!
//! let config = init();
//! let dispatcher = Dispatcher::new(&config);
//!
//! let session = vec![ProcessDescriptor::from_argv(4242, ["kitten", "ssh", "user@box"])];
//! for payload in dispatcher.plan_paste("/tmp/report.pdf", &session).payloads() {
//!     print!("{}", payload);
//! }
//! ```
//!
//! ## Behavior
//!
//! - Text without an existing local file passes through untouched
//! - Local sessions always get the original text
//! - Sessions opened with `kitten ssh` get a `kitten transfer` command that
//!   pulls every file into a unique path under the upload root
//! - Other remote sessions get the quoted local paths followed by a commented
//!   `scp` suggestion that is never executed
//!
//! Nothing here blocks for long: the only external wait is the clipboard
//! read, which runs under a per-tool deadline and reads as empty on failure.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod models;
pub mod planner;
pub mod platform;

// Re-exports for core functionality
pub use classify::SessionClassifier;
pub use config::loader::ConfigLoader;
pub use config::Config;
pub use dispatch::{Dispatcher, DropOutcome, TerminalWindow};
pub use error::{Error, Result};
pub use extract::PathExtractor;
pub use models::{LocalPath, ProcessDescriptor, SessionInfo, SessionKind, UploadItem, UploadPlan};
pub use planner::UploadPlanner;
pub use platform::{ClipboardOps, Platform, ProcessOps};

// Version information
/// The current version of pasteport from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The library name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The library description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the default locations
///
/// Never fails: a missing or broken configuration falls back to defaults
/// with a warning, so pasting keeps working.
pub fn init() -> Config {
    debug!("Initializing {} v{}", NAME, VERSION);

    match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    }
}

/// Load configuration from an explicit file
///
/// # Errors
///
/// Returns an error when the file is missing, unparseable or invalid.
pub fn init_with_config(config_path: &std::path::Path) -> Result<Config> {
    debug!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "Configuration file does not exist".to_string(),
        });
    }

    Config::load_from_file(config_path)
}
