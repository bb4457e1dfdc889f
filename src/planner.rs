//! Upload plan synthesis
//!
//! Given the extracted local paths and the session classification,
//! [`UploadPlanner`] decides what text reaches the terminal:
//!
//! - nothing to upload, or a local session: the raw text, unchanged
//! - transfer-capable remote: one shell line that creates the upload root,
//!   pulls every file into a unique destination and echoes the results
//! - plain remote: the quoted local paths plus a commented manual-copy hint
//!
//! Destinations are `<upload_root>/<token>_<base name>`, where `token` is the
//! first 8 hex digits of SHA-256 over the absolute local path followed by a
//! nanosecond timestamp read separately for each file. Files sharing a base
//! name, and repeated uploads of the same file, land in distinct places.
//! There is no retry on token collision.

use crate::config::UploadConfig;
use crate::models::{LocalPath, SessionKind, UploadItem, UploadPlan};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// Length of the per-file destination token, in hex digits
pub const TOKEN_LEN: usize = 8;

/// Source of the timestamp mixed into destination tokens
pub trait Clock: Send + Sync {
    /// Current time in nanoseconds
    fn now_nanos(&self) -> i128;
}

/// Wall clock backed by `chrono`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i128 {
        let now = Utc::now();
        // Out of range only past the year 2262; fall back to microsecond scale
        now.timestamp_nanos_opt()
            .map(i128::from)
            .unwrap_or_else(|| i128::from(now.timestamp_micros()) * 1000)
    }
}

/// Deterministic clock advancing by one nanosecond per reading
#[derive(Debug, Default)]
pub struct SteppingClock {
    next: AtomicU64,
}

impl SteppingClock {
    /// Start counting at `start`
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn now_nanos(&self) -> i128 {
        i128::from(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Builds upload plans for pasted or dropped files
pub struct UploadPlanner {
    upload: UploadConfig,
    clock: Box<dyn Clock>,
}

impl UploadPlanner {
    /// Create a planner using the wall clock
    pub fn new(upload: UploadConfig) -> Self {
        Self::with_clock(upload, Box::new(SystemClock))
    }

    /// Create a planner with a custom timestamp source
    pub fn with_clock(upload: UploadConfig, clock: Box<dyn Clock>) -> Self {
        Self { upload, clock }
    }

    /// Remote directory receiving uploads, without a trailing slash
    pub fn upload_root(&self) -> &str {
        let root = self.upload.upload_root.trim().trim_end_matches('/');
        if root.is_empty() {
            "/"
        } else {
            root
        }
    }

    /// Build the plan for `files` in `session`
    ///
    /// `raw_text` is what the passthrough plan delivers when no upload is
    /// needed; it is normally the original paste or drop text.
    pub fn plan(&self, raw_text: &str, files: &[LocalPath], session: &SessionKind) -> UploadPlan {
        let plan = match session {
            _ if files.is_empty() => UploadPlan::PlainPaste(raw_text.to_string()),
            SessionKind::Local => UploadPlan::PlainPaste(raw_text.to_string()),
            SessionKind::TransferCapableRemote { .. } => self.transfer_sequence(files),
            SessionKind::PlainRemote { host } => self.manual_copy_hint(files, host.as_deref()),
        };

        debug!(
            "Planned {} for {} file(s) in {} session",
            plan.kind_str(),
            files.len(),
            session.as_str()
        );
        plan
    }

    /// Synthesize a fresh destination for one file
    pub fn remote_path_for(&self, file: &LocalPath) -> String {
        let token = destination_token(file, self.clock.now_nanos());
        let root = self.upload_root();
        let separator = if root.ends_with('/') { "" } else { "/" };
        format!("{}{}{}_{}", root, separator, token, file.base_name())
    }

    fn transfer_sequence(&self, files: &[LocalPath]) -> UploadPlan {
        let items: Vec<UploadItem> = files
            .iter()
            .map(|file| UploadItem {
                local: file.clone(),
                remote: self.remote_path_for(file),
            })
            .collect();

        let mut steps = Vec::with_capacity(items.len() + 2);
        steps.push(format!("mkdir -p {}", shell_quote(self.upload_root())));
        for item in &items {
            steps.push(format!(
                "{} {} {}",
                self.upload.transfer_command,
                shell_quote(&item.local.to_string_lossy()),
                shell_quote(&item.remote)
            ));
        }

        let destinations: Vec<String> = items.iter().map(|item| shell_quote(&item.remote)).collect();
        steps.push(format!("echo 'Uploaded:' {}", destinations.join(" ")));

        UploadPlan::TransferSequence {
            items,
            command_text: steps.join(" && "),
        }
    }

    /// Quoted local paths followed by a commented manual-copy suggestion
    ///
    /// The suggestion names only the first file.
    fn manual_copy_hint(&self, files: &[LocalPath], host: Option<&str>) -> UploadPlan {
        let paths_text = files
            .iter()
            .map(|file| shell_quote(&file.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ");

        // files is non-empty here; plan() routes empty sets to PlainPaste
        let example = files
            .first()
            .map(|file| shell_quote(&file.to_string_lossy()))
            .unwrap_or_default();
        let host = host.unwrap_or(&self.upload.host_placeholder);
        let hint = format!(
            "  # Local path(s) - upload with: {} {} {}:{}/",
            self.upload.manual_copy_command,
            example,
            host,
            self.upload_root().trim_end_matches('/')
        );

        UploadPlan::ManualCopyHint { paths_text, hint }
    }
}

impl Default for UploadPlanner {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

/// First [`TOKEN_LEN`] lowercase hex digits of SHA-256(path ++ timestamp)
pub fn destination_token(file: &LocalPath, timestamp_nanos: i128) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file.to_string_lossy().as_bytes());
    hasher.update(timestamp_nanos.to_string().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..TOKEN_LEN].to_string()
}

/// Quote one word for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    // NUL cannot be passed through a shell word; drop it
    let value = value.replace('\0', "");
    match shlex::try_quote(&value) {
        Ok(quoted) => quoted.into_owned(),
        Err(_) => format!("'{}'", value.replace('\'', "'\\''")),
    }
}
