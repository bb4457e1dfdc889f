//! Path extraction from paste and drop text
//!
//! Clipboard text and drop payloads arrive as loosely formatted lines: plain
//! paths, `file://` URIs from file managers, paths wrapped in quotes by
//! "copy as path" actions. [`PathExtractor`] turns them into existing,
//! canonical [`LocalPath`]s. It is a best-effort filter: lines that do not
//! name an existing local file are dropped silently, and an input with no
//! valid line yields an empty list, which callers treat as ordinary text.

use crate::models::LocalPath;
use std::collections::HashSet;
use std::path::PathBuf;
use url::Url;

/// MIME type of drag-and-drop file lists
pub const URI_LIST_MIME: &str = "text/uri-list";

const FILE_SCHEME_PREFIX: &str = "file://";

/// Turns raw paste/drop text into existing local paths
#[derive(Debug, Clone)]
pub struct PathExtractor {
    /// URI authorities naming this machine (lowercase)
    local_hosts: Vec<String>,
}

impl PathExtractor {
    /// Create an extractor that accepts `localhost` and this machine's hostname
    pub fn new() -> Self {
        let mut local_hosts = vec!["localhost".to_string()];
        match hostname::get() {
            Ok(name) => {
                let name = name.to_string_lossy().to_lowercase();
                if !name.is_empty() && name != "localhost" {
                    local_hosts.push(name);
                }
            }
            Err(e) => debug!("Could not determine hostname: {}", e),
        }
        Self { local_hosts }
    }

    /// Create an extractor with an explicit set of local URI authorities
    pub fn with_local_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            local_hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Extract existing paths from pasted text
    ///
    /// Each non-empty line may be a `file://` URI, a path wrapped in one
    /// layer of single or double quotes, or a bare path. Relative paths
    /// resolve against the current directory. Output keeps the order of
    /// first appearance with duplicates collapsed.
    pub fn extract(&self, raw_text: &str) -> Vec<LocalPath> {
        let candidates = raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.paste_candidate(line));

        let paths = collect_existing(candidates);
        debug!("Extracted {} local path(s) from pasted text", paths.len());
        paths
    }

    /// Extract existing paths from a `text/uri-list` drop payload
    ///
    /// Lines starting with `#` are comments. Only local `file://` URIs and
    /// absolute paths are accepted.
    pub fn extract_uri_list(&self, uri_list: &str) -> Vec<LocalPath> {
        let candidates = parse_uri_list(uri_list)
            .into_iter()
            .filter_map(|entry| self.uri_list_candidate(entry));

        let paths = collect_existing(candidates);
        debug!("Extracted {} local path(s) from drop payload", paths.len());
        paths
    }

    fn paste_candidate(&self, line: &str) -> Option<PathBuf> {
        let text = if is_file_uri(line) {
            self.file_uri_to_path(line)?
                .to_string_lossy()
                .into_owned()
        } else {
            line.to_string()
        };

        let text = strip_one_quote_layer(&text);
        if text.is_empty() {
            return None;
        }
        Some(PathBuf::from(text))
    }

    fn uri_list_candidate(&self, entry: &str) -> Option<PathBuf> {
        if is_file_uri(entry) {
            self.file_uri_to_path(entry)
        } else if entry.starts_with('/') {
            Some(PathBuf::from(entry))
        } else {
            trace!("Ignoring non-file URI entry '{}'", entry);
            None
        }
    }

    /// Decode a `file://` URI, rejecting authorities that name another machine
    ///
    /// Everything after the authority is the path, `#` and `?` included, and
    /// is percent-decoded as a whole.
    fn file_uri_to_path(&self, uri: &str) -> Option<PathBuf> {
        let rest = uri.get(FILE_SCHEME_PREFIX.len()..)?;
        let Some(path_start) = rest.find('/') else {
            trace!("File URI '{}' has no path", uri);
            return None;
        };
        let (authority, raw_path) = rest.split_at(path_start);

        if !authority.is_empty() && !self.is_local_authority(authority) {
            debug!("Rejecting file URI on remote host '{}'", authority);
            return None;
        }

        Some(decode_path(raw_path))
    }

    /// Whether a URI authority names this machine
    fn is_local_authority(&self, authority: &str) -> bool {
        let url = match Url::parse(&format!("{}{}/", FILE_SCHEME_PREFIX, authority)) {
            Ok(url) => url,
            Err(e) => {
                trace!("Unparseable file URI authority '{}': {}", authority, e);
                return false;
            }
        };
        if url.query().is_some() || url.fragment().is_some() {
            return false;
        }

        // `localhost` normalizes to an empty host
        match url.host_str().filter(|host| !host.is_empty()) {
            None => true,
            Some(host) => self.is_local_host(host),
        }
    }

    fn is_local_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.local_hosts.iter().any(|local| *local == host)
    }
}

impl Default for PathExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a `text/uri-list` payload into its entries
///
/// Blank lines and `#` comment lines are skipped.
pub fn parse_uri_list(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Percent-decode the path part of a file URI
fn decode_path(raw_path: &str) -> PathBuf {
    let bytes = urlencoding::decode_binary(raw_path.as_bytes());

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(std::ffi::OsStr::from_bytes(&bytes))
    }

    #[cfg(not(unix))]
    {
        let text = String::from_utf8_lossy(&bytes);
        // `/C:/dir` names a drive path
        match text.as_bytes() {
            [b'/', drive, b':', ..] if drive.is_ascii_alphabetic() => PathBuf::from(&text[1..]),
            _ => PathBuf::from(text.as_ref()),
        }
    }
}

fn is_file_uri(text: &str) -> bool {
    text.get(..FILE_SCHEME_PREFIX.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(FILE_SCHEME_PREFIX))
}

/// Remove exactly one matching pair of surrounding single or double quotes
fn strip_one_quote_layer(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn collect_existing(candidates: impl Iterator<Item = PathBuf>) -> Vec<LocalPath> {
    let mut seen = HashSet::new();
    candidates
        .filter_map(LocalPath::from_existing)
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
