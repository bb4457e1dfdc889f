//! Property-based tests for upload planning and path extraction

use pasteport::config::UploadConfig;
use pasteport::planner::{shell_quote, SteppingClock};
use pasteport::{LocalPath, PathExtractor, SessionKind, UploadPlan, UploadPlanner};
use proptest::prelude::*;
use std::collections::HashSet;
use tempfile::TempDir;

fn planner() -> UploadPlanner {
    UploadPlanner::with_clock(UploadConfig::default(), Box::new(SteppingClock::starting_at(0)))
}

fn session() -> impl Strategy<Value = SessionKind> {
    prop_oneof![
        Just(SessionKind::Local),
        prop::option::of("[a-z@.]{1,10}").prop_map(|host| SessionKind::PlainRemote { host }),
        prop::option::of("[a-z@.]{1,10}").prop_map(|host| SessionKind::TransferCapableRemote { host }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_empty_file_set_is_passthrough(text in "\\PC*", session in session()) {
        let plan = planner().plan(&text, &[], &session);
        prop_assert_eq!(plan, UploadPlan::PlainPaste(text));
    }

    #[test]
    fn test_remote_paths_are_distinct(
        dirs in prop::collection::vec("[a-z]{1,6}", 1..6),
        name in "[a-zA-Z0-9 ._-]{1,12}",
    ) {
        prop_assume!(name != "." && name != "..");
        let root = TempDir::new().unwrap();
        let files: Vec<LocalPath> = dirs
            .iter()
            .enumerate()
            .map(|(i, dir)| {
                // Same base name in every directory
                let dir = root.path().join(format!("{}{}", dir, i));
                std::fs::create_dir_all(&dir).unwrap();
                let path = dir.join(&name);
                std::fs::write(&path, b"x").unwrap();
                LocalPath::from_existing(path).unwrap()
            })
            .collect();

        let plan = planner().plan("", &files, &SessionKind::TransferCapableRemote { host: None });
        let remotes: HashSet<&str> = plan.items().iter().map(|item| item.remote.as_str()).collect();
        prop_assert_eq!(remotes.len(), files.len());
    }

    #[test]
    fn test_shell_quote_round_trips(value in "\\PC{0,40}") {
        let quoted = shell_quote(&value);
        prop_assert_eq!(shlex::split(&quoted), Some(vec![value]));
    }

    #[test]
    fn test_extract_doesnt_panic(text in "\\PC*") {
        let _ = PathExtractor::with_local_hosts(["localhost"]).extract(&text);
        let _ = PathExtractor::with_local_hosts(["localhost"]).extract_uri_list(&text);
    }

    #[test]
    fn test_single_plain_path_is_extracted(name in "[a-zA-Z0-9][a-zA-Z0-9 _.-]{0,15}") {
        prop_assume!(name.trim() == name && name != "." && name != "..");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(&name);
        std::fs::write(&path, b"x").unwrap();

        let paths = PathExtractor::with_local_hosts(["localhost"]).extract(&path.to_string_lossy());
        prop_assert_eq!(paths.len(), 1);
        prop_assert_eq!(paths[0].as_path(), path.canonicalize().unwrap());
    }
}
