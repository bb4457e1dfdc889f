//! Property-based tests for session classification

use pasteport::{ProcessDescriptor, SessionClassifier, SessionInfo, SessionKind};
use proptest::prelude::*;

/// Command names that belong to none of the remote families
fn unrelated_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,12}".prop_filter("must not be a remote command", |name| {
        !matches!(name.as_str(), "ssh" | "kitten" | "mosh" | "mosh-client")
    })
}

fn unrelated_process() -> impl Strategy<Value = ProcessDescriptor> {
    (
        1u32..100_000,
        unrelated_name(),
        prop::collection::vec("[a-zA-Z0-9@._-]{0,12}", 0..5),
    )
        .prop_map(|(pid, name, args)| {
            let mut argv = vec![name.clone()];
            argv.extend(args);
            ProcessDescriptor::new(pid, name, argv)
        })
}

proptest! {
    #[test]
    fn test_classify_doesnt_panic(
        name in "\\PC*",
        argv in prop::collection::vec("\\PC*", 0..6),
    ) {
        let _ = SessionClassifier::default().classify(&[ProcessDescriptor::new(1, name, argv)]);
    }

    #[test]
    fn test_unrelated_processes_are_local(
        processes in prop::collection::vec(unrelated_process(), 0..8),
    ) {
        let info = SessionClassifier::default().classify(&processes);
        prop_assert_eq!(info, SessionInfo::local());
    }

    #[test]
    fn test_classification_is_idempotent(
        processes in prop::collection::vec(unrelated_process(), 0..4),
        host in "[a-z]{1,8}@[a-z]{1,8}",
    ) {
        let mut chain = processes;
        chain.push(ProcessDescriptor::from_argv(7, ["ssh".to_string(), host]));

        let classifier = SessionClassifier::default();
        prop_assert_eq!(classifier.classify(&chain), classifier.classify(&chain));
    }

    #[test]
    fn test_first_match_wins(
        prefix in prop::collection::vec(unrelated_process(), 0..4),
        ssh_host in "[a-z]{1,8}",
        kitten_host in "[a-z]{1,8}@[a-z]{1,8}",
    ) {
        let ssh = ProcessDescriptor::from_argv(1, ["ssh".to_string(), ssh_host.clone()]);
        let kitten = ProcessDescriptor::from_argv(
            2,
            ["kitten".to_string(), "ssh".to_string(), kitten_host.clone()],
        );

        let mut chain = prefix.clone();
        chain.push(ssh.clone());
        chain.push(kitten.clone());
        prop_assert_eq!(
            SessionClassifier::default().classify(&chain).kind,
            SessionKind::PlainRemote { host: Some(ssh_host) }
        );

        let mut chain = prefix;
        chain.push(kitten);
        chain.push(ssh);
        prop_assert_eq!(
            SessionClassifier::default().classify(&chain).kind,
            SessionKind::TransferCapableRemote { host: Some(kitten_host) }
        );
    }

    #[test]
    fn test_ssh_host_is_last_positional(
        options in prop::collection::vec("-[a-zA-Z]{1,3}", 0..4),
        positionals in prop::collection::vec("[a-z0-9@.]{1,10}", 1..4),
    ) {
        let mut argv = vec!["ssh".to_string()];
        argv.extend(positionals.iter().cloned());
        argv.extend(options);

        let info = SessionClassifier::default().classify(&[ProcessDescriptor::from_argv(1, argv)]);
        prop_assert_eq!(info.host(), positionals.last().map(String::as_str));
    }
}
