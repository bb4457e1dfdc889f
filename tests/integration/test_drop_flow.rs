//! Integration Tests for the Drop Flow
//!
//! Drops either get handled with injected payloads or deferred to the
//! host's default handling with nothing injected.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use pasteport::classify::SessionClassifier;
use pasteport::extract::URI_LIST_MIME;
use pasteport::{Dispatcher, DropOutcome, PathExtractor, UploadPlan};
use std::collections::HashMap;
use test_utils::{
    kitten_ssh_session, local_session, plain_ssh_session, test_planner, FileFixture, MockTerminal,
};
use url::Url;

fn dispatcher() -> Dispatcher {
    Dispatcher::from_parts(
        PathExtractor::with_local_hosts(["localhost"]),
        SessionClassifier::default(),
        test_planner(),
    )
}

fn payload(mime: &str, text: &str) -> HashMap<String, Vec<u8>> {
    HashMap::from([(mime.to_string(), text.as_bytes().to_vec())])
}

#[test]
fn test_drop_into_kitten_session_uploads() {
    let fixture = FileFixture::new();
    let a = fixture.file("a b.png");
    let b = fixture.file("c.png");
    let list = format!(
        "{}\r\n{}\r\n",
        Url::from_file_path(&a).unwrap(),
        Url::from_file_path(&b).unwrap()
    );
    let mut window = MockTerminal::new(kitten_ssh_session());

    let outcome = dispatcher().on_drop(&payload(URI_LIST_MIME, &list), &mut window);

    let DropOutcome::Handled(plan) = outcome else {
        panic!("drop should be handled");
    };
    assert_eq!(plan.items().len(), 2);
    assert_eq!(window.pasted.len(), 1);
    assert_eq!(
        window.pasted[0].matches("kitten transfer --direction=upload").count(),
        2
    );
}

#[test]
fn test_drop_into_plain_ssh_session_hints() {
    let fixture = FileFixture::new();
    let file = fixture.file("a.txt");
    let mut window = MockTerminal::new(plain_ssh_session());

    let outcome = dispatcher().on_drop(&payload(URI_LIST_MIME, &file.to_string_lossy()), &mut window);

    assert!(matches!(
        outcome,
        DropOutcome::Handled(UploadPlan::ManualCopyHint { .. })
    ));
    assert_eq!(window.pasted[0], file.to_string_lossy());
}

#[test]
fn test_drop_into_local_session_defers() {
    let fixture = FileFixture::new();
    let file = fixture.file("a.txt");
    let mut window = MockTerminal::new(local_session());

    let outcome = dispatcher().on_drop(&payload(URI_LIST_MIME, &file.to_string_lossy()), &mut window);

    assert_eq!(outcome, DropOutcome::Deferred);
    assert!(window.pasted.is_empty());
}

#[test]
fn test_drop_without_uri_list_defers() {
    let fixture = FileFixture::new();
    let file = fixture.file("a.txt");
    let mut window = MockTerminal::new(kitten_ssh_session());

    let outcome = dispatcher().on_drop(&payload("text/plain", &file.to_string_lossy()), &mut window);

    assert_eq!(outcome, DropOutcome::Deferred);
    assert_eq!(window.snapshots(), 0);
}

#[test]
fn test_drop_of_remote_or_missing_files_defers() {
    let fixture = FileFixture::new();
    let file = fixture.file("a.txt");
    let list = format!(
        "file://fileserver{}\nhttps://example.com/x.png\n{}\n",
        file.display(),
        fixture.missing("gone.txt").display()
    );
    let mut window = MockTerminal::new(kitten_ssh_session());

    assert_eq!(
        dispatcher().on_drop(&payload(URI_LIST_MIME, &list), &mut window),
        DropOutcome::Deferred
    );
}

#[test]
fn test_decide_drop_is_pure() {
    let fixture = FileFixture::new();
    let file = fixture.file("a.txt");
    let drop = payload(URI_LIST_MIME, &file.to_string_lossy());

    assert!(dispatcher().decide_drop(&drop, &local_session()).is_none());
    assert!(dispatcher().decide_drop(&drop, &kitten_ssh_session()).is_some());
}

#[test]
fn test_invalid_utf8_payload_is_tolerated() {
    let fixture = FileFixture::new();
    let file = fixture.file("a.txt");
    let mut raw = b"\xff\xfe garbage\n".to_vec();
    raw.extend_from_slice(file.to_string_lossy().as_bytes());
    let drop = HashMap::from([(URI_LIST_MIME.to_string(), raw)]);

    let plan = dispatcher().decide_drop(&drop, &kitten_ssh_session()).unwrap();
    assert_eq!(plan.items().len(), 1);
}
