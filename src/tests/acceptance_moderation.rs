//! Deleting, pinning and closing, with and without admin rights.

use super::sample_threads;
use crate::model::Identity;
use crate::state::{Mode, StatusKind};
use crate::test_harness::{AcceptanceTestHarness, ScriptedEditor};
use crossterm::event::KeyCode;

fn harness_as(identity: Identity) -> AcceptanceTestHarness {
    AcceptanceTestHarness::new(identity, sample_threads(), ScriptedEditor::default(), 60, 16)
}

fn titles(harness: &AcceptanceTestHarness) -> Vec<String> {
    harness
        .state()
        .board()
        .entries()
        .iter()
        .map(|e| e.summary.title.clone())
        .collect()
}

// ===== Delete =====

#[test]
fn user_cannot_delete_others_thread() {
    let mut harness = harness_as(Identity::user("alice"));

    // first row is bob's "Long read"
    harness.send_keys(&[KeyCode::Char('d'), KeyCode::Char('d')]);

    assert_eq!(titles(&harness), vec!["Long read", "Welcome"]);
    let status = harness.state().status().unwrap();
    assert_eq!(status.kind, StatusKind::Warning);
    assert_eq!(
        status.text,
        "not allowed: only bob or an admin can delete this thread"
    );
    assert!(!harness.state().delete_pending());
}

#[test]
fn own_thread_needs_two_presses() {
    let mut harness = harness_as(Identity::user("alice"));
    harness.send_key(KeyCode::Down);

    // WHEN pressing d once
    harness.send_key(KeyCode::Char('d'));

    // THEN nothing is deleted yet
    assert!(harness.state().delete_pending());
    assert_eq!(harness.state().board().len(), 2);
    let rows = harness.render_rows();
    assert_eq!(rows[15], " press d again to delete thread 'Welcome'");

    // WHEN pressing d again
    harness.send_key(KeyCode::Char('d'));

    // THEN the thread is gone
    assert!(!harness.state().delete_pending());
    assert_eq!(titles(&harness), vec!["Long read"]);
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("thread deleted")
    );
}

#[test]
fn other_key_disarms_delete() {
    let mut harness = harness_as(Identity::user("alice"));
    harness.send_keys(&[KeyCode::Down, KeyCode::Char('d'), KeyCode::Down]);

    assert!(!harness.state().delete_pending());

    // the next d arms again instead of deleting
    harness.send_key(KeyCode::Char('d'));
    assert!(harness.state().delete_pending());
    assert_eq!(harness.state().board().len(), 2);
}

#[test]
fn unbound_key_disarms_delete() {
    let mut harness = harness_as(Identity::user("alice"));
    harness.send_keys(&[KeyCode::Down, KeyCode::Char('d'), KeyCode::Char('x')]);

    assert!(!harness.state().delete_pending());
    assert!(harness.state().status().is_none());
}

#[test]
fn admin_deletes_reply_and_returns_to_board() {
    let mut harness = harness_as(Identity::admin("root"));
    harness.send_keys(&[KeyCode::Down, KeyCode::Enter, KeyCode::Down]);

    harness.send_keys(&[KeyCode::Char('d'), KeyCode::Char('d')]);

    assert!(matches!(harness.state().mode(), Mode::Board));
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("message deleted")
    );
    let welcome = harness
        .state()
        .board()
        .entries()
        .iter()
        .find(|e| e.summary.title == "Welcome")
        .unwrap();
    assert_eq!(welcome.summary.replies, 0);
}

#[test]
fn opening_message_cannot_be_deleted_alone() {
    let mut harness = harness_as(Identity::admin("root"));
    harness.send_keys(&[KeyCode::Enter, KeyCode::Char('d')]);

    assert!(!harness.state().delete_pending());
    assert!(matches!(harness.state().mode(), Mode::Thread(_)));
    assert_eq!(
        harness.state().status().map(|s| s.kind),
        Some(StatusKind::Warning)
    );
}

// ===== Pin and close =====

#[test]
fn user_cannot_pin() {
    let mut harness = harness_as(Identity::user("alice"));
    harness.send_keys(&[KeyCode::Down, KeyCode::Char('f')]);

    assert_eq!(titles(&harness), vec!["Long read", "Welcome"]);
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("not allowed: only admins can pin or close threads")
    );
}

#[test]
fn admin_pin_moves_thread_to_top() {
    let mut harness = harness_as(Identity::admin("root"));

    // GIVEN Welcome is second by activity
    harness.send_key(KeyCode::Down);

    // WHEN pinning it
    harness.send_key(KeyCode::Char('f'));

    // THEN it leads the board
    assert_eq!(titles(&harness), vec!["Welcome", "Long read"]);
    assert!(harness.state().board().entries()[0].summary.pinned);
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("thread pinned")
    );
    let rows = harness.render_rows();
    assert!(rows[2].contains("Welcome"), "{:?}", rows[2]);

    // WHEN unpinning: back to activity order
    harness.send_key(KeyCode::Char('f'));
    assert_eq!(titles(&harness), vec!["Long read", "Welcome"]);
}

#[test]
fn admin_close_from_thread_keeps_it_open_on_screen() {
    let mut harness = harness_as(Identity::admin("root"));
    harness.send_keys(&[KeyCode::Down, KeyCode::Enter, KeyCode::Down]);

    harness.send_key(KeyCode::Char('c'));

    let Mode::Thread(view) = harness.state().mode() else {
        panic!("thread should stay open");
    };
    assert!(view.thread().closed);
    assert_eq!(view.selected_index(), 1);
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("thread closed")
    );
    let rows = harness.render_rows();
    assert!(
        rows[1].contains(" [closed] Welcome - reply 1 of 1 "),
        "{:?}",
        rows[1]
    );

    // replies are now refused
    harness.send_key(KeyCode::Char('a'));
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("invalid input: thread is closed")
    );

    // reopening
    harness.send_key(KeyCode::Char('c'));
    assert_eq!(
        harness.state().status().map(|s| s.text.as_str()),
        Some("thread reopened")
    );
}

#[test]
fn admin_hints_mention_moderation() {
    let mut harness = AcceptanceTestHarness::new(
        Identity::admin("root"),
        sample_threads(),
        ScriptedEditor::default(),
        120,
        16,
    );

    let rows = harness.render_rows();

    assert!(rows[15].ends_with("f pin | c close"), "{:?}", rows[15]);
    assert!(rows[0].ends_with("@root [admin]"));
}
