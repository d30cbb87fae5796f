//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive `TuiApp<TestBackend>` key by key
//! over an in-memory board.

mod acceptance_moderation;

use crate::model::{MessageRecord, ThreadId, ThreadRecord};
use crate::test_harness::message;

/// Thread `id` holding `(message id, author, text)` triples in order.
pub(crate) fn thread_of(id: &str, title: &str, messages: &[(u64, &str, &str)]) -> ThreadRecord {
    let thread_id = ThreadId::new(id).unwrap();
    ThreadRecord {
        id: thread_id.clone(),
        title: title.to_string(),
        pinned: false,
        closed: false,
        messages: messages
            .iter()
            .map(|(n, author, text)| MessageRecord {
                thread_id: thread_id.clone(),
                ..message(*n, author, text)
            })
            .collect(),
    }
}

/// Two threads: "Long read" by bob (newest, listed first) with a 30-line
/// opening message, and "Welcome" by alice with one reply from bob.
pub(crate) fn sample_threads() -> Vec<ThreadRecord> {
    let long_text = (1..=30)
        .map(|n| format!("line {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    vec![
        thread_of(
            "t1",
            "Welcome",
            &[(1, "alice", "hello all"), (2, "bob", "hi alice")],
        ),
        thread_of("t2", "Long read", &[(3, "bob", long_text.as_str())]),
    ]
}
