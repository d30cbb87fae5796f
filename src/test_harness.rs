//! Shared fixtures and the acceptance test harness.
//!
//! Record builders keep tests short; [`AcceptanceTestHarness`] wraps
//! `TuiApp<TestBackend>` so user stories can be driven key by key.

use crate::backend::{Editor, EditorError, LocalStore};
use crate::config::keybindings::KeyBindings;
use crate::model::{Identity, MessageId, MessageRecord, ThreadId, ThreadRecord, ThreadSummary};
use crate::state::AppState;
use crate::view::{BoardStyles, ColorConfig, TuiApp, TuiOptions};
use chrono::{DateTime, Duration, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// ===== Records =====

fn base_stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Message `id` in thread `t1`, stamped `id` hours after 2024-03-01 09:00.
pub(crate) fn message(id: u64, author: &str, text: &str) -> MessageRecord {
    MessageRecord {
        id: MessageId::new(id),
        thread_id: ThreadId::new("t1").unwrap(),
        author: author.to_string(),
        stamp: base_stamp() + Duration::hours(id as i64),
        text: text.to_string(),
    }
}

/// Open, unpinned thread with `count` messages numbered from 1, authored
/// by `alice`.
pub(crate) fn thread_with(id: &str, title: &str, count: usize) -> ThreadRecord {
    let thread_id = ThreadId::new(id).unwrap();
    let messages = (1..=count as u64)
        .map(|n| MessageRecord {
            thread_id: thread_id.clone(),
            ..message(n, "alice", &format!("message {n}"))
        })
        .collect();
    ThreadRecord {
        id: thread_id,
        title: title.to_string(),
        pinned: false,
        closed: false,
        messages,
    }
}

/// Board row by `alice` with no replies, created and last active `secs`
/// after the epoch.
pub(crate) fn summary(id: &str, title: &str, pinned: bool, secs: i64) -> ThreadSummary {
    let stamp = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs);
    ThreadSummary {
        id: ThreadId::new(id).unwrap(),
        title: title.to_string(),
        author: "alice".to_string(),
        created: stamp,
        last_activity: stamp,
        replies: 0,
        pinned,
        closed: false,
    }
}

// ===== Buffers =====

/// Every buffer row as text, trailing blanks trimmed.
pub(crate) fn buffer_rows(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty lines are dropped to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &Buffer) -> String {
    buffer_rows(buffer)
        .into_iter()
        .filter(|row| !row.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Editor =====

/// Editor double returning queued results and recording what it was given.
///
/// An empty queue answers with an empty string, which cancels composition.
#[derive(Debug, Default)]
pub(crate) struct ScriptedEditor {
    results: VecDeque<Result<String, EditorError>>,
    seen: Rc<RefCell<Vec<String>>>,
}

impl ScriptedEditor {
    pub(crate) fn with_results(results: Vec<Result<String, EditorError>>) -> Self {
        Self {
            results: results.into(),
            seen: Rc::default(),
        }
    }

    /// Initial texts of every session so far, shared with the editor.
    pub(crate) fn seen(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.seen)
    }
}

impl Editor for ScriptedEditor {
    fn edit(&mut self, initial: &str) -> Result<String, EditorError> {
        self.seen.borrow_mut().push(initial.to_string());
        self.results.pop_front().unwrap_or_else(|| Ok(String::new()))
    }
}

// ===== Acceptance harness =====

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub(crate) struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// App over an in-memory board holding `threads`, as `identity`.
    pub(crate) fn new(
        identity: Identity,
        threads: Vec<ThreadRecord>,
        editor: ScriptedEditor,
        width: u16,
        height: u16,
    ) -> Self {
        let store = LocalStore::in_memory(identity.clone(), threads);
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let options = TuiOptions {
            identity,
            page_jump: 10,
            key_bindings: KeyBindings::default(),
            styles: BoardStyles::with_color_config(ColorConfig::from_env_and_args(true)),
        };
        let app = TuiApp::with_terminal(terminal, Box::new(store), Box::new(editor), options)
            .expect("in-memory board always loads");
        Self { app, running: true }
    }

    /// Send a single key
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub(crate) fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub(crate) fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early if the app quits.
    pub(crate) fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text (sends individual character key events)
    pub(crate) fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    pub(crate) fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    /// Resize the TestBackend; the next render relays out.
    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.app.terminal_mut().backend_mut().resize(width, height);
    }

    /// Render the current frame and return its rows.
    pub(crate) fn render_rows(&mut self) -> Vec<String> {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_rows(self.app.terminal().backend().buffer())
    }

    /// Render the current frame to a string
    pub(crate) fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
