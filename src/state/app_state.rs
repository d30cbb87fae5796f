//! Application state and transitions.
//!
//! AppState owns the board, its view, the active [`Mode`] and the status
//! line. It handles one key at a time and tells the event loop what to do
//! next through an [`Outcome`]. Collaborator failures never escape: they are
//! logged, turned into a status line, and the view is left as it was.

use super::line_input::LineInput;
use super::mode::{ComposeRequest, Mode, Outcome, TextEdit};
use crate::backend::editor::{trim_trailing_newlines, EditorError};
use crate::backend::{BoardService, ThreadFlags};
use crate::model::{Board, BoardError, Identity, KeyAction, ThreadId, ThreadRecord};
use crate::view_state::{BoardView, ScreenLayout, ThreadView};
use ratatui::layout::Rect;
use tracing::{debug, warn};

// ===== Status =====

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Confirmation or prompt.
    Info,
    /// Refused action (permissions, invalid input).
    Warning,
    /// Failed collaborator call.
    Error,
}

/// One-line message shown until the next key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Text shown.
    pub text: String,
    /// Severity, selects the style.
    pub kind: StatusKind,
}

impl From<&BoardError> for Status {
    fn from(err: &BoardError) -> Self {
        let kind = match err {
            BoardError::Unauthorized(_) | BoardError::InputInvalid(_) => StatusKind::Warning,
            BoardError::NotFound { .. } | BoardError::Transient(_) => StatusKind::Error,
        };
        Self {
            text: err.to_string(),
            kind,
        }
    }
}

// ===== AppState =====

/// Root UI state, owned by the event loop.
#[derive(Debug, Clone)]
pub struct AppState {
    board: Board,
    board_view: BoardView,
    mode: Mode,
    status: Option<Status>,
    pending_delete: bool,
    identity: Identity,
    area: Rect,
    page_jump: usize,
}

impl AppState {
    /// State over an already fetched `board`, laid out for a terminal of `area`.
    pub fn new(board: Board, identity: Identity, area: Rect, page_jump: usize) -> Self {
        let page_jump = page_jump.max(1);
        let board_view = BoardView::new(&board, ScreenLayout::new(area).panel, page_jump);
        Self {
            board,
            board_view,
            mode: Mode::Board,
            status: None,
            pending_delete: false,
            identity,
            area,
            page_jump,
        }
    }

    /// Fetch the board from `service` and build the initial state.
    pub fn load(
        service: &dyn BoardService,
        identity: Identity,
        area: Rect,
        page_jump: usize,
    ) -> Result<Self, BoardError> {
        let board = Board::from_record(service.fetch_board()?);
        Ok(Self::new(board, identity, area, page_jump))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_view(&self) -> &BoardView {
        &self.board_view
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.area)
    }

    /// Whether a delete is waiting for its confirming keystroke.
    pub fn delete_pending(&self) -> bool {
        self.pending_delete
    }

    // ===== Layout =====

    /// Rebuild every view for a new terminal size.
    ///
    /// Board scroll goes back to the top. An open thread keeps its selected
    /// message, shown from its first page.
    pub fn resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        debug!(width = area.width, height = area.height, "Resize");
        self.area = area;
        let panel = self.layout().panel;
        self.board_view = BoardView::new(&self.board, panel, self.page_jump);
        relayout(&mut self.mode, panel);
    }

    // ===== Input =====

    /// Handle one bound key.
    pub fn handle_action(&mut self, action: KeyAction, service: &mut dyn BoardService) -> Outcome {
        self.status = None;
        let armed = std::mem::take(&mut self.pending_delete);

        if action == KeyAction::Quit {
            return Outcome::Quit;
        }

        let mode = std::mem::replace(&mut self.mode, Mode::Board);
        let from = mode.name();
        let (mode, outcome) = match mode {
            Mode::Board => self.board_action(action, armed, service),
            Mode::Thread(view) => self.thread_action(*view, action, armed, service),
            Mode::ComposeTitle(input) => self.title_action(input, action),
            Mode::SearchInput(input) => self.search_action(input, action, service),
            Mode::Help { previous } => match action {
                KeyAction::Back | KeyAction::Help => (*previous, Outcome::Continue),
                _ => (Mode::Help { previous }, Outcome::Continue),
            },
        };
        if mode.name() != from {
            debug!(from, to = mode.name(), "Mode change");
        }
        self.mode = mode;
        outcome
    }

    /// Handle a key typed in a text-entry mode. Ignored in other modes.
    pub fn handle_text(&mut self, edit: TextEdit) {
        self.status = None;
        self.pending_delete = false;
        if let Mode::ComposeTitle(input) | Mode::SearchInput(input) = &mut self.mode {
            match edit {
                TextEdit::Insert(ch) => input.insert(ch),
                TextEdit::Backspace => input.backspace(),
                TextEdit::Left => input.move_left(),
                TextEdit::Right => input.move_right(),
            }
        }
    }

    /// A key with no binding: dismiss the status line and any armed delete.
    pub fn handle_unbound_key(&mut self) {
        self.status = None;
        self.pending_delete = false;
    }

    fn board_action(
        &mut self,
        action: KeyAction,
        armed: bool,
        service: &mut dyn BoardService,
    ) -> (Mode, Outcome) {
        match action {
            KeyAction::Up => self.board_view.move_up(),
            KeyAction::Down => self.board_view.move_down(),
            KeyAction::Confirm => {
                if let Some(id) = self.selected_thread_id() {
                    match service.fetch_thread(&id) {
                        Ok(record) => return (self.open_thread(record, 0), Outcome::Continue),
                        Err(err) => self.report(&err),
                    }
                }
            }
            KeyAction::Back => {
                if !self.board.is_filtered() {
                    return (Mode::Board, Outcome::Quit);
                }
                self.board.clear_filter();
                self.rebuild_board_view();
            }
            KeyAction::Help => {
                return (
                    Mode::Help {
                        previous: Box::new(Mode::Board),
                    },
                    Outcome::Continue,
                );
            }
            KeyAction::Add => return (Mode::ComposeTitle(LineInput::new()), Outcome::Continue),
            KeyAction::Search => return (Mode::SearchInput(LineInput::new()), Outcome::Continue),
            KeyAction::Delete => self.delete_selected_thread(armed, service),
            KeyAction::TogglePin | KeyAction::ToggleClosed => {
                if let Some(id) = self.selected_thread_id() {
                    if let Err(err) = self.toggle_flag(&id, action, service) {
                        self.report(&err);
                    }
                }
            }
            KeyAction::Refresh => {
                if let Err(err) = self.reload_board(service) {
                    self.report(&err);
                }
            }
            KeyAction::PageUp | KeyAction::PageDown | KeyAction::Edit | KeyAction::Quit => {}
        }
        (Mode::Board, Outcome::Continue)
    }

    fn thread_action(
        &mut self,
        mut view: ThreadView,
        action: KeyAction,
        armed: bool,
        service: &mut dyn BoardService,
    ) -> (Mode, Outcome) {
        let mut outcome = Outcome::Continue;
        match action {
            KeyAction::Up => view.move_up(),
            KeyAction::Down => view.move_down(),
            KeyAction::PageUp => view.page_up(),
            KeyAction::PageDown => view.page_down(),
            KeyAction::Back => return (Mode::Board, Outcome::Continue),
            KeyAction::Help => {
                let previous = Box::new(Mode::Thread(Box::new(view)));
                return (Mode::Help { previous }, Outcome::Continue);
            }
            KeyAction::Add => match self.reply_request(&view) {
                Ok(request) => outcome = Outcome::Compose(request),
                Err(err) => self.report(&err),
            },
            KeyAction::Edit => match self.edit_request(&view) {
                Ok(request) => outcome = Outcome::Compose(request),
                Err(err) => self.report(&err),
            },
            KeyAction::Delete => {
                if let Some(mode) = self.delete_selected_message(&view, armed, service) {
                    return (mode, Outcome::Continue);
                }
            }
            KeyAction::TogglePin | KeyAction::ToggleClosed => {
                let id = view.thread().id.clone();
                let selected = view.selected_index();
                let toggled = self
                    .toggle_flag(&id, action, service)
                    .and_then(|()| service.fetch_thread(&id));
                match toggled {
                    Ok(record) => return (self.open_thread(record, selected), outcome),
                    Err(err) => self.report(&err),
                }
            }
            KeyAction::Refresh => {
                let selected = view.selected_index();
                match service.fetch_thread(&view.thread().id) {
                    Ok(record) => return (self.open_thread(record, selected), outcome),
                    Err(err) => self.report(&err),
                }
            }
            KeyAction::Confirm | KeyAction::Search | KeyAction::Quit => {}
        }
        (Mode::Thread(Box::new(view)), outcome)
    }

    fn title_action(&mut self, input: LineInput, action: KeyAction) -> (Mode, Outcome) {
        match action {
            KeyAction::Back => (Mode::Board, Outcome::Continue),
            KeyAction::Confirm => {
                let title = input.as_str().trim().to_string();
                if title.is_empty() {
                    self.report(&BoardError::InputInvalid("title is empty".into()));
                    return (Mode::ComposeTitle(input), Outcome::Continue);
                }
                (Mode::Board, Outcome::Compose(ComposeRequest::NewThread { title }))
            }
            _ => (Mode::ComposeTitle(input), Outcome::Continue),
        }
    }

    fn search_action(
        &mut self,
        input: LineInput,
        action: KeyAction,
        service: &mut dyn BoardService,
    ) -> (Mode, Outcome) {
        match action {
            KeyAction::Back => (Mode::Board, Outcome::Continue),
            KeyAction::Confirm => {
                let pattern = input.into_text();
                if let Err(err) = self.apply_search(pattern.trim(), service) {
                    self.report(&err);
                }
                (Mode::Board, Outcome::Continue)
            }
            _ => (Mode::SearchInput(input), Outcome::Continue),
        }
    }

    // ===== Compose =====

    /// Submit the text collected for `request`.
    ///
    /// Editor failures and empty text cancel the request with a status line.
    pub fn finish_compose(
        &mut self,
        request: ComposeRequest,
        edited: Result<String, EditorError>,
        service: &mut dyn BoardService,
    ) {
        let text = match edited {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Editor session failed");
                self.set_status(format!("editor failed: {err}"), StatusKind::Error);
                return;
            }
        };
        let text = trim_trailing_newlines(&text);
        if text.trim().is_empty() {
            self.report(&BoardError::InputInvalid("message is empty, nothing posted".into()));
            return;
        }

        let result = match request {
            ComposeRequest::NewThread { title } => {
                service.submit_new_thread(&title, text).map(|thread| {
                    let applied = format!("started thread {}", thread.id);
                    self.set_status(applied.clone(), StatusKind::Info);
                    self.refresh_board_after(service, &applied);
                })
            }
            ComposeRequest::Reply { thread } => {
                service.submit_reply(&thread, text).and_then(|reply| {
                    let record = service.fetch_thread(&thread)?;
                    let index = record
                        .messages
                        .iter()
                        .position(|m| m.id == reply.id)
                        .unwrap_or(0);
                    self.mode = self.open_thread(record, index);
                    self.refresh_board_after(service, "reply posted");
                    Ok(())
                })
            }
            ComposeRequest::Edit {
                thread,
                message,
                original,
            } => {
                if text == original {
                    self.set_status("no changes", StatusKind::Info);
                    return;
                }
                service.submit_edit(message, text).and_then(|_| {
                    let record = service.fetch_thread(&thread)?;
                    let index = record
                        .messages
                        .iter()
                        .position(|m| m.id == message)
                        .unwrap_or(0);
                    self.mode = self.open_thread(record, index);
                    Ok(())
                })
            }
        };
        if let Err(err) = result {
            self.report(&err);
        }
    }

    fn reply_request(&self, view: &ThreadView) -> Result<ComposeRequest, BoardError> {
        let thread = view.thread();
        if thread.closed {
            return Err(BoardError::InputInvalid("thread is closed".into()));
        }
        Ok(ComposeRequest::Reply {
            thread: thread.id.clone(),
        })
    }

    fn edit_request(&self, view: &ThreadView) -> Result<ComposeRequest, BoardError> {
        let thread = view.thread();
        if thread.closed {
            return Err(BoardError::InputInvalid("thread is closed".into()));
        }
        let message = view
            .selected_message()
            .ok_or_else(|| BoardError::not_found("message"))?;
        if !self.identity.can_modify(&message.author) {
            return Err(BoardError::Unauthorized(format!(
                "only {} or an admin can edit this message",
                message.author
            )));
        }
        Ok(ComposeRequest::Edit {
            thread: thread.id.clone(),
            message: message.id,
            original: message.text.clone(),
        })
    }

    // ===== Board commands =====

    fn delete_selected_thread(&mut self, armed: bool, service: &mut dyn BoardService) {
        let Some(summary) = self
            .board_view
            .selected()
            .map(|pos| self.board.entries()[pos].summary.clone())
        else {
            return;
        };
        if !self.identity.can_modify(&summary.author) {
            self.report(&BoardError::Unauthorized(format!(
                "only {} or an admin can delete this thread",
                summary.author
            )));
            return;
        }
        if !armed {
            self.pending_delete = true;
            self.set_status(
                format!("press d again to delete thread '{}'", summary.title),
                StatusKind::Info,
            );
            return;
        }
        let result = service
            .delete_thread(&summary.id)
            .and_then(|()| self.reload_board(service));
        match result {
            Ok(()) => self.set_status("thread deleted", StatusKind::Info),
            Err(err) => self.report(&err),
        }
    }

    /// Returns the next mode when the message was deleted.
    fn delete_selected_message(
        &mut self,
        view: &ThreadView,
        armed: bool,
        service: &mut dyn BoardService,
    ) -> Option<Mode> {
        let message = view.selected_message()?;
        if view.selected_index() == 0 {
            self.report(&BoardError::InputInvalid(
                "the opening message goes with its thread, delete the thread from the board"
                    .into(),
            ));
            return None;
        }
        if !self.identity.can_modify(&message.author) {
            self.report(&BoardError::Unauthorized(format!(
                "only {} or an admin can delete this message",
                message.author
            )));
            return None;
        }
        if !armed {
            self.pending_delete = true;
            self.set_status("press d again to delete this message", StatusKind::Info);
            return None;
        }
        match service
            .delete_message(message.id)
            .and_then(|()| self.reload_board(service))
        {
            Ok(()) => {
                self.set_status("message deleted", StatusKind::Info);
                Some(Mode::Board)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    fn toggle_flag(
        &mut self,
        id: &ThreadId,
        action: KeyAction,
        service: &mut dyn BoardService,
    ) -> Result<(), BoardError> {
        if !self.identity.can_moderate() {
            return Err(BoardError::Unauthorized(
                "only admins can pin or close threads".into(),
            ));
        }
        let current = self
            .board
            .thread(id)
            .ok_or_else(|| BoardError::not_found(format!("thread {id}")))?;
        let flags = match action {
            KeyAction::TogglePin => ThreadFlags {
                pinned: Some(!current.pinned),
                closed: None,
            },
            _ => ThreadFlags {
                pinned: None,
                closed: Some(!current.closed),
            },
        };
        let summary = service.set_thread_flags(id, flags)?;
        self.reload_board(service)?;
        let state = match action {
            KeyAction::TogglePin if summary.pinned => "pinned",
            KeyAction::TogglePin => "unpinned",
            _ if summary.closed => "closed",
            _ => "reopened",
        };
        self.set_status(format!("thread {state}"), StatusKind::Info);
        Ok(())
    }

    fn apply_search(
        &mut self,
        pattern: &str,
        service: &mut dyn BoardService,
    ) -> Result<(), BoardError> {
        let matches: Vec<ThreadId> = service
            .search(pattern)?
            .into_iter()
            .map(|thread| thread.id)
            .collect();
        self.board.apply_filter(pattern, &matches);
        self.rebuild_board_view();
        Ok(())
    }

    /// Refetch the board, keeping an active search filter applied.
    fn reload_board(&mut self, service: &mut dyn BoardService) -> Result<(), BoardError> {
        let mut board = Board::from_record(service.fetch_board()?);
        if let Some(pattern) = self.board.filter() {
            let matches: Vec<ThreadId> = service
                .search(pattern)?
                .into_iter()
                .map(|thread| thread.id)
                .collect();
            board.apply_filter(pattern, &matches);
        }
        self.board = board;
        self.rebuild_board_view();
        Ok(())
    }

    /// Reload the board after `applied` already went through.
    ///
    /// A failed reload leaves the old board and a warning naming what was applied.
    fn refresh_board_after(&mut self, service: &mut dyn BoardService, applied: &str) {
        if let Err(err) = self.reload_board(service) {
            warn!(error = %err, applied, "Board refresh failed");
            self.set_status(
                format!("{applied}, board not refreshed: {err}"),
                StatusKind::Warning,
            );
        }
    }

    fn rebuild_board_view(&mut self) {
        self.board_view = BoardView::new(&self.board, self.layout().panel, self.page_jump);
    }

    fn selected_thread_id(&self) -> Option<ThreadId> {
        self.board_view
            .selected()
            .map(|pos| self.board.entries()[pos].summary.id.clone())
    }

    fn open_thread(&self, record: ThreadRecord, selected: usize) -> Mode {
        let mut view = ThreadView::new(record, self.layout().panel);
        view.select(selected);
        Mode::Thread(Box::new(view))
    }

    // ===== Status =====

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(Status {
            text: text.into(),
            kind,
        });
    }

    fn report(&mut self, err: &BoardError) {
        warn!(error = %err, "Board action failed");
        self.status = Some(Status::from(err));
    }
}

/// Rebuild the layout carried by `mode` for a new panel.
fn relayout(mode: &mut Mode, panel: Rect) {
    match mode {
        Mode::Thread(view) => {
            let selected = view.selected_index();
            **view = ThreadView::new(view.thread().clone(), panel);
            view.select(selected);
        }
        Mode::Help { previous } => relayout(previous, panel),
        Mode::Board | Mode::ComposeTitle(_) | Mode::SearchInput(_) => {}
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
