//! Screen layout rendering.
//!
//! One frame is a header row, the board or thread panel, and a status bar.
//! The help overlay is drawn last, over everything else.

use super::help::render_help_overlay;
use super::styles::BoardStyles;
use crate::model::Identity;
use crate::state::{AppState, LineInput, Mode, Status, StatusKind};
use crate::view_state::Viewport;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the whole screen for `state`.
///
/// Areas come from [`AppState::layout`], so the state must already have
/// been resized to the frame.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &BoardStyles) {
    let layout = state.layout();

    render_header(frame, layout.header, state, styles);
    render_panel(frame, layout.panel, state, styles);
    render_status_bar(frame, layout.status, state, styles);

    if let Mode::Help { .. } = state.mode() {
        let area = frame.area();
        render_help_overlay(frame, area, styles);
    }
}

fn render_panel(frame: &mut Frame, area: Rect, state: &AppState, styles: &BoardStyles) {
    let mut vp = Viewport::new(frame.buffer_mut(), area);
    match state.mode().base() {
        Mode::Thread(view) => view.draw(&mut vp, styles),
        _ => state.board_view().draw(state.board(), &mut vp, styles),
    }
}

/// Application title and thread count on the left, the user on the right.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &BoardStyles) {
    let board = state.board();
    let total = match board.len() {
        1 => "1 thread".to_string(),
        n => format!("{n} threads"),
    };
    let count = if board.is_filtered() {
        format!("{} of {total}", board.visible_count())
    } else {
        total
    };
    let left = match board.filter() {
        Some(pattern) => format!(" gbb | search: {pattern} | {count}"),
        None => format!(" gbb | {count}"),
    };
    let right = user_label(state.identity());

    let [left_area, right_area] = split_right(area, &right);
    frame.render_widget(Paragraph::new(left).style(styles.title_bar), left_area);
    frame.render_widget(
        Paragraph::new(right)
            .style(styles.title_bar)
            .alignment(Alignment::Right),
        right_area,
    );
}

fn user_label(identity: &Identity) -> String {
    if identity.admin {
        format!("@{} [admin] ", identity.user)
    } else {
        format!("@{} ", identity.user)
    }
}

/// Input line, status message, or key hints.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &BoardStyles) {
    let input = match state.mode() {
        Mode::ComposeTitle(input) => Some(("title: ", input)),
        Mode::SearchInput(input) => Some(("search: ", input)),
        _ => None,
    };

    match (input, state.status()) {
        (Some((prompt, input)), status) => {
            let status_text = status.map(|s| format!(" {} ", s.text)).unwrap_or_default();
            let [input_area, status_area] = split_right(area, &status_text);
            render_input(frame, input_area, prompt, input, styles);
            if let Some(status) = status {
                frame.render_widget(
                    Paragraph::new(status_text).style(status_style(status, styles)),
                    status_area,
                );
            }
        }
        (None, Some(status)) => {
            frame.render_widget(
                Paragraph::new(format!(" {}", status.text)).style(status_style(status, styles)),
                area,
            );
        }
        (None, None) => {
            let hints = build_keyboard_hints(
                state.mode(),
                state.board().is_filtered(),
                state.identity().admin,
            );
            frame.render_widget(Paragraph::new(hints).style(styles.muted), area);
        }
    }
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    prompt: &str,
    input: &LineInput,
    styles: &BoardStyles,
) {
    let line = Line::from(vec![prompt.into(), input.as_str().into()]);
    frame.render_widget(Paragraph::new(line).style(styles.base), area);

    let before_cursor: String = input.as_str().chars().take(input.cursor()).collect();
    let offset = (prompt.width() + before_cursor.width()) as u16;
    if area.width > 0 {
        let x = area.x.saturating_add(offset).min(area.right() - 1);
        frame.set_cursor_position(Position::new(x, area.y));
    }
}

fn status_style(status: &Status, styles: &BoardStyles) -> Style {
    match status.kind {
        StatusKind::Info => styles.info,
        StatusKind::Warning | StatusKind::Error => styles.warning,
    }
}

/// Keys worth knowing in `mode`.
fn build_keyboard_hints(mode: &Mode, filtered: bool, admin: bool) -> String {
    let mut hints: Vec<&str> = match mode {
        Mode::Board => vec![
            "enter open",
            "a new",
            "b search",
            "d delete",
            "r refresh",
            "? help",
            if filtered { "esc clear search" } else { "esc quit" },
        ],
        Mode::Thread(_) => vec![
            "a reply",
            "e edit",
            "d delete",
            "pgup/pgdn page",
            "? help",
            "esc back",
        ],
        Mode::Help { .. } => vec!["esc close help"],
        Mode::ComposeTitle(_) | Mode::SearchInput(_) => vec!["enter submit", "esc cancel"],
    };
    if admin && matches!(mode, Mode::Board | Mode::Thread(_)) {
        hints.extend(["f pin", "c close"]);
    }
    format!(" {}", hints.join(" | "))
}

/// Split off a right-hand column just wide enough for `text`.
fn split_right(area: Rect, text: &str) -> [Rect; 2] {
    let width = (text.width() as u16).min(area.width);
    Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area)
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
