//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::BoardStyles;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Shortcut sections: (category, [(keys, description)]).
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("k/↑", "Previous thread or message"),
            ("j/↓", "Next thread or message"),
            ("PgUp/PgDn", "Page through a long message"),
            ("Enter", "Open thread / submit input"),
            ("Esc", "Back (quits from the board)"),
        ],
    ),
    (
        "Posting",
        &[
            ("a", "New thread (board) or reply (thread)"),
            ("e", "Edit the selected message"),
            ("d d", "Delete thread or message"),
        ],
    ),
    (
        "Board",
        &[
            ("b or /", "Search titles and messages"),
            ("Esc", "Clear an active search"),
            ("r", "Refresh"),
        ],
    ),
    (
        "Moderation",
        &[("f", "Pin or unpin thread"), ("c", "Close or reopen thread")],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("Ctrl+c", "Quit")],
    ),
];

/// Render the help overlay centered on `area`.
pub fn render_help_overlay(frame: &mut Frame, area: Rect, styles: &BoardStyles) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.border),
        )
        .style(styles.base)
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    if popup_area.height < 3 {
        return;
    }
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height - 1,
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc or ? to close ",
        styles.muted.add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(styles: &BoardStyles) -> Vec<Line<'static>> {
    let key_style = styles.header;
    let mut lines = Vec::new();

    for (index, (category, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, styles.pinned)));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<12}"), key_style),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_help_overlay(frame, area, &BoardStyles::default());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn overlay_lists_every_category() {
        let text = render(80, 40);
        for (category, _) in SECTIONS {
            assert!(text.contains(category), "missing {category}:\n{text}");
        }
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Press Esc or ? to close"));
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 80, area);
        assert_eq!(popup, Rect::new(20, 5, 60, 40));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        render(4, 2);
    }
}
