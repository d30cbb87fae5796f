//! Styling for board rows, message headers and the status bar.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are enabled.
///
/// Determined by the `--no-color` flag and the `NO_COLOR` environment variable.
/// Text attributes (bold, reverse) are kept either way: the cursor must stay
/// visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== BoardStyles =====

/// Every style the views draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStyles {
    /// Panel background and plain text.
    pub base: Style,
    /// Panel borders and separator rules.
    pub border: Style,
    /// Cursor row on the board / header of the selected message.
    pub selected: Style,
    /// Pinned thread rows.
    pub pinned: Style,
    /// Message header (first line of a message, when not selected).
    pub header: Style,
    /// Top bar.
    pub title_bar: Style,
    /// Informational status line.
    pub info: Style,
    /// Warning / error status line.
    pub warning: Style,
    /// Secondary text (hints, page indicators).
    pub muted: Style,
}

impl BoardStyles {
    pub fn with_color_config(config: ColorConfig) -> Self {
        let plain = Self {
            base: Style::default(),
            border: Style::default(),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            pinned: Style::default().add_modifier(Modifier::BOLD),
            header: Style::default().add_modifier(Modifier::BOLD),
            title_bar: Style::default(),
            info: Style::default(),
            warning: Style::default().add_modifier(Modifier::BOLD),
            muted: Style::default().add_modifier(Modifier::DIM),
        };
        if !config.colors_enabled() {
            return plain;
        }

        Self {
            base: Style::default().fg(Color::White).bg(Color::Indexed(236)),
            border: Style::default().fg(Color::Gray).bg(Color::Indexed(236)),
            title_bar: Style::default().fg(Color::White).bg(Color::Indexed(236)),
            info: Style::default().fg(Color::Black).bg(Color::Cyan),
            warning: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            ..plain
        }
    }
}

impl Default for BoardStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
