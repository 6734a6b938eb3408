//! Shared utilities for TUI views: layout helpers, status messages, and popups.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Visual style for a status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Something happened (green).
    Info,
    /// A request was ignored (yellow).
    Warning,
    /// The dice renderer failed (red).
    Error,
}

impl MessageStyle {
    /// Foreground color for this style.
    pub fn color(self) -> Color {
        match self {
            Self::Info => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// A one-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Visual style.
    pub style: MessageStyle,
    /// The text content.
    pub text: String,
}

impl StatusMessage {
    /// An info message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            style: MessageStyle::Info,
            text: text.into(),
        }
    }

    /// A warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            style: MessageStyle::Warning,
            text: text.into(),
        }
    }

    /// An error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            style: MessageStyle::Error,
            text: text.into(),
        }
    }
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the key binding popup.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Anywhere:"),
        Line::from("  r           Roll / reroll unlocked dice"),
        Line::from("  1-5         Lock or unlock a die"),
        Line::from("  Tab         Switch between card and dice"),
        Line::from(""),
        Line::from("Score card:"),
        Line::from("  j / k       Move down / up"),
        Line::from("  g / G       First / last category"),
        Line::from("  Enter / s   Score the selected category"),
        Line::from(""),
        Line::from("Dice tray:"),
        Line::from("  h / l       Move left / right"),
        Line::from("  Space       Lock or unlock the selected die"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Ctrl+C  Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
