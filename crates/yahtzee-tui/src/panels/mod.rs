//! Panel rendering: score card, dice tray, game log, and header.

pub mod card;
pub mod dice;
pub mod log;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use yahtzee_session::{SessionView, Standing};

/// Border color for a panel, brighter when focused.
pub fn border_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

/// Draw the one-line header: round, active player, and result.
pub fn draw_header(frame: &mut Frame, area: Rect, view: &SessionView) {
    let mut spans = vec![Span::styled(
        " YAHTZEE ",
        Style::default().fg(Color::Black).bg(Color::Yellow).bold(),
    )];

    match view.winner {
        Some(Standing::Leader(p)) => spans.push(Span::styled(
            format!("  Game over: {p} wins!"),
            Style::default().fg(Color::Green).bold(),
        )),
        Some(Standing::Tie) => spans.push(Span::styled(
            "  Game over: tie game!",
            Style::default().fg(Color::Green).bold(),
        )),
        None => {
            spans.push(Span::styled(
                format!("  Round {}/{}", view.round, view.rounds),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::styled(
                format!("  {} to play", view.active_player),
                Style::default().fg(Color::Yellow).bold(),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
