//! The dice tray.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use yahtzee_session::{Phase, RendererStatus, SessionView};

use super::border_color;

/// Draw the dice, lock markers, rolls left, and renderer state.
pub fn draw(frame: &mut Frame, area: Rect, view: &SessionView, cursor: usize, focused: bool) {
    let block = Block::default()
        .title(" Dice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line<'static>> = Vec::new();

    match &view.renderer {
        RendererStatus::Initializing => lines.push(Line::from(Span::styled(
            "Loading dice...",
            Style::default().fg(Color::DarkGray),
        ))),
        RendererStatus::Failed(message) => lines.push(Line::from(Span::styled(
            format!("Dice error: {message}"),
            Style::default().fg(Color::Red).bold(),
        ))),
        RendererStatus::Ready => {}
    }

    if view.phase == Phase::Rolling {
        lines.push(Line::from(Span::styled(
            "Rolling...",
            Style::default().fg(Color::Yellow),
        )));
    } else if view.dice.is_empty() {
        lines.push(Line::from(Span::styled(
            "Press r to roll",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let dice: Vec<Span<'static>> = view
            .dice
            .iter()
            .enumerate()
            .flat_map(|(i, die)| {
                let mut style = if die.locked {
                    Style::default().fg(Color::Black).bg(Color::Yellow).bold()
                } else {
                    Style::default().fg(Color::White).bold()
                };
                if focused && i == cursor {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                [Span::styled(format!(" {} ", die.value), style), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(dice));

        let markers: String = view
            .dice
            .iter()
            .map(|d| if d.locked { " L  " } else { "    " })
            .collect();
        lines.push(Line::from(Span::styled(
            markers,
            Style::default().fg(Color::Yellow),
        )));
    }

    lines.push(Line::from(""));
    let rolls_style = if view.rolls_remaining == 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    lines.push(Line::from(vec![
        Span::styled("Rolls left: ", Style::default().fg(Color::DarkGray)),
        Span::styled(view.rolls_remaining.to_string(), rolls_style.bold()),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
