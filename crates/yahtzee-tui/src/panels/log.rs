//! Recent game events.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use yahtzee_session::{GameLog, LogEntry};

/// Draw the most recent log entries that fit, newest at the bottom.
pub fn draw(frame: &mut Frame, area: Rect, log: &GameLog) {
    let capacity = area.height.saturating_sub(2) as usize;
    let entries = log.entries();
    let start = entries.len().saturating_sub(capacity);

    let items: Vec<ListItem> = entries[start..]
        .iter()
        .map(|entry| ListItem::new(entry_line(entry)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

fn entry_line(entry: &LogEntry) -> Line<'static> {
    match entry {
        LogEntry::Rolled { player, faces, .. } => Line::from(format!("{player} rolled {faces:?}")),
        LogEntry::LockToggled {
            player,
            value,
            locked,
            ..
        } => {
            let verb = if *locked { "locked" } else { "unlocked" };
            Line::from(Span::styled(
                format!("{player} {verb} a {value}"),
                Style::default().fg(Color::DarkGray),
            ))
        }
        LogEntry::Scored {
            player,
            category,
            points,
            ..
        } => Line::from(Span::styled(
            format!("{player} scored {points} in {category}"),
            Style::default().fg(Color::Green),
        )),
        LogEntry::TurnPassed { to, .. } => Line::from(Span::styled(
            format!("-- {to}'s turn --"),
            Style::default().fg(Color::Yellow),
        )),
        LogEntry::RendererFault { message, .. } => Line::from(Span::styled(
            format!("Dice error: {message}"),
            Style::default().fg(Color::Red),
        )),
        LogEntry::GameOver { totals, .. } => Line::from(Span::styled(
            format!("Game over: {} - {}", totals[0], totals[1]),
            Style::default().fg(Color::Cyan).bold(),
        )),
    }
}
