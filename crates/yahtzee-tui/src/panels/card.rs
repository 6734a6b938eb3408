//! The shared score card.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use yahtzee_core::{Category, Section, Totals};
use yahtzee_session::{CellView, Player, SessionView, Standing};

use super::border_color;

/// Draw both players' columns with previews for the active player.
pub fn draw(frame: &mut Frame, area: Rect, view: &SessionView, cursor: Category, focused: bool) {
    let header = Row::new(
        std::iter::once(Cell::from("")).chain(Player::BOTH.map(|p| {
            let style = if p == view.active_player && view.winner.is_none() {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Cell::from(Span::styled(p.to_string(), style))
        })),
    )
    .style(Style::default().add_modifier(Modifier::UNDERLINED));

    let mut rows = Vec::new();
    for section in [Section::Upper, Section::Lower] {
        for row in view.section(section) {
            let selected = focused && row.category == cursor;
            let label_style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            rows.push(Row::new([
                Cell::from(Span::styled(row.label, label_style)),
                score_cell(row.cells[0]),
                score_cell(row.cells[1]),
            ]));
        }
        match section {
            Section::Upper => {
                rows.push(total_row("Upper Total", view.totals, |t| t.upper));
                rows.push(total_row("Bonus (>=63)", view.totals, |t| t.bonus));
                rows.push(total_row("Upper Section", view.totals, |t| {
                    t.upper_with_bonus()
                }));
                rows.push(Row::new([Cell::from("")]));
            }
            Section::Lower => {
                rows.push(total_row("Lower Total", view.totals, |t| t.lower));
                rows.push(grand_row(view));
            }
        }
    }

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Score Card ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color(focused))),
    );

    frame.render_widget(table, area);
}

fn score_cell(cell: CellView) -> Cell<'static> {
    match (cell.score, cell.preview) {
        (Some(score), _) => Cell::from(Span::styled(
            score.to_string(),
            Style::default().fg(Color::White).bold(),
        )),
        (None, Some(preview)) => Cell::from(Span::styled(
            format!("({preview})"),
            Style::default().fg(Color::DarkGray),
        )),
        (None, None) => Cell::from(Span::styled("-", Style::default().fg(Color::DarkGray))),
    }
}

fn total_row(
    label: &'static str,
    totals: [Totals; 2],
    pick: impl Fn(&Totals) -> u32,
) -> Row<'static> {
    Row::new([
        Cell::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
        Cell::from(pick(&totals[0]).to_string()),
        Cell::from(pick(&totals[1]).to_string()),
    ])
}

fn grand_row(view: &SessionView) -> Row<'static> {
    let cell = |player: Player| {
        let style = match view.leader {
            Standing::Leader(p) if p == player => Style::default().fg(Color::Green).bold(),
            _ => Style::default().fg(Color::White).bold(),
        };
        Cell::from(Span::styled(
            view.totals[player.index()].grand.to_string(),
            style,
        ))
    };
    Row::new([
        Cell::from(Span::styled("GRAND TOTAL", Style::default().bold())),
        cell(Player::One),
        cell(Player::Two),
    ])
}
