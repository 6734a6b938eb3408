//! Terminal setup, teardown, and main event loop.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tracing::info;

use crate::app::{Focus, TuiApp};
use crate::panels;

/// Time between renderer ticks when no key is pressed.
pub const TICK: Duration = Duration::from_millis(50);

/// Launch the TUI application.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    info!(seed = app.table.session().config().seed, "tui started");
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop. Draws, waits up to one tick for input, then pumps the
/// dice renderer.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(TICK).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
            {
                app.handle_key(key);
            }
        }
        app.tick();
    }
}

/// Main draw function.
fn draw(frame: &mut Frame, app: &TuiApp) {
    let view = app.table.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Card and tray
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    panels::draw_header(frame, chunks[0], &view);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(24)])
        .split(chunks[1]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(body[1]);

    panels::card::draw(
        frame,
        body[0],
        &view,
        app.selected_category(),
        app.focus == Focus::Card,
    );
    panels::dice::draw(
        frame,
        side[0],
        &view,
        app.dice_cursor,
        app.focus == Focus::Dice,
    );
    panels::log::draw(frame, side[1], app.table.session().log());

    let status = match &app.message {
        Some(message) => Paragraph::new(message.text.as_str())
            .style(Style::default().fg(message.style.color()).bg(Color::Black)),
        None => Paragraph::new(hint(app.focus))
            .style(Style::default().fg(Color::Black).bg(Color::White)),
    };
    frame.render_widget(status, chunks[2]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}

fn hint(focus: Focus) -> &'static str {
    match focus {
        Focus::Card => "r:roll  1-5:lock  j/k:move  Enter:score  Tab:dice  ?:help  q:quit",
        Focus::Dice => "r:roll  h/l:move  Space:lock  Tab:card  ?:help  q:quit",
    }
}
