//! Full-screen seating editor: the floor plan on the left, the waiting panel
//! on the right, mouse drags in between.

mod app;
mod input;
mod layout;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use seatplan_core::SeatingChart;
use tracing::info;

pub use app::EditorApp;

use crate::error::SeatsError;

pub fn run(chart: SeatingChart) -> Result<(), SeatsError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = EditorApp::new(chart);

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(
        revision = app.chart.roster().revision(),
        seated = app.chart.roster().seated_count(),
        "editor closed"
    );

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut EditorApp) -> Result<(), SeatsError> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            input::handle_event(app, event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
