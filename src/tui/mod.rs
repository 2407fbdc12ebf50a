//! Interactive terminal UI: seven sliders and a live power readout.
//!
//! Feature-gated behind `tui`.

mod controls;
mod layout;
/// Application state.
pub mod runtime;
mod style;

use std::io;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;
use tracing::info;

use crate::inputs::InputPanel;
use crate::predictor::{PredictionError, Predictor};
use runtime::App;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

/// Launches the TUI event loop.
///
/// The first prediction runs before the terminal is touched. Sets up raw
/// mode and the alternate screen, runs the event loop, and restores the
/// terminal on every exit path.
///
/// # Errors
///
/// Returns a [`TuiError`] on terminal failure or any prediction failure.
pub fn run(predictor: Predictor, panel: InputPanel) -> Result<(), TuiError> {
    let mut app = App::new(predictor, panel)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e.into());
        }
    };

    info!("interactive session started");
    let result = event_loop(&mut terminal, &mut app);

    // always restore terminal state
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    info!(last = %app.prediction, "interactive session ended");
    result
}

/// Core event loop: draw, block for input, apply it.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), TuiError> {
    loop {
        terminal.draw(|frame| layout::render(frame, app))?;

        if app.quit {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            controls::handle_key(app, key)?;
        }
    }
}
