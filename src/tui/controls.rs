//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, COARSE_STEPS};
use crate::predictor::PredictionError;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
/// Any key that moves a slider re-runs the prediction.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), PredictionError> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.select_prev(),
        KeyCode::Right if shift => app.nudge(COARSE_STEPS)?,
        KeyCode::Left if shift => app.nudge(-COARSE_STEPS)?,
        KeyCode::Char('L') => app.nudge(COARSE_STEPS)?,
        KeyCode::Char('H') => app.nudge(-COARSE_STEPS)?,
        KeyCode::Right | KeyCode::Char('l' | '+' | '=') => app.nudge(1)?,
        KeyCode::Left | KeyCode::Char('h' | '-') => app.nudge(-1)?,
        KeyCode::PageUp => app.nudge(COARSE_STEPS)?,
        KeyCode::PageDown => app.nudge(-COARSE_STEPS)?,
        KeyCode::Home => app.selected_to_min()?,
        KeyCode::End => app.selected_to_max()?,
        KeyCode::Char('d') => app.reset_selected()?,
        KeyCode::Char('D') => app.reset_all()?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::runtime::hourly_app;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_key(app, KeyEvent::new(code, modifiers)).expect("key should be handled");
    }

    /// Selects the hour slider, the fourth in the panel.
    fn select_hour(app: &mut App) {
        for _ in 0..3 {
            press(app, KeyCode::Tab, KeyModifiers::NONE);
        }
        assert_eq!(app.panel.selected(), 3);
    }

    #[test]
    fn uppercase_vim_keys_move_coarse_steps() {
        let mut app = hourly_app();
        select_hour(&mut app);
        press(&mut app, KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert_eq!(app.record.hour, 22);
        assert_eq!(app.prediction.power_kw, 1200.0);
        press(&mut app, KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(app.record.hour, 12);
    }

    #[test]
    fn shifted_arrows_move_coarse_steps() {
        let mut app = hourly_app();
        select_hour(&mut app);
        press(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(app.record.hour, 22);
        press(&mut app, KeyCode::Left, KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(app.record.hour, 2);
    }

    #[test]
    fn plain_keys_move_one_step() {
        let mut app = hourly_app();
        select_hour(&mut app);
        press(&mut app, KeyCode::Char('l'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.record.hour, 14);
        press(&mut app, KeyCode::Char('h'), KeyModifiers::NONE);
        assert_eq!(app.record.hour, 13);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = hourly_app();
        select_hour(&mut app);
        let mut key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key).expect("release should be handled");
        assert_eq!(app.record.hour, 12);
    }

    #[test]
    fn quit_keys_set_quit() {
        let mut app = hourly_app();
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.quit);
    }
}
