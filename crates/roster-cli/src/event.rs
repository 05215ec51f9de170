use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use roster_core::domain::RegistrationPhase;
use roster_core::repositories::RosterStore;
use roster_core::services::{Pacer, RandomSource};

use crate::app::{App, Screen};

/// Poll for keyboard events with timeout
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle keyboard input
pub async fn handle_event<S, R, P>(app: &mut App<S, R, P>, event: Event) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let Event::Key(key) = event else {
        // Resize handled by ratatui automatically
        return Ok(());
    };

    // Only handle key press events (not release)
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if is_ctrl_c(&key) {
        app.should_quit = true;
        return Ok(());
    }

    // Keys are ignored while a paced action is in flight
    if app.is_busy() {
        return Ok(());
    }

    match &app.screen {
        Screen::Registration => handle_registration(app, key.code),
        Screen::AdminGate => handle_admin_gate(app, key.code),
        Screen::Dashboard => handle_dashboard(app, key.code).await?,
        Screen::ConfirmClear => handle_confirm_clear(app, key.code).await?,
        Screen::Message(_, _) => {
            // Any key dismisses the message
            app.dismiss_message();
        }
    }
    Ok(())
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn handle_registration<S, R, P>(app: &mut App<S, R, P>, code: KeyCode)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    if matches!(app.registration, RegistrationPhase::Success(_)) {
        match code {
            KeyCode::Enter => app.reset_registration(),
            KeyCode::Tab => app.open_gate(),
            KeyCode::Esc => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char(c) => app.push_name_char(c),
        KeyCode::Backspace => app.pop_name_char(),
        KeyCode::Enter => app.submit_registration(),
        KeyCode::Tab => app.open_gate(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_admin_gate<S, R, P>(app: &mut App<S, R, P>, code: KeyCode)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    match code {
        KeyCode::Char(c) => app.push_passcode_char(c),
        KeyCode::Backspace => app.pop_passcode_char(),
        KeyCode::Enter => app.submit_passcode(),
        KeyCode::Esc => {
            app.passcode_input.clear();
            app.screen = Screen::Registration;
        }
        _ => {}
    }
}

async fn handle_dashboard<S, R, P>(app: &mut App<S, R, P>, code: KeyCode) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    match code {
        KeyCode::Tab => app.focus = app.focus.toggle(),
        KeyCode::Left | KeyCode::Char('h') => app.adjust_focused(false).await?,
        KeyCode::Right | KeyCode::Char('l') => app.adjust_focused(true).await?,
        KeyCode::Up | KeyCode::Char('k') => app.groups_up(),
        KeyCode::Down | KeyCode::Char('j') => app.groups_down(),
        KeyCode::Char('e') => app.export_roster().await?,
        KeyCode::Char('c') | KeyCode::Delete => app.screen = Screen::ConfirmClear,
        KeyCode::Char('r') | KeyCode::Esc => app.leave_dashboard(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
    Ok(())
}

async fn handle_confirm_clear<S, R, P>(app: &mut App<S, R, P>, code: KeyCode) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.clear_roster().await?,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.screen = Screen::Dashboard;
        }
        _ => {}
    }
    Ok(())
}
