use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::worker::Worker;

const TICK: Duration = Duration::from_millis(100);

pub(crate) fn as_tui(worker: Worker) -> Result<()> {
    let mut app = App::new();
    app.load_all();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &worker);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("TUI exited with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &Worker,
) -> Result<()> {
    while app.running {
        pump(app, worker);

        terminal.draw(|f| {
            // tab + status + command bars, filter + controls lines, borders + header
            let content_height = f.area().height.saturating_sub(8) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        // Poll so finished fetches are drawn without waiting for a key
        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Picker => handle_picker_input(key, app),
            }
        }
    }
    Ok(())
}

fn pump(app: &mut App, worker: &Worker) {
    while let Some(outcome) = worker.try_recv() {
        app.apply_outcome(outcome);
    }
    for request in app.take_requests() {
        if let Err(e) = worker.submit(request) {
            app.dispatch_failed(&e);
            break;
        }
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => {
            let page = app.visible_rows;
            let (cursor, len) = app.current_cursor_mut();
            cursor.down(len, page);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let (cursor, _) = app.current_cursor_mut();
            cursor.up();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            let (cursor, _) = app.current_cursor_mut();
            cursor.top();
        }
        KeyCode::Char('G') | KeyCode::End => {
            let page = app.visible_rows;
            let (cursor, len) = app.current_cursor_mut();
            cursor.bottom(len, page);
        }
        KeyCode::Char('1') => switch_screen(app, Screen::Review),
        KeyCode::Char('2') => switch_screen(app, Screen::Approved),
        KeyCode::Char('3') => switch_screen(app, Screen::Declined),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Char('f') => open_picker(app),
        KeyCode::Char('m') if app.screen == Screen::Review => app.view_more(),
        KeyCode::Char('a') if app.screen == Screen::Review => app.approve_first(),
        KeyCode::Char('d') if app.screen == Screen::Review => app.decline_first(),
        KeyCode::Char('u') if app.screen == Screen::Declined => app.restore_selected(),
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_picker_input(key: event::KeyEvent, app: &mut App) {
    let choices = app.employee_choices();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.picker_index + 1 < choices.len() {
                app.picker_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.picker_index = app.picker_index.saturating_sub(1);
        }
        KeyCode::Enter => {
            // Nothing to choose while the directory is loading
            if let Some(employee) = choices.get(app.picker_index) {
                app.input_mode = InputMode::Normal;
                app.screen = Screen::Review;
                app.select_employee(employee);
            }
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('f') => {
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn open_picker(app: &mut App) {
    let current = app.switch.selection().id.clone();
    app.picker_index = app
        .employee_choices()
        .iter()
        .position(|e| e.id == current)
        .unwrap_or(0);
    app.input_mode = InputMode::Picker;
}

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}
