use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::info;

use crate::analytics::health;
use crate::config::Settings;
use crate::session::Session;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// What to load before the first frame.
#[derive(Debug, Default)]
pub(crate) struct TuiOptions {
    pub(crate) file: Option<PathBuf>,
    pub(crate) sample: bool,
}

impl TuiOptions {
    pub(crate) fn from_args(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        for arg in args {
            match arg.as_str() {
                "--sample" => opts.sample = true,
                other if other.starts_with("--") => anyhow::bail!("Unknown option: {other}"),
                other if opts.file.is_none() => {
                    opts.file = Some(PathBuf::from(super::shellexpand(other)));
                }
                other => anyhow::bail!("Unexpected argument: {other}"),
            }
        }
        Ok(opts)
    }
}

pub(crate) fn as_tui(settings: &Settings, opts: &TuiOptions) -> Result<()> {
    let mut session = Session::new(settings);
    if opts.sample {
        session.store.load_sample();
    }
    if let Some(file) = &opts.file {
        session.import_merge(file)?;
    }

    let mut app = App::new(&session, settings.export_dir.clone());
    if !session.store.is_empty() {
        app.set_status(format!("Loaded {} transactions", session.store.len()));
    }
    info!(
        count = session.store.len(),
        health = health::health_score(&session.store.all()),
        "starting tui"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, session)?,
                InputMode::Command => handle_command_input(key, app, session)?,
                InputMode::Confirm => handle_confirm_input(key, app, session),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
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
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Char('3') => app.screen = Screen::Budgets,
        KeyCode::Char('4') => app.screen = Screen::Insights,
        KeyCode::Tab => app.screen = app.screen.next(),
        KeyCode::BackTab => app.screen = app.screen.prev(),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('H') => commands::handle_command("prev-month", app, session)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, session)?,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            // A failed command reports in the status bar instead of ending the session
            if let Err(e) = commands::handle_command(&input, app, session) {
                app.set_status(format!("Error: {e:#}"));
            }
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

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, session: &mut Session) {
    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    match app.pending_action.take() {
        Some(action) if confirmed => apply_pending(action, app, session),
        Some(_) => app.set_status("Cancelled"),
        None => {}
    }
}

fn apply_pending(action: PendingAction, app: &mut App, session: &mut Session) {
    match action {
        PendingAction::ImportReplace { path, transactions } => {
            let count = transactions.len();
            session.store.replace_all(transactions);
            app.refresh(session);
            app.set_status(format!("Imported {count} transactions from {path}"));
        }
        PendingAction::LoadSample => {
            session.store.load_sample();
            app.refresh(session);
            app.set_status(format!("Loaded {} sample transactions", session.store.len()));
        }
        PendingAction::Clear => {
            session.store.clear();
            app.refresh(session);
            app.set_status("Cleared all transactions");
        }
    }
}

// ── Navigation ───────────────────────────────────────────────

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.view.transactions.len(),
            app.visible_rows,
        ),
        Screen::Budgets => {
            if app.budget_index + 1 < app.view.budgets.len() {
                app.budget_index += 1;
            }
        }
        Screen::Dashboard | Screen::Insights => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Budgets => app.budget_index = app.budget_index.saturating_sub(1),
        Screen::Dashboard | Screen::Insights => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => app.budget_index = 0,
        Screen::Dashboard | Screen::Insights => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.view.transactions.len(),
            app.visible_rows,
        ),
        Screen::Budgets => app.budget_index = app.view.budgets.len().saturating_sub(1),
        Screen::Dashboard | Screen::Insights => {}
    }
}
