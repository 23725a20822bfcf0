use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::debug;

use crate::models::{MonthKey, Transaction};
use crate::session::{DashboardView, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Insights,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Insights,
        ]
    }

    pub(crate) fn next(self) -> Self {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + 1) % screens.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + screens.len() - 1) % screens.len()]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Action that replaces the session's data and needs a y/N confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    ImportReplace {
        path: String,
        transactions: Vec<Transaction>,
    },
    LoadSample,
    Clear,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,
    pub(crate) export_dir: PathBuf,

    pub(crate) view: DashboardView,
    pub(crate) filter_label: String,

    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) budget_index: usize,

    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(session: &Session, export_dir: PathBuf) -> Self {
        let today = Local::now().date_naive();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,
            export_dir,

            view: session.view(today),
            filter_label: session.filter.describe(),

            transaction_index: 0,
            transaction_scroll: 0,
            budget_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Recompute every derived view from the session.
    pub(crate) fn refresh(&mut self, session: &Session) {
        self.today = Local::now().date_naive();
        self.view = session.view(self.today);
        self.filter_label = session.filter.describe();
        debug!(
            version = session.store.version(),
            shown = self.view.transactions.len(),
            filter = %self.filter_label,
            "refreshed view"
        );

        let len = self.view.transactions.len();
        if self.transaction_index >= len {
            self.transaction_index = len.saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        if self.budget_index >= self.view.budgets.len() {
            self.budget_index = self.view.budgets.len().saturating_sub(1);
        }
    }

    pub(crate) fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today)
    }

    pub(crate) fn ask_confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.pending_action = Some(action);
        self.confirm_message = message.into();
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
