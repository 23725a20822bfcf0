use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::app::{App, PendingAction, Screen};
use crate::import::CsvImporter;
use crate::models::{category, BudgetConfig, MonthKey};
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinDash", cmd_quit, r);
    register_command!("quit", "Quit FinDash", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("n", "Go to Insights", cmd_insights, r);
    register_command!("insights", "Go to Insights", cmd_insights, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "a",
        "Add transaction (e.g. :add 2024-01-15 -450 Food Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "add",
        "Add transaction (e.g. :add 2024-01-15 -450 Food Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "import",
        "Replace all transactions with a CSV (e.g. :import ~/money.csv)",
        cmd_import,
        r
    );
    register_command!(
        "i",
        "Replace all transactions with a CSV (e.g. :import ~/money.csv)",
        cmd_import,
        r
    );
    register_command!(
        "merge",
        "Append transactions from a CSV (e.g. :merge ~/march.csv)",
        cmd_merge,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/money.csv)",
        cmd_export,
        r
    );
    register_command!(
        "e",
        "Export transactions to CSV (e.g. :export ~/money.csv)",
        cmd_export,
        r
    );
    register_command!("clear", "Remove all transactions", cmd_clear, r);
    register_command!("sample", "Load sample transactions", cmd_sample, r);
    register_command!(
        "dedup",
        "Remove duplicate transactions and sort by date",
        cmd_dedup,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget Food 10000)",
        cmd_budget,
        r
    );
    register_command!(
        "unbudget",
        "Remove a budget, or all of them (e.g. :unbudget Food)",
        cmd_unbudget,
        r
    );
    register_command!(
        "goal",
        "Set savings goal (e.g. :goal monthly 5000)",
        cmd_goal,
        r
    );
    register_command!(
        "month",
        "Filter by month(s) (e.g. :month 2024-01,2024-02)",
        cmd_month,
        r
    );
    register_command!(
        "m",
        "Filter by month(s) (e.g. :month 2024-01,2024-02)",
        cmd_month,
        r
    );
    register_command!(
        "category",
        "Filter by categories (e.g. :category Food,Bills)",
        cmd_category,
        r
    );
    register_command!(
        "range",
        "Filter by dates (e.g. :range 2024-01-01 2024-03-31)",
        cmd_range,
        r
    );
    register_command!(
        "cat",
        "Filter by categories (e.g. :category Food,Bills)",
        cmd_category,
        r
    );
    register_command!("nofilter", "Clear all filters", cmd_nofilter, r);
    register_command!("reset", "Clear all filters", cmd_nofilter, r);
    register_command!("next-month", "Filter to the next month", cmd_next_month, r);
    register_command!("prev-month", "Filter to the previous month", cmd_prev_month, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        debug!(command = cmd_name, "running command");
        (cmd.run)(args, app, session)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_insights(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Insights;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <date> <amount> <category> [description]";

    let mut parts = args.splitn(4, ' ').map(str::trim);
    let (Some(date_str), Some(amount_str), Some(category_name)) =
        (parts.next(), parts.next(), parts.next())
    else {
        app.set_status(USAGE);
        return Ok(());
    };
    let description = parts.next().unwrap_or("");

    let date = match parse_date_arg(date_str, app.today) {
        Some(d) => d,
        None => {
            app.set_status(format!("Invalid date: {date_str} (use YYYY-MM-DD or 'today')"));
            return Ok(());
        }
    };
    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    match session.add_transaction(date, amount, category_name, description) {
        Ok(()) => {
            app.refresh(session);
            let kind = if amount > Decimal::ZERO { "income" } else { "expense" };
            app.set_status(format!(
                "Added {kind}: {date} {} {}",
                crate::ui::util::format_amount(amount),
                category::normalize(category_name)
            ));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.csv>");
        return Ok(());
    }
    let path = crate::run::shellexpand(args);
    match CsvImporter::from_path(std::path::Path::new(&path)) {
        Ok(transactions) => {
            let message = format!(
                "Replace {} current transactions with {} from {path}?",
                session.store.len(),
                transactions.len()
            );
            app.ask_confirm(PendingAction::ImportReplace { path, transactions }, message);
        }
        Err(e) => app.set_status(format!("Import failed: {e:#}")),
    }
    Ok(())
}

fn cmd_merge(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :merge <file.csv>");
        return Ok(());
    }
    let path = crate::run::shellexpand(args);
    match session.import_merge(std::path::Path::new(&path)) {
        Ok(count) => {
            app.refresh(session);
            app.set_status(format!("Merged {count} transactions from {path}"));
        }
        Err(e) => app.set_status(format!("Import failed: {e:#}")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        app.export_dir
            .join(format!("findash-export-{}.csv", app.today.format("%Y-%m-%d")))
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    let count = session.export(&path)?;
    if count == 0 {
        app.set_status(format!("Wrote empty export to {}", path.display()));
    } else {
        app.set_status(format!("Exported {count} transactions to {}", path.display()));
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if session.store.is_empty() {
        app.set_status("Nothing to clear");
        return Ok(());
    }
    let message = format!("Remove all {} transactions?", session.store.len());
    app.ask_confirm(PendingAction::Clear, message);
    Ok(())
}

fn cmd_sample(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if session.store.is_empty() {
        session.store.load_sample();
        app.refresh(session);
        app.set_status(format!("Loaded {} sample transactions", session.store.len()));
    } else {
        let message = format!(
            "Replace {} transactions with sample data?",
            session.store.len()
        );
        app.ask_confirm(PendingAction::LoadSample, message);
    }
    Ok(())
}

fn cmd_dedup(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let before = session.store.len();
    let after = session.store.deduplicate().len();
    app.refresh(session);
    app.set_status(format!(
        "Removed {} duplicate transactions; sorted by date",
        before - after
    ));
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    }

    let amount_str = parts[0];
    let category_name = parts[1];

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    match session.set_budget(category_name, amount) {
        Ok(name) => {
            app.refresh(session);
            app.screen = Screen::Budgets;
            app.set_status(format!(
                "Budget set: {name} = {} per month",
                crate::ui::util::format_amount(amount)
            ));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_unbudget(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :unbudget <category>");
        return Ok(());
    }
    if args.eq_ignore_ascii_case("all") {
        if session.budgets.is_empty() {
            app.set_status("No budgets set");
        } else {
            let count = session.budgets.len();
            session.budgets = BudgetConfig::empty();
            app.refresh(session);
            app.set_status(format!("Removed all {count} budgets"));
        }
        return Ok(());
    }
    let name = category::normalize(args);
    if session.budgets.remove(&name) {
        app.refresh(session);
        app.set_status(format!("Removed budget for {name}"));
    } else {
        app.set_status(format!("No budget set for {name}"));
    }
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :goal <monthly|annual> <amount>";
    let Some((which, amount_str)) = args.split_once(' ') else {
        app.set_status(USAGE);
        return Ok(());
    };
    let amount = match Decimal::from_str(amount_str.trim()) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {}", amount_str.trim()));
            return Ok(());
        }
    };
    let result = match which.to_ascii_lowercase().as_str() {
        "monthly" | "month" | "m" => session.goals.set_monthly(amount),
        "annual" | "yearly" | "year" | "y" => session.goals.set_annual(amount),
        _ => {
            app.set_status(USAGE);
            return Ok(());
        }
    };
    match result {
        Ok(()) => {
            app.refresh(session);
            app.set_status(format!(
                "Savings goal set: {which} {}",
                crate::ui::util::format_amount(amount)
            ));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        session.filter.months = None;
        app.refresh(session);
        app.set_status("Month filter cleared");
        return Ok(());
    }
    let parsed: Result<BTreeSet<MonthKey>, String> = split_list(args)
        .map(|s| s.parse::<MonthKey>())
        .collect();
    match parsed {
        Ok(months) => {
            session.filter.months = Some(months);
            app.refresh(session);
            app.set_status(format!("Filter: {}", app.filter_label));
        }
        Err(e) => app.set_status(e),
    }
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        session.filter.categories = None;
        app.refresh(session);
        app.set_status("Category filter cleared");
        return Ok(());
    }
    let categories: BTreeSet<String> = split_list(args).map(category::normalize).collect();
    session.filter.categories = Some(categories);
    app.refresh(session);
    app.set_status(format!("Filter: {}", app.filter_label));
    Ok(())
}

fn cmd_range(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        session.filter.date_range = None;
        app.refresh(session);
        app.set_status("Date range cleared");
        return Ok(());
    }
    let dates: Vec<Option<NaiveDate>> = args
        .split_whitespace()
        .map(|s| parse_date_arg(s, app.today))
        .collect();
    match dates.as_slice() {
        [Some(start), Some(end)] if start <= end => {
            session.filter.date_range = Some((*start, *end));
            app.refresh(session);
            app.set_status(format!("Filter: {}", app.filter_label));
        }
        [Some(_), Some(_)] => app.set_status("Range start must not be after its end"),
        _ => app.set_status("Usage: :range <start YYYY-MM-DD> <end YYYY-MM-DD>"),
    }
    Ok(())
}

fn cmd_nofilter(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    session.filter = crate::analytics::Filter::default();
    app.refresh(session);
    app.set_status("Showing all transactions");
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    shift_month(app, session, MonthKey::next);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    shift_month(app, session, MonthKey::prev);
    Ok(())
}

/// Step a single-month filter; any other month filter starts from this month.
fn shift_month(app: &mut App, session: &mut Session, step: fn(&MonthKey) -> MonthKey) {
    let target = match &session.filter.months {
        Some(months) if months.len() == 1 => months.iter().next().map(step),
        _ => None,
    }
    .unwrap_or_else(|| app.current_month());
    session.filter.months = Some(BTreeSet::from([target]));
    app.refresh(session);
    app.set_status(format!("Month: {target}"));
}

fn split_list(args: &str) -> impl Iterator<Item = &str> {
    args.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date_arg(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    if s.eq_ignore_ascii_case("today") {
        return Some(today);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
