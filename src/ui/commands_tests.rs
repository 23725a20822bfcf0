#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::config::Settings;
use crate::ui::app::InputMode;

fn setup() -> (App, Session, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(&Settings::default());
    let app = App::new(&session, dir.path().to_path_buf());
    (app, session, dir)
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("budget", "budget"), 0);
    assert_eq!(levenshtein("bugdet", "budget"), 2);
    assert_eq!(levenshtein("", "add"), 3);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (mut app, mut session, _dir) = setup();
    handle_command("budgte Food 10", &mut app, &mut session).unwrap();
    assert!(app.status_message.contains("Did you mean :budget?"));
}

#[test]
fn test_add_records_transaction() {
    let (mut app, mut session, _dir) = setup();
    handle_command("add 2024-01-15 -450 food Lunch with team", &mut app, &mut session).unwrap();

    let all = session.store.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec!(-450));
    assert_eq!(all[0].category, "Food");
    assert_eq!(all[0].description, "Lunch with team");
    assert_eq!(app.view.transactions.len(), 1);
}

#[test]
fn test_add_rejects_zero_and_bad_input() {
    let (mut app, mut session, _dir) = setup();
    handle_command("add 2024-01-15 0 Food", &mut app, &mut session).unwrap();
    handle_command("add 2024-13-15 10 Food", &mut app, &mut session).unwrap();
    handle_command("add 2024-01-15 ten Food", &mut app, &mut session).unwrap();
    handle_command("add 2024-01-15", &mut app, &mut session).unwrap();
    assert!(session.store.is_empty());
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_import_asks_for_confirmation() {
    let (mut app, mut session, dir) = setup();
    let path = dir.path().join("in.csv");
    std::fs::write(&path, "Date,Amount,Category,Description\n2024-01-01,100,Salary,Pay\n").unwrap();

    handle_command(&format!("import {}", path.display()), &mut app, &mut session).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::ImportReplace { ref transactions, .. }) if transactions.len() == 1
    ));
    // Nothing happens until confirmed
    assert!(session.store.is_empty());
}

#[test]
fn test_import_failure_keeps_store() {
    let (mut app, mut session, dir) = setup();
    session.store.load_sample();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "Date,Amount,Category\nnot-a-date,10,Food\n").unwrap();

    handle_command(&format!("import {}", path.display()), &mut app, &mut session).unwrap();
    assert!(app.status_message.starts_with("Import failed"));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(session.store.len(), 20);
}

#[test]
fn test_merge_and_export() {
    let (mut app, mut session, dir) = setup();
    let input = dir.path().join("in.csv");
    std::fs::write(
        &input,
        "Date,Amount,Category,Description\n2024-01-01,100,Salary,Pay\n2024-01-02,-40,Food,Tea\n",
    )
    .unwrap();
    handle_command(&format!("merge {}", input.display()), &mut app, &mut session).unwrap();
    handle_command(&format!("merge {}", input.display()), &mut app, &mut session).unwrap();
    assert_eq!(session.store.len(), 4);

    handle_command("dedup", &mut app, &mut session).unwrap();
    assert_eq!(session.store.len(), 2);
    assert!(app.status_message.starts_with("Removed 2"));

    let output = dir.path().join("out.csv");
    handle_command(&format!("export {}", output.display()), &mut app, &mut session).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("Date,Amount,Category,Description"));
    assert!(written.contains("Tea"));
}

#[test]
fn test_export_defaults_to_export_dir() {
    let (mut app, mut session, dir) = setup();
    session.store.load_sample();
    handle_command("export", &mut app, &mut session).unwrap();
    let expected = dir
        .path()
        .join(format!("findash-export-{}.csv", app.today.format("%Y-%m-%d")));
    assert!(expected.exists());
}

#[test]
fn test_sample_on_empty_store_loads_immediately() {
    let (mut app, mut session, _dir) = setup();
    handle_command("sample", &mut app, &mut session).unwrap();
    assert_eq!(session.store.len(), 20);
    assert_eq!(app.input_mode, InputMode::Normal);

    handle_command("sample", &mut app, &mut session).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(app.pending_action, Some(PendingAction::LoadSample)));
}

#[test]
fn test_clear_requires_confirmation() {
    let (mut app, mut session, _dir) = setup();
    handle_command("clear", &mut app, &mut session).unwrap();
    assert_eq!(app.status_message, "Nothing to clear");

    session.store.load_sample();
    handle_command("clear", &mut app, &mut session).unwrap();
    assert!(matches!(app.pending_action, Some(PendingAction::Clear)));
    assert_eq!(session.store.len(), 20);
}

#[test]
fn test_budget_multi_word_category() {
    let (mut app, mut session, _dir) = setup();
    handle_command("budget Gym Membership 1500", &mut app, &mut session).unwrap();
    assert_eq!(session.budgets.get("Gym Membership"), Some(dec!(1500)));
    assert_eq!(app.screen, Screen::Budgets);

    handle_command("budget Food -5", &mut app, &mut session).unwrap();
    assert_eq!(session.budgets.get("Food"), Some(dec!(10000)));

    handle_command("unbudget food", &mut app, &mut session).unwrap();
    assert_eq!(session.budgets.get("Food"), None);
    handle_command("unbudget food", &mut app, &mut session).unwrap();
    assert_eq!(app.status_message, "No budget set for Food");

    handle_command("unbudget all", &mut app, &mut session).unwrap();
    assert!(session.budgets.is_empty());
    assert!(app.view.budgets.is_empty());
}

#[test]
fn test_goal_command() {
    let (mut app, mut session, _dir) = setup();
    handle_command("goal monthly 7000", &mut app, &mut session).unwrap();
    handle_command("goal annual 90000", &mut app, &mut session).unwrap();
    assert_eq!(session.goals.monthly, dec!(7000));
    assert_eq!(session.goals.annual, dec!(90000));

    handle_command("goal weekly 10", &mut app, &mut session).unwrap();
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_filter_commands() {
    let (mut app, mut session, _dir) = setup();
    session.store.load_sample();

    handle_command("month 2024-01", &mut app, &mut session).unwrap();
    let jan = MonthKey::new(2024, 1).unwrap();
    assert!(app.view.transactions.iter().all(|t| t.month() == jan));
    assert!(!app.view.transactions.is_empty());

    handle_command("next-month", &mut app, &mut session).unwrap();
    let feb = MonthKey::new(2024, 2).unwrap();
    assert_eq!(session.filter.months, Some(BTreeSet::from([feb])));

    handle_command("category food, bills", &mut app, &mut session).unwrap();
    assert!(app
        .view
        .transactions
        .iter()
        .all(|t| t.category == "Food" || t.category == "Bills"));

    handle_command("month 2024-1x", &mut app, &mut session).unwrap();
    assert_eq!(session.filter.months, Some(BTreeSet::from([feb])));

    handle_command("nofilter", &mut app, &mut session).unwrap();
    assert!(session.filter.is_unrestricted());
    assert_eq!(app.view.transactions.len(), 20);
}

#[test]
fn test_range_validates_order() {
    let (mut app, mut session, _dir) = setup();
    handle_command("range 2024-03-01 2024-01-01", &mut app, &mut session).unwrap();
    assert!(session.filter.date_range.is_none());

    handle_command("range 2024-01-01 2024-01-31", &mut app, &mut session).unwrap();
    assert!(session.filter.date_range.is_some());
}
