#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::io::Write;

use super::*;
use crate::analytics::budget::BudgetStatus;
use crate::analytics::insights::Severity;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn session() -> Session {
    Session::new(&Settings::default())
}

#[test]
fn test_add_transaction_normalizes_category() {
    let s = session();
    s.add_transaction(date(2024, 1, 2), dec!(-50), "food", "Lunch").unwrap();
    assert_eq!(s.store.all()[0].category, "Food");
}

#[test]
fn test_add_transaction_rejects_zero_and_blank_category() {
    let s = session();
    assert!(matches!(
        s.add_transaction(date(2024, 1, 2), Decimal::ZERO, "Food", ""),
        Err(FinanceError::InvalidTransaction(_))
    ));
    assert!(matches!(
        s.add_transaction(date(2024, 1, 2), dec!(5), "  ", ""),
        Err(FinanceError::InvalidTransaction(_))
    ));
    assert!(s.store.is_empty());
}

#[test]
fn test_failed_import_leaves_store_unchanged() {
    let s = session();
    s.store.load_sample();
    let before = s.store.all();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Date,Amount,Category,Description\n2024-01-01,abc,Food,x\n")
        .unwrap();
    assert!(s.import_replace(file.path()).is_err());
    assert!(s.import_merge(file.path()).is_err());
    assert_eq!(s.store.all(), before);
}

#[test]
fn test_export_then_import_replace() {
    let s = session();
    s.store.load_sample();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.csv");
    let exported = s.export(&path).unwrap();

    let other = session();
    other.add_transaction(date(2030, 1, 1), dec!(1), "Other", "").unwrap();
    assert_eq!(other.import_replace(&path).unwrap(), exported);
    assert_eq!(other.store.all(), s.store.all());

    assert_eq!(other.import_merge(&path).unwrap(), exported);
    assert_eq!(other.store.len(), exported * 2);
}

#[test]
fn test_set_budget() {
    let mut s = session();
    assert_eq!(s.set_budget("pets", dec!(300)).unwrap(), "pets");
    assert_eq!(s.set_budget("FOOD", dec!(1)).unwrap(), "Food");
    assert_eq!(s.budgets.get("Food"), Some(dec!(1)));
    assert!(s.set_budget("Food", dec!(-1)).is_err());
    assert!(s.set_budget(" ", dec!(1)).is_err());
}

#[test]
fn test_view_of_empty_session() {
    let view = session().view(date(2024, 1, 15));
    assert_eq!(view.income, Decimal::ZERO);
    assert_eq!(view.health.score, 0.0);
    assert_eq!(view.insights.len(), 1);
    assert_eq!(view.insights[0].severity, Severity::Info);
    assert_eq!(view.average_monthly_net, None);
    assert!(view.budgets.iter().all(|b| b.status == BudgetStatus::OnTrack));
    assert_eq!(view.goals.monthly_percent, 0.0);
}

#[test]
fn test_view_applies_filter_but_health_and_budgets_do_not() {
    let mut s = session();
    s.add_transaction(date(2024, 1, 1), dec!(50000), "Salary", "").unwrap();
    s.add_transaction(date(2024, 1, 2), dec!(-12000), "Food", "").unwrap();
    s.add_transaction(date(2024, 2, 2), dec!(-3000), "Bills", "").unwrap();
    s.filter = Filter::month("2024-02".parse().unwrap());

    let view = s.view(date(2024, 1, 20));
    assert_eq!(view.total_count, 3);
    assert_eq!(view.transactions.len(), 1);
    assert_eq!(view.income, Decimal::ZERO);
    assert_eq!(view.expenses, dec!(3000));
    assert_eq!(view.health.score, health::health_score(&s.store.all()));

    let food = view.budgets.iter().find(|b| b.category == "Food").unwrap();
    assert_eq!(food.actual, dec!(12000));
    assert_eq!(food.status, BudgetStatus::OverBudget);
}
