#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::FinanceError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_txn(amount: Decimal) -> Transaction {
    Transaction::new(date(2024, 1, 15), amount, "Food", "Test")
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income() {
    let txn = make_txn(dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
}

#[test]
fn test_expense() {
    let txn = make_txn(dec!(-50.00));
    assert!(!txn.is_income());
    assert!(txn.is_expense());
}

#[test]
fn test_zero_is_neither() {
    let txn = make_txn(Decimal::ZERO);
    assert!(!txn.is_income());
    assert!(!txn.is_expense());
}

#[test]
fn test_abs_amount() {
    assert_eq!(make_txn(dec!(-42.99)).abs_amount(), dec!(42.99));
    assert_eq!(make_txn(dec!(42.99)).abs_amount(), dec!(42.99));
}

#[test]
fn test_transaction_month() {
    assert_eq!(make_txn(dec!(1)).month(), MonthKey::new(2024, 1).unwrap());
}

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_key_display_and_parse() {
    let key: MonthKey = "2024-03".parse().unwrap();
    assert_eq!(key.to_string(), "2024-03");
    assert_eq!(key, MonthKey::new(2024, 3).unwrap());
}

#[test]
fn test_month_key_rejects_garbage() {
    assert!("2024".parse::<MonthKey>().is_err());
    assert!("2024-13".parse::<MonthKey>().is_err());
    assert!("abcd-01".parse::<MonthKey>().is_err());
    assert!(MonthKey::new(2024, 0).is_none());
}

#[test]
fn test_month_key_ordering_is_chronological() {
    let dec_23 = MonthKey::new(2023, 12).unwrap();
    let jan_24 = MonthKey::new(2024, 1).unwrap();
    assert!(dec_23 < jan_24);
    assert_eq!(dec_23.next(), jan_24);
    assert_eq!(jan_24.prev(), dec_23);
}

#[test]
fn test_month_key_from_date() {
    let key = MonthKey::new(2024, 2).unwrap();
    assert_eq!(MonthKey::from_date(date(2024, 2, 29)), key);
    assert_ne!(MonthKey::from_date(date(2024, 3, 1)), key);
    assert_ne!(MonthKey::from_date(date(2023, 2, 1)), key);
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_normalize() {
    assert_eq!(category::normalize("food"), "Food");
    assert_eq!(category::normalize("  BILLS "), "Bills");
    assert_eq!(category::normalize("Pets"), "Pets");
}

#[test]
fn test_category_canonical_order() {
    use std::cmp::Ordering;
    assert_eq!(category::compare("Salary", "Food"), Ordering::Less);
    assert_eq!(category::compare("Other", "Food"), Ordering::Greater);
    // Custom categories go after the default set, alphabetically
    assert_eq!(category::compare("Other", "Aquarium"), Ordering::Less);
    assert_eq!(category::compare("Aquarium", "Pets"), Ordering::Less);
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_defaults() {
    let config = BudgetConfig::default();
    assert_eq!(config.budgets()[0].category, "Food");
    assert_eq!(config.get("Food"), Some(dec!(10000)));
    assert_eq!(config.get("Salary"), None);
    assert!(!config.is_empty());
}

#[test]
fn test_budget_set_keeps_order() {
    let mut config = BudgetConfig::empty();
    config.set("Food", dec!(100)).unwrap();
    config.set("Bills", dec!(200)).unwrap();
    config.set("Food", dec!(150)).unwrap();
    let names: Vec<&str> = config.budgets().iter().map(|b| b.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Bills"]);
    assert_eq!(config.get("Food"), Some(dec!(150)));
}

#[test]
fn test_budget_rejects_negative() {
    let mut config = BudgetConfig::empty();
    let err = config.set("Food", dec!(-1)).unwrap_err();
    assert!(matches!(err, FinanceError::InvalidBudget(_)));
    assert!(config.is_empty());
}

#[test]
fn test_budget_zero_allowed() {
    let mut config = BudgetConfig::empty();
    config.set("Food", Decimal::ZERO).unwrap();
    assert_eq!(config.len(), 1);
}

#[test]
fn test_budget_remove() {
    let mut config = BudgetConfig::default();
    assert!(config.remove("Food"));
    assert!(!config.remove("Food"));
    assert_eq!(config.get("Food"), None);
}

// ── SavingsGoals ──────────────────────────────────────────────

#[test]
fn test_goals_defaults_and_updates() {
    let mut goals = SavingsGoals::default();
    assert_eq!(goals.monthly, dec!(5000));
    goals.set_monthly(dec!(750)).unwrap();
    goals.set_annual(Decimal::ZERO).unwrap();
    assert_eq!(goals.monthly, dec!(750));
    assert_eq!(goals.annual, Decimal::ZERO);
    assert!(goals.set_annual(dec!(-5)).is_err());
    assert_eq!(goals.annual, Decimal::ZERO);
}

#[test]
fn test_negative_goal_is_a_goal_error() {
    let mut goals = SavingsGoals::default();
    let err = goals.set_monthly(dec!(-1)).unwrap_err();
    assert!(matches!(err, FinanceError::InvalidGoal(_)));
    assert!(err.to_string().starts_with("Invalid savings goal"));
}

// ── Amount limits ─────────────────────────────────────────────

#[test]
fn test_amounts_beyond_limit_are_rejected() {
    assert!(check_amount(MAX_AMOUNT).is_ok());
    assert!(check_amount(-MAX_AMOUNT).is_ok());
    assert!(check_amount(MAX_AMOUNT + dec!(0.01)).is_err());
    assert!(check_amount(dec!(-50000000000000000000000000000)).is_err());
    assert!(check_amount(Decimal::ZERO).is_err());

    let mut goals = SavingsGoals::default();
    assert!(goals.set_annual(Decimal::MAX).is_err());
    let mut config = BudgetConfig::empty();
    assert!(matches!(
        config.set("Food", Decimal::MAX),
        Err(FinanceError::InvalidBudget(_))
    ));
}
