#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn goals(monthly: Decimal, annual: Decimal) -> SavingsGoals {
    SavingsGoals { monthly, annual }
}

fn txns() -> Vec<Transaction> {
    vec![
        Transaction::new(date(2024, 5, 1), dec!(4000), "Salary", ""),
        Transaction::new(date(2024, 5, 9), dec!(-1500), "Bills", ""),
        Transaction::new(date(2024, 6, 1), dec!(4000), "Salary", ""),
        Transaction::new(date(2024, 6, 3), dec!(-1000), "Bills", ""),
    ]
}

#[test]
fn test_monthly_and_annual_progress() {
    let p = progress(
        &goals(dec!(5000), dec!(60000)),
        &txns(),
        &Filter::default(),
        date(2024, 6, 15),
    );
    // June net 3000 of 5000; overall net 5500 of 60000
    assert_eq!(p.monthly_percent, 60.0);
    assert!((p.annual_percent - 5500.0 / 600.0).abs() < 1e-9);
}

#[test]
fn test_zero_goals_report_zero() {
    let p = progress(
        &goals(Decimal::ZERO, Decimal::ZERO),
        &txns(),
        &Filter::default(),
        date(2024, 6, 15),
    );
    assert_eq!(p.monthly_percent, 0.0);
    assert_eq!(p.annual_percent, 0.0);
}

#[test]
fn test_progress_is_not_clamped() {
    let p = progress(
        &goals(dec!(1000), dec!(1000)),
        &txns(),
        &Filter::default(),
        date(2024, 6, 15),
    );
    assert_eq!(p.monthly_percent, 300.0);
    assert_eq!(p.annual_percent, 550.0);

    let overspent = vec![Transaction::new(date(2024, 6, 3), dec!(-250), "Food", "")];
    let p = progress(
        &goals(dec!(1000), dec!(1000)),
        &overspent,
        &Filter::default(),
        date(2024, 6, 15),
    );
    assert_eq!(p.monthly_percent, -25.0);
}

#[test]
fn test_annual_progress_follows_filter() {
    let filter = Filter::month("2024-05".parse().unwrap());
    let p = progress(
        &goals(dec!(1000), dec!(5000)),
        &txns(),
        &filter,
        date(2024, 6, 15),
    );
    assert_eq!(p.annual_percent, 50.0);
}

#[test]
fn test_display_fraction_clamps() {
    assert_eq!(display_fraction(300.0), 1.0);
    assert_eq!(display_fraction(-25.0), 0.0);
    assert_eq!(display_fraction(50.0), 0.5);
    assert_eq!(display_fraction(f64::NAN), 0.0);
}
