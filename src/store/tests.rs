#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::MAX_AMOUNT;

fn txn(day: u32, amount: Decimal, category: &str) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        amount,
        category,
        "",
    )
}

#[test]
fn test_append_and_read() {
    let store = TransactionStore::new();
    assert!(store.is_empty());
    store.append(txn(1, dec!(100), "Salary")).unwrap();
    store.append(txn(2, dec!(-20), "Food")).unwrap();
    assert_eq!(store.len(), 2);
    let all = store.all();
    assert_eq!(all[0].category, "Salary");
    assert_eq!(all[1].category, "Food");
}

#[test]
fn test_append_rejects_zero() {
    let store = TransactionStore::new();
    let err = store.append(txn(1, Decimal::ZERO, "Food")).unwrap_err();
    assert!(matches!(err, FinanceError::InvalidTransaction(_)));
    assert!(store.is_empty());
    assert_eq!(store.version(), 0);

    let err = store.append(txn(1, -(MAX_AMOUNT + Decimal::ONE), "Food")).unwrap_err();
    assert!(matches!(err, FinanceError::InvalidTransaction(_)));
    assert!(store.is_empty());
}

#[test]
fn test_snapshot_is_isolated_from_later_writes() {
    let store = TransactionStore::new();
    store.append(txn(1, dec!(100), "Salary")).unwrap();
    let snapshot = store.all();
    store.append(txn(2, dec!(-5), "Food")).unwrap();
    store.clear();
    assert_eq!(snapshot.len(), 1);
    assert!(store.is_empty());
}

#[test]
fn test_replace_all_swaps_contents() {
    let store = TransactionStore::new();
    store.append(txn(1, dec!(100), "Salary")).unwrap();
    store.replace_all(vec![txn(3, dec!(-1), "Food"), txn(4, dec!(-2), "Bills")]);
    let all = store.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].date.to_string(), "2024-01-03");
}

#[test]
fn test_extend_appends_batch() {
    let store = TransactionStore::new();
    store.append(txn(1, dec!(100), "Salary")).unwrap();
    store.extend(vec![txn(2, dec!(-1), "Food"), txn(3, dec!(-2), "Bills")]);
    assert_eq!(store.len(), 3);
    assert_eq!(store.all()[2].category, "Bills");
}

#[test]
fn test_version_bumps_on_every_mutation() {
    let store = TransactionStore::new();
    assert_eq!(store.version(), 0);
    store.append(txn(1, dec!(1), "Salary")).unwrap();
    store.replace_all(Vec::new());
    store.load_sample();
    store.deduplicate();
    assert_eq!(store.version(), 4);
}

#[test]
fn test_deduplicate_removes_exact_duplicates_and_sorts() {
    let store = TransactionStore::new();
    store.replace_all(vec![
        txn(5, dec!(-10), "Food"),
        txn(2, dec!(100), "Salary"),
        txn(5, dec!(-10), "Food"),
        txn(2, dec!(-3), "Transport"),
    ]);
    let deduped = store.deduplicate();
    assert_eq!(deduped.len(), 3);
    // Stable: Salary was inserted before Transport on the same day
    assert_eq!(deduped[0].category, "Salary");
    assert_eq!(deduped[1].category, "Transport");
    assert_eq!(deduped[2].category, "Food");
    assert_eq!(store.all(), deduped);
}

#[test]
fn test_deduplicate_keeps_near_duplicates() {
    let store = TransactionStore::new();
    let mut other = txn(5, dec!(-10), "Food");
    other.description = "Lunch".into();
    store.replace_all(vec![txn(5, dec!(-10), "Food"), other]);
    assert_eq!(store.deduplicate().len(), 2);
}

#[test]
fn test_load_sample_and_clear() {
    let store = TransactionStore::new();
    store.load_sample();
    assert!(!store.is_empty());
    assert!(store.all().iter().all(|t| t.amount != Decimal::ZERO));
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_sample_spans_several_months_and_categories() {
    let sample = sample_transactions();
    let months: HashSet<_> = sample.iter().map(|t| t.month()).collect();
    let categories: HashSet<_> = sample.iter().map(|t| t.category.as_str()).collect();
    assert!(months.len() >= 3);
    assert!(categories.len() >= 5);
}
