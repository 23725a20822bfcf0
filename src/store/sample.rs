use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Transaction;

/// Three months of representative activity used by the "load sample" action.
pub(crate) fn sample_transactions() -> Vec<Transaction> {
    const ROWS: &[(i32, u32, u32, i64, &str, &str)] = &[
        (2024, 1, 1, 50_000, "Salary", "January salary"),
        (2024, 1, 3, -15_000, "Bills", "Rent"),
        (2024, 1, 5, -4_200, "Food", "Groceries"),
        (2024, 1, 9, -1_800, "Transport", "Metro card"),
        (2024, 1, 14, -2_500, "Shopping", "Winter jacket"),
        (2024, 1, 20, -1_200, "Entertainment", "Concert tickets"),
        (2024, 1, 25, 10_000, "Investment", "Dividend payout"),
        (2024, 2, 1, 50_000, "Salary", "February salary"),
        (2024, 2, 3, -15_000, "Bills", "Rent"),
        (2024, 2, 6, -3_900, "Food", "Groceries"),
        (2024, 2, 11, -2_300, "Healthcare", "Dentist"),
        (2024, 2, 17, -1_500, "Transport", "Fuel"),
        (2024, 2, 22, -800, "Entertainment", "Streaming subscriptions"),
        (2024, 3, 1, 52_000, "Salary", "March salary"),
        (2024, 3, 3, -15_000, "Bills", "Rent"),
        (2024, 3, 4, -2_100, "Bills", "Electricity"),
        (2024, 3, 8, -4_600, "Food", "Groceries"),
        (2024, 3, 15, -6_000, "Shopping", "New phone case and charger"),
        (2024, 3, 21, -1_700, "Transport", "Metro card"),
        (2024, 3, 28, -900, "Other", "Gift"),
    ];

    ROWS.iter()
        .filter_map(|&(y, m, d, amount, category, description)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .map(|date| Transaction::new(date, Decimal::from(amount), category, description))
        })
        .collect()
}
