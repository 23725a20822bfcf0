use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{MonthKey, Transaction};

/// Restriction applied before aggregating. Every part is optional and they
/// combine with logical AND; the default filter lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct Filter {
    /// Inclusive on both ends.
    pub(crate) date_range: Option<(NaiveDate, NaiveDate)>,
    pub(crate) months: Option<BTreeSet<MonthKey>>,
    pub(crate) categories: Option<BTreeSet<String>>,
}

impl Filter {
    pub(crate) fn month(month: MonthKey) -> Self {
        Self {
            months: Some(BTreeSet::from([month])),
            ..Self::default()
        }
    }

    pub(crate) fn is_unrestricted(&self) -> bool {
        self.date_range.is_none() && self.months.is_none() && self.categories.is_none()
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        if let Some((start, end)) = self.date_range {
            if txn.date < start || txn.date > end {
                return false;
            }
        }
        if let Some(months) = &self.months {
            if !months.contains(&txn.month()) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&txn.category) {
                return false;
            }
        }
        true
    }

    pub(crate) fn apply<'a>(
        &'a self,
        txns: &'a [Transaction],
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        txns.iter().filter(move |t| self.matches(t))
    }

    /// Short human-readable description for status lines and report headers.
    pub(crate) fn describe(&self) -> String {
        if self.is_unrestricted() {
            return "all transactions".into();
        }
        let mut parts = Vec::new();
        if let Some((start, end)) = self.date_range {
            parts.push(format!("{start} to {end}"));
        }
        if let Some(months) = &self.months {
            let list: Vec<String> = months.iter().map(|m| m.to_string()).collect();
            parts.push(format!("months {}", list.join(", ")));
        }
        if let Some(categories) = &self.categories {
            let list: Vec<&str> = categories.iter().map(String::as_str).collect();
            parts.push(format!("categories {}", list.join(", ")));
        }
        parts.join("; ")
    }
}
