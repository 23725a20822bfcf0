use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::FinanceError;
use crate::models::{category, check_amount, Transaction};

pub(crate) const DATE_HEADER: &str = "Date";
pub(crate) const AMOUNT_HEADER: &str = "Amount";
pub(crate) const CATEGORY_HEADER: &str = "Category";
pub(crate) const DESCRIPTION_HEADER: &str = "Description";

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) date: usize,
    pub(crate) amount: usize,
    pub(crate) category: usize,
    pub(crate) description: Option<usize>,
}

impl ColumnMap {
    /// Locate columns by name, ignoring case and surrounding whitespace.
    pub(crate) fn from_headers(headers: &csv::StringRecord) -> Result<Self, FinanceError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                FinanceError::InvalidImport(format!("missing required column '{name}'"))
            })
        };
        Ok(Self {
            date: require(DATE_HEADER)?,
            amount: require(AMOUNT_HEADER)?,
            category: require(CATEGORY_HEADER)?,
            description: find(DESCRIPTION_HEADER),
        })
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    pub(crate) fn from_path(path: &Path) -> anyhow::Result<Vec<Transaction>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
        let txns = Self::parse_str(&content)?;
        info!(path = %path.display(), count = txns.len(), "parsed CSV import");
        Ok(txns)
    }

    /// Parse a whole CSV document. Any bad row rejects the entire input, so the
    /// caller either gets every transaction or none.
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, FinanceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| FinanceError::InvalidImport(format!("unreadable header row: {e}")))?
            .clone();
        let columns = ColumnMap::from_headers(&headers)?;

        let mut transactions = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            // Header is line 1
            let line = i + 2;
            let record = result
                .map_err(|e| FinanceError::InvalidImport(format!("row {line}: {e}")))?;
            if record.iter().all(|field| field.trim().is_empty()) {
                debug!(line, "skipping blank row");
                continue;
            }
            let txn = parse_record(&record, &columns)
                .map_err(|reason| FinanceError::InvalidImport(format!("row {line}: {reason}")))?;
            transactions.push(txn);
        }
        Ok(transactions)
    }

    pub(crate) fn parse_str(content: &str) -> Result<Vec<Transaction>, FinanceError> {
        Self::from_reader(content.as_bytes())
    }
}

fn parse_record(record: &csv::StringRecord, columns: &ColumnMap) -> Result<Transaction, String> {
    let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or_default();

    let date_str = field(columns.date);
    if date_str.is_empty() {
        return Err("missing date".into());
    }
    let date = parse_date(date_str)?;

    let amount = parse_decimal(field(columns.amount))?;
    check_amount(amount)?;

    let category_name = field(columns.category);
    if category_name.is_empty() {
        return Err("missing category".into());
    }

    // Descriptions are free text and kept verbatim
    let description = columns
        .description
        .and_then(|idx| record.get(idx))
        .unwrap_or_default();

    Ok(Transaction::new(
        date,
        amount,
        category::normalize(category_name),
        description,
    ))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!("could not parse date '{s}'"))
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    let cleaned = s
        .replace(['$', '₹', '€', '£', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Err("missing amount".into());
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| format!("could not parse amount '{s}'"))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
