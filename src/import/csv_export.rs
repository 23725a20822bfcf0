use anyhow::Context;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::csv_import::{AMOUNT_HEADER, CATEGORY_HEADER, DATE_HEADER, DESCRIPTION_HEADER};
use crate::models::Transaction;

pub(crate) struct CsvExporter;

impl CsvExporter {
    /// Write transactions as `Date,Amount,Category,Description` with ISO dates.
    /// Amounts keep their stored scale so the output re-imports byte for byte.
    pub(crate) fn to_writer<W: Write>(txns: &[Transaction], writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([DATE_HEADER, AMOUNT_HEADER, CATEGORY_HEADER, DESCRIPTION_HEADER])?;
        for txn in txns {
            wtr.write_record([
                txn.date.format("%Y-%m-%d").to_string(),
                txn.amount.to_string(),
                txn.category.clone(),
                txn.description.clone(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub(crate) fn to_string(txns: &[Transaction]) -> csv::Result<String> {
        let mut buf = Vec::new();
        Self::to_writer(txns, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub(crate) fn to_path(txns: &[Transaction], path: &Path) -> anyhow::Result<usize> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        Self::to_writer(txns, file).context("Failed to write CSV export")?;
        info!(path = %path.display(), count = txns.len(), "exported CSV");
        Ok(txns.len())
    }
}
