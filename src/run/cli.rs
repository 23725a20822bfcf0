use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::analytics::Filter;
use crate::config::Settings;
use crate::import::{CsvExporter, CsvImporter};
use crate::models::{category, MonthKey};
use crate::session::Session;
use crate::store::TransactionStore;
use crate::ui::util::{format_amount, progress_bar};

pub(crate) fn as_cli(args: &[String], settings: &Settings) -> Result<()> {
    let rest = args.get(2..).unwrap_or_default();
    match args.get(1).map(String::as_str) {
        Some("report" | "r") => cli_report(rest, settings),
        Some("sample") => cli_sample(rest),
        Some("dedup") => cli_dedup(rest),
        None | Some("--help" | "-h" | "help") => {
            print_usage();
            Ok(())
        }
        Some("--version" | "-V" | "version") => {
            println!("findash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(other) => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinDash: personal finance dashboard");
    println!();
    println!("Usage: findash [--verbose] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  tui [file.csv] [--sample]     Launch TUI preloaded with a CSV or sample data");
    println!("  report <file.csv>             Print dashboard summary for a CSV file");
    println!("    --month <YYYY-MM>           Restrict to a month (repeatable)");
    println!("    --category <name>           Restrict to a category (repeatable)");
    println!("    --from <YYYY-MM-DD>         Start of date range");
    println!("    --to <YYYY-MM-DD>           End of date range");
    println!("  sample [path]                 Write the sample data set as CSV");
    println!("  dedup <in.csv> [out.csv]      Remove duplicate rows and sort by date");
    println!("  --verbose                     Debug logging (RUST_LOG overrides)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Positional file plus the filter built from the report flags.
fn parse_report_args(args: &[String]) -> Result<(PathBuf, Filter)> {
    let mut file = None;
    let mut months = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut from = None;
    let mut to = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            flag @ ("--month" | "--category" | "--from" | "--to") => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{flag} needs a value"))?;
                match flag {
                    "--month" => {
                        months.insert(value.parse::<MonthKey>().map_err(anyhow::Error::msg)?);
                    }
                    "--category" => {
                        categories.insert(category::normalize(value));
                    }
                    "--from" => from = Some(parse_date(value)?),
                    _ => to = Some(parse_date(value)?),
                }
            }
            other if other.starts_with("--") => anyhow::bail!("Unknown option: {other}"),
            other => {
                if file.is_some() {
                    anyhow::bail!("Unexpected argument: {other}");
                }
                file = Some(PathBuf::from(shellexpand(other)));
            }
        }
    }

    let file = file.ok_or_else(|| anyhow::anyhow!("Usage: findash report <file.csv> [options]"))?;

    let date_range = match (from, to) {
        (None, None) => None,
        (start, end) => {
            let start = start.unwrap_or(NaiveDate::MIN);
            let end = end.unwrap_or(NaiveDate::MAX);
            if start > end {
                anyhow::bail!("--from {start} is after --to {end}");
            }
            Some((start, end))
        }
    };

    let filter = Filter {
        date_range,
        months: (!months.is_empty()).then_some(months),
        categories: (!categories.is_empty()).then_some(categories),
    };
    Ok((file, filter))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))
}

fn cli_report(args: &[String], settings: &Settings) -> Result<()> {
    let (file, filter) = parse_report_args(args)?;

    let mut session = Session::new(settings);
    let count = session.import_replace(&file)?;
    session.filter = filter;
    let view = session.view(Local::now().date_naive());

    println!("FinDash: {} ({})", file.display(), session.filter.describe());
    println!("{}", "─".repeat(50));
    println!("  Transactions: {} of {count}", view.transactions.len());
    if let (Some(first), Some(last)) = (view.months_present.first(), view.months_present.last()) {
        println!("  Months:       {first} to {last}");
    }
    println!("  Categories:   {}", view.categories_present.join(", "));
    println!("  Income:       {}", format_amount(view.income));
    println!("  Expenses:     {}", format_amount(view.expenses));
    println!("  Net Savings:  {}", format_amount(view.net));
    if let Some(avg) = view.average_monthly_net {
        println!("  Avg / Month:  {}", format_amount(avg));
    }

    if !view.by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &view.by_category {
            println!("  {name:<24} {:>16}", format_amount(*amount));
        }
    }

    if !view.monthly.is_empty() {
        println!();
        println!("Monthly Trend:");
        println!("  {:<8} {:>16} {:>16} {:>16}", "Month", "Income", "Expenses", "Net");
        for m in &view.monthly {
            println!(
                "  {:<8} {:>16} {:>16} {:>16}",
                m.month.to_string(),
                format_amount(m.income),
                format_amount(m.expenses),
                format_amount(m.net)
            );
        }
    }

    let health = &view.health;
    println!();
    println!("Financial Health: {:.0}/100 ({})", health.score, health.rating());
    println!("  Savings rate  {}", ratio_label(health.savings_rate));
    println!("  Diversity     {}", ratio_label(health.diversity));
    println!("  Consistency   {}", ratio_label(health.consistency));

    println!();
    println!("Insights:");
    for insight in &view.insights {
        println!("  [{}] {}", insight.severity, insight.message);
    }

    if !view.budgets.is_empty() {
        println!();
        println!("Budgets ({}):", MonthKey::from_date(Local::now().date_naive()));
        for line in &view.budgets {
            println!(
                "  {:<16} {:>14} / {:<14} {:>6.1}%  {}",
                line.category,
                format_amount(line.actual),
                format_amount(line.budget),
                line.usage_percent,
                line.status
            );
        }
    }

    println!();
    println!("Savings Goals:");
    print_goal("Monthly", session.goals.monthly, view.goals.monthly_percent);
    print_goal("Annual", session.goals.annual, view.goals.annual_percent);

    Ok(())
}

/// Sub-scores are ratios; show them as percentages like the insights do.
fn ratio_label(rate: f64) -> String {
    format!("{:>5.1}%", rate * 100.0)
}

fn print_goal(label: &str, target: rust_decimal::Decimal, percent: f64) {
    println!(
        "  {label:<8} {:>14} {} {percent:.1}%",
        format_amount(target),
        progress_bar(crate::analytics::goals::display_fraction(percent), 20)
    );
}

fn cli_sample(args: &[String]) -> Result<()> {
    let store = TransactionStore::new();
    store.load_sample();

    match args.first() {
        Some(path) => {
            let path = shellexpand(path);
            let count = CsvExporter::to_path(&store.all(), Path::new(&path))?;
            println!("Wrote {count} sample transactions to {path}");
        }
        None => print!("{}", CsvExporter::to_string(&store.all())?),
    }
    Ok(())
}

fn cli_dedup(args: &[String]) -> Result<()> {
    let Some(input) = args.first() else {
        anyhow::bail!("Usage: findash dedup <in.csv> [out.csv]");
    };
    let input = shellexpand(input);
    let output = args.get(1).map(|p| shellexpand(p)).unwrap_or_else(|| input.clone());

    let store = TransactionStore::new();
    store.replace_all(CsvImporter::from_path(Path::new(&input))?);
    let before = store.len();
    let deduped = store.deduplicate();
    CsvExporter::to_path(&deduped, Path::new(&output))?;

    println!(
        "Removed {} duplicates; wrote {} transactions to {output}",
        before - deduped.len(),
        deduped.len()
    );
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_report_args_build_filter() {
        let (file, filter) = parse_report_args(&args(&[
            "money.csv",
            "--month",
            "2024-01",
            "--month",
            "2024-02",
            "--category",
            "food",
        ]))
        .unwrap();
        assert_eq!(file, PathBuf::from("money.csv"));
        assert_eq!(filter.months.map(|m| m.len()), Some(2));
        assert_eq!(
            filter.categories,
            Some(BTreeSet::from(["Food".to_string()]))
        );
        assert!(filter.date_range.is_none());
    }

    #[test]
    fn test_report_open_ended_range() {
        let (_, filter) = parse_report_args(&args(&["a.csv", "--from", "2024-02-01"])).unwrap();
        let (start, end) = filter.date_range.unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::MAX);
    }

    #[test]
    fn test_report_args_errors() {
        assert!(parse_report_args(&args(&[])).is_err());
        assert!(parse_report_args(&args(&["a.csv", "--month"])).is_err());
        assert!(parse_report_args(&args(&["a.csv", "--month", "2024-13"])).is_err());
        assert!(parse_report_args(&args(&["a.csv", "--bogus"])).is_err());
        assert!(parse_report_args(&args(&["a.csv", "b.csv"])).is_err());
        assert!(parse_report_args(&args(&[
            "a.csv", "--from", "2024-03-01", "--to", "2024-01-01"
        ]))
        .is_err());
    }

    #[test]
    fn test_dedup_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "Date,Amount,Category,Description\n\
             2024-01-05,-10,Food,Tea\n\
             2024-01-01,100,Salary,Pay\n\
             2024-01-05,-10,Food,Tea\n",
        )
        .unwrap();

        cli_dedup(&args(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let txns = CsvImporter::from_path(&output).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].category, "Salary");
    }

    #[test]
    fn test_sub_scores_print_as_percentages() {
        assert_eq!(ratio_label(0.6), " 60.0%");
        assert_eq!(ratio_label(-0.125), "-12.5%");
        assert_eq!(ratio_label(1.0), "100.0%");
    }

    #[test]
    fn test_missing_or_unknown_command() {
        let settings = Settings::default();
        assert!(as_cli(&[], &settings).is_ok());
        assert!(as_cli(&args(&["findash"]), &settings).is_ok());
        assert!(as_cli(&args(&["findash", "frobnicate"]), &settings).is_err());
        assert!(as_cli(&args(&["findash", "dedup"]), &settings).is_err());
    }

    #[test]
    fn test_shellexpand_leaves_plain_paths() {
        assert_eq!(shellexpand("/tmp/a.csv"), "/tmp/a.csv");
        assert!(!shellexpand("~/a.csv").starts_with('~'));
    }
}
