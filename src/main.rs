mod analytics;
mod config;
mod error;
mod import;
mod logging;
mod models;
mod run;
mod session;
mod store;
mod ui;

use anyhow::Result;

use logging::LogTarget;

fn main() -> Result<()> {
    let (args, verbose) = split_verbose(std::env::args().collect());
    let launches_tui = launches_tui(&args);

    logging::init(
        verbose,
        if launches_tui {
            LogTarget::File
        } else {
            LogTarget::Stderr
        },
    )?;
    let settings = config::Settings::from_env()?;

    if launches_tui {
        let opts = run::TuiOptions::from_args(args.get(2..).unwrap_or_default())?;
        run::as_tui(&settings, &opts)
    } else {
        run::as_cli(&args, &settings)
    }
}

/// No subcommand, or an explicit `tui`, opens the interactive dashboard.
fn launches_tui(args: &[String]) -> bool {
    matches!(args.get(1).map(String::as_str), None | Some("tui"))
}

/// Strip `--verbose`/`-v` wherever it appears.
fn split_verbose(args: Vec<String>) -> (Vec<String>, bool) {
    let before = args.len();
    let rest: Vec<String> = args
        .into_iter()
        .filter(|a| a != "--verbose" && a != "-v")
        .collect();
    let verbose = rest.len() != before;
    (rest, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dispatch_without_arguments() {
        assert!(launches_tui(&[]));
        assert!(launches_tui(&args(&["findash"])));
        assert!(launches_tui(&args(&["findash", "tui", "--sample"])));
        assert!(!launches_tui(&args(&["findash", "report", "a.csv"])));
    }

    #[test]
    fn test_split_verbose() {
        let (rest, verbose) = split_verbose(args(&["findash", "-v", "report"]));
        assert!(verbose);
        assert_eq!(rest, args(&["findash", "report"]));
        assert!(!split_verbose(args(&["findash"])).1);
    }
}
