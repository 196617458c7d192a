use clap::Parser;
use log::{info, warn};
use snafu::prelude::*;

mod args;
mod board;

use crate::args::Args;
use crate::board::config_reader::{read_config, BoardConfig};
use crate::board::{run_board, BBoardResult, InvalidDateSnafu, RunOptions};

fn parse_today(today: &Option<String>) -> BBoardResult<chrono::NaiveDate> {
    match today {
        Some(s) => {
            let d = chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .context(InvalidDateSnafu { value: s })?;
            Ok(d)
        }
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Command line flags take precedence over the configuration file.
fn run_options(args: &Args) -> BBoardResult<RunOptions> {
    let mut config = match &args.config {
        Some(p) => read_config(p)?,
        None => BoardConfig::default(),
    };
    if let Some(id) = &args.sheet_id {
        config.sheet_id = id.clone();
        config.provider = "gviz".to_string();
        config.path = None;
    }
    if let Some(dir) = &args.input_dir {
        config.provider = "directory".to_string();
        config.path = Some(dir.clone());
    }
    if let Some(wb) = &args.workbook {
        config.provider = "xlsx".to_string();
        config.path = Some(wb.clone());
    }
    Ok(RunOptions {
        config,
        today: parse_today(&args.today)?,
        speaker_index: args.speaker.saturating_sub(1),
        out: args.out.clone(),
        reference: args.reference.clone(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    info!("args: {:?}", args);

    let res = match run_options(&args) {
        Ok(options) => run_board(&options).await,
        Err(e) => Err(e),
    };

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut v = vec!["meetboard"];
        v.extend_from_slice(extra);
        Args::parse_from(v)
    }

    #[test]
    fn defaults() {
        let opts = run_options(&args(&["--today", "2024-06-15"])).unwrap();
        assert_eq!(opts.config, BoardConfig::default());
        assert_eq!(opts.today, chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(opts.speaker_index, 0);
    }

    #[test]
    fn local_inputs_override_the_provider() {
        let opts = run_options(&args(&["--input-dir", "data", "--speaker", "3"])).unwrap();
        assert_eq!(opts.config.provider, "directory");
        assert_eq!(opts.config.path.as_deref(), Some("data"));
        assert_eq!(opts.speaker_index, 2);

        let opts = run_options(&args(&["--workbook", "board.xlsx"])).unwrap();
        assert_eq!(opts.config.provider, "xlsx");
    }

    #[test]
    fn bad_today() {
        assert!(run_options(&args(&["--today", "15/06/2024"])).is_err());
    }
}
