use log::{debug, info, warn};

use chrono::NaiveDate;
use meeting_stats::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod io_delimited;
pub mod io_fetch;
pub mod io_header;
pub mod io_mapper;
pub mod io_xlsx;

use crate::board::config_reader::{read_summary, BoardConfig};
use crate::board::io_fetch::{
    load_session, DirectorySource, GvizSource, SessionLoad, SheetOutcome, SheetSource,
};
use crate::board::io_xlsx::WorkbookSource;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BoardError {
    #[snafu(display("Cannot build the export url of sheet {sheet:?}: {source}"))]
    InvalidUrl {
        source: url::ParseError,
        sheet: String,
    },
    #[snafu(display("Request for sheet {sheet:?} failed: {source}"))]
    HttpRequest {
        source: reqwest::Error,
        sheet: String,
    },
    #[snafu(display("Sheet {sheet:?} answered with status {status}"))]
    HttpStatus { status: u16, sheet: String },
    #[snafu(display("Error opening csv file {path}: {source}"))]
    OpeningCsv {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening workbook {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {sheet:?} not found in the workbook"))]
    MissingWorksheet { sheet: String },
    #[snafu(display("Reading worksheet {sheet:?} did not complete: {source}"))]
    WorkbookTask {
        source: tokio::task::JoinError,
        sheet: String,
    },
    #[snafu(display("Error opening json file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing json: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid date {value:?}, expected YYYY-MM-DD"))]
    InvalidDate {
        source: chrono::ParseError,
        value: String,
    },
    #[snafu(display("Error writing the summary to {path}: {source}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type BoardResult<T> = Result<T, BoardError>;
pub type BBoardResult<T> = Result<T, Box<BoardError>>;

/// Everything needed for one run of the command line tool.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunOptions {
    pub config: BoardConfig,
    pub today: NaiveDate,
    /// Zero-based, wraps around the roster.
    pub speaker_index: usize,
    /// File path, `stdout` or nothing (stdout).
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// Picks where the sheets are read from.
pub fn build_source(config: &BoardConfig) -> BoardResult<Box<dyn SheetSource>> {
    let path = || -> BoardResult<String> {
        match config.path.clone() {
            Some(p) => Ok(p),
            None => whatever!("provider {} needs a path", config.provider),
        }
    };
    let source: Box<dyn SheetSource> = match config.provider.as_str() {
        "gviz" => Box::new(GvizSource::new(&config.sheet_id)),
        "directory" => Box::new(DirectorySource::new(path()?)),
        "xlsx" => Box::new(WorkbookSource::new(path()?)),
        x => whatever!("Provider not implemented {:?}", x),
    };
    Ok(source)
}

fn outcome_js<T>(outcome: &SheetOutcome<T>) -> JSValue {
    match outcome {
        SheetOutcome::Loaded(records) => json!({"status": "loaded", "records": records.len()}),
        SheetOutcome::Failed(reason) => json!({"status": "failed", "error": reason}),
    }
}

fn stats_js(stats: &DashboardStats) -> JSValue {
    json!({
        "contactsWeek": stats.contacts_week,
        "contactsTotal": stats.contacts_total,
        "thanksWeek": stats.thanks_week,
        "thanksWeekLabel": format_eur(stats.thanks_week),
        "thanksTotal": stats.thanks_total,
        "thanksTotalLabel": format_eur(stats.thanks_total),
    })
}

fn speaker_view_js(view: &SpeakerView, roster_size: usize) -> JSValue {
    let c = &view.contribution;
    let thanks: Vec<JSValue> = c
        .thanks_sent
        .iter()
        .map(|e| json!({"member": e.member, "amount": e.amount, "label": format_eur(e.amount)}))
        .collect();
    json!({
        "position": view.position + 1,
        "of": roster_size,
        "name": view.speaker.name,
        "profession": view.speaker.profession,
        "description": view.speaker.description,
        "meetingDate": view.meeting_date,
        "targets": c.targets,
        "thanksSentTotal": c.thanks_sent_total,
        "thanksSentTotalLabel": format_eur(c.thanks_sent_total),
        "thanksSent": thanks,
    })
}

/// The JSON document printed by the tool: the state of each sheet, then the
/// dashboard and speaker views computed from the session.
pub fn build_summary_js(
    config: &BoardConfig,
    load: &SessionLoad,
    today: NaiveDate,
    speaker_index: usize,
) -> JSValue {
    let session = load.to_session();
    let next_meeting = session.next_meeting(today);
    let chart: Vec<JSValue> = session
        .chart()
        .iter()
        .map(|p| json!({"label": p.label, "contacts": p.contacts, "thanks": p.thanks}))
        .collect();
    let speaker = match session.speaker_view(speaker_index, today) {
        Some(view) => speaker_view_js(&view, session.speakers.len()),
        None => JSValue::Null,
    };
    let speakers: Vec<&str> = session.speakers.iter().map(|s| s.name.as_str()).collect();
    json!({
        "config": config,
        "today": format_date(today),
        "sources": {
            "meetings": outcome_js(&load.meetings),
            "exchanges": outcome_js(&load.exchanges),
            "roster": outcome_js(&load.speakers),
        },
        "dashboard": stats_js(&session.stats(today)),
        "chart": chart,
        "nextMeeting": {
            "date": format_date(next_meeting),
            "label": meeting_label(next_meeting),
        },
        "speakers": speakers,
        "speaker": speaker,
    })
}

fn write_summary(out: &Option<String>, pretty: &str) -> BBoardResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty);
        }
        Some(path) => {
            info!("Writing summary to {}", path);
            fs::write(path, pretty).context(WritingSummarySnafu { path })?;
        }
    }
    Ok(())
}

/// Loads the three sheets, prints the summary and, if asked, checks it against
/// a reference summary.
pub async fn run_board(options: &RunOptions) -> BBoardResult<()> {
    info!("config: {:?}", options.config);
    let source = build_source(&options.config)?;
    let load = load_session(source.as_ref(), &options.config.sheets).await;
    if load.any_failed() {
        warn!("Some sheets could not be loaded, the views will be partial");
    }

    let summary = build_summary_js(
        &options.config,
        &load,
        options.today,
        options.speaker_index,
    );
    let pretty = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    write_summary(&options.out, &pretty)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &options.reference {
        compare_with_reference(&pretty, summary_p)?;
    }
    Ok(())
}

fn compare_with_reference(pretty: &str, summary_p: &str) -> BoardResult<()> {
    let summary_ref = read_summary(summary_p)?;
    debug!("summary: {:?}", summary_ref);
    let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_ref != pretty {
        warn!("Found differences with the reference summary");
        print_diff(pretty_ref.as_str(), pretty, "\n");
        whatever!("Difference detected between computed summary and reference summary")
    }
    info!("Summary matches the reference {}", summary_p);
    Ok(())
}
