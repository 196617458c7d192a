// Fetching the three sheets of a session.

use async_trait::async_trait;
use log::{error, info};
use meeting_stats::{MeetingRecord, Session, SpeakerProfile};
use snafu::prelude::*;
use url::Url;

use std::path::PathBuf;

use crate::board::config_reader::SheetNames;
use crate::board::io_delimited::parse_delimited;
use crate::board::io_mapper::{meeting_records_from_rows, speakers_from_rows};
use crate::board::{
    BBoardResult, BoardResult, HttpRequestSnafu, HttpStatusSnafu, InvalidUrlSnafu, OpeningCsvSnafu,
};

const GVIZ_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Somewhere sheets can be read from, by name, as rows of text cells.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_rows(&self, sheet_name: &str) -> BBoardResult<Vec<Vec<String>>>;
}

/// The URL of the CSV export of one sheet of a shared spreadsheet.
pub fn gviz_url(sheet_id: &str, sheet_name: &str) -> BoardResult<Url> {
    export_url(GVIZ_BASE, sheet_id, sheet_name)
}

fn export_url(base: &str, sheet_id: &str, sheet_name: &str) -> BoardResult<Url> {
    let endpoint = format!("{}/{}/gviz/tq", base, sheet_id);
    Url::parse_with_params(&endpoint, &[("tqx", "out:csv"), ("sheet", sheet_name)])
        .context(InvalidUrlSnafu { sheet: sheet_name })
}

/// Reads the sheets of a publicly shared spreadsheet through its CSV export.
///
/// Requests carry no timeout and are never retried.
pub struct GvizSource {
    client: reqwest::Client,
    base: String,
    sheet_id: String,
}

impl GvizSource {
    pub fn new(sheet_id: &str) -> GvizSource {
        GvizSource::with_base(GVIZ_BASE, sheet_id)
    }

    /// Same export layout, served from another host (`<base>/<id>/gviz/tq`).
    pub fn with_base(base: &str, sheet_id: &str) -> GvizSource {
        GvizSource {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
            sheet_id: sheet_id.to_string(),
        }
    }
}

#[async_trait]
impl SheetSource for GvizSource {
    async fn fetch_rows(&self, sheet_name: &str) -> BBoardResult<Vec<Vec<String>>> {
        let url = export_url(&self.base, &self.sheet_id, sheet_name)?;
        info!("GvizSource::fetch_rows: fetching {:?} from {}", sheet_name, url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context(HttpRequestSnafu { sheet: sheet_name })?;
        let status = resp.status();
        if !status.is_success() {
            return HttpStatusSnafu {
                status: status.as_u16(),
                sheet: sheet_name,
            }
            .fail()
            .map_err(Box::new);
        }
        let text = resp
            .text()
            .await
            .context(HttpRequestSnafu { sheet: sheet_name })?;
        Ok(parse_delimited(&text))
    }
}

/// Reads `<root>/<sheet name>.csv` files, for offline copies of the sheets.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(root: P) -> DirectorySource {
        DirectorySource { root: root.into() }
    }
}

#[async_trait]
impl SheetSource for DirectorySource {
    async fn fetch_rows(&self, sheet_name: &str) -> BBoardResult<Vec<Vec<String>>> {
        let p = self.root.join(format!("{}.csv", sheet_name));
        let path = p.display().to_string();
        info!("DirectorySource::fetch_rows: reading {}", path);
        let text = tokio::fs::read_to_string(&p)
            .await
            .context(OpeningCsvSnafu { path })?;
        Ok(parse_delimited(&text))
    }
}

/// The result of reading one sheet. A sheet that could not be read is kept
/// apart from a sheet that was read and had no records.
#[derive(PartialEq, Debug, Clone)]
pub enum SheetOutcome<T> {
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> SheetOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, SheetOutcome::Failed(_))
    }

    /// The records, empty for a failed sheet.
    pub fn records(&self) -> &[T] {
        match self {
            SheetOutcome::Loaded(records) => records,
            SheetOutcome::Failed(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<T> {
        match self {
            SheetOutcome::Loaded(records) => records,
            SheetOutcome::Failed(_) => Vec::new(),
        }
    }
}

async fn fetch_sheet<S, T, F>(source: &S, sheet_name: &str, map: F) -> SheetOutcome<T>
where
    S: SheetSource + ?Sized,
    F: Fn(&[Vec<String>]) -> Vec<T>,
{
    match source.fetch_rows(sheet_name).await {
        Ok(rows) => {
            let records = map(&rows);
            info!(
                "fetch_sheet: {:?}: {} rows, {} records",
                sheet_name,
                rows.len(),
                records.len()
            );
            SheetOutcome::Loaded(records)
        }
        Err(e) => {
            error!("Error fetching data from sheet {:?}: {}", sheet_name, e);
            SheetOutcome::Failed(e.to_string())
        }
    }
}

/// Fetches a meeting-shaped sheet. Any failure is logged and gives a failed,
/// empty outcome.
pub async fn fetch_meeting_records<S: SheetSource + ?Sized>(
    source: &S,
    sheet_name: &str,
) -> SheetOutcome<MeetingRecord> {
    fetch_sheet(source, sheet_name, meeting_records_from_rows).await
}

/// Fetches the speaker roster, sorted by name.
pub async fn fetch_speakers<S: SheetSource + ?Sized>(
    source: &S,
    sheet_name: &str,
) -> SheetOutcome<SpeakerProfile> {
    fetch_sheet(source, sheet_name, speakers_from_rows).await
}

/// The three sheets of a session, as they were fetched.
#[derive(PartialEq, Debug, Clone)]
pub struct SessionLoad {
    pub meetings: SheetOutcome<MeetingRecord>,
    pub exchanges: SheetOutcome<MeetingRecord>,
    pub speakers: SheetOutcome<SpeakerProfile>,
}

impl SessionLoad {
    pub fn any_failed(&self) -> bool {
        self.meetings.is_failed() || self.exchanges.is_failed() || self.speakers.is_failed()
    }

    pub fn to_session(&self) -> Session {
        Session {
            meetings: self.meetings.records().to_vec(),
            exchanges: self.exchanges.records().to_vec(),
            speakers: self.speakers.records().to_vec(),
        }
    }

    pub fn into_session(self) -> Session {
        Session {
            meetings: self.meetings.into_records(),
            exchanges: self.exchanges.into_records(),
            speakers: self.speakers.into_records(),
        }
    }
}

/// Fetches the three sheets concurrently. A failing sheet never prevents the
/// others from loading.
pub async fn load_session<S: SheetSource + ?Sized>(source: &S, sheets: &SheetNames) -> SessionLoad {
    let (meetings, exchanges, speakers) = tokio::join!(
        fetch_meeting_records(source, &sheets.meetings),
        fetch_meeting_records(source, &sheets.exchanges),
        fetch_speakers(source, &sheets.roster),
    );
    SessionLoad {
        meetings,
        exchanges,
        speakers,
    }
}
