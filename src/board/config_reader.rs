use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::board::{BoardResult, OpeningJsonSnafu, ParsingJsonSnafu};

/// The spreadsheet shared by the group.
pub const DEFAULT_SHEET_ID: &str = "11Fhl7NrWdz3IFEmXdzRcbSLRI26VtT2rPl64o3a0urY";

fn default_sheet_id() -> String {
    DEFAULT_SHEET_ID.to_string()
}

fn default_provider() -> String {
    "gviz".to_string()
}

fn default_meetings() -> String {
    "elenco riunioni".to_string()
}

fn default_exchanges() -> String {
    "Foglio1".to_string()
}

fn default_roster() -> String {
    "elenco nomi".to_string()
}

/// The names of the three sheets of the spreadsheet.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetNames {
    /// The meeting log.
    #[serde(default = "default_meetings")]
    pub meetings: String,
    /// One row per exchange, with targets and closed deals.
    #[serde(default = "default_exchanges")]
    pub exchanges: String,
    #[serde(default = "default_roster")]
    pub roster: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        SheetNames {
            meetings: default_meetings(),
            exchanges: default_exchanges(),
            roster: default_roster(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(rename = "sheetId", default = "default_sheet_id")]
    pub sheet_id: String,
    /// `gviz`, `directory` or `xlsx`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The directory (`directory`) or the file (`xlsx`) to read from.
    pub path: Option<String>,
    #[serde(default)]
    pub sheets: SheetNames,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            sheet_id: default_sheet_id(),
            provider: default_provider(),
            path: None,
            sheets: SheetNames::default(),
        }
    }
}

pub fn read_config(path: &str) -> BoardResult<BoardConfig> {
    let contents = std::fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: BoardConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> BoardResult<JSValue> {
    let contents = std::fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(js)
}
