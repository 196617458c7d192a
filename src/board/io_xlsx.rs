// Reading the sheets from a downloaded copy of the spreadsheet.

use async_trait::async_trait;
use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::{Days, NaiveDate};
use log::{debug, info};
use meeting_stats::format_date;
use snafu::prelude::*;

use crate::board::io_fetch::SheetSource;
use crate::board::{BBoardResult, MissingWorksheetSnafu, OpeningExcelSnafu, WorkbookTaskSnafu};

/// Serves each sheet from the worksheet with the same name in an `.xlsx` file.
pub struct WorkbookSource {
    path: String,
}

impl WorkbookSource {
    pub fn new(path: String) -> WorkbookSource {
        WorkbookSource { path }
    }
}

#[async_trait]
impl SheetSource for WorkbookSource {
    async fn fetch_rows(&self, sheet_name: &str) -> BBoardResult<Vec<Vec<String>>> {
        // calamine reads synchronously: keep it off the runtime thread.
        let path = self.path.clone();
        let worksheet_name = sheet_name.to_string();
        tokio::task::spawn_blocking(move || read_worksheet(&path, &worksheet_name))
            .await
            .context(WorkbookTaskSnafu { sheet: sheet_name })?
    }
}

/// All the rows of a worksheet, as the text a CSV export would show.
pub fn read_worksheet(path: &str, worksheet_name: &str) -> BBoardResult<Vec<Vec<String>>> {
    info!("read_worksheet: {:?} from {}", worksheet_name, path);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range(worksheet_name)
        .context(MissingWorksheetSnafu {
            sheet: worksheet_name,
        })?
        .context(OpeningExcelSnafu { path })?;
    let rows: Vec<Vec<String>> = wrange
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    debug!("read_worksheet: {} rows", rows.len());
    Ok(rows)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(serial) => excel_date(*serial).map(format_date).unwrap_or_default(),
        DataType::Empty => String::new(),
        x => {
            debug!("cell_text: unreadable cell {:?}", x);
            String::new()
        }
    }
}

/// The calendar day of an Excel serial date (days since 1899-12-30, time of
/// day ignored).
pub fn excel_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.trunc() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardError;

    #[test]
    fn serial_dates() {
        assert_eq!(excel_date(45444.0), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(excel_date(45444.75), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(excel_date(-1.0), None);
    }

    #[test]
    fn cells_as_text() {
        assert_eq!(cell_text(&DataType::Float(150.0)), "150");
        assert_eq!(cell_text(&DataType::Float(10.5)), "10.5");
        assert_eq!(cell_text(&DataType::Int(3)), "3");
        assert_eq!(cell_text(&DataType::Empty), "");
        assert_eq!(cell_text(&DataType::DateTime(45444.0)), "01/06/2024");
        assert_eq!(
            cell_text(&DataType::String("Mario Rossi".to_string())),
            "Mario Rossi"
        );
    }

    #[test]
    fn missing_workbook() {
        assert!(read_worksheet("/nonexistent/board.xlsx", "elenco nomi").is_err());
    }

    #[tokio::test]
    async fn workbook_source_reports_errors() {
        let source = WorkbookSource::new("/nonexistent/board.xlsx".to_string());
        let err = source.fetch_rows("elenco nomi").await.unwrap_err();
        assert!(matches!(*err, BoardError::OpeningExcel { .. }));
    }
}
