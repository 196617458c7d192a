// Turning parsed rows into typed records.
//
// Nothing in this module fails: unreadable values fall back to their defaults
// and rows without a date (or a speaker name) are skipped.

use log::{debug, warn};
use meeting_stats::{MeetingRecord, SpeakerProfile, UNKNOWN_MEMBER};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::board::io_header::{MeetingColumns, SpeakerColumns};

/// Reads the leading base-10 integer of a cell, like a spreadsheet would show
/// it: `"3"`, `" 12 contatti"` and `"3.7"` give 3, 12 and 3.
/// Anything without leading digits, and negative numbers, give 0.
pub fn parse_int_lenient(cell: &str) -> u32 {
    let s = cell.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return 0;
    }
    match digits[..end].parse::<u64>() {
        Ok(v) => v.min(u32::MAX as u64) as u32,
        Err(_) => u32::MAX,
    }
}

/// Reads an amount written with either decimal separator.
///
/// The first comma is turned into a dot, then the longest leading decimal
/// number is read. `"150,00"` gives 150 and `"1.234,56"` reads as `"1.234.56"`,
/// that is 1.234. Unreadable, negative and infinite values give 0.
pub fn parse_decimal_lenient(cell: &str) -> f64 {
    let dotted = cell.replacen(',', ".", 1);
    let s = dotted.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).map(|s| s.as_str())
}

/// Builds a meeting record out of a row, or `None` when the row has no date.
pub fn map_meeting_row(row: &[String], cols: &MeetingColumns) -> Option<MeetingRecord> {
    let date = cell(row, cols.date).map(str::trim).unwrap_or("");
    if date.is_empty() {
        return None;
    }
    let member = match cell(row, cols.member).map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => UNKNOWN_MEMBER.to_string(),
    };
    Some(MeetingRecord {
        date: date.to_string(),
        member,
        strategic_contacts: parse_int_lenient(cell(row, cols.strategic_contacts).unwrap_or("")),
        thanks_generated: parse_decimal_lenient(cell(row, cols.thanks_generated).unwrap_or("")),
        deal_closed: parse_decimal_lenient(cell(row, cols.deal_closed).unwrap_or("")),
        target: cell(row, cols.target).map(|t| t.trim().to_string()),
    })
}

/// Builds a roster entry out of a row, or `None` when the row has no name.
pub fn map_speaker_row(row: &[String], cols: &SpeakerColumns) -> Option<SpeakerProfile> {
    let name = cell(row, cols.name).map(str::trim).unwrap_or("");
    if name.is_empty() {
        return None;
    }
    Some(SpeakerProfile {
        name: name.to_string(),
        profession: cell(row, cols.profession).map(|s| s.trim().to_string()),
        description: cell(row, cols.description).map(|s| s.trim().to_string()),
    })
}

/// Reads a meeting-shaped sheet. The first row is the header.
pub fn meeting_records_from_rows(rows: &[Vec<String>]) -> Vec<MeetingRecord> {
    let (header, body) = match rows.split_first() {
        Some(x) => x,
        None => return Vec::new(),
    };
    let cols = MeetingColumns::resolve(header);
    if cols.date.is_none() {
        warn!(
            "meeting_records_from_rows: no date column in header {:?}, all rows are skipped",
            header
        );
    }
    let res: Vec<MeetingRecord> = body
        .iter()
        .filter_map(|row| map_meeting_row(row, &cols))
        .collect();
    debug!(
        "meeting_records_from_rows: kept {} of {} rows",
        res.len(),
        body.len()
    );
    res
}

/// Reads the speaker roster, sorted by name. A roster without a name column
/// gives no speakers.
pub fn speakers_from_rows(rows: &[Vec<String>]) -> Vec<SpeakerProfile> {
    let (header, body) = match rows.split_first() {
        Some(x) => x,
        None => return Vec::new(),
    };
    let cols = SpeakerColumns::resolve(header);
    if cols.name.is_none() {
        warn!("speakers_from_rows: no name column in header {:?}", header);
        return Vec::new();
    }
    let mut res: Vec<SpeakerProfile> = body
        .iter()
        .filter_map(|row| map_speaker_row(row, &cols))
        .collect();
    res.sort_by_cached_key(|s| collation_key(&s.name));
    debug!("speakers_from_rows: {} speakers", res.len());
    res
}

/// Sort key that orders names the way a person reads them: letters first,
/// ignoring accents and case, then accents, then case (lowercase first).
pub fn collation_key(name: &str) -> (String, String, Vec<u8>) {
    let base: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let accented = name.nfc().collect::<String>().to_lowercase();
    let case: Vec<u8> = name.chars().map(|c| c.is_uppercase() as u8).collect();
    (base, accented, case)
}
