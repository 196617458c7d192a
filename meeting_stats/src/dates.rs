use chrono::{NaiveDate, NaiveDateTime};

/// Brings a date string to the `DD/MM/YYYY` form used to compare meetings.
///
/// Accepted shapes are `D/M/Y`, `D-M-Y` and `Y-M-D` (the latter recognized by
/// a four-character first part). Two-digit years are read as 20xx. Anything
/// else is returned trimmed but otherwise untouched, so two unrecognized
/// strings still compare equal when they are equal.
pub fn normalize_date(date: &str) -> String {
    let clean = date.trim();
    if clean.is_empty() {
        return String::new();
    }
    if clean.contains('-') {
        let parts: Vec<&str> = clean.split('-').collect();
        if let [first, month, last] = parts.as_slice() {
            if first.chars().count() == 4 {
                return format!("{}/{}/{}", pad2(last), pad2(month), first);
            }
            return format!("{}/{}/{}", pad2(first), pad2(month), full_year(last));
        }
    }
    let parts: Vec<&str> = clean.split('/').collect();
    if let [day, month, year] = parts.as_slice() {
        return format!("{}/{}/{}", pad2(day), pad2(month), full_year(year));
    }
    clean.to_string()
}

/// Reads a record date into a calendar date.
///
/// Three slash-separated numbers are always day, month, year, and so are
/// three dash-separated numbers unless the first one has four digits. In that
/// case the ISO form `YYYY-MM-DD` is read, with or without a time part.
/// Two-digit years are read as 20xx, as in [`normalize_date`].
pub fn parse_record_date(date: &str) -> Option<NaiveDate> {
    let clean = date.trim();
    let slashed: Vec<&str> = clean.split('/').collect();
    if let [day, month, year] = slashed.as_slice() {
        return day_first(day, month, year);
    }
    let dashed: Vec<&str> = clean.split('-').collect();
    match dashed.as_slice() {
        [first, ..] if first.len() == 4 && first.bytes().all(|b| b.is_ascii_digit()) => {
            parse_iso(clean)
        }
        [day, month, year] => day_first(day, month, year),
        _ => None,
    }
}

fn day_first(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day = day.trim().parse::<u32>().ok()?;
    let month = month.trim().parse::<u32>().ok()?;
    let year_s = year.trim();
    let mut year = year_s.parse::<i32>().ok()?;
    if year_s.len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso(clean: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(clean, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(clean, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(clean, "%Y-%m-%d %H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn pad2(s: &str) -> String {
    format!("{:0>2}", s)
}

fn full_year(year: &str) -> String {
    if year.chars().count() == 2 {
        format!("20{}", year)
    } else {
        year.to_string()
    }
}
