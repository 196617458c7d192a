// Italian renderings used by the dashboard.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// Formats an amount as whole euros, the way the it-IT locale prints them:
/// `.` as thousands separator and the symbol after a non-breaking space.
pub fn format_eur(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::new();
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}\u{a0}€", sign, grouped)
}

/// The heading of the speaker view, e.g. `Riunione del 5 gennaio 2024`.
pub fn meeting_label(date: NaiveDate) -> String {
    format!(
        "Riunione del {} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eur_small_amounts() {
        assert_eq!(format_eur(0.0), "0\u{a0}€");
        assert_eq!(format_eur(150.0), "150\u{a0}€");
        assert_eq!(format_eur(99.5), "100\u{a0}€");
    }

    #[test]
    fn eur_groups_thousands() {
        assert_eq!(format_eur(1234.56), "1.235\u{a0}€");
        assert_eq!(format_eur(1_250_000.0), "1.250.000\u{a0}€");
        assert_eq!(format_eur(-2500.0), "-2.500\u{a0}€");
    }

    #[test]
    fn label_uses_italian_month() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(meeting_label(d), "Riunione del 5 gennaio 2024");
        let d = NaiveDate::from_ymd_opt(2025, 12, 18).unwrap();
        assert_eq!(meeting_label(d), "Riunione del 18 dicembre 2025");
    }
}
