/*!
Record model and derived views for the meeting dashboard of a networking group.

The records are produced by the sheet readers of `meetboard`. This crate only
computes on them: weekly and total statistics, the date of the next meeting,
and what a given speaker brought to (and received at) that meeting.

```
use chrono::NaiveDate;
use meeting_stats::*;

let mut r = MeetingRecord::new("01/06/2024", "Mario Rossi");
r.strategic_contacts = 3;
r.thanks_generated = 150.0;

let today = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
let stats = compute_stats(&[r], today);
assert_eq!(stats.contacts_week, 3);
assert_eq!(stats.thanks_total, 150.0);
```
*/
mod dates;
mod italian;
mod model;

use chrono::{Days, NaiveDate};
use log::{debug, info};

pub use crate::dates::*;
pub use crate::italian::*;
pub use crate::model::*;

/// Number of days, counted back from today, that make up "this week".
pub const WEEK_WINDOW_DAYS: u64 = 7;

/// Number of records shown on the dashboard chart.
pub const CHART_SIZE: usize = 10;

/// Sums contacts and thanks over all the records, and over the records of the
/// trailing week.
///
/// A record belongs to the week when its date is on or after `today` minus
/// seven days. Records with a date that cannot be read only count in the
/// totals.
pub fn compute_stats(records: &[MeetingRecord], today: NaiveDate) -> DashboardStats {
    let week_start = today
        .checked_sub_days(Days::new(WEEK_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let mut stats = DashboardStats::default();
    for r in records.iter() {
        stats.contacts_total += r.strategic_contacts as u64;
        stats.thanks_total += r.thanks_generated;
        match parse_record_date(&r.date) {
            Some(d) if d >= week_start => {
                stats.contacts_week += r.strategic_contacts as u64;
                stats.thanks_week += r.thanks_generated;
            }
            Some(_) => {}
            None => {
                debug!("compute_stats: unreadable date {:?} for {:?}", r.date, r.member);
            }
        }
    }
    info!(
        "compute_stats: {} records, week starting {}: {:?}",
        records.len(),
        week_start,
        stats
    );
    stats
}

/// The first meeting date strictly after `today`.
///
/// Falls back to tomorrow when the sheet holds no future date, and to today
/// when the sheet is empty.
pub fn next_meeting_date(records: &[MeetingRecord], today: NaiveDate) -> NaiveDate {
    if records.is_empty() {
        return today;
    }
    let tomorrow = today.succ_opt().unwrap_or(today);
    records
        .iter()
        .filter_map(|r| parse_record_date(&r.date))
        .filter(|d| *d >= tomorrow)
        .min()
        .unwrap_or(tomorrow)
}

/// Collects the contribution of one speaker at one meeting.
///
/// `meeting_date` must already be in the `DD/MM/YYYY` form. Names are compared
/// without case and surrounding blanks. The thanks sent to the speaker are the
/// closed deals whose whole target field names the speaker.
pub fn speaker_contribution(
    exchanges: &[MeetingRecord],
    speaker_name: &str,
    meeting_date: &str,
) -> SpeakerContribution {
    let name = speaker_name.trim().to_lowercase();
    let at_meeting: Vec<&MeetingRecord> = exchanges
        .iter()
        .filter(|r| normalize_date(&r.date) == meeting_date)
        .collect();

    let mut targets: Vec<String> = Vec::new();
    for r in at_meeting
        .iter()
        .filter(|r| r.member.trim().to_lowercase() == name)
    {
        let names = r.target.as_deref().unwrap_or("");
        for t in names.split(',').map(|t| t.trim()) {
            if !t.is_empty() && !targets.iter().any(|x| x == t) {
                targets.push(t.to_string());
            }
        }
    }

    let thanks_sent: Vec<ThanksEntry> = at_meeting
        .iter()
        .filter(|r| {
            let target = r.target.as_deref().unwrap_or("").trim().to_lowercase();
            target == name && r.deal_closed > 0.0
        })
        .map(|r| ThanksEntry {
            member: r.member.clone(),
            amount: r.deal_closed,
        })
        .collect();
    let thanks_sent_total = thanks_sent.iter().map(|e| e.amount).sum();

    debug!(
        "speaker_contribution: {:?} at {}: {} targets, {} thanks",
        speaker_name,
        meeting_date,
        targets.len(),
        thanks_sent.len()
    );
    SpeakerContribution {
        targets,
        thanks_sent_total,
        thanks_sent,
    }
}

/// The bars of the dashboard chart: the first records of the sheet, labelled
/// with their day and month.
pub fn chart_points(records: &[MeetingRecord]) -> Vec<ChartPoint> {
    records
        .iter()
        .take(CHART_SIZE)
        .map(|r| {
            let parts: Vec<&str> = r.date.split('/').collect();
            let label = match parts.as_slice() {
                [day, month, ..] => format!("{}/{}", day, month),
                _ => r.date.clone(),
            };
            ChartPoint {
                label,
                contacts: r.strategic_contacts,
                thanks: r.thanks_generated,
            }
        })
        .collect()
}

/// All the data fetched for one session.
///
/// The lists are filled once at startup and only read afterwards.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Session {
    /// The meeting log.
    pub meetings: Vec<MeetingRecord>,
    /// The per-exchange sheet, with targets and closed deals.
    pub exchanges: Vec<MeetingRecord>,
    /// The roster, sorted by name.
    pub speakers: Vec<SpeakerProfile>,
}

impl Session {
    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        compute_stats(&self.meetings, today)
    }

    pub fn next_meeting(&self, today: NaiveDate) -> NaiveDate {
        next_meeting_date(&self.meetings, today)
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        chart_points(&self.meetings)
    }

    /// The speaker view for the speaker at `index`. The index wraps around the
    /// roster, so callers can step forward and back freely.
    pub fn speaker_view(&self, index: usize, today: NaiveDate) -> Option<SpeakerView> {
        if self.speakers.is_empty() {
            return None;
        }
        let position = index % self.speakers.len();
        let speaker = self.speakers[position].clone();
        let meeting_date = format_date(self.next_meeting(today));
        let contribution = speaker_contribution(&self.exchanges, &speaker.name, &meeting_date);
        Some(SpeakerView {
            position,
            speaker,
            meeting_date,
            contribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meeting(date: &str, member: &str, contacts: u32, thanks: f64) -> MeetingRecord {
        MeetingRecord {
            date: date.to_string(),
            member: member.to_string(),
            strategic_contacts: contacts,
            thanks_generated: thanks,
            deal_closed: 0.0,
            target: None,
        }
    }

    fn exchange(date: &str, member: &str, target: &str, deal: f64) -> MeetingRecord {
        MeetingRecord {
            date: date.to_string(),
            member: member.to_string(),
            strategic_contacts: 0,
            thanks_generated: 0.0,
            deal_closed: deal,
            target: Some(target.to_string()),
        }
    }

    fn speaker(name: &str) -> SpeakerProfile {
        SpeakerProfile {
            name: name.to_string(),
            profession: None,
            description: None,
        }
    }

    #[test]
    fn weekly_window_boundaries() {
        init();
        let today = day(2024, 6, 15);
        let records = vec![
            meeting("08/06/2024", "Anna", 2, 100.0),
            meeting("07/06/2024", "Bruno", 5, 1000.0),
            meeting("15/06/2024", "Carla", 1, 10.0),
        ];
        let stats = compute_stats(&records, today);
        assert_eq!(stats.contacts_week, 3);
        assert_eq!(stats.thanks_week, 110.0);
        assert_eq!(stats.contacts_total, 8);
        assert_eq!(stats.thanks_total, 1110.0);
    }

    #[test]
    fn weekly_window_reads_iso_dates() {
        let today = day(2024, 6, 15);
        let records = vec![
            meeting("2024-06-10", "Anna", 4, 0.0),
            meeting("2024-05-01", "Bruno", 6, 0.0),
        ];
        let stats = compute_stats(&records, today);
        assert_eq!(stats.contacts_week, 4);
        assert_eq!(stats.contacts_total, 10);
    }

    #[test]
    fn day_first_dashed_dates() {
        let today = day(2024, 6, 20);
        let records = vec![
            meeting("15-06-24", "Anna", 5, 0.0),
            meeting("25-06-24", "Bruno", 0, 0.0),
        ];
        assert_eq!(compute_stats(&records, today).contacts_week, 5);
        assert_eq!(next_meeting_date(&records, today), day(2024, 6, 25));
    }

    #[test]
    fn unreadable_dates_only_count_in_totals() {
        let today = day(2024, 6, 15);
        let records = vec![meeting("ieri", "Anna", 4, 50.0)];
        let stats = compute_stats(&records, today);
        assert_eq!(stats.contacts_week, 0);
        assert_eq!(stats.thanks_week, 0.0);
        assert_eq!(stats.contacts_total, 4);
        assert_eq!(stats.thanks_total, 50.0);
    }

    #[test]
    fn empty_records_give_zero_stats() {
        assert_eq!(compute_stats(&[], day(2024, 6, 15)), DashboardStats::default());
    }

    #[test]
    fn next_meeting_picks_earliest_future_date() {
        let today = day(2024, 6, 15);
        let records = vec![
            meeting("13/06/2024", "a", 0, 0.0),
            meeting("27/06/2024", "a", 0, 0.0),
            meeting("20/06/2024", "a", 0, 0.0),
            meeting("15/06/2024", "a", 0, 0.0),
        ];
        assert_eq!(next_meeting_date(&records, today), day(2024, 6, 20));
    }

    #[test]
    fn next_meeting_fallbacks() {
        let today = day(2024, 6, 15);
        let past = vec![meeting("01/06/2024", "a", 0, 0.0)];
        assert_eq!(next_meeting_date(&past, today), day(2024, 6, 16));
        assert_eq!(next_meeting_date(&[], today), today);
    }

    #[test]
    fn contribution_collects_unique_targets() {
        init();
        let exchanges = vec![
            exchange("20/06/2024", " mario rossi ", "Luca Bianchi, Sara Verdi", 0.0),
            exchange("2024-06-20", "Mario Rossi", "Sara Verdi,,Paolo Neri", 0.0),
            exchange("13/06/2024", "Mario Rossi", "Old Contact", 0.0),
            exchange("20/06/2024", "Giulia", "Other", 0.0),
        ];
        let c = speaker_contribution(&exchanges, "Mario Rossi", "20/06/2024");
        assert_eq!(c.targets, vec!["Luca Bianchi", "Sara Verdi", "Paolo Neri"]);
        assert!(c.thanks_sent.is_empty());
        assert_eq!(c.thanks_sent_total, 0.0);
    }

    #[test]
    fn contribution_sums_closed_deals_for_speaker() {
        let exchanges = vec![
            exchange("20/06/2024", "Giulia", "MARIO ROSSI", 1200.0),
            exchange("20/06/2024", "Franco", "Mario Rossi", 300.5),
            exchange("20/06/2024", "Nadia", "Mario Rossi", 0.0),
            exchange("20/06/2024", "Ugo", "Mario Rossi, Anna", 999.0),
            exchange("13/06/2024", "Piero", "Mario Rossi", 50.0),
        ];
        let c = speaker_contribution(&exchanges, "mario rossi", "20/06/2024");
        assert_eq!(c.thanks_sent_total, 1500.5);
        assert_eq!(
            c.thanks_sent,
            vec![
                ThanksEntry {
                    member: "Giulia".to_string(),
                    amount: 1200.0
                },
                ThanksEntry {
                    member: "Franco".to_string(),
                    amount: 300.5
                },
            ]
        );
    }

    #[test]
    fn chart_takes_first_ten_records() {
        let records: Vec<MeetingRecord> = (1..=12)
            .map(|d| meeting(&format!("{:02}/06/2024", d), "a", d, d as f64))
            .collect();
        let points = chart_points(&records);
        assert_eq!(points.len(), CHART_SIZE);
        assert_eq!(points[0].label, "01/06");
        assert_eq!(points[9].contacts, 10);
    }

    #[test]
    fn chart_keeps_unsplittable_dates() {
        let points = chart_points(&[meeting("2024-06-01", "a", 1, 1.0)]);
        assert_eq!(points[0].label, "2024-06-01");
    }

    #[test]
    fn speaker_view_wraps_and_uses_next_meeting() {
        let session = Session {
            meetings: vec![meeting("20/06/2024", "a", 0, 0.0)],
            exchanges: vec![exchange("20/06/2024", "Bea", "Carlo", 0.0)],
            speakers: vec![speaker("Alfa"), speaker("Bea")],
        };
        let today = day(2024, 6, 15);
        let view = session.speaker_view(3, today).unwrap();
        assert_eq!(view.position, 1);
        assert_eq!(view.speaker.name, "Bea");
        assert_eq!(view.meeting_date, "20/06/2024");
        assert_eq!(view.contribution.targets, vec!["Carlo"]);
    }

    #[test]
    fn speaker_view_without_roster() {
        let session = Session::default();
        assert_eq!(session.speaker_view(0, day(2024, 6, 15)), None);
    }
}
