// ********* Input data structures ***********

/// Placeholder used when a meeting row does not name its member.
pub const UNKNOWN_MEMBER: &str = "Unknown";

/// One row of exchange or meeting activity, as read from a sheet.
///
/// The date is kept exactly as received. Use [`crate::normalize_date`] before
/// comparing two dates.
#[derive(PartialEq, Debug, Clone)]
pub struct MeetingRecord {
    pub date: String,
    pub member: String,
    pub strategic_contacts: u32,
    pub thanks_generated: f64,
    /// Only filled by the per-exchange sheet. Zero elsewhere.
    pub deal_closed: f64,
    /// The contact(s) introduced by the member, comma-separated in raw form.
    pub target: Option<String>,
}

impl MeetingRecord {
    pub fn new(date: &str, member: &str) -> MeetingRecord {
        MeetingRecord {
            date: date.to_string(),
            member: member.to_string(),
            strategic_contacts: 0,
            thanks_generated: 0.0,
            deal_closed: 0.0,
            target: None,
        }
    }
}

/// One entry of the speaker roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SpeakerProfile {
    pub name: String,
    pub profession: Option<String>,
    pub description: Option<String>,
}

// ******** Output data structures *********

#[derive(PartialEq, Debug, Clone, Default)]
pub struct DashboardStats {
    pub contacts_week: u64,
    pub contacts_total: u64,
    pub thanks_week: f64,
    pub thanks_total: f64,
}

/// A bar of the dashboard chart.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartPoint {
    pub label: String,
    pub contacts: u32,
    pub thanks: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ThanksEntry {
    pub member: String,
    pub amount: f64,
}

/// What a speaker brought to, and received at, one meeting.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct SpeakerContribution {
    /// Unique contact names introduced by the speaker, in first-seen order.
    pub targets: Vec<String>,
    pub thanks_sent_total: f64,
    /// Closed deals other members attributed to the speaker.
    pub thanks_sent: Vec<ThanksEntry>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct SpeakerView {
    /// Zero-based position of the speaker in the sorted roster.
    pub position: usize,
    pub speaker: SpeakerProfile,
    pub meeting_date: String,
    pub contribution: SpeakerContribution,
}
