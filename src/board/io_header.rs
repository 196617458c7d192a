// Finding the columns of a sheet from its (loosely named) header row.

use log::debug;

/// The semantic fields that can be read from a sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Field {
    Date,
    Member,
    StrategicContacts,
    ThanksGenerated,
    DealClosed,
    Target,
    /// The name column of the speaker roster.
    SpeakerName,
    Profession,
    Description,
}

impl Field {
    /// The lowercase fragments that identify the column of this field.
    pub fn needles(&self) -> &'static [&'static str] {
        match self {
            Field::Date => &["data"],
            Field::Member => &["membro", "nome"],
            Field::StrategicContacts => &["contatti", "strategici"],
            Field::ThanksGenerated => &["grazie"],
            Field::DealClosed => &["affare fatto"],
            Field::Target => &["target", "destinatario", "referenza", "contatto"],
            Field::SpeakerName => &["nome"],
            Field::Profession => &["professione"],
            Field::Description => &["breve descrizione", "descrizione"],
        }
    }
}

/// Returns the index of the leftmost column whose label, lowercased and
/// trimmed, contains one of the fragments of the field.
///
/// This is a plain substring match: overlapping fragments such as `contatti`
/// and `contatto` are resolved by column order only.
pub fn find_column(header: &[String], field: Field) -> Option<usize> {
    let needles = field.needles();
    header.iter().position(|label| {
        let label = label.trim().to_lowercase();
        needles.iter().any(|n| label.contains(n))
    })
}

/// Column positions of a meeting-shaped sheet (meeting log or per-exchange sheet).
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MeetingColumns {
    pub date: Option<usize>,
    pub member: Option<usize>,
    pub strategic_contacts: Option<usize>,
    pub thanks_generated: Option<usize>,
    pub deal_closed: Option<usize>,
    pub target: Option<usize>,
}

impl MeetingColumns {
    pub fn resolve(header: &[String]) -> MeetingColumns {
        let res = MeetingColumns {
            date: find_column(header, Field::Date),
            member: find_column(header, Field::Member),
            strategic_contacts: find_column(header, Field::StrategicContacts),
            thanks_generated: find_column(header, Field::ThanksGenerated),
            deal_closed: find_column(header, Field::DealClosed),
            target: find_column(header, Field::Target),
        };
        debug!("MeetingColumns::resolve: header: {:?} -> {:?}", header, res);
        res
    }
}

/// Column positions of the speaker roster.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SpeakerColumns {
    pub name: Option<usize>,
    pub profession: Option<usize>,
    pub description: Option<usize>,
}

impl SpeakerColumns {
    pub fn resolve(header: &[String]) -> SpeakerColumns {
        let res = SpeakerColumns {
            name: find_column(header, Field::SpeakerName),
            profession: find_column(header, Field::Profession),
            description: find_column(header, Field::Description),
        };
        debug!("SpeakerColumns::resolve: header: {:?} -> {:?}", header, res);
        res
    }
}
