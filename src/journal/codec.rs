use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::journal::entry::{Entry, EntryKind};
use crate::journal::session::{Session, format_short_date, parse_session_number, parse_short_date};
use crate::journal::timestamp::Timestamp;

// Field order here is the on-disk key order.
#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    session: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    entries: Vec<EntryDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EntryDocument {
    #[serde(rename = "type")]
    kind: String,
    timestamp: String,
    data: String,
}

#[derive(Debug, Clone)]
pub struct Decoded {
    pub session: Session,
    pub warnings: Vec<String>,
}

fn entry_document(entry: &Entry) -> EntryDocument {
    EntryDocument {
        kind: entry.kind().tag().to_string(),
        timestamp: entry.timestamp().to_string(),
        data: entry.data().to_string(),
    }
}

pub fn encode(session: &Session) -> Result<String, JournalError> {
    let doc = SessionDocument {
        title: session.title.clone(),
        session: session.number_label(),
        date: format_short_date(session.date),
        entries: session.entries().iter().map(entry_document).collect(),
    };
    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}

/// Decodes a session document, mapping fields by name.
///
/// `today` stands in for the calendar day of every parsed timestamp and for
/// a session date that cannot be read.
pub fn decode(raw: &[u8], today: NaiveDate) -> Result<Decoded, JournalError> {
    let doc: SessionDocument = serde_json::from_slice(raw)?;
    let mut warnings = Vec::new();

    let date = match parse_short_date(&doc.date) {
        Some(date) => date,
        None => {
            warnings.push(format!(
                "unreadable session date `{}`; using {}",
                doc.date,
                format_short_date(today)
            ));
            today
        }
    };

    let mut session = Session::new(doc.title, parse_session_number(&doc.session), date);
    for item in doc.entries {
        let kind = EntryKind::from_tag(&item.kind)?;
        let timestamp = Timestamp::parse(&item.timestamp, today)?;
        let entry = match kind {
            EntryKind::Note => Entry::note(item.data, timestamp),
            EntryKind::Recording => Entry::recording(item.data, timestamp),
        };
        session.push(entry);
    }

    Ok(Decoded { session, warnings })
}
