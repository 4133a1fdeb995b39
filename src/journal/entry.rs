use std::fmt;

use crate::error::JournalError;
use crate::journal::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Note,
    Recording,
}

impl EntryKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Recording => "recording",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, JournalError> {
        match tag {
            "note" => Ok(Self::Note),
            "recording" => Ok(Self::Recording),
            other => Err(JournalError::UnknownEntryType(other.to_string())),
        }
    }
}

/// One timestamped line of the session log.
///
/// `data` is the note text for [`EntryKind::Note`] and the audio file path
/// for [`EntryKind::Recording`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    timestamp: Timestamp,
    data: String,
}

impl Entry {
    pub fn note(data: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind: EntryKind::Note,
            timestamp,
            data: data.into(),
        }
    }

    pub fn recording(path: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind: EntryKind::Recording,
            timestamp,
            data: path.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryKind};
    use crate::error::JournalError;
    use crate::journal::timestamp::Timestamp;
    use chrono::NaiveDate;

    fn ts(hour: u32, minute: u32) -> Timestamp {
        Timestamp::at(
            NaiveDate::from_ymd_opt(2015, 4, 12)
                .and_then(|d| d.and_hms_opt(hour, minute, 0))
                .expect("datetime"),
        )
    }

    #[test]
    fn render_prefixes_timestamp() {
        let note = Entry::note("Lonqu looked for trouble", ts(17, 33));
        assert_eq!(note.render(), "[5:33 PM] Lonqu looked for trouble");

        let rec = Entry::recording("/tmp/rec.wav", ts(9, 5));
        assert_eq!(rec.render(), "[9:05 AM] /tmp/rec.wav");
        assert_eq!(rec.kind(), EntryKind::Recording);
    }

    #[test]
    fn tags_map_both_ways() {
        assert_eq!(EntryKind::from_tag("note").expect("note"), EntryKind::Note);
        assert_eq!(
            EntryKind::from_tag(EntryKind::Recording.tag()).expect("recording"),
            EntryKind::Recording
        );
        let err = EntryKind::from_tag("sketch").expect_err("unknown");
        assert!(matches!(err, JournalError::UnknownEntryType(tag) if tag == "sketch"));
    }
}
