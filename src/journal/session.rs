use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

use crate::journal::entry::Entry;

/// One roleplay session: metadata plus the append-only entry log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub title: String,
    /// `0` means the number was never set.
    pub number: u32,
    pub date: NaiveDate,
    entries: Vec<Entry>,
    source_path: Option<PathBuf>,
}

impl Session {
    pub fn new(title: impl Into<String>, number: u32, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            number,
            date,
            entries: Vec::new(),
            source_path: None,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    pub fn number_label(&self) -> String {
        if self.number == 0 {
            String::new()
        } else {
            self.number.to_string()
        }
    }
}

/// `M/D/YYYY` with no zero padding.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

pub fn parse_short_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Lenient session-number read: anything that is not a non-negative integer is unset.
pub fn parse_session_number(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}
