use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::JournalError;

/// A point in local wall-clock time, displayed as `[H:MM AM|PM]`.
///
/// The display form carries only the time of day, so parsing restores the
/// hour and minute onto the caller's "today" with seconds zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    instant: NaiveDateTime,
}

impl Timestamp {
    pub fn at(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    #[cfg(test)]
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    pub fn parse(display: &str, today: NaiveDate) -> Result<Self, JournalError> {
        let inner = display
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| JournalError::timestamp(display, "expected enclosing brackets"))?;

        let Some((clock, meridiem)) = inner.split_once(' ') else {
            return Err(JournalError::timestamp(display, "missing AM/PM marker"));
        };
        let Some((hour_raw, minute_raw)) = clock.split_once(':') else {
            return Err(JournalError::timestamp(display, "missing `:` separator"));
        };

        let hour = hour_raw
            .parse::<u32>()
            .map_err(|err| JournalError::timestamp(display, format!("hour: {err}")))?;
        let minute = minute_raw
            .parse::<u32>()
            .map_err(|err| JournalError::timestamp(display, format!("minute: {err}")))?;
        if !(1..=12).contains(&hour) {
            return Err(JournalError::timestamp(display, "hour must be 1-12"));
        }

        let hour24 = match (meridiem, hour) {
            ("AM", 12) => 0,
            ("AM", h) => h,
            ("PM", 12) => 12,
            ("PM", h) => h + 12,
            (other, _) => {
                return Err(JournalError::timestamp(
                    display,
                    format!("unknown meridiem `{other}`"),
                ));
            }
        };

        let time = NaiveTime::from_hms_opt(hour24, minute, 0)
            .ok_or_else(|| JournalError::timestamp(display, "minute must be 0-59"))?;
        Ok(Self::at(today.and_time(time)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (is_pm, hour12) = self.instant.hour12();
        let meridiem = if is_pm { "PM" } else { "AM" };
        write!(f, "[{}:{:02} {}]", hour12, self.instant.minute(), meridiem)
    }
}
