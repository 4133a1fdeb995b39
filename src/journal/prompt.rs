use anyhow::Result;
use std::io::{BufRead, Write};

use crate::error::JournalError;
use crate::journal::messages;

/// Reads one line without its terminator. `None` at end of input.
///
/// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
pub fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn require_line(input: &mut impl BufRead) -> Result<String> {
    read_line(input)?.ok_or_else(|| JournalError::InputClosed.into())
}

fn parses_as_int(raw: &str) -> bool {
    raw.trim().parse::<i32>().is_ok()
}

fn valid_session_number(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<i32>().ok()?;
    u32::try_from(value).ok()
}

/// Asks for a session title.
///
/// A title that reads as a number is confirmed first, since it is easily
/// confused with the session number prompt. Declining restarts the prompt.
pub fn prompt_session_title(input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    loop {
        writeln!(out, "{}", messages::SESSION_TITLE_PROMPT)?;
        out.flush()?;
        let title = require_line(input)?;
        if !parses_as_int(&title) {
            return Ok(title);
        }

        writeln!(out, "{}", messages::SESSION_TITLE_INT_INPUT)?;
        out.flush()?;
        let answer = require_line(input)?;
        if answer.eq_ignore_ascii_case("y") {
            return Ok(title);
        }
    }
}

/// Asks for a session number. A blank line leaves it unset (`0`).
pub fn prompt_session_number(input: &mut impl BufRead, out: &mut impl Write) -> Result<u32> {
    writeln!(out, "{}", messages::SESSION_NUMBER_PROMPT)?;
    out.flush()?;
    loop {
        let raw = require_line(input)?;
        if raw.is_empty() {
            return Ok(0);
        }
        if let Some(number) = valid_session_number(&raw) {
            return Ok(number);
        }
        writeln!(out, "{}", messages::SESSION_NUMBER_INVALID_INPUT)?;
        out.flush()?;
    }
}
