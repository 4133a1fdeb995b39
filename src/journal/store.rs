use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::JournalError;
use crate::journal::clock::Clock;
use crate::journal::codec;
use crate::journal::filename::{ARCHON_SUFFIX, resolve_session_path};
use crate::journal::session::Session;
use crate::journal::warn::{self, WarnEvent};

fn file_suffix(name: &str) -> String {
    match name.find('.') {
        Some(idx) => name[idx..].to_string(),
        None => "(none)".to_string(),
    }
}

/// Rejects anything that is not `<stem>.archon.json` before it is opened.
pub fn ensure_archon_suffix(path: &Path) -> Result<(), JournalError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if name.len() > ARCHON_SUFFIX.len() && name.ends_with(ARCHON_SUFFIX) {
        return Ok(());
    }
    Err(JournalError::InvalidFileSuffix {
        path: path.to_path_buf(),
        suffix: file_suffix(&name),
    })
}

pub fn load(path: &Path, clock: &dyn Clock) -> Result<Session> {
    ensure_archon_suffix(path)?;
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let decoded = codec::decode(&raw, clock.today())
        .with_context(|| format!("failed to load session {}", path.display()))?;

    let path_label = path.display().to_string();
    for reason in &decoded.warnings {
        warn::emit(WarnEvent {
            code: "DATE_FALLBACK",
            stage: "load",
            path: &path_label,
            reason,
        });
    }

    let mut session = decoded.session;
    session.set_source_path(path);
    Ok(session)
}

/// Where a save lands: the file the session was loaded from, otherwise a
/// fresh name in `sessions_dir`.
pub fn save_target(session: &Session, sessions_dir: &Path) -> PathBuf {
    match session.source_path() {
        Some(path) => path.to_path_buf(),
        None => resolve_session_path(sessions_dir, &session.title, session.date),
    }
}

/// Rewrites the whole document through a temp file in the same directory.
pub fn save(session: &Session, target: &Path) -> Result<()> {
    let raw = codec::encode(session)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(raw.as_bytes())?;
    tmp.flush()?;
    // Dropping the returned handle removes the temp file on failure.
    tmp.persist(target)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(())
}
