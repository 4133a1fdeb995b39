use crate::journal::paths::ArchonPaths;
use crate::journal::util::now_epoch_secs;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub at_epoch_secs: u64,
    pub phase: String,
    pub status: String,
    pub message: String,
}

pub fn audit_log_path(paths: &ArchonPaths) -> PathBuf {
    paths.logs_dir.join("audit.log")
}

pub fn append_event(paths: &ArchonPaths, phase: &str, status: &str, message: &str) -> Result<()> {
    fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("failed to create {}", paths.logs_dir.display()))?;
    let event = AuditEvent {
        at_epoch_secs: now_epoch_secs()?,
        phase: phase.to_string(),
        status: status.to_string(),
        message: message.to_string(),
    };

    let line = format!("{}\n", serde_json::to_string(&event)?);
    let path = audit_log_path(paths);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Audit failures are reported but never interrupt the session.
pub fn record(paths: &ArchonPaths, phase: &str, status: &str, message: &str) {
    if let Err(err) = append_event(paths, phase, status, message) {
        crate::journal::warn::emit(crate::journal::warn::WarnEvent {
            code: "AUDIT_WRITE_FAILED",
            stage: phase,
            path: &audit_log_path(paths).display().to_string(),
            reason: &format!("{err:#}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn events_append_as_json_lines() {
        let tmp = tempdir().expect("tempdir");
        let paths = ArchonPaths {
            archon_home: tmp.path().to_path_buf(),
            sessions_dir: tmp.path().to_path_buf(),
            recordings_dir: tmp.path().join("recs"),
            logs_dir: tmp.path().join("logs"),
        };

        append_event(&paths, "save", "ok", "first").expect("first");
        append_event(&paths, "discard", "ok", "second").expect("second");

        let raw = fs::read_to_string(audit_log_path(&paths)).expect("read");
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["phase"], "save");
        assert_eq!(lines[1]["message"], "second");
    }
}
