use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ArchonPaths {
    pub archon_home: PathBuf,
    pub sessions_dir: PathBuf,
    pub recordings_dir: PathBuf,
    pub logs_dir: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<ArchonPaths> {
    let home = required_home_dir()?;
    let archon_home = env_or_default_path("ARCHON_HOME", home.join(".archon"));

    let sessions_dir = env_or_default_path("ARCHON_SESSIONS_DIR", env::current_dir()?);
    let data_dir = dirs::data_local_dir().unwrap_or_else(|| archon_home.clone());
    let recordings_dir =
        env_or_default_path("ARCHON_RECORDINGS_DIR", data_dir.join("ArchonRecordings"));
    let logs_dir = env_or_default_path("ARCHON_LOGS_DIR", archon_home.join("logs"));

    Ok(ArchonPaths {
        archon_home,
        sessions_dir,
        recordings_dir,
        logs_dir,
    })
}
