use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::journal::paths::ArchonPaths;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClockConfig {
    /// IANA name such as `Europe/Berlin`; empty means host local time.
    #[serde(default)]
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    #[serde(default = "default_recording_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_secs")]
    pub max_secs: u64,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub recorder_bin: Option<PathBuf>,
    #[serde(default)]
    pub player_bin: Option<PathBuf>,
}

fn default_recording_enabled() -> bool {
    true
}

fn default_max_secs() -> u64 {
    3 * 60
}

fn default_format() -> String {
    "cd".to_string()
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            enabled: default_recording_enabled(),
            max_secs: default_max_secs(),
            format: default_format(),
            recorder_bin: None,
            player_bin: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArchonConfig {
    pub clock: ClockConfig,
    pub recording: RecordingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialArchonConfig {
    clock: Option<ClockConfig>,
    recording: Option<RecordingConfig>,
}

impl ArchonConfig {
    pub fn timezone(&self) -> Result<Option<Tz>> {
        let name = self.clock.timezone.trim();
        if name.is_empty() {
            return Ok(None);
        }
        name.parse::<Tz>()
            .map(Some)
            .map_err(|err| anyhow!("invalid clock timezone `{name}`: {err}"))
    }
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_bool(var: &str, fallback: bool) -> bool {
    match env::var(var) {
        Ok(v) => match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "on" => true,
            "0" | "false" | "FALSE" | "no" | "off" => false,
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_path(var: &str, fallback: Option<PathBuf>) -> Option<PathBuf> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => fallback,
    }
}

fn validate(cfg: &ArchonConfig) -> Result<()> {
    cfg.timezone()?;
    if cfg.recording.max_secs == 0 {
        return Err(anyhow!("invalid recording max_secs: must be >= 1"));
    }
    if cfg.recording.format.trim().is_empty() {
        return Err(anyhow!("invalid recording format: cannot be empty"));
    }
    Ok(())
}

fn resolve_config_path(paths: &ArchonPaths) -> PathBuf {
    if let Ok(custom) = env::var("ARCHON_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    paths.archon_home.join("archon.toml")
}

fn merge_toml(base: &mut ArchonConfig, raw: &str, origin: &str) -> Result<()> {
    let parsed: PartialArchonConfig = toml::from_str(raw)
        .map_err(|err| anyhow!("failed to parse archon config {origin}: {err}"))?;
    if let Some(clock) = parsed.clock {
        base.clock = clock;
    }
    if let Some(recording) = parsed.recording {
        base.recording = recording;
    }
    Ok(())
}

fn merge_file_config(base: &mut ArchonConfig, paths: &ArchonPaths) -> Result<()> {
    let path = resolve_config_path(paths);
    if !path.exists() {
        return Ok(());
    }
    let raw = fs::read_to_string(&path)?;
    merge_toml(base, &raw, &path.display().to_string())
}

pub fn load_config(paths: &ArchonPaths) -> Result<ArchonConfig> {
    let mut cfg = ArchonConfig::default();
    merge_file_config(&mut cfg, paths)?;

    cfg.clock.timezone = env_or_string("ARCHON_TIMEZONE", &cfg.clock.timezone);
    cfg.recording.enabled = env_or_bool("ARCHON_RECORDING_ENABLED", cfg.recording.enabled);
    cfg.recording.max_secs = env_or_u64("ARCHON_RECORDING_MAX_SECS", cfg.recording.max_secs);
    cfg.recording.format = env_or_string("ARCHON_RECORDING_FORMAT", &cfg.recording.format);
    cfg.recording.recorder_bin =
        env_or_path("ARCHON_ARECORD_BIN", cfg.recording.recorder_bin.take());
    cfg.recording.player_bin = env_or_path("ARCHON_APLAY_BIN", cfg.recording.player_bin.take());

    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ArchonConfig::default();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.recording.max_secs, 180);
        assert!(cfg.timezone().expect("tz").is_none());
    }

    #[test]
    fn toml_sections_replace_defaults() {
        let mut cfg = ArchonConfig::default();
        merge_toml(
            &mut cfg,
            "[clock]\ntimezone = \"Europe/Berlin\"\n\n[recording]\nenabled = false\nmax_secs = 60\n",
            "inline",
        )
        .expect("merge");
        assert_eq!(cfg.timezone().expect("tz"), Some(chrono_tz::Europe::Berlin));
        assert!(!cfg.recording.enabled);
        assert_eq!(cfg.recording.max_secs, 60);
        assert_eq!(cfg.recording.format, "cd");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = ArchonConfig::default();
        cfg.clock.timezone = "Mars/Olympus_Mons".to_string();
        assert!(validate(&cfg).is_err());

        let mut cfg = ArchonConfig::default();
        cfg.recording.max_secs = 0;
        assert!(validate(&cfg).is_err());

        let mut cfg = ArchonConfig::default();
        cfg.recording.format = "  ".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn malformed_toml_is_reported() {
        let mut cfg = ArchonConfig::default();
        let err = merge_toml(&mut cfg, "[recording\n", "broken.toml").expect_err("parse");
        assert!(err.to_string().contains("broken.toml"));
    }
}
