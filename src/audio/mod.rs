pub mod alsa;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::journal::config::RecordingConfig;

/// Out-of-process audio capture, driven only by start/stop signals.
pub trait Recorder {
    fn can_record(&mut self) -> bool;
    fn start(&mut self, path: &Path) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

pub trait Player {
    fn play(&self, path: &Path) -> Result<()>;
}

/// Recorder used when capture is disabled or unsupported on this host.
#[derive(Debug, Default)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn can_record(&mut self) -> bool {
        false
    }

    fn start(&mut self, _path: &Path) -> Result<()> {
        anyhow::bail!("recording is not available on this host")
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn resolve_bin(configured: Option<&Path>, name: &str) -> Result<PathBuf> {
    if let Some(bin) = configured
        && bin.exists()
    {
        return Ok(bin.to_path_buf());
    }
    which::which(name).with_context(|| format!("{name} binary not found in config or PATH"))
}

pub fn recorder_from_config(cfg: &RecordingConfig) -> Box<dyn Recorder> {
    if !cfg.enabled || !cfg!(unix) {
        return Box::new(NullRecorder);
    }
    match resolve_bin(cfg.recorder_bin.as_deref(), "arecord") {
        Ok(bin) => Box::new(alsa::ArecordRecorder::new(bin, cfg.max_secs, &cfg.format)),
        Err(_) => Box::new(NullRecorder),
    }
}

pub fn player_from_config(cfg: &RecordingConfig) -> Result<Box<dyn Player>> {
    let bin = resolve_bin(cfg.player_bin.as_deref(), "aplay")?;
    Ok(Box::new(alsa::AplayPlayer::new(bin)))
}
