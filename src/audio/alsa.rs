use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::audio::{Player, Recorder};

/// ALSA capture through `arecord`, one child process per recording.
#[derive(Debug)]
pub struct ArecordRecorder {
    bin: PathBuf,
    max_secs: u64,
    format: String,
    active: Option<Child>,
}

impl ArecordRecorder {
    pub fn new(bin: PathBuf, max_secs: u64, format: &str) -> Self {
        Self {
            bin,
            max_secs,
            format: format.to_string(),
            active: None,
        }
    }
}

fn lists_capture_card(stdout: &str) -> bool {
    stdout
        .lines()
        .any(|line| line.trim_start().starts_with("card "))
}

impl Recorder for ArecordRecorder {
    fn can_record(&mut self) -> bool {
        let Ok(out) = Command::new(&self.bin).arg("-l").output() else {
            return false;
        };
        out.status.success() && lists_capture_card(&String::from_utf8_lossy(&out.stdout))
    }

    fn start(&mut self, path: &Path) -> Result<()> {
        if self.active.is_some() {
            anyhow::bail!("a recording is already in progress");
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let child = Command::new(&self.bin)
            .arg(format!("--duration={}", self.max_secs))
            .arg(format!("--format={}", self.format))
            .arg("--quiet")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run `{}`", self.bin.display()))?;
        self.active = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.active.take() else {
            anyhow::bail!("no recording in progress");
        };
        // arecord may already have exited at --duration.
        if child.try_wait()?.is_none() {
            let _ = child.kill();
        }
        child.wait().context("failed to reap arecord")?;
        Ok(())
    }
}

impl Drop for ArecordRecorder {
    fn drop(&mut self) {
        if let Some(mut child) = self.active.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[derive(Debug)]
pub struct AplayPlayer {
    bin: PathBuf,
}

impl AplayPlayer {
    pub fn new(bin: PathBuf) -> Self {
        Self { bin }
    }
}

impl Player for AplayPlayer {
    fn play(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            anyhow::bail!("recording not found: {}", path.display());
        }
        let status = Command::new(&self.bin)
            .arg("-q")
            .arg(path)
            .status()
            .with_context(|| format!("failed to run `{}`", self.bin.display()))?;
        if !status.success() {
            anyhow::bail!("`{} -q {}` exited with {status}", self.bin.display(), path.display());
        }
        Ok(())
    }
}
