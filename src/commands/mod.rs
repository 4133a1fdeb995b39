pub mod view;
pub mod write;

use anyhow::Result;
use serde::Serialize;

use crate::journal::clock::SystemClock;
use crate::journal::config::{ArchonConfig, load_config};
use crate::journal::paths::{ArchonPaths, resolve_paths};

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

/// Resolved paths, config and clock shared by every command.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub paths: ArchonPaths,
    pub config: ArchonConfig,
    pub clock: SystemClock,
}

pub fn load_runtime() -> Result<Runtime> {
    let paths = resolve_paths()?;
    let config = load_config(&paths)?;
    let clock = SystemClock::new(config.timezone()?);
    Ok(Runtime {
        paths,
        config,
        clock,
    })
}
