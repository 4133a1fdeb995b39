use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::audio::{Player, player_from_config};
use crate::commands::{CommandReport, load_runtime};
use crate::journal::entry::EntryKind;
use crate::journal::session::{Session, format_short_date};
use crate::journal::store;

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub path: PathBuf,
    /// 1-based entry index of a recording to play after listing.
    pub play: Option<usize>,
}

pub fn render_listing(session: &Session) -> Vec<String> {
    let mut lines = Vec::with_capacity(session.entries().len() + 1);
    lines.push(format!(
        "{}\t{}\t{}",
        session.title,
        session.number_label(),
        format_short_date(session.date)
    ));
    for (idx, entry) in session.entries().iter().enumerate() {
        lines.push(format!("{:>3}  {}", idx + 1, entry.render()));
    }
    lines
}

fn play_entry(
    session: &Session,
    index: usize,
    player: &dyn Player,
    report: &mut CommandReport,
) -> Result<()> {
    let Some(entry) = index.checked_sub(1).and_then(|i| session.entries().get(i)) else {
        report.issue(format!("no entry #{index} in this session"));
        return Ok(());
    };
    if entry.kind() != EntryKind::Recording {
        report.issue(format!("entry #{index} is a note, not a recording"));
        return Ok(());
    }
    match player.play(Path::new(entry.data())) {
        Ok(()) => report.detail(format!("played={}", entry.data())),
        Err(err) => report.issue(format!("playback failed: {err:#}")),
    }
    Ok(())
}

pub fn run(opts: &ViewOptions) -> Result<CommandReport> {
    let rt = load_runtime()?;
    let session = store::load(&opts.path, &rt.clock)?;
    let mut report = CommandReport::new("view");

    for line in render_listing(&session) {
        println!("{line}");
    }

    if let Some(index) = opts.play {
        match player_from_config(&rt.config.recording) {
            Ok(player) => play_entry(&session, index, player.as_ref(), &mut report)?,
            Err(err) => report.issue(format!("{err:#}")),
        }
    }

    Ok(report)
}
