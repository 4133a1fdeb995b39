use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::audio::recorder_from_config;
use crate::commands::{CommandReport, Runtime, load_runtime};
use crate::journal::audit;
use crate::journal::clock::Clock;
use crate::journal::dispatcher::{Dispatcher, Outcome, Termination};
use crate::journal::messages;
use crate::journal::paths::ArchonPaths;
use crate::journal::prompt::{prompt_session_number, prompt_session_title, read_line};
use crate::journal::session::Session;
use crate::journal::store;

#[derive(Debug, Clone, Default)]
pub struct WriteNewOptions {
    pub title: Option<String>,
    pub session: Option<u32>,
}

fn dispatcher_for(rt: &Runtime, session: Session) -> Dispatcher {
    Dispatcher::new(
        session,
        Box::new(rt.clock),
        recorder_from_config(&rt.config.recording),
        rt.paths.recordings_dir.clone(),
    )
}

/// `write <file>`: resume an existing session.
pub fn run_resume(path: &Path) -> Result<CommandReport> {
    let rt = load_runtime()?;
    let session = store::load(path, &rt.clock)?;
    audit::record(&rt.paths, "load", "ok", &path.display().to_string());

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let dispatcher = dispatcher_for(&rt, session);
    run_session(&rt.paths, dispatcher, &mut input, &mut out, "write")
}

/// `write new`: prompt for whatever metadata was not passed as flags.
pub fn run_new(opts: &WriteNewOptions) -> Result<CommandReport> {
    let rt = load_runtime()?;
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    let title = match &opts.title {
        Some(title) => title.clone(),
        None => {
            let title = prompt_session_title(&mut input, &mut out)?;
            writeln!(out)?;
            title
        }
    };
    let number = match opts.session {
        Some(number) => number,
        None => prompt_session_number(&mut input, &mut out)?,
    };

    let session = Session::new(title, number, rt.clock.today());
    let dispatcher = dispatcher_for(&rt, session);
    run_session(&rt.paths, dispatcher, &mut input, &mut out, "write-new")
}

/// Command loop: one line per iteration until an exit command or end of input.
pub fn run_session(
    paths: &ArchonPaths,
    mut dispatcher: Dispatcher,
    input: &mut impl BufRead,
    out: &mut impl Write,
    command: &str,
) -> Result<CommandReport> {
    let mut input_error = None;
    let termination = loop {
        write!(out, "{}", messages::COMMAND_PROMPT)?;
        out.flush()?;
        let line = match read_line(input) {
            Ok(Some(line)) => line,
            Ok(None) => {
                writeln!(out)?;
                break Termination::Save;
            }
            Err(err) => {
                // Keep what was written so far; the read error is reported after saving.
                input_error = Some(err);
                break Termination::Save;
            }
        };
        match dispatcher.dispatch(&line) {
            Outcome::Continue => {}
            Outcome::Notice(text) => writeln!(out, "{text}")?,
            Outcome::Warn(text) => writeln!(out, "warning: {text}")?,
            Outcome::Terminate(termination) => break termination,
        }
    };

    let mut report = CommandReport::new(command);
    match dispatcher.finish() {
        Ok(Some(path)) => {
            audit::record(paths, "record", "stopped", &path.display().to_string());
            report.detail(format!("recording_stopped={}", path.display()));
        }
        Ok(None) => {}
        Err(err) => report.detail(format!("recording stop failed: {err:#}")),
    }

    let session = dispatcher.into_session();
    report.detail(format!("entries={}", session.entries().len()));

    match termination {
        Termination::Save => {
            let target = store::save_target(&session, &paths.sessions_dir);
            store::save(&session, &target)?;
            audit::record(paths, "save", "ok", &target.display().to_string());
            report.detail(format!("saved={}", target.display()));
        }
        Termination::Discard => {
            audit::record(paths, "discard", "ok", &session.title);
            report.detail("exited without saving");
        }
    }

    if let Some(err) = input_error {
        report.issue(format!("input failed: {err:#}"));
    }

    Ok(report)
}
