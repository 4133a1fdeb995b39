use chrono::{Datelike, NaiveDateTime, Timelike};
use std::path::PathBuf;

use crate::audio::Recorder;
use crate::journal::clock::Clock;
use crate::journal::entry::Entry;
use crate::journal::filename::session_stem;
use crate::journal::messages;
use crate::journal::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Save,
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Notice(String),
    Warn(String),
    Terminate(Termination),
}

/// Routes each line of a live session and owns its entry log.
pub struct Dispatcher {
    session: Session,
    clock: Box<dyn Clock>,
    recorder: Box<dyn Recorder>,
    recordings_dir: PathBuf,
    recording: Option<PathBuf>,
    warned_before_force_exit: bool,
}

fn recording_file_name(stem: &str, at: NaiveDateTime) -> String {
    format!(
        "{stem}_{:04}{:02}{:02}_{:02}{:02}{:02}.wav",
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

impl Dispatcher {
    pub fn new(
        session: Session,
        clock: Box<dyn Clock>,
        recorder: Box<dyn Recorder>,
        recordings_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session,
            clock,
            recorder,
            recordings_dir: recordings_dir.into(),
            recording: None,
            warned_before_force_exit: false,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    pub fn dispatch(&mut self, line: &str) -> Outcome {
        match line {
            "exit" | "e" | "quit" | "q" => Outcome::Terminate(Termination::Save),
            "exit!" | "e!" | "quit!" | "q!" => self.force_exit(line),
            "tr" => {
                self.warned_before_force_exit = false;
                self.toggle_recording()
            }
            note => {
                self.warned_before_force_exit = false;
                let entry = Entry::note(note, self.clock.timestamp());
                self.session.push(entry);
                Outcome::Continue
            }
        }
    }

    fn force_exit(&mut self, command: &str) -> Outcome {
        if self.warned_before_force_exit {
            return Outcome::Terminate(Termination::Discard);
        }
        self.warned_before_force_exit = true;
        Outcome::Warn(messages::force_exit_warning(command))
    }

    fn toggle_recording(&mut self) -> Outcome {
        if self.recording.is_some() {
            return match self.stop_recording() {
                Ok(()) => Outcome::Notice(messages::RECORDING_STOPPED.to_string()),
                Err(err) => Outcome::Warn(format!("failed to stop recording: {err:#}")),
            };
        }

        if !self.recorder.can_record() {
            return Outcome::Notice(messages::RECORDING_UNAVAILABLE.to_string());
        }

        let now = self.clock.now();
        let stem = session_stem(&self.session.title, self.session.date);
        let path = self.recordings_dir.join(recording_file_name(&stem, now));
        if let Err(err) = self.recorder.start(&path) {
            return Outcome::Warn(format!("failed to start recording: {err:#}"));
        }

        // Appended as soon as capture starts, before the file is complete.
        let label = path.display().to_string();
        self.session
            .push(Entry::recording(label.clone(), self.clock.timestamp()));
        self.recording = Some(path);
        Outcome::Notice(messages::recording_started(&label))
    }

    fn stop_recording(&mut self) -> anyhow::Result<()> {
        self.recording = None;
        self.recorder.stop()
    }

    /// Stops any capture still running. Returns the path that was stopped.
    pub fn finish(&mut self) -> anyhow::Result<Option<PathBuf>> {
        let Some(path) = self.recording.clone() else {
            return Ok(None);
        };
        self.stop_recording()?;
        Ok(Some(path))
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::clock::FixedClock;
    use crate::journal::entry::EntryKind;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeRecorder {
        available: bool,
        fail_start: bool,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder for FakeRecorder {
        fn can_record(&mut self) -> bool {
            self.available
        }

        fn start(&mut self, path: &Path) -> Result<()> {
            if self.fail_start {
                anyhow::bail!("device busy");
            }
            self.calls
                .borrow_mut()
                .push(format!("start {}", path.display()));
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.calls.borrow_mut().push("stop".to_string());
            Ok(())
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2015, 4, 12)
                .and_then(|d| d.and_hms_opt(17, 33, 7))
                .expect("datetime"),
        )
    }

    fn dispatcher_with(recorder: FakeRecorder) -> Dispatcher {
        let session = Session::new("Wings. For Ginnungagap", 2, clock().today());
        Dispatcher::new(session, Box::new(clock()), Box::new(recorder), "/recs")
    }

    fn dispatcher() -> Dispatcher {
        dispatcher_with(FakeRecorder::default())
    }

    #[test]
    fn plain_lines_append_notes_in_order() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch("Lonqu looked for trouble"), Outcome::Continue);
        assert_eq!(d.dispatch(""), Outcome::Continue);
        assert_eq!(d.dispatch("Exit"), Outcome::Continue);

        let rendered: Vec<String> = d.session().entries().iter().map(Entry::render).collect();
        assert_eq!(
            rendered,
            vec![
                "[5:33 PM] Lonqu looked for trouble".to_string(),
                "[5:33 PM] ".to_string(),
                "[5:33 PM] Exit".to_string(),
            ]
        );
    }

    #[test]
    fn exit_commands_request_save() {
        for cmd in ["exit", "e", "quit", "q"] {
            let mut d = dispatcher();
            assert_eq!(d.dispatch(cmd), Outcome::Terminate(Termination::Save));
            assert!(d.session().entries().is_empty());
        }
    }

    #[test]
    fn force_exit_warns_once_then_discards() {
        for cmd in ["exit!", "e!", "quit!", "q!"] {
            let mut d = dispatcher();
            assert_eq!(
                d.dispatch(cmd),
                Outcome::Warn(messages::force_exit_warning(cmd))
            );
            assert_eq!(d.dispatch(cmd), Outcome::Terminate(Termination::Discard));
        }
    }

    #[test]
    fn a_note_resets_the_force_exit_warning() {
        let mut d = dispatcher();
        assert!(matches!(d.dispatch("q!"), Outcome::Warn(_)));
        assert_eq!(d.dispatch("one more thing"), Outcome::Continue);
        assert!(matches!(d.dispatch("q!"), Outcome::Warn(_)));
        assert_eq!(d.dispatch("e!"), Outcome::Terminate(Termination::Discard));
        assert_eq!(d.session().entries().len(), 1);
    }

    #[test]
    fn toggle_without_capture_device_appends_nothing() {
        let mut d = dispatcher();
        assert_eq!(
            d.dispatch("tr"),
            Outcome::Notice(messages::RECORDING_UNAVAILABLE.to_string())
        );
        assert!(!d.is_recording());
        assert!(d.session().entries().is_empty());
    }

    #[test]
    fn toggle_records_optimistically_and_stops() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut d = dispatcher_with(FakeRecorder {
            available: true,
            fail_start: false,
            calls: Rc::clone(&calls),
        });

        assert!(matches!(d.dispatch("tr"), Outcome::Notice(_)));
        assert!(d.is_recording());
        let entry = &d.session().entries()[0];
        assert_eq!(entry.kind(), EntryKind::Recording);
        assert_eq!(
            entry.data(),
            "/recs/wings_for_ginnungagap_20150412_173307.wav"
        );

        assert_eq!(
            d.dispatch("tr"),
            Outcome::Notice(messages::RECORDING_STOPPED.to_string())
        );
        assert!(!d.is_recording());
        assert_eq!(
            *calls.borrow(),
            vec![
                "start /recs/wings_for_ginnungagap_20150412_173307.wav".to_string(),
                "stop".to_string()
            ]
        );
    }

    #[test]
    fn failed_start_is_reported_without_entry() {
        let mut d = dispatcher_with(FakeRecorder {
            available: true,
            fail_start: true,
            calls: Rc::default(),
        });
        let Outcome::Warn(msg) = d.dispatch("tr") else {
            panic!("expected warning");
        };
        assert!(msg.contains("device busy"));
        assert!(d.session().entries().is_empty());
    }

    #[test]
    fn finish_stops_active_recording() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut d = dispatcher_with(FakeRecorder {
            available: true,
            fail_start: false,
            calls: Rc::clone(&calls),
        });
        d.dispatch("tr");
        let stopped = d.finish().expect("finish");
        assert!(stopped.is_some());
        assert_eq!(d.finish().expect("idle finish"), None);
        assert_eq!(calls.borrow().last().map(String::as_str), Some("stop"));
    }

    #[test]
    fn toggle_resets_force_exit_warning() {
        let mut d = dispatcher();
        assert!(matches!(d.dispatch("q!"), Outcome::Warn(_)));
        d.dispatch("tr");
        assert!(matches!(d.dispatch("q!"), Outcome::Warn(_)));
    }
}
