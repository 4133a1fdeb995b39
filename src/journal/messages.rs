pub const SESSION_TITLE_PROMPT: &str = "Session title: ";
pub const SESSION_TITLE_INT_INPUT: &str =
    "You have input a number for the session title. Did you mean this? [y/n]";
pub const SESSION_NUMBER_PROMPT: &str = "Session number: ";
pub const SESSION_NUMBER_INVALID_INPUT: &str =
    "That is not a valid session number. Please input a number, or leave it blank:";
pub const RECORDING_STOPPED: &str = "Recording has stopped.";
pub const RECORDING_UNAVAILABLE: &str =
    "Recording is unavailable: no capture device or recorder was found.";
pub const COMMAND_PROMPT: &str = "> ";

pub fn force_exit_warning(exit_command: &str) -> String {
    format!("You are about to exit without saving. Enter {exit_command} again to confirm.")
}

pub fn recording_started(path: &str) -> String {
    format!("Recording to {path}. Enter tr again to stop.")
}
