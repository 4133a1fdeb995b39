mod audio;
mod cli;
mod commands;
mod env_loader;
mod error;
mod journal;

use crate::error::JournalError;

fn main() {
    env_loader::load_dotenv();

    if let Err(err) = cli::run() {
        match err.downcast_ref::<JournalError>() {
            Some(journal_err) => eprintln!("error[{}]: {err:#}", journal_err.code()),
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}
