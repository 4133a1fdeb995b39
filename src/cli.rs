use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::view::{self, ViewOptions};
use crate::commands::write::{self, WriteNewOptions};
use crate::commands::CommandReport;

#[derive(Parser, Debug)]
#[command(name = "archon", version)]
#[command(about = "Timestamped session journal for tabletop roleplay", long_about = None)]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take notes in a session of roleplay
    Write(WriteArgs),
    /// List the entries of a saved session
    View {
        /// The .archon.json file to view
        file: PathBuf,
        /// Play the recording at this entry number
        #[arg(long)]
        play: Option<usize>,
    },
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true)]
struct WriteArgs {
    #[command(subcommand)]
    action: Option<WriteAction>,
    /// The .archon.json file to resume
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum WriteAction {
    /// Start taking notes for a new session
    New {
        /// The title for this session
        #[arg(long)]
        title: Option<String>,
        /// The number for this session
        #[arg(long)]
        session: Option<u32>,
    },
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for detail in &report.details {
        println!("{detail}");
    }
    for issue in &report.issues {
        eprintln!("issue: {issue}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Write(args) => match (args.action, args.file) {
            (Some(WriteAction::New { title, session }), _) => {
                write::run_new(&WriteNewOptions { title, session })?
            }
            (None, Some(file)) => write::run_resume(&file)?,
            (None, None) => anyhow::bail!("write needs a session file or `new`"),
        },
        Command::View { file, play } => view::run(&ViewOptions { path: file, play })?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!(
            "{} finished with {} issue(s)",
            report.command,
            report.issues.len()
        );
    }
    Ok(())
}
