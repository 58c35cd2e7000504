//! annot - annotation session CLI

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use annot::cli::{Cli, Commands, ConfigCommands, SessionCommands};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract { file, summary } => commands::extract::handle_extract(&file, summary),
        Commands::Sanitize { file } => commands::extract::handle_sanitize(&file),
        Commands::Session(command) => match command {
            SessionCommands::Start {
                dir,
                task_id,
                base_commit,
                model,
                pair_with,
            } => commands::session::handle_start(
                &dir,
                &task_id,
                &base_commit,
                model.as_deref(),
                pair_with.as_deref(),
            ),
            SessionCommands::Attach { dir, force } => commands::session::handle_attach(&dir, force),
            SessionCommands::Finish {
                dir,
                code_changes,
                cost,
            } => commands::session::handle_finish(&dir, code_changes, cost),
            SessionCommands::Show { dir } => commands::session::handle_show(&dir),
        },
        Commands::Config(command) => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
        },
        Commands::Completions { shell } => {
            commands::completions::handle_completions(shell);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
