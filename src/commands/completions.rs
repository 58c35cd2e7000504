//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use annot::cli::Cli;

/// Print completions for `shell` to stdout.
pub fn handle_completions(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut std::io::stdout());
}
