use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;
use serde_json::json;

use crate::args::Cli;
use crate::error::CliError;
use crate::output::print_json;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn handle(out: &mut dyn Write, json: bool) -> Result<(), CliError> {
    if json {
        return print_json(out, &json!({ "version": VERSION }));
    }
    writeln!(out, "fmeflow version {VERSION}")?;
    Ok(())
}

pub fn completion(out: &mut dyn Write, shell: Shell) -> Result<(), CliError> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
    Ok(())
}
