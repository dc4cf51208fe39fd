#![deny(clippy::all, clippy::pedantic)]

use std::io::Write;
use std::process;

use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;
use fmeflow_cli::args::Cli;
use fmeflow_cli::error::CliError;
use fmeflow_cli::output::print_json;
use fmeflow_cli::telemetry::{self, LoggingSettings};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let logging = LoggingSettings::from_flags(&cli.log_level, cli.log_json);
    if let Err(err) = logging.and_then(telemetry::init) {
        eprintln!("Error: {err}");
        process::exit(1);
    }

    let json = cli.json;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = fmeflow_cli::run(cli, &mut out).await;
    let _ = out.flush();
    if let Err(err) = result {
        report(&err, json, &mut out);
        process::exit(1);
    }
}

/// Under `--json` the server's error document goes to stdout before the
/// message goes to stderr. Usage errors are followed by the usage line.
fn report(err: &CliError, json: bool, out: &mut dyn Write) {
    debug!(error = %err, status = ?err.status(), "command failed");
    if let Some(body) = err.body().filter(|_| json) {
        let _ = print_json(out, body);
        let _ = out.flush();
    }
    eprintln!("Error: {err}");
    if matches!(err, CliError::Usage(_)) {
        eprintln!("\n{}", Cli::command().render_usage());
    }
}
