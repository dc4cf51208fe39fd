//! fmeflow: command-line administration client for FME Flow.
//!
//! Commands are parsed in [`args`], dispatched by [`run`] to one module per
//! command under [`handlers`], and routed to the v3 or v4 REST surface by
//! [`api`].

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod api;
pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod io;
pub mod output;
pub mod tasks;
pub mod telemetry;
pub mod util;

use std::io::Write;

use tracing::debug;

use args::{Cli, Commands};
use client::Ctx;
use error::CliError;
use handlers::{
    backup, cancel, connections, deployment_parameters, engines, healthcheck, info, jobs, license,
    login, migration, projects, repositories, restore, run as run_job, version, workspaces,
};

/// Execute a parsed command line, writing results to `out`.
///
/// `login`, `version` and `completion` work without a profile; every other
/// command loads it before touching the network.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let command = match cli.command {
        Commands::Version => return version::handle(out, cli.json),
        Commands::Completion { shell } => return version::completion(out, shell),
        Commands::Login(args) => {
            let path = config::resolve_from_env(cli.config.as_deref())?;
            return login::handle(&path, cli.json, cli.api_version, out, args).await;
        }
        other => other,
    };

    let path = config::resolve_from_env(cli.config.as_deref())?;
    let profile = config::load(&path)?;
    let ctx = Ctx::from_profile(&profile, cli.json)?.with_api_version(cli.api_version);
    debug!(url = %ctx.base, build = ?ctx.build, api = ?ctx.api_version, "profile ready");

    match command {
        Commands::Info(args) => info::handle(&ctx, out, args).await,
        Commands::Healthcheck(args) => healthcheck::handle(&ctx, out, args).await,
        Commands::Engines(args) => engines::handle(&ctx, out, args).await,
        Commands::Jobs(args) => jobs::handle(&ctx, out, args).await,
        Commands::Cancel(args) => cancel::handle(&ctx, out, args).await,
        Commands::Run(args) => run_job::handle(&ctx, out, args).await,
        Commands::Repositories(args) => repositories::handle(&ctx, out, args).await,
        Commands::Workspaces(args) => workspaces::handle(&ctx, out, args).await,
        Commands::Projects(args) => projects::handle(&ctx, out, args).await,
        Commands::DeploymentParameters(args) => {
            deployment_parameters::handle(&ctx, out, args).await
        }
        Commands::Connections(args) => connections::handle(&ctx, out, args).await,
        Commands::License(args) => license::handle(&ctx, out, args).await,
        Commands::Backup(args) => backup::handle(&ctx, out, args).await,
        Commands::Restore(args) => restore::handle(&ctx, out, args).await,
        Commands::Migration(args) => migration::handle(&ctx, out, args).await,
        Commands::Login(_) | Commands::Version | Commands::Completion { .. } => Ok(()),
    }
}
