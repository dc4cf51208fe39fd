//! One module per top-level command. Every handler takes the request
//! context, the stdout sink and its parsed arguments.

pub mod backup;
pub mod cancel;
pub mod connections;
pub mod deployment_parameters;
pub mod engines;
pub mod healthcheck;
pub mod info;
pub mod jobs;
pub mod license;
pub mod login;
pub mod migration;
pub mod projects;
pub mod repositories;
pub mod restore;
pub mod run;
pub mod version;
pub mod workspaces;

use std::io::Write;

use fmeflow_api_types::model::RequestStatus;
use fmeflow_api_types::{Listing, TaskHandle};
use serde_json::json;

use crate::api::{Operation, Selected};
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::output::{OutputArgs, Page, Tabular, print_json, render};
use crate::tasks::{ensure_succeeded, poll_status};

/// GET a list envelope.
pub(crate) async fn list_page<T>(
    ctx: &Ctx,
    operation: &Operation<Listing<T>>,
    call: Call,
) -> Result<Page<T>, CliError> {
    let selected = ctx.route(operation)?;
    let (raw, listing) = ctx.fetch(selected, call).await?;
    Ok(Page::list(raw, listing))
}

/// GET a singleton.
pub(crate) async fn single_page<T>(
    ctx: &Ctx,
    operation: &Operation<Listing<T>>,
    call: Call,
) -> Result<Page<T>, CliError> {
    let selected = ctx.route(operation)?;
    let (raw, listing) = ctx.fetch(selected, call).await?;
    Ok(Page::single(raw, listing))
}

pub(crate) fn emit<T: Tabular>(
    ctx: &Ctx,
    out: &mut dyn Write,
    page: &Page<T>,
    output: &OutputArgs,
) -> Result<(), CliError> {
    render(out, page, &output.resolve(ctx.json), output.no_headers)
}

/// A human confirmation line, or `{"message": ...}` under `--json`.
pub(crate) fn announce(ctx: &Ctx, out: &mut dyn Write, message: &str) -> Result<(), CliError> {
    if ctx.json {
        return print_json(out, &json!({ "message": message }));
    }
    writeln!(out, "{message}")?;
    Ok(())
}

/// Report the handle of a submitted task.
pub(crate) fn announce_task(
    ctx: &Ctx,
    out: &mut dyn Write,
    what: &str,
    handle: TaskHandle,
) -> Result<(), CliError> {
    if ctx.json {
        return print_json(out, &json!({ "id": handle.id }));
    }
    writeln!(out, "{what} task submitted with id: {}", handle.id)?;
    Ok(())
}

/// A submitted server task and how to follow it.
pub(crate) struct FollowTask<'a> {
    pub what: &'a str,
    pub handle: TaskHandle,
    pub wait: bool,
    pub status: Selected<'a, RequestStatus>,
    /// Printed once the task succeeds.
    pub done: &'a str,
}

/// Report the task id and, with `--wait`, poll it to completion.
///
/// Under `--json` only one document is printed: the handle without
/// `--wait`, the final status with it.
pub(crate) async fn follow_task(
    ctx: &Ctx,
    out: &mut dyn Write,
    task: FollowTask<'_>,
) -> Result<(), CliError> {
    if !task.wait || !ctx.json {
        announce_task(ctx, out, task.what, task.handle)?;
    }
    if !task.wait {
        return Ok(());
    }
    let id = task.handle.id;
    let (raw, status) = poll_status(ctx, out, task.status, || Call::new().param("id", id)).await?;
    if ctx.json {
        print_json(out, &raw)?;
    }
    ensure_succeeded(&status)?;
    if !ctx.json {
        writeln!(out, "{}", task.done)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
