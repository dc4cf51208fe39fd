//! `--wait` support for operations answered with 202 and a task handle.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use fmeflow_api_types::model::{RequestStatus, TaskState};
use serde_json::Value;
use tracing::debug;

use crate::api::Selected;
use crate::client::{Call, Ctx};
use crate::error::CliError;

/// Call `fetch` every `interval` until `in_progress` turns false.
///
/// Polls never overlap. A dot is written per in-progress poll when
/// `progress` is set, and the line is closed once the task settles.
pub async fn wait_until<T, F, Fut>(
    interval: Duration,
    progress: bool,
    out: &mut dyn Write,
    mut fetch: F,
    in_progress: impl Fn(&T) -> bool,
) -> Result<T, CliError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CliError>>,
{
    let mut polls = 0u32;
    loop {
        let current = fetch().await?;
        polls += 1;
        if !in_progress(&current) {
            debug!(polls, "task settled");
            if progress && polls > 1 {
                writeln!(out)?;
            }
            return Ok(current);
        }
        if progress {
            write!(out, ".")?;
            out.flush()?;
        }
        tokio::time::sleep(interval).await;
    }
}

/// Poll a status endpoint built by `call` until it leaves the running state.
pub async fn poll_status(
    ctx: &Ctx,
    out: &mut dyn Write,
    selected: Selected<'_, RequestStatus>,
    call: impl Fn() -> Call,
) -> Result<(Value, RequestStatus), CliError> {
    wait_until(
        ctx.poll_interval,
        !ctx.json,
        out,
        || ctx.fetch(selected, call()),
        |(_, status): &(Value, RequestStatus)| status.state.in_progress(),
    )
    .await
}

/// A settled status that is not a success.
pub fn ensure_succeeded(status: &RequestStatus) -> Result<(), CliError> {
    match status.state {
        TaskState::Succeeded => Ok(()),
        _ => Err(CliError::task_failed(status.summary())),
    }
}
