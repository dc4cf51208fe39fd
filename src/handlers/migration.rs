use std::io::Write;
use std::path::Path;

use fmeflow_api_types::model::LogRecord;
use fmeflow_api_types::timestamp;
use tracing::debug;

use crate::api::{ApiVersion, catalog};
use crate::args::{MigrationArgs, MigrationCmd, MigrationTasksArgs};
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::io::write_file;
use crate::output::{Page, print_json};

use super::{announce, emit, list_page, single_page};

/// Records requested per page of a v4 log.
const LOG_PAGE_SIZE: usize = 1000;

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: MigrationArgs) -> Result<(), CliError> {
    match args.action {
        MigrationCmd::Tasks(args) => tasks(ctx, out, args).await,
    }
}

async fn tasks(ctx: &Ctx, out: &mut dyn Write, args: MigrationTasksArgs) -> Result<(), CliError> {
    match (args.id, args.log) {
        (Some(id), true) => log(ctx, out, id, args.file.as_deref()).await,
        (Some(id), false) => {
            let page = single_page(ctx, &catalog::MIGRATION_TASK, Call::new().param("id", id)).await?;
            emit(ctx, out, &page, &args.output)
        }
        (None, _) => {
            let page = list_page(ctx, &catalog::MIGRATION_TASKS, Call::new()).await?;
            emit(ctx, out, &page, &args.output)
        }
    }
}

async fn log(ctx: &Ctx, out: &mut dyn Write, id: i64, file: Option<&Path>) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::MIGRATION_LOG)?;
    let bytes = match selected.version {
        ApiVersion::V3 => ctx.send(selected, Call::new().param("id", id)).await?.body,
        ApiVersion::V4 => {
            let page = log_pages(ctx, id).await?;
            if ctx.json && file.is_none() {
                return print_json(out, &page.raw);
            }
            page.listing
                .items
                .iter()
                .map(log_line)
                .collect::<String>()
                .into_bytes()
        }
    };

    match file {
        Some(path) => {
            write_file(path, &bytes).await?;
            announce(
                ctx,
                out,
                &format!("Migration task log written to {}", path.display()),
            )
        }
        None => {
            out.write_all(&bytes)?;
            if bytes.last().is_some_and(|b| *b != b'\n') {
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

/// Read every page of a v4 log into one listing.
async fn log_pages(ctx: &Ctx, id: i64) -> Result<Page<LogRecord>, CliError> {
    let selected = ctx.route(&catalog::MIGRATION_LOG)?;
    let mut merged: Option<Page<LogRecord>> = None;
    let mut offset = 0usize;
    loop {
        let call = Call::new()
            .param("id", id)
            .query("offset", offset)
            .query("limit", LOG_PAGE_SIZE);
        let (raw, listing) = ctx.fetch(selected, call).await?;
        let fetched = listing.len();
        let total = listing.total_count;
        debug!(offset, fetched, ?total, "log page read");

        let page = Page::list(raw, listing);
        merged = Some(match merged.take() {
            Some(mut all) => {
                all.extend(page);
                all
            }
            None => page,
        });
        offset += fetched;
        let done = match total {
            Some(total) => fetched == 0 || offset as u64 >= total,
            None => fetched < LOG_PAGE_SIZE,
        };
        if done {
            break;
        }
    }
    merged.ok_or_else(|| CliError::task_failed("server returned no log"))
}

fn log_line(record: &LogRecord) -> String {
    format!(
        "{} | {} | {}\n",
        timestamp::display(record.time),
        record.level.as_deref().unwrap_or_default(),
        record.message
    )
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn log_lines_are_pipe_separated() {
        let record = LogRecord {
            time: Some(datetime!(2025-03-04 05:06:07 UTC)),
            level: Some("INFO".into()),
            message: "Restore started".into(),
        };
        assert_eq!(
            log_line(&record),
            "2025-03-04T05:06:07Z | INFO | Restore started\n"
        );
        let bare = LogRecord {
            time: None,
            level: None,
            message: "no context".into(),
        };
        assert_eq!(log_line(&bare), " |  | no context\n");
    }
}
