use std::io::Write;

use tracing::info;

use crate::api::{ApiVersion, catalog};
use crate::args::CancelArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;

use super::announce;

const NOT_FOUND: &str = "job not found";
const ALREADY_COMPLETE: &str = "job already complete";

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: CancelArgs) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::JOB_CANCEL)?;
    let result = ctx
        .send(selected, Call::new().param("id", args.id))
        .await
        .map_err(|err| {
            let err = err
                .reword_on(404, NOT_FOUND)
                .reword_on(422, ALREADY_COMPLETE);
            match selected.version {
                ApiVersion::V4 => err.reword_on(409, ALREADY_COMPLETE),
                ApiVersion::V3 => err,
            }
        });
    result?;
    info!(job = args.id, "job cancelled");
    announce(
        ctx,
        out,
        &format!("Success. The job with id {} was cancelled.", args.id),
    )
}
