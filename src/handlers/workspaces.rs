use std::io::Write;

use crate::api::{ApiVersion, catalog};
use crate::args::WorkspacesArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;

use super::{emit, list_page, single_page};

pub async fn handle(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: WorkspacesArgs,
) -> Result<(), CliError> {
    let call = Call::new().param("repository", &args.repository);
    let page = match &args.name {
        Some(name) => {
            single_page(ctx, &catalog::WORKSPACE, call.param("workspace", name)).await?
        }
        None => {
            // The v3 item listing also returns custom formats and transformers.
            let call = match ctx.route(&catalog::WORKSPACES)?.version {
                ApiVersion::V3 => call.query("type", "WORKSPACE"),
                ApiVersion::V4 => call,
            };
            list_page(ctx, &catalog::WORKSPACES, call).await?
        }
    };
    emit(ctx, out, &page, &args.output)
}
