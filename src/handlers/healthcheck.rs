use std::io::Write;

use crate::api::{ApiVersion, catalog};
use crate::args::HealthcheckArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;

use super::{emit, single_page};

/// A status outside 200 surfaces as an error, so an unhealthy server exits 1.
pub async fn handle(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: HealthcheckArgs,
) -> Result<(), CliError> {
    let call = match ctx.route(&catalog::HEALTHCHECK)?.version {
        ApiVersion::V3 => Call::new().query("ready", args.ready),
        ApiVersion::V4 => {
            Call::new().param("probe", if args.ready { "readiness" } else { "liveness" })
        }
    };
    let page = single_page(ctx, &catalog::HEALTHCHECK, call).await?;
    emit(ctx, out, &page, &args.output)
}
