use std::io::Write;

use serde_json::json;

use crate::api::catalog;
use crate::args::EnginesArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::output::print_json;

use super::{emit, list_page};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: EnginesArgs) -> Result<(), CliError> {
    let page = list_page(ctx, &catalog::ENGINES, Call::new()).await?;
    if args.count {
        let count = page
            .listing
            .total_count
            .unwrap_or(page.listing.len() as u64);
        if ctx.json {
            return print_json(out, &json!({ "count": count }));
        }
        writeln!(out, "{count}")?;
        return Ok(());
    }
    emit(ctx, out, &page, &args.output)
}
