use std::io::Write;

use crate::api::catalog;
use crate::args::ReadArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;

use super::{emit, single_page};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: ReadArgs) -> Result<(), CliError> {
    let page = single_page(ctx, &catalog::INFO, Call::new()).await?;
    emit(ctx, out, &page, &args.output)
}
