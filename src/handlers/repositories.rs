use std::io::Write;

use fmeflow_api_types::v4;

use crate::api::{ApiVersion, catalog};
use crate::args::{RepositoriesArgs, RepositoriesCmd};
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::io::confirm;

use super::{announce, emit, list_page, single_page};

pub async fn handle(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: RepositoriesArgs,
) -> Result<(), CliError> {
    match args.action {
        Some(RepositoriesCmd::Create { name, description }) => {
            create(ctx, out, name, description).await
        }
        Some(RepositoriesCmd::Delete { name, no_prompt }) => {
            delete(ctx, out, &name, no_prompt).await
        }
        None => {
            let page = match &args.name {
                Some(name) => {
                    single_page(
                        ctx,
                        &catalog::REPOSITORY,
                        Call::new().param("repository", name),
                    )
                    .await?
                }
                None => list_page(ctx, &catalog::REPOSITORIES, Call::new()).await?,
            };
            emit(ctx, out, &page, &args.output)
        }
    }
}

async fn create(
    ctx: &Ctx,
    out: &mut dyn Write,
    name: String,
    description: Option<String>,
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::REPOSITORY_CREATE)?;
    let call = match selected.version {
        ApiVersion::V3 => {
            let mut form = vec![("name".to_string(), name)];
            if let Some(description) = description {
                form.push(("description".to_string(), description));
            }
            Call::new().form(form)
        }
        ApiVersion::V4 => Call::new().json(&v4::RepositoryCreate { name, description })?,
    };
    ctx.send(selected, call).await?;
    announce(ctx, out, "Repository successfully created.")
}

async fn delete(
    ctx: &Ctx,
    out: &mut dyn Write,
    name: &str,
    no_prompt: bool,
) -> Result<(), CliError> {
    if !confirm(
        &format!("Delete repository {name} and every item in it?"),
        no_prompt,
    )? {
        return Ok(());
    }
    let selected = ctx.route(&catalog::REPOSITORY_DELETE)?;
    ctx.send(selected, Call::new().param("repository", name))
        .await
        .map_err(|err| err.reword_on(404, "repository does not exist"))?;
    announce(ctx, out, "Repository successfully deleted.")
}
