use std::io::Write;

use fmeflow_api_types::v4::{self, ChoiceSettings};

use crate::api::{ApiVersion, catalog};
use crate::args::{DeploymentParametersArgs, DeploymentParametersCmd, ParameterType, ParameterValueArgs};
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::io::confirm;

use super::{announce, emit, list_page, single_page};

pub async fn handle(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: DeploymentParametersArgs,
) -> Result<(), CliError> {
    match args.action {
        Some(DeploymentParametersCmd::Create {
            name,
            parameter_type,
            value,
        }) => create(ctx, out, name, parameter_type, value).await,
        Some(DeploymentParametersCmd::Update {
            name,
            parameter_type,
            value,
        }) => update(ctx, out, &name, parameter_type, value).await,
        Some(DeploymentParametersCmd::Delete { name, no_prompt }) => {
            if !confirm(&format!("Delete deployment parameter {name}?"), no_prompt)? {
                return Ok(());
            }
            let selected = ctx.route(&catalog::DEPLOYMENT_PARAMETER_DELETE)?;
            ctx.send(selected, Call::new().param("name", &name)).await?;
            announce(ctx, out, "Deployment Parameter successfully deleted.")
        }
        None => {
            let page = match &args.name {
                Some(name) => {
                    single_page(
                        ctx,
                        &catalog::DEPLOYMENT_PARAMETER,
                        Call::new().param("name", name),
                    )
                    .await?
                }
                None => list_page(ctx, &catalog::DEPLOYMENT_PARAMETERS, Call::new()).await?,
            };
            emit(ctx, out, &page, &args.output)
        }
    }
}

async fn create(
    ctx: &Ctx,
    out: &mut dyn Write,
    name: String,
    kind: ParameterType,
    value: ParameterValueArgs,
) -> Result<(), CliError> {
    let settings = choice_settings(kind, &value)?;
    let selected = ctx.route(&catalog::DEPLOYMENT_PARAMETER_CREATE)?;
    let call = match selected.version {
        ApiVersion::V3 => {
            reject_v3_settings(settings.as_ref())?;
            Call::new().form(vec![
                ("name".to_string(), name),
                ("value".to_string(), value.value),
                ("type".to_string(), kind.as_str().to_string()),
            ])
        }
        ApiVersion::V4 => Call::new().json(&v4::DeploymentParameterCreate {
            name,
            value: value.value,
            parameter_type: kind.as_str().to_string(),
            choice_settings: settings,
        })?,
    };
    ctx.send(selected, call).await?;
    announce(ctx, out, "Deployment Parameter successfully created.")
}

async fn update(
    ctx: &Ctx,
    out: &mut dyn Write,
    name: &str,
    kind: Option<ParameterType>,
    value: ParameterValueArgs,
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::DEPLOYMENT_PARAMETER_UPDATE)?;
    let call = Call::new().param("name", name);
    let call = match selected.version {
        ApiVersion::V3 => {
            reject_v3_settings(choice_settings(kind.unwrap_or_default(), &value)?.as_ref())?;
            let mut form = vec![("value".to_string(), value.value)];
            if let Some(kind) = kind {
                form.push(("type".to_string(), kind.as_str().to_string()));
            }
            call.form(form)
        }
        ApiVersion::V4 => {
            // The v4 update replaces the type, so keep the current one unless overridden.
            let (type_name, kind) = match kind {
                Some(kind) => (kind.as_str().to_string(), kind),
                None => {
                    let lookup = ctx.route(&catalog::DEPLOYMENT_PARAMETER)?;
                    let (_, current) = ctx
                        .fetch(lookup, Call::new().param("name", name))
                        .await?;
                    let type_name = current
                        .items
                        .into_iter()
                        .next()
                        .and_then(|p| p.parameter_type)
                        .unwrap_or_else(|| ParameterType::Text.as_str().to_string());
                    let kind = from_wire(&type_name);
                    (type_name, kind)
                }
            };
            call.json(&v4::DeploymentParameterUpdate {
                value: value.value.clone(),
                parameter_type: type_name,
                choice_settings: choice_settings(kind, &value)?,
            })?
        }
    };
    ctx.send(selected, call).await?;
    announce(ctx, out, "Deployment Parameter successfully updated.")
}

fn from_wire(type_name: &str) -> ParameterType {
    [ParameterType::Database, ParameterType::Web]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(type_name))
        .unwrap_or(ParameterType::Text)
}

/// Selection constraints for database and web-connection parameters.
fn choice_settings(
    kind: ParameterType,
    value: &ParameterValueArgs,
) -> Result<Option<ChoiceSettings>, CliError> {
    let has_services = !value.included_service.is_empty() || !value.excluded_service.is_empty();
    match kind {
        ParameterType::Text if value.database_type.is_some() || has_services => {
            Err(CliError::usage(
                "--database-type needs --type database; --included-service and --excluded-service need --type web",
            ))
        }
        ParameterType::Text => Ok(None),
        ParameterType::Database if has_services => Err(CliError::usage(
            "--included-service and --excluded-service need --type web",
        )),
        ParameterType::Database => Ok(Some(ChoiceSettings {
            choice_set: "dbConnections",
            family: value.database_type.clone(),
            services: Vec::new(),
            excluded_services: Vec::new(),
        })),
        ParameterType::Web if value.database_type.is_some() => {
            Err(CliError::usage("--database-type needs --type database"))
        }
        ParameterType::Web => Ok(Some(ChoiceSettings {
            choice_set: "webConnections",
            family: None,
            services: value.included_service.clone(),
            excluded_services: value.excluded_service.clone(),
        })),
    }
}

fn reject_v3_settings(settings: Option<&ChoiceSettings>) -> Result<(), CliError> {
    match settings {
        Some(_) => Err(CliError::usage(
            "database and web deployment parameters require the v4 API",
        )),
        None => Ok(()),
    }
}
