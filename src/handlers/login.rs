use std::io::Write;
use std::path::Path;

use fmeflow_api_types::{v3, v4};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::api::{ApiVersion, Operation, catalog};
use crate::args::LoginArgs;
use crate::client::{Call, Ctx};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::io::{prompt_line, prompt_password, read_password_file};

use super::announce;

const TOKEN_DESCRIPTION: &str = "Token created by the fmeflow command-line client";

pub async fn handle(
    path: &Path,
    json: bool,
    api_version: Option<ApiVersion>,
    out: &mut dyn Write,
    args: LoginArgs,
) -> Result<(), CliError> {
    let url = config::normalize_url(&args.url)?;
    let mut ctx = Ctx::new(&url, None, None, json)?.with_api_version(api_version);

    let token = match args.token {
        Some(token) => token,
        None => {
            let user = match args.user {
                Some(user) => user,
                None => prompt_line("Username: ")?,
            };
            let password = match &args.password_file {
                Some(file) => read_password_file(file)?,
                None => prompt_password("Password: ")?,
            };
            create_token(&ctx, &user, &password, args.expiration).await?
        }
    };
    ctx.token = Some(token.clone());

    let (_, version) = first_available(&ctx, &catalog::BUILD_PROBE, |_| Ok(Call::new())).await?;
    debug!(build = ?version.build_number, "server build probed");

    match (config::load(path), version.build_number) {
        (Ok(current), Some(build)) if current.url == url && current.token == token => {
            config::set_build(path, build)?;
        }
        _ => config::save(
            path,
            &Profile {
                url,
                token,
                build: version.build_number,
            },
        )?,
    }
    info!(path = %path.display(), "logged in");
    announce(
        &ctx,
        out,
        &format!("Credentials written to {}", path.display()),
    )
}

async fn create_token(
    ctx: &Ctx,
    user: &str,
    password: &str,
    expiration: u64,
) -> Result<String, CliError> {
    let name = format!(
        "fmeflow-cli-{}",
        OffsetDateTime::now_utc().unix_timestamp()
    );
    let (_, grant) = first_available(ctx, &catalog::TOKEN_CREATE, |version| {
        let call = Call::new().basic_auth(user.to_string(), password.to_string());
        match version {
            ApiVersion::V3 => call.json(&v3::TokenRequest {
                name: name.clone(),
                description: TOKEN_DESCRIPTION.to_string(),
                expiration_timeout: expiration,
                restricted: false,
                enabled: true,
            }),
            ApiVersion::V4 => call.json(&v4::TokenRequest {
                name: name.clone(),
                description: TOKEN_DESCRIPTION.to_string(),
                expiration_timeout: expiration,
            }),
        }
    })
    .await?;
    info!(token_name = %name, "token created");
    Ok(grant.token)
}

/// The build is unknown before login, so try v4 first and fall back to v3
/// when the server does not know the path. `--api-version` pins one surface.
async fn first_available<T>(
    ctx: &Ctx,
    operation: &Operation<T>,
    call: impl Fn(ApiVersion) -> Result<Call, CliError>,
) -> Result<(Value, T), CliError> {
    if let Some(version) = ctx.api_version {
        return ctx.fetch(operation.variant(version)?, call(version)?).await;
    }
    match ctx
        .fetch(operation.variant(ApiVersion::V4)?, call(ApiVersion::V4)?)
        .await
    {
        Err(err) if err.status() == Some(404) => {
            debug!(operation = operation.name, "no v4 endpoint, retrying on v3");
            ctx.fetch(operation.variant(ApiVersion::V3)?, call(ApiVersion::V3)?)
                .await
        }
        other => other,
    }
}
