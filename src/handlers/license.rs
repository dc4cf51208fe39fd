use std::io::Write;
use std::path::Path;

use fmeflow_api_types::model::RequestStatus;
use fmeflow_api_types::{LicenseRequest, Listing};
use tracing::info;

use crate::api::{ApiVersion, Operation, catalog};
use crate::args::{
    LicenseArgs, LicenseCmd, LicenseDetails, LicenseRefreshArgs, LicenseRequestArgs, ReadArgs,
    StatusCmd,
};
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::io::write_file;
use crate::output::{Page, print_json};
use crate::tasks::{ensure_succeeded, poll_status};

use super::{announce, emit, single_page};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: LicenseArgs) -> Result<(), CliError> {
    match args.action {
        LicenseCmd::Status(read) => {
            let page = single_page(ctx, &catalog::LICENSE_STATUS, Call::new()).await?;
            emit(ctx, out, &page, &read.output)
        }
        LicenseCmd::Machinekey => {
            let selected = ctx.route(&catalog::LICENSE_MACHINE_KEY)?;
            let (raw, key) = ctx.fetch(selected, Call::new()).await?;
            key_line(ctx, out, &raw, &key.machine_key)
        }
        LicenseCmd::Systemcode => {
            let selected = ctx.route(&catalog::LICENSE_SYSTEM_CODE)?;
            let (raw, code) = ctx.fetch(selected, Call::new()).await?;
            key_line(ctx, out, &raw, &code.system_code)
        }
        LicenseCmd::Request(args) => request(ctx, out, args).await,
        LicenseCmd::Requestfile { details, file } => {
            request_file(ctx, out, &details, file.as_deref()).await
        }
        LicenseCmd::Refresh(args) => refresh(ctx, out, args).await,
    }
}

fn key_line(
    ctx: &Ctx,
    out: &mut dyn Write,
    raw: &serde_json::Value,
    key: &str,
) -> Result<(), CliError> {
    if ctx.json {
        return print_json(out, raw);
    }
    writeln!(out, "{key}")?;
    Ok(())
}

async fn request(ctx: &Ctx, out: &mut dyn Write, args: LicenseRequestArgs) -> Result<(), CliError> {
    if let Some(StatusCmd::Status(read)) = args.action {
        return show_status(ctx, out, &catalog::LICENSE_REQUEST_STATUS, &read).await;
    }
    let details = registration(&args.details)?;
    let selected = ctx.route(&catalog::LICENSE_REQUEST)?;
    let call = match selected.version {
        ApiVersion::V3 => Call::new().form(details.form_pairs()),
        ApiVersion::V4 => Call::new().json(&details)?,
    };
    ctx.send(selected, call).await?;
    info!(email = %details.email, "license request sent");
    settle(
        ctx,
        out,
        "License Request Successfully sent.",
        args.wait,
        &catalog::LICENSE_REQUEST_STATUS,
    )
    .await
}

async fn refresh(ctx: &Ctx, out: &mut dyn Write, args: LicenseRefreshArgs) -> Result<(), CliError> {
    if let Some(StatusCmd::Status(read)) = args.action {
        return show_status(ctx, out, &catalog::LICENSE_REFRESH_STATUS, &read).await;
    }
    let selected = ctx.route(&catalog::LICENSE_REFRESH)?;
    ctx.send(selected, Call::new()).await?;
    settle(
        ctx,
        out,
        "License Refresh Successfully sent.",
        args.wait,
        &catalog::LICENSE_REFRESH_STATUS,
    )
    .await
}

/// Confirm the submission and, with `--wait`, poll `status` until it settles.
async fn settle(
    ctx: &Ctx,
    out: &mut dyn Write,
    sent: &str,
    wait: bool,
    status: &Operation<RequestStatus>,
) -> Result<(), CliError> {
    if !(wait && ctx.json) {
        announce(ctx, out, sent)?;
    }
    if !wait {
        return Ok(());
    }
    let selected = ctx.route(status)?;
    let (raw, status) = poll_status(ctx, out, selected, Call::new).await?;
    if ctx.json {
        print_json(out, &raw)?;
        return ensure_succeeded(&status);
    }
    ensure_succeeded(&status)?;
    writeln!(out, "{}", status.summary())?;
    Ok(())
}

async fn show_status(
    ctx: &Ctx,
    out: &mut dyn Write,
    operation: &Operation<RequestStatus>,
    read: &ReadArgs,
) -> Result<(), CliError> {
    let selected = ctx.route(operation)?;
    let (raw, status) = ctx.fetch(selected, Call::new()).await?;
    emit(ctx, out, &Page::single(raw, Listing::single(status)), &read.output)
}

async fn request_file(
    ctx: &Ctx,
    out: &mut dyn Write,
    details: &LicenseDetails,
    file: Option<&Path>,
) -> Result<(), CliError> {
    let details = registration(details)?;
    let selected = ctx.route(&catalog::LICENSE_REQUEST_FILE)?;
    let call = match selected.version {
        ApiVersion::V3 => Call::new().form(details.form_pairs()),
        ApiVersion::V4 => Call::new().json(&details)?,
    };
    let reply = ctx.send(selected, call).await?;
    match file {
        Some(path) => {
            write_file(path, &reply.body).await?;
            announce(
                ctx,
                out,
                &format!("License Request File written to {}", path.display()),
            )
        }
        None => {
            out.write_all(&reply.body)?;
            if !reply.body.ends_with(b"\n") {
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn registration(details: &LicenseDetails) -> Result<LicenseRequest, CliError> {
    let required = |value: &Option<String>, flag: &str| {
        value
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CliError::usage(format!("--{flag} is required")))
    };
    Ok(LicenseRequest {
        first_name: required(&details.first_name, "first-name")?,
        last_name: required(&details.last_name, "last-name")?,
        email: required(&details.email, "email")?,
        serial_number: details.serial_number.clone(),
        company: details.company.clone(),
        industry: details.industry.clone(),
        category: details.category.clone(),
        sales_source: details.sales_source.clone(),
        subscribe_to_updates: details.subscribe_to_updates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_requires_contact_fields() {
        let details = LicenseDetails {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..LicenseDetails::default()
        };
        let err = registration(&details).expect_err("missing email");
        assert_eq!(err.to_string(), "--email is required");

        let details = LicenseDetails {
            email: Some("ada@example.com".into()),
            serial_number: Some("AAAA-BBBB".into()),
            ..details
        };
        let request = registration(&details).expect("complete");
        assert_eq!(request.serial_number.as_deref(), Some("AAAA-BBBB"));
        assert!(!request.subscribe_to_updates);
    }
}
