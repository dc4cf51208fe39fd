use std::io::Write;

use fmeflow_api_types::v4;
use tracing::debug;

use crate::api::{ApiVersion, catalog};
use crate::args::{DEFAULT_BACKUP_FILE, RestoreArgs};
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::io::read_file;

use super::{FollowTask, follow_task};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: RestoreArgs) -> Result<(), CliError> {
    let (version, handle) = match &args.file {
        Some(path) => {
            let data = read_file(path).await?;
            debug!(path = %path.display(), bytes = data.len(), "uploading backup package");
            let selected = ctx.route(&catalog::RESTORE_UPLOAD)?;
            let call = options(&args, Call::new()).bytes(data);
            let (_, handle) = ctx.fetch(selected, call).await?;
            (selected.version, handle)
        }
        None => {
            let selected = ctx.route(&catalog::RESTORE_RESOURCE)?;
            let package = args
                .package_path
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKUP_FILE.to_string());
            let call = match selected.version {
                ApiVersion::V3 => Call::new().form(resource_form(&args, package)),
                ApiVersion::V4 => Call::new().json(&v4::RestoreResource {
                    resource_name: args.resource_name.clone(),
                    import_package: package,
                    import_mode: args.import_mode.clone(),
                    pause_notifications: args.pause_notifications,
                    projects_import_mode: args.projects_import_mode.clone(),
                    success_topic: args.success_topic.clone(),
                    failure_topic: args.failure_topic.clone(),
                })?,
            };
            let (_, handle) = ctx.fetch(selected, call).await?;
            (selected.version, handle)
        }
    };

    follow_task(
        ctx,
        out,
        FollowTask {
            what: "Restore",
            handle,
            wait: args.wait,
            status: catalog::MIGRATION_TASK_STATUS.variant(version)?,
            done: "Successfully restored FME Server from backup.",
        },
    )
    .await
}

/// Upload options travel in the query string next to the binary body.
fn options(args: &RestoreArgs, call: Call) -> Call {
    call.query_opt("importMode", args.import_mode.as_ref())
        .query("pauseNotifications", args.pause_notifications)
        .query_opt("projectsImportMode", args.projects_import_mode.as_ref())
        .query_opt("successTopic", args.success_topic.as_ref())
        .query_opt("failureTopic", args.failure_topic.as_ref())
}

fn resource_form(args: &RestoreArgs, package: String) -> Vec<(String, String)> {
    let mut form = vec![
        ("resourceName".to_string(), args.resource_name.clone()),
        ("importPackage".to_string(), package),
        (
            "pauseNotifications".to_string(),
            args.pause_notifications.to_string(),
        ),
    ];
    let optional = [
        ("importMode", &args.import_mode),
        ("projectsImportMode", &args.projects_import_mode),
        ("successTopic", &args.success_topic),
        ("failureTopic", &args.failure_topic),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            form.push((key.to_string(), value.clone()));
        }
    }
    form
}
