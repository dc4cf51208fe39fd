use std::io::Write;

use fmeflow_api_types::v4;
use tracing::info;

use crate::api::{ApiVersion, catalog};
use crate::args::BackupArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::io::write_file;

use super::{FollowTask, announce, follow_task};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: BackupArgs) -> Result<(), CliError> {
    if args.resource {
        return to_resource(ctx, out, args).await;
    }

    let selected = ctx.route(&catalog::BACKUP_DOWNLOAD)?;
    let call = match selected.version {
        ApiVersion::V3 => Call::new().query("exportPackage", &args.export_package),
        ApiVersion::V4 => Call::new().json(&v4::BackupDownload {
            export_package: Some(args.export_package.clone()),
        })?,
    };
    let reply = ctx.send(selected, call).await?;
    write_file(&args.file, &reply.body).await?;
    info!(path = %args.file.display(), bytes = reply.body.len(), "backup downloaded");
    announce(
        ctx,
        out,
        &format!("FME Server backed up to {}", args.file.display()),
    )
}

/// Ask the server to write the package into one of its shared resources.
async fn to_resource(ctx: &Ctx, out: &mut dyn Write, args: BackupArgs) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::BACKUP_RESOURCE)?;
    let call = match selected.version {
        ApiVersion::V3 => {
            let mut form = vec![
                ("resourceName".to_string(), args.resource_name.clone()),
                ("exportPackage".to_string(), args.export_package.clone()),
            ];
            if let Some(topic) = &args.success_topic {
                form.push(("successTopic".to_string(), topic.clone()));
            }
            if let Some(topic) = &args.failure_topic {
                form.push(("failureTopic".to_string(), topic.clone()));
            }
            Call::new().form(form)
        }
        ApiVersion::V4 => Call::new().json(&v4::BackupResource {
            resource_name: args.resource_name.clone(),
            export_package: args.export_package.clone(),
            success_topic: args.success_topic.clone(),
            failure_topic: args.failure_topic.clone(),
        })?,
    };
    let (_, handle) = ctx.fetch(selected, call).await?;
    follow_task(
        ctx,
        out,
        FollowTask {
            what: "Backup",
            handle,
            wait: args.wait,
            status: catalog::MIGRATION_TASK_STATUS.variant(selected.version)?,
            done: "Successfully backed up FME Server to the shared resource.",
        },
    )
    .await
}
