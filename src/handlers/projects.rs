use std::io::Write;
use std::path::Path;

use fmeflow_api_types::model::{Project, RequestStatus};
use fmeflow_api_types::{TaskHandle, v4};
use tracing::{debug, info};

use crate::api::{ApiVersion, Selected, catalog};
use crate::args::{ProjectRef, ProjectUploadArgs, ProjectsArgs, ProjectsCmd};
use crate::client::{Call, Ctx};
use crate::error::{CliError, HINT_PROJECT_MISSING};
use crate::io::{confirm, read_file, write_file};
use crate::output::{OutputArgs, Page};

use super::{FollowTask, announce, emit, follow_task, list_page};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: ProjectsArgs) -> Result<(), CliError> {
    match args.action {
        Some(ProjectsCmd::Items {
            project,
            item_type,
            output,
        }) => items(ctx, out, &project, &item_type, &output).await,
        Some(ProjectsCmd::Download {
            project,
            file,
            exclude_sensitive_info,
        }) => download(ctx, out, &project, &file, exclude_sensitive_info).await,
        Some(ProjectsCmd::Upload(upload_args)) => upload(ctx, out, upload_args).await,
        Some(ProjectsCmd::Delete {
            project,
            all,
            dependencies,
            no_prompt,
        }) => delete(ctx, out, &project, all, dependencies, no_prompt).await,
        None => list(ctx, out, args).await,
    }
}

async fn list(ctx: &Ctx, out: &mut dyn Write, args: ProjectsArgs) -> Result<(), CliError> {
    let mut page = if args.id.is_some() || args.name.is_some() {
        let project = ProjectRef {
            id: args.id.clone(),
            name: args.name.clone(),
        };
        let selected = ctx.route(&catalog::PROJECT)?;
        let key = resolve(ctx, &project, selected.version).await?;
        let (raw, listing) = ctx
            .fetch(selected, Call::new().param("project", key))
            .await
            .map_err(|err| err.hint_on(404, HINT_PROJECT_MISSING))?;
        Page::single(raw, listing)
    } else {
        list_page(ctx, &catalog::PROJECTS, Call::new()).await?
    };
    if let Some(owner) = &args.owner {
        page.retain(|project: &Project| project.owner.as_deref() == Some(owner.as_str()));
    }
    emit(ctx, out, &page, &args.output)
}

/// The path key for a project: its name on v3, its id on v4. A v4 name is
/// looked up first.
async fn resolve(ctx: &Ctx, project: &ProjectRef, version: ApiVersion) -> Result<String, CliError> {
    match (version, &project.id, &project.name) {
        (ApiVersion::V3, _, Some(name)) => Ok(name.clone()),
        (ApiVersion::V3, Some(_), None) => Err(CliError::usage(
            "the v3 API addresses projects by name; use --name",
        )),
        (ApiVersion::V4, Some(id), _) => Ok(id.clone()),
        (ApiVersion::V4, None, Some(name)) => {
            let selected = catalog::PROJECTS.variant(ApiVersion::V4)?;
            let call = Call::new()
                .query("filterString", name)
                .query("filterProperties", "name");
            let (_, listing) = ctx.fetch(selected, call).await?;
            let id = listing
                .items
                .into_iter()
                .find(|p| p.name == *name)
                .and_then(|p| p.id)
                .ok_or_else(|| {
                    CliError::not_found(format!("project `{name}` not found"), HINT_PROJECT_MISSING)
                })?;
            debug!(%name, %id, "resolved project name");
            Ok(id)
        }
        (_, None, None) => Err(CliError::usage("one of --id or --name is required")),
    }
}

async fn items(
    ctx: &Ctx,
    out: &mut dyn Write,
    project: &ProjectRef,
    item_types: &[String],
    output: &OutputArgs,
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::PROJECT_ITEMS)?;
    let key = resolve(ctx, project, selected.version).await?;
    let call = Call::new()
        .param("project", key)
        .query_all("type", item_types);
    let (raw, listing) = ctx
        .fetch(selected, call)
        .await
        .map_err(|err| err.hint_on(404, HINT_PROJECT_MISSING))?;
    emit(ctx, out, &Page::list(raw, listing), output)
}

async fn download(
    ctx: &Ctx,
    out: &mut dyn Write,
    project: &ProjectRef,
    file: &Path,
    exclude_sensitive_info: bool,
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::PROJECT_EXPORT)?;
    let key = resolve(ctx, project, selected.version).await?;
    let call = Call::new().param("project", key);
    let call = match selected.version {
        ApiVersion::V3 => call.form(vec![(
            "excludeSensitiveInfo".to_string(),
            exclude_sensitive_info.to_string(),
        )]),
        ApiVersion::V4 => call.json(&v4::ProjectExport {
            exclude_sensitive_info,
        })?,
    };
    let reply = ctx
        .send(selected, call)
        .await
        .map_err(|err| err.hint_on(404, HINT_PROJECT_MISSING))?;
    write_file(file, &reply.body).await?;
    info!(path = %file.display(), bytes = reply.body.len(), "project package written");
    announce(
        ctx,
        out,
        &format!("Project exported to {}", file.display()),
    )
}

async fn upload(ctx: &Ctx, out: &mut dyn Write, args: ProjectUploadArgs) -> Result<(), CliError> {
    let data = read_file(&args.file).await?;
    let selected = ctx.route(&catalog::PROJECT_UPLOAD)?;
    let (status_op, handle): (Selected<'_, RequestStatus>, TaskHandle) = match selected.version {
        ApiVersion::V3 => {
            let call = Call::new()
                .query_opt("importMode", args.import_mode.as_ref())
                .query_opt("projectsImportMode", args.projects_import_mode.as_ref())
                .query("pauseNotifications", args.pause_notifications)
                .bytes(data);
            let (_, handle) = ctx.fetch(selected, call).await?;
            (
                catalog::MIGRATION_TASK_STATUS.variant(ApiVersion::V3)?,
                handle,
            )
        }
        ApiVersion::V4 => {
            let (_, handle) = ctx.fetch(selected, Call::new().bytes(data)).await?;
            let run = catalog::PROJECT_IMPORT_RUN.variant(ApiVersion::V4)?;
            let call = Call::new().param("id", handle.id).json(&v4::ImportRun {
                overwrite: args.overwrite,
                pause_notifications: args.pause_notifications,
                disable_project_items: args.disable_project_items,
            })?;
            ctx.send(run, call).await?;
            (
                catalog::PROJECT_IMPORT_STATUS.variant(ApiVersion::V4)?,
                handle,
            )
        }
    };

    follow_task(
        ctx,
        out,
        FollowTask {
            what: "Project Upload",
            handle,
            wait: args.wait,
            status: status_op,
            done: "Project Upload Successful",
        },
    )
    .await
}

async fn delete(
    ctx: &Ctx,
    out: &mut dyn Write,
    project: &ProjectRef,
    all: bool,
    dependencies: bool,
    no_prompt: bool,
) -> Result<(), CliError> {
    let operation = if all {
        &catalog::PROJECT_DELETE_ALL
    } else {
        &catalog::PROJECT_DELETE
    };
    let selected = ctx.route(operation)?;
    let key = resolve(ctx, project, selected.version).await?;
    let label = project.name.as_deref().unwrap_or(&key);
    let question = if all {
        format!("Delete project {label} and all of its contents?")
    } else {
        format!("Delete project {label}?")
    };
    if !confirm(&question, no_prompt)? {
        return Ok(());
    }

    let mut call = Call::new().param("project", &key);
    if dependencies {
        call = call.query("deleteDependencies", true);
    }
    ctx.send(selected, call)
        .await
        .map_err(|err| err.hint_on(404, HINT_PROJECT_MISSING))?;
    info!(project = %key, all, dependencies, "project deleted");
    announce(ctx, out, "Project successfully deleted.")
}
