use std::collections::BTreeMap;
use std::io::Write;

use fmeflow_api_types::model::{Job, JobResult, TaskState};
use fmeflow_api_types::{Listing, NameValue, PublishedParameter, TaskHandle, v3, v4};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{ApiVersion, catalog};
use crate::args::RunArgs;
use crate::client::{Call, Ctx, JOB_RUN_TIMEOUT};
use crate::error::CliError;
use crate::io::{read_file, split_escaped, split_pair};
use crate::output::{Page, print_json};
use crate::tasks::wait_until;

use super::emit;

const SECONDS: &str = "second";

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: RunArgs) -> Result<(), CliError> {
    let parameters = published_parameters(&args)?;
    if args.file.is_some() {
        return run_with_data(ctx, out, &args, &parameters).await;
    }

    let selected = ctx.route(&catalog::JOB_SUBMIT)?;
    match (selected.version, args.wait) {
        (ApiVersion::V3, true) => transact(ctx, out, &args, parameters).await,
        (ApiVersion::V3, false) => {
            let call = Call::new()
                .param("repository", &args.repository)
                .param("workspace", &args.workspace)
                .json(&v3_submission(&args, parameters)?)?;
            let (raw, handle) = ctx.fetch(selected, call).await?;
            submitted(ctx, out, &raw, handle)
        }
        (ApiVersion::V4, wait) => {
            let call = Call::new().json(&v4_submission(&args, parameters)?)?;
            let (raw, handle) = ctx.fetch(selected, call).await?;
            if wait {
                follow(ctx, out, &args, handle).await
            } else {
                submitted(ctx, out, &raw, handle)
            }
        }
    }
}

fn submitted(
    ctx: &Ctx,
    out: &mut dyn Write,
    raw: &Value,
    handle: TaskHandle,
) -> Result<(), CliError> {
    info!(job = handle.id, "job submitted");
    if ctx.json {
        return print_json(out, raw);
    }
    writeln!(out, "Job submitted with id: {}", handle.id)?;
    Ok(())
}

/// Synchronous v3 run with a JSON submission.
async fn transact(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: &RunArgs,
    parameters: Vec<PublishedParameter>,
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::JOB_TRANSACT)?;
    let call = Call::new()
        .param("repository", &args.repository)
        .param("workspace", &args.workspace)
        .json(&v3_submission(args, parameters)?)?
        .timeout(JOB_RUN_TIMEOUT);
    let (raw, listing) = ctx.fetch(selected, call).await?;
    finish(ctx, out, args, Page::single(raw, listing))
}

/// Synchronous v3 run whose request body is the source dataset.
async fn run_with_data(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: &RunArgs,
    parameters: &[PublishedParameter],
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::JOB_TRANSACT_DATA)?;
    let Some(path) = args.file.as_deref() else {
        return Err(CliError::usage("--file is required"));
    };
    let data = read_file(path).await?;
    debug!(path = %path.display(), bytes = data.len(), "uploading source data");

    let mut call = Call::new()
        .param("repository", &args.repository)
        .param("workspace", &args.workspace)
        .query_opt("tm_tag", args.queue.as_ref().or(args.tag.as_ref()))
        .query_opt("tm_ttc", args.max_job_runtime.or(args.time_until_canceled))
        .query_opt("tm_ttl", args.max_time_in_queue.or(args.time_to_live))
        .query_opt("tm_priority", args.priority)
        .query_opt("tm_description", args.description.as_ref());
    for parameter in parameters {
        if let PublishedParameter::Scalar { name, value } = parameter {
            call = call.query(name.as_str(), value);
        }
    }
    let call = call.bytes(data).timeout(JOB_RUN_TIMEOUT);
    let (raw, listing) = ctx.fetch(selected, call).await?;
    finish(ctx, out, args, Page::single(raw, listing))
}

fn finish(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: &RunArgs,
    page: Page<JobResult>,
) -> Result<(), CliError> {
    emit(ctx, out, &page, &args.output)?;
    match page.listing.items.first() {
        Some(result) if TaskState::parse(&result.status) == TaskState::Succeeded => Ok(()),
        Some(result) => Err(CliError::task_failed(
            result
                .status_message
                .clone()
                .unwrap_or_else(|| result.status.clone()),
        )),
        None => Err(CliError::task_failed("server returned no job result")),
    }
}

/// Poll a v4 job until it leaves the queue and finishes running.
async fn follow(
    ctx: &Ctx,
    out: &mut dyn Write,
    args: &RunArgs,
    handle: TaskHandle,
) -> Result<(), CliError> {
    let selected = ctx.route(&catalog::JOB)?;
    let (raw, listing): (Value, Listing<Job>) = wait_until(
        ctx.poll_interval,
        !ctx.json,
        out,
        || ctx.fetch(selected, Call::new().param("id", handle.id)),
        |(_, listing): &(Value, Listing<Job>)| {
            listing
                .items
                .first()
                .is_some_and(|job| TaskState::parse(&job.status).in_progress())
        },
    )
    .await?;
    let page = Page::single(raw, listing);
    emit(ctx, out, &page, &args.output)?;
    match page.listing.items.first() {
        Some(job) if TaskState::parse(&job.status) == TaskState::Succeeded => Ok(()),
        Some(job) => Err(CliError::task_failed(format!(
            "job {} finished with status {}",
            job.id, job.status
        ))),
        None => Err(CliError::task_failed("server returned no job")),
    }
}

fn published_parameters(args: &RunArgs) -> Result<Vec<PublishedParameter>, CliError> {
    let mut parameters = Vec::new();
    for raw in &args.published_parameter {
        let (name, value) = split_pair(raw, "published-parameter")?;
        parameters.push(PublishedParameter::Scalar { name, value });
    }
    for raw in &args.published_parameter_list {
        let (name, value) = split_pair(raw, "published-parameter-list")?;
        parameters.push(PublishedParameter::List {
            name,
            values: split_escaped(&value),
        });
    }
    Ok(parameters)
}

fn directives(args: &RunArgs) -> Result<Vec<(String, String)>, CliError> {
    args.directive
        .iter()
        .map(|raw| split_pair(raw, "directive"))
        .collect()
}

fn v3_submission(
    args: &RunArgs,
    parameters: Vec<PublishedParameter>,
) -> Result<v3::JobSubmission, CliError> {
    let mut nm_directives: Vec<NameValue> = directives(args)?
        .into_iter()
        .map(|(name, value)| NameValue { name, value })
        .collect();
    if let Some(node) = &args.node_name {
        nm_directives.push(NameValue {
            name: "node_name".into(),
            value: node.clone(),
        });
    }
    Ok(v3::JobSubmission {
        published_parameters: parameters,
        tm_directives: v3::TmDirectives {
            tag: args.queue.clone().or_else(|| args.tag.clone()),
            ttc: args.max_job_runtime.or(args.time_until_canceled),
            ttl: args.max_time_in_queue.or(args.time_to_live),
            priority: args.priority,
            description: args.description.clone(),
        },
        nm_directives: v3::NmDirectives {
            success_topics: args.success_topic.clone(),
            failure_topics: args.failure_topic.clone(),
            directives: nm_directives,
        },
    })
}

fn v4_submission(
    args: &RunArgs,
    parameters: Vec<PublishedParameter>,
) -> Result<v4::JobSubmission, CliError> {
    if args.priority.is_some() || args.node_name.is_some() {
        return Err(CliError::usage(
            "--priority and --node-name are only available on the v3 API",
        ));
    }
    let runtime = args.max_job_runtime.or(args.time_until_canceled);
    let queue_time = args.max_time_in_queue.or(args.time_to_live);
    Ok(v4::JobSubmission {
        repository: args.repository.clone(),
        workspace: args.workspace.clone(),
        published_parameters: parameters,
        queue: args.queue.clone().or_else(|| args.tag.clone()),
        max_job_runtime: runtime,
        max_job_runtime_units: runtime.map(|_| SECONDS),
        max_time_in_queue: queue_time,
        max_time_in_queue_units: queue_time.map(|_| SECONDS),
        description: args.description.clone(),
        success_topics: args.success_topic.clone(),
        failure_topics: args.failure_topic.clone(),
        directives: directives(args)?.into_iter().collect::<BTreeMap<_, _>>(),
    })
}
