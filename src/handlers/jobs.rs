use std::io::Write;

use fmeflow_api_types::model::Job;
use tracing::debug;

use crate::api::{ApiVersion, catalog};
use crate::args::JobsArgs;
use crate::client::{Call, Ctx};
use crate::error::CliError;
use crate::output::Page;

use super::{emit, single_page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    All,
    Running,
    Queued,
    Completed,
    Active,
    Success,
    Failure,
    Cancelled,
}

impl View {
    fn from_args(args: &JobsArgs) -> Self {
        [
            (args.running, Self::Running),
            (args.queued, Self::Queued),
            (args.completed, Self::Completed),
            (args.active, Self::Active),
            (args.success, Self::Success),
            (args.failure, Self::Failure),
            (args.cancelled, Self::Cancelled),
        ]
        .into_iter()
        .find_map(|(set, view)| set.then_some(view))
        .unwrap_or(Self::All)
    }

    /// v3 has one listing per state; these are merged in order.
    fn v3_states(self) -> &'static [&'static str] {
        match self {
            Self::All => &["running", "queued", "completed"],
            Self::Running => &["running"],
            Self::Queued => &["queued"],
            Self::Active => &["running", "queued"],
            Self::Completed | Self::Success | Self::Failure | Self::Cancelled => &["completed"],
        }
    }

    fn v4_status(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Running => Some("running"),
            Self::Queued => Some("queued"),
            Self::Completed => Some("completed"),
            Self::Active => Some("active"),
            Self::Success => Some("success"),
            Self::Failure => Some("failure"),
            Self::Cancelled => Some("cancelled"),
        }
    }

    /// The v3 completed listing mixes every outcome.
    fn v3_keeps(self, status: &str) -> bool {
        let any = |names: &[&str]| names.iter().any(|n| n.eq_ignore_ascii_case(status));
        match self {
            Self::Success => any(&["SUCCESS"]),
            Self::Failure => any(&["FME_FAILURE", "JOB_FAILURE"]),
            Self::Cancelled => any(&["ABORTED", "CANCELLED"]),
            _ => true,
        }
    }
}

/// Narrowing flags, applied client-side on v3.
struct Filters<'a> {
    repository: Option<&'a str>,
    workspace: Option<&'a str>,
    user_name: Option<&'a str>,
    source_id: Option<&'a str>,
}

impl Filters<'_> {
    fn matches(&self, job: &Job) -> bool {
        let check = |wanted: Option<&str>, actual: &Option<String>| {
            wanted.is_none_or(|w| actual.as_deref() == Some(w))
        };
        check(self.repository, &job.repository)
            && check(self.workspace, &job.workspace)
            && check(self.user_name, &job.user_name)
            && check(self.source_id, &job.source_id)
    }
}

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: JobsArgs) -> Result<(), CliError> {
    if let Some(id) = args.id {
        let page = single_page(ctx, &catalog::JOB, Call::new().param("id", id)).await?;
        return emit(ctx, out, &page, &args.output);
    }

    let view = View::from_args(&args);
    let filters = Filters {
        repository: args.repository.as_deref(),
        workspace: args.workspace.as_deref(),
        user_name: args.user_name.as_deref(),
        source_id: args.source_id.as_deref(),
    };
    let selected = ctx.route(&catalog::JOBS)?;
    let page = match selected.version {
        ApiVersion::V4 => {
            let call = Call::new()
                .query_opt("status", view.v4_status())
                .query_opt("repository", filters.repository)
                .query_opt("workspace", filters.workspace)
                .query_opt("userName", filters.user_name)
                .query_opt("sourceId", filters.source_id);
            let (raw, listing) = ctx.fetch(selected, call).await?;
            Page::list(raw, listing)
        }
        ApiVersion::V3 => {
            let mut merged: Option<Page<Job>> = None;
            for &state in view.v3_states() {
                debug!(state, "listing v3 jobs");
                let (raw, listing) = ctx.fetch(selected, Call::new().param("state", state)).await?;
                let page = Page::list(raw, listing);
                merged = Some(match merged.take() {
                    Some(mut all) => {
                        all.extend(page);
                        all
                    }
                    None => page,
                });
            }
            let mut page = merged.ok_or_else(|| CliError::usage("no job state selected"))?;
            page.retain(|job| view.v3_keeps(&job.status) && filters.matches(job));
            page
        }
    };
    emit(ctx, out, &page, &args.output)
}
