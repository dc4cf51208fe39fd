//! Command-line surface for `fmeflow`.
//! Kept apart from the handlers so completion generation and tests share the
//! same definitions as the binary.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::api::ApiVersion;
use crate::output::OutputArgs;

#[derive(Parser, Debug)]
#[command(name = "fmeflow", version, about = "Administer an FME Flow server", long_about = None)]
pub struct Cli {
    /// Profile file (default: $XDG_CONFIG_HOME/.fmeflow-cli.yaml, else ~/.config/.fmeflow-cli.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print raw JSON server responses
    #[arg(long, global = true)]
    pub json: bool,

    /// Force the v3 or v4 REST API instead of choosing by server build
    #[arg(long, global = true, value_enum)]
    pub api_version: Option<ApiVersion>,

    /// Log level written to stderr (trace, debug, info, warn, error, off)
    #[arg(long, global = true, env = "FMEFLOW_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "FMEFLOW_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save credentials for a server to the profile
    Login(LoginArgs),
    /// Server information
    Info(ReadArgs),
    /// Liveness or readiness of the server
    Healthcheck(HealthcheckArgs),
    /// Engines connected to the server
    Engines(EnginesArgs),
    /// List jobs or look one up
    Jobs(JobsArgs),
    /// Cancel a running job
    Cancel(CancelArgs),
    /// Submit a workspace to run
    Run(RunArgs),
    /// Repository management
    Repositories(RepositoriesArgs),
    /// Workspaces in a repository
    Workspaces(WorkspacesArgs),
    /// Project management
    Projects(ProjectsArgs),
    /// Deployment parameter management
    #[command(name = "deploymentparameters")]
    DeploymentParameters(DeploymentParametersArgs),
    /// Connection management
    Connections(ConnectionsArgs),
    /// Licensing
    License(LicenseArgs),
    /// Back up the server configuration
    Backup(BackupArgs),
    /// Restore the server configuration
    Restore(RestoreArgs),
    /// Migration tasks
    Migration(MigrationArgs),
    /// Print the client version
    Version,
    /// Generate a shell completion script
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags shared by read-only commands without further options.
#[derive(Args, Debug, Default)]
pub struct ReadArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Server URL, e.g. https://fmeflow.example.com
    pub url: String,
    /// Existing API token; skips token creation
    #[arg(long, conflicts_with_all = ["user", "password_file"])]
    pub token: Option<String>,
    /// User to create a token for
    #[arg(long, short = 'u')]
    pub user: Option<String>,
    /// File holding the password; prompted for when absent
    #[arg(long, requires = "user")]
    pub password_file: Option<PathBuf>,
    /// Lifetime of a created token, in seconds
    #[arg(long, default_value_t = 2_592_000)]
    pub expiration: u64,
}

#[derive(Args, Debug, Default)]
pub struct HealthcheckArgs {
    /// Check readiness to accept work instead of liveness
    #[arg(long)]
    pub ready: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Default)]
pub struct EnginesArgs {
    /// Print only the number of engines
    #[arg(long)]
    pub count: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Default)]
#[command(group(
    ArgGroup::new("selection")
        .args(["id", "running", "queued", "completed", "active", "all", "success", "failure", "cancelled"])
))]
pub struct JobsArgs {
    /// A single job
    #[arg(long)]
    pub id: Option<i64>,
    /// Jobs currently running
    #[arg(long)]
    pub running: bool,
    /// Jobs waiting in a queue
    #[arg(long)]
    pub queued: bool,
    /// Finished jobs
    #[arg(long)]
    pub completed: bool,
    /// Queued and running jobs
    #[arg(long)]
    pub active: bool,
    /// Every job (default)
    #[arg(long)]
    pub all: bool,
    /// Jobs that finished successfully
    #[arg(long)]
    pub success: bool,
    /// Jobs that failed
    #[arg(long)]
    pub failure: bool,
    /// Jobs that were cancelled
    #[arg(long)]
    pub cancelled: bool,
    /// Only jobs from this repository
    #[arg(long, conflicts_with = "id")]
    pub repository: Option<String>,
    /// Only jobs of this workspace
    #[arg(long, conflicts_with = "id")]
    pub workspace: Option<String>,
    /// Only jobs submitted by this user
    #[arg(long, conflicts_with = "id")]
    pub user_name: Option<String>,
    /// Only jobs with this source id
    #[arg(long, conflicts_with = "id")]
    pub source_id: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Job to cancel
    #[arg(long)]
    pub id: i64,
}

#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("queue_flag").args(["queue", "tag"])))]
#[command(group(ArgGroup::new("runtime_flag").args(["max_job_runtime", "time_until_canceled"])))]
#[command(group(ArgGroup::new("queue_time_flag").args(["max_time_in_queue", "time_to_live"])))]
pub struct RunArgs {
    /// Repository holding the workspace
    #[arg(long)]
    pub repository: String,
    /// Workspace to run
    #[arg(long)]
    pub workspace: String,
    /// Run synchronously and print the result
    #[arg(long)]
    pub wait: bool,
    /// Upload this file as the source dataset (synchronous)
    #[arg(long, conflicts_with_all = ["published_parameter_list", "success_topic", "failure_topic", "directive"])]
    pub file: Option<PathBuf>,
    /// Published parameter NAME=VALUE (repeatable)
    #[arg(long)]
    pub published_parameter: Vec<String>,
    /// List-valued published parameter NAME=V1,V2; escape commas as `\,`
    #[arg(long)]
    pub published_parameter_list: Vec<String>,
    /// Queue to submit to
    #[arg(long)]
    pub queue: Option<String>,
    /// Job routing tag (same as --queue)
    #[arg(long)]
    pub tag: Option<String>,
    /// Seconds the job may run before it is cancelled
    #[arg(long)]
    pub max_job_runtime: Option<i64>,
    /// Seconds the job may run before it is cancelled (same as --max-job-runtime)
    #[arg(long)]
    pub time_until_canceled: Option<i64>,
    /// Seconds the job may wait in the queue
    #[arg(long)]
    pub max_time_in_queue: Option<i64>,
    /// Seconds the job may wait in the queue (same as --max-time-in-queue)
    #[arg(long)]
    pub time_to_live: Option<i64>,
    /// Topic notified on success (repeatable)
    #[arg(long)]
    pub success_topic: Vec<String>,
    /// Topic notified on failure (repeatable)
    #[arg(long)]
    pub failure_topic: Vec<String>,
    /// Notification directive NAME=VALUE (repeatable)
    #[arg(long)]
    pub directive: Vec<String>,
    /// Free-text job description
    #[arg(long)]
    pub description: Option<String>,
    /// Notification node name (v3)
    #[arg(long)]
    pub node_name: Option<String>,
    /// Job priority 1-200 (v3)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=200))]
    pub priority: Option<i64>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Default)]
#[command(args_conflicts_with_subcommands = true)]
pub struct RepositoriesArgs {
    #[command(subcommand)]
    pub action: Option<RepositoriesCmd>,
    /// A single repository
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum RepositoriesCmd {
    /// Create a repository
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a repository and everything in it
    Delete {
        #[arg(long)]
        name: String,
        /// Do not ask for confirmation
        #[arg(long)]
        no_prompt: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct WorkspacesArgs {
    /// Repository to list
    #[arg(long)]
    pub repository: String,
    /// A single workspace
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// How a project is addressed; exactly one of the two is given.
#[derive(Args, Debug, Default, Clone)]
#[group(required = true, multiple = false)]
pub struct ProjectRef {
    /// Project id (v4)
    #[arg(long)]
    pub id: Option<String>,
    /// Project name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Default)]
#[command(args_conflicts_with_subcommands = true)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub action: Option<ProjectsCmd>,
    /// A single project by id
    #[arg(long, conflicts_with = "name")]
    pub id: Option<String>,
    /// A single project by name
    #[arg(long)]
    pub name: Option<String>,
    /// Only projects owned by this user
    #[arg(long)]
    pub owner: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCmd {
    /// List the items of a project
    Items {
        #[command(flatten)]
        project: ProjectRef,
        /// Only items of this type (repeatable)
        #[arg(long = "type")]
        item_type: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Export a project package
    Download {
        #[command(flatten)]
        project: ProjectRef,
        /// Destination file
        #[arg(long, short = 'f')]
        file: PathBuf,
        /// Leave credentials and other sensitive values out of the package
        #[arg(long)]
        exclude_sensitive_info: bool,
    },
    /// Import a project package
    Upload(ProjectUploadArgs),
    /// Delete a project
    Delete {
        #[command(flatten)]
        project: ProjectRef,
        /// Also delete the items the project contains
        #[arg(long)]
        all: bool,
        /// Also delete dependencies of the contained items
        #[arg(long, requires = "all")]
        dependencies: bool,
        /// Do not ask for confirmation
        #[arg(long)]
        no_prompt: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProjectUploadArgs {
    /// Project package (.fsproject)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
    /// v3 import mode: INSERT or UPDATE
    #[arg(long)]
    pub import_mode: Option<String>,
    /// v3 project import mode: INSERT or UPDATE
    #[arg(long)]
    pub projects_import_mode: Option<String>,
    /// Replace existing items (v4)
    #[arg(long)]
    pub overwrite: bool,
    /// Hold notifications during the import
    #[arg(long)]
    pub pause_notifications: bool,
    /// Disable imported schedules and automations (v4)
    #[arg(long)]
    pub disable_project_items: bool,
    /// Wait for the import to finish
    #[arg(long)]
    pub wait: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum ParameterType {
    #[default]
    Text,
    Database,
    Web,
}

impl ParameterType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Database => "dbConnection",
            Self::Web => "webConnection",
        }
    }
}

#[derive(Args, Debug, Default)]
#[command(args_conflicts_with_subcommands = true)]
pub struct DeploymentParametersArgs {
    #[command(subcommand)]
    pub action: Option<DeploymentParametersCmd>,
    /// A single deployment parameter
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Value and choice settings shared by create and update.
#[derive(Args, Debug, Default, Clone)]
pub struct ParameterValueArgs {
    /// Parameter value
    #[arg(long)]
    pub value: String,
    /// Database family offered for selection (with --type database)
    #[arg(long)]
    pub database_type: Option<String>,
    /// Web service offered for selection (with --type web, repeatable)
    #[arg(long)]
    pub included_service: Vec<String>,
    /// Web service hidden from selection (with --type web, repeatable)
    #[arg(long)]
    pub excluded_service: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum DeploymentParametersCmd {
    /// Create a deployment parameter
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type", value_enum, default_value_t = ParameterType::Text)]
        parameter_type: ParameterType,
        #[command(flatten)]
        value: ParameterValueArgs,
    },
    /// Change the value of a deployment parameter
    Update {
        #[arg(long)]
        name: String,
        /// New type; the current one is kept when absent
        #[arg(long = "type", value_enum)]
        parameter_type: Option<ParameterType>,
        #[command(flatten)]
        value: ParameterValueArgs,
    },
    /// Delete a deployment parameter
    Delete {
        #[arg(long)]
        name: String,
        /// Do not ask for confirmation
        #[arg(long)]
        no_prompt: bool,
    },
}

#[derive(Args, Debug, Default)]
#[command(args_conflicts_with_subcommands = true)]
pub struct ConnectionsArgs {
    #[command(subcommand)]
    pub action: Option<ConnectionsCmd>,
    /// A single connection
    #[arg(long)]
    pub name: Option<String>,
    /// Only connections of this type (repeatable)
    #[arg(long = "type", conflicts_with = "name")]
    pub connection_type: Vec<String>,
    /// Leave out connections of this type (repeatable)
    #[arg(long, conflicts_with = "name")]
    pub exclude_type: Vec<String>,
    /// Only connections in this category (repeatable)
    #[arg(long, conflicts_with = "name")]
    pub category: Vec<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConnectionsCmd {
    /// Create a connection
    Create {
        #[arg(long)]
        name: String,
        /// Category, e.g. database or basic
        #[arg(long)]
        category: String,
        /// Connection type, e.g. PostgreSQL
        #[arg(long = "type")]
        connection_type: String,
        #[arg(long)]
        authentication_method: Option<String>,
        #[arg(long, requires = "password")]
        username: Option<String>,
        #[arg(long, requires = "username")]
        password: Option<String>,
        /// Connection parameter NAME=VALUE (repeatable)
        #[arg(long)]
        parameter: Vec<String>,
    },
    /// Change selected fields of a connection
    Update {
        #[arg(long)]
        name: String,
        /// New category; the current one is kept when absent
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        authentication_method: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Parameter NAME=VALUE merged into the current ones (repeatable)
        #[arg(long)]
        parameter: Vec<String>,
    },
    /// Delete a connection
    Delete {
        #[arg(long)]
        name: String,
        /// Do not ask for confirmation
        #[arg(long)]
        no_prompt: bool,
    },
}

#[derive(Args, Debug)]
pub struct LicenseArgs {
    #[command(subcommand)]
    pub action: LicenseCmd,
}

#[derive(Subcommand, Debug)]
pub enum LicenseCmd {
    /// License status
    Status(ReadArgs),
    /// Machine key of the server
    Machinekey,
    /// System code of the server
    Systemcode,
    /// Request a license from Safe Software
    Request(LicenseRequestArgs),
    /// Generate a license request file
    Requestfile {
        #[command(flatten)]
        details: LicenseDetails,
        /// Write the request file here instead of printing it
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },
    /// Refresh the installed license
    Refresh(LicenseRefreshArgs),
}

/// Registration details sent with a license request.
#[derive(Args, Debug, Default, Clone)]
pub struct LicenseDetails {
    #[arg(long, required = true)]
    pub first_name: Option<String>,
    #[arg(long, required = true)]
    pub last_name: Option<String>,
    #[arg(long, required = true)]
    pub email: Option<String>,
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub sales_source: Option<String>,
    #[arg(long)]
    pub subscribe_to_updates: bool,
}

#[derive(Args, Debug, Default)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct LicenseRequestArgs {
    #[command(subcommand)]
    pub action: Option<StatusCmd>,
    #[command(flatten)]
    pub details: LicenseDetails,
    /// Wait for the request to finish
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug, Default)]
#[command(args_conflicts_with_subcommands = true)]
pub struct LicenseRefreshArgs {
    #[command(subcommand)]
    pub action: Option<StatusCmd>,
    /// Wait for the refresh to finish
    #[arg(long)]
    pub wait: bool,
}

#[derive(Subcommand, Debug)]
pub enum StatusCmd {
    /// Status of the last request
    Status(ReadArgs),
}

pub const DEFAULT_BACKUP_FILE: &str = "ServerConfigPackage.fsconfig";
pub const DEFAULT_SHARED_RESOURCE: &str = "FME_SHAREDRESOURCE_BACKUP";

#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Local file to download the backup to
    #[arg(long, short = 'f', default_value = DEFAULT_BACKUP_FILE, conflicts_with = "resource")]
    pub file: PathBuf,
    /// Write the backup to a shared resource on the server instead
    #[arg(long)]
    pub resource: bool,
    /// Shared resource to write to
    #[arg(long, default_value = DEFAULT_SHARED_RESOURCE, requires = "resource")]
    pub resource_name: String,
    /// Package path inside the shared resource
    #[arg(long, default_value = DEFAULT_BACKUP_FILE)]
    pub export_package: String,
    /// Topic notified on success
    #[arg(long, requires = "resource")]
    pub success_topic: Option<String>,
    /// Topic notified on failure
    #[arg(long, requires = "resource")]
    pub failure_topic: Option<String>,
    /// Wait for a resource backup to finish
    #[arg(long, requires = "resource")]
    pub wait: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").args(["file", "resource"]).required(true)))]
pub struct RestoreArgs {
    /// Backup package to upload
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
    /// Restore from a package stored in a shared resource
    #[arg(long)]
    pub resource: bool,
    /// Shared resource holding the package
    #[arg(long, default_value = DEFAULT_SHARED_RESOURCE, requires = "resource")]
    pub resource_name: String,
    /// Package path inside the shared resource
    #[arg(long, requires = "resource")]
    pub package_path: Option<String>,
    /// INSERT or UPDATE
    #[arg(long)]
    pub import_mode: Option<String>,
    /// Hold notifications during the restore
    #[arg(long)]
    pub pause_notifications: bool,
    /// INSERT or UPDATE for projects
    #[arg(long)]
    pub projects_import_mode: Option<String>,
    /// Topic notified on success
    #[arg(long)]
    pub success_topic: Option<String>,
    /// Topic notified on failure
    #[arg(long)]
    pub failure_topic: Option<String>,
    /// Wait for the restore to finish
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct MigrationArgs {
    #[command(subcommand)]
    pub action: MigrationCmd,
}

#[derive(Subcommand, Debug)]
pub enum MigrationCmd {
    /// Backup and restore tasks
    Tasks(MigrationTasksArgs),
}

#[derive(Args, Debug, Default)]
pub struct MigrationTasksArgs {
    /// A single task
    #[arg(long)]
    pub id: Option<i64>,
    /// Print the task log instead
    #[arg(long, requires = "id")]
    pub log: bool,
    /// Write the log to this file
    #[arg(long, short = 'f', requires = "log")]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("fmeflow").chain(args.iter().copied()))
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn job_selection_flags_are_exclusive() {
        let err = parse(&["jobs", "--running", "--queued"]).expect_err("two selections");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert!(parse(&["jobs", "--queued"]).is_ok());
    }

    #[test]
    fn run_aliases_are_exclusive() {
        let base = ["run", "--repository", "r", "--workspace", "w.fmw"];
        for pair in [
            ["--queue", "--tag"],
            ["--max-job-runtime", "--time-until-canceled"],
            ["--max-time-in-queue", "--time-to-live"],
        ] {
            let mut args = base.to_vec();
            args.extend([pair[0], "1", pair[1], "2"]);
            let err = parse(&args).expect_err("conflict");
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{pair:?}");
        }
    }

    #[test]
    fn login_token_excludes_user() {
        let err = parse(&["login", "https://s.example", "--token", "t", "--user", "admin"])
            .expect_err("conflict");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn backup_file_and_resource_are_exclusive() {
        let err = parse(&["backup", "--file", "a.fsconfig", "--resource"]).expect_err("conflict");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        let cli = parse(&["backup"]).expect("defaults");
        match cli.command {
            Commands::Backup(args) => assert_eq!(args.file, PathBuf::from(DEFAULT_BACKUP_FILE)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn restore_needs_a_source() {
        let err = parse(&["restore"]).expect_err("missing source");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn project_delete_dependencies_require_all() {
        let err = parse(&["projects", "delete", "--id", "X", "--dependencies"])
            .expect_err("needs --all");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(parse(&["projects", "delete", "--id", "X", "--all", "--dependencies"]).is_ok());
    }

    #[test]
    fn parameter_type_is_validated() {
        let err = parse(&[
            "deploymentparameters",
            "create",
            "--name",
            "p",
            "--value",
            "v",
            "--type",
            "bogus",
        ])
        .expect_err("invalid type");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn license_status_needs_no_details() {
        assert!(parse(&["license", "request", "status"]).is_ok());
        let err = parse(&["license", "request"]).expect_err("details required");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn invalid_custom_columns_is_a_usage_error() {
        for spec in ["custom-columns=", "custom-columns=FOO.bar"] {
            let err = parse(&["engines", "--output", spec]).expect_err(spec);
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{spec}");
        }
    }
}
