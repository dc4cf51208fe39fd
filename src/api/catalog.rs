//! Operation descriptors for every server call the client makes.
//!
//! Thresholds and paths live here as data; handlers never branch on build
//! numbers themselves.

use fmeflow_api_types::model::{
    Connection, DeploymentParameter, Engine, Health, Info, Job, JobResult, LicenseStatus,
    LogRecord, MachineKey, MigrationTask, Project, ProjectItem, Repository, RequestStatus,
    ServerVersion, SystemCode, TokenGrant, Workspace,
};
use fmeflow_api_types::{Listing, TaskHandle, v3, v4};
use serde_json::Value;

use super::{Accept, Decoder, Encoding, Endpoint, Operation, Verb, ignore, list, object, single};

/// First builds serving each family of v4 endpoints.
pub mod build {
    pub const DEPLOYMENT_PARAMETERS: u32 = 23170;
    pub const PROJECT_UPLOAD: u32 = 23766;
    pub const JOBS: u32 = 25208;
    /// Login, info, version, healthcheck, repositories, workspaces, projects.
    pub const CORE: u32 = 25300;
    /// Backup, restore, migration tasks and licensing.
    pub const MIGRATION: u32 = 26000;
}

const OK: &[u16] = &[200];
const CREATED: &[u16] = &[200, 201];
const ACCEPTED: &[u16] = &[200, 202];
const NO_CONTENT: &[u16] = &[200, 204];

const fn get<T>(path: &'static str, decode: Decoder<T>) -> Endpoint<T> {
    Endpoint {
        verb: Verb::Get,
        path,
        encoding: Encoding::None,
        accept: Accept::Json,
        success: OK,
        decode,
    }
}

const fn send<T>(
    verb: Verb,
    path: &'static str,
    encoding: Encoding,
    success: &'static [u16],
    decode: Decoder<T>,
) -> Endpoint<T> {
    Endpoint {
        verb,
        path,
        encoding,
        accept: Accept::Json,
        success,
        decode,
    }
}

impl<T> Endpoint<T> {
    const fn accepting(self, accept: Accept) -> Self {
        Endpoint { accept, ..self }
    }
}

/// v3 migration logs are plain text read from the raw body.
#[allow(clippy::unnecessary_wraps, clippy::needless_pass_by_value)]
fn text_log(_: Value) -> Result<Listing<LogRecord>, serde_json::Error> {
    Ok(Listing::default())
}

// ---- session ----

pub static BUILD_PROBE: Operation<ServerVersion> = Operation {
    name: "version probe",
    since_build: Some(build::CORE),
    v3: Some(get("/fmerest/v3/info", object::<v3::Info, ServerVersion>)),
    v4: Some(get("/fmeapiv4/version", object::<v4::Version, ServerVersion>)),
};

pub static TOKEN_CREATE: Operation<TokenGrant> = Operation {
    name: "token creation",
    since_build: Some(build::CORE),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/tokens",
        Encoding::Json,
        CREATED,
        object::<v3::TokenGrant, TokenGrant>,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/tokens",
        Encoding::Json,
        CREATED,
        object::<v4::TokenGrant, TokenGrant>,
    )),
};

// ---- server ----

pub static INFO: Operation<Listing<Info>> = Operation {
    name: "info",
    since_build: Some(build::CORE),
    v3: Some(get("/fmerest/v3/info", single::<v3::Info, Info>)),
    v4: Some(get("/fmeapiv4/info", single::<v4::Info, Info>)),
};

pub static HEALTHCHECK: Operation<Listing<Health>> = Operation {
    name: "healthcheck",
    since_build: Some(build::CORE),
    v3: Some(get("/fmerest/v3/healthcheck", single::<v3::Health, Health>)),
    v4: Some(get(
        "/fmeapiv4/healthcheck/{probe}",
        single::<v4::Health, Health>,
    )),
};

pub static ENGINES: Operation<Listing<Engine>> = Operation {
    name: "engines",
    since_build: Some(build::JOBS),
    v3: Some(get(
        "/fmerest/v3/transformations/engines",
        list::<v3::Engine, Engine>,
    )),
    v4: Some(get("/fmeapiv4/engines", list::<v4::Engine, Engine>)),
};

// ---- jobs ----

pub static JOBS: Operation<Listing<Job>> = Operation {
    name: "jobs",
    since_build: Some(build::JOBS),
    v3: Some(get(
        "/fmerest/v3/transformations/jobs/{state}",
        list::<v3::Job, Job>,
    )),
    v4: Some(get("/fmeapiv4/jobs", list::<v4::Job, Job>)),
};

pub static JOB: Operation<Listing<Job>> = Operation {
    name: "job lookup",
    since_build: Some(build::JOBS),
    v3: Some(get(
        "/fmerest/v3/transformations/jobs/id/{id}",
        single::<v3::Job, Job>,
    )),
    v4: Some(get("/fmeapiv4/jobs/{id}", single::<v4::Job, Job>)),
};

pub static JOB_CANCEL: Operation<()> = Operation {
    name: "job cancellation",
    since_build: Some(build::JOBS),
    v3: Some(send(
        Verb::Delete,
        "/fmerest/v3/transformations/jobs/running/{id}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/jobs/{id}/cancel",
        Encoding::None,
        &[200, 202, 204],
        ignore,
    )),
};

pub static JOB_SUBMIT: Operation<TaskHandle> = Operation {
    name: "job submission",
    since_build: Some(build::JOBS),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/transformations/submit/{repository}/{workspace}",
        Encoding::Json,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/jobs",
        Encoding::Json,
        &[200, 201, 202],
        object::<TaskHandle, TaskHandle>,
    )),
};

pub static JOB_TRANSACT: Operation<Listing<JobResult>> = Operation {
    name: "synchronous job run",
    since_build: Some(build::JOBS),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/transformations/transact/{repository}/{workspace}",
        Encoding::Json,
        &[200, 422],
        single::<v3::JobResult, JobResult>,
    )),
    v4: None,
};

pub static JOB_TRANSACT_DATA: Operation<Listing<JobResult>> = Operation {
    name: "job run with source data",
    since_build: None,
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/transformations/transactdata/{repository}/{workspace}",
        Encoding::Binary,
        &[200, 422],
        single::<v3::JobResult, JobResult>,
    )),
    v4: None,
};

// ---- repositories & workspaces ----

pub static REPOSITORIES: Operation<Listing<Repository>> = Operation {
    name: "repositories",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/repositories",
        list::<v3::Repository, Repository>,
    )),
    v4: Some(get(
        "/fmeapiv4/repositories",
        list::<v4::Repository, Repository>,
    )),
};

pub static REPOSITORY: Operation<Listing<Repository>> = Operation {
    name: "repository lookup",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/repositories/{repository}",
        single::<v3::Repository, Repository>,
    )),
    v4: Some(get(
        "/fmeapiv4/repositories/{repository}",
        single::<v4::Repository, Repository>,
    )),
};

pub static REPOSITORY_CREATE: Operation<()> = Operation {
    name: "repository creation",
    since_build: Some(build::CORE),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/repositories",
        Encoding::Form,
        CREATED,
        ignore,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/repositories",
        Encoding::Json,
        CREATED,
        ignore,
    )),
};

pub static REPOSITORY_DELETE: Operation<()> = Operation {
    name: "repository deletion",
    since_build: Some(build::CORE),
    v3: Some(send(
        Verb::Delete,
        "/fmerest/v3/repositories/{repository}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
    v4: Some(send(
        Verb::Delete,
        "/fmeapiv4/repositories/{repository}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
};

pub static WORKSPACES: Operation<Listing<Workspace>> = Operation {
    name: "workspaces",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/repositories/{repository}/items",
        list::<v3::RepositoryItem, Workspace>,
    )),
    v4: Some(get(
        "/fmeapiv4/repositories/{repository}/items",
        list::<v4::RepositoryItem, Workspace>,
    )),
};

pub static WORKSPACE: Operation<Listing<Workspace>> = Operation {
    name: "workspace lookup",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/repositories/{repository}/items/{workspace}",
        single::<v3::RepositoryItem, Workspace>,
    )),
    v4: Some(get(
        "/fmeapiv4/repositories/{repository}/items/{workspace}",
        single::<v4::RepositoryItem, Workspace>,
    )),
};

// ---- projects ----

pub static PROJECTS: Operation<Listing<Project>> = Operation {
    name: "projects",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/projects/projects",
        list::<v3::Project, Project>,
    )),
    v4: Some(get("/fmeapiv4/projects", list::<v4::Project, Project>)),
};

/// v3 addresses projects by name, v4 by id.
pub static PROJECT: Operation<Listing<Project>> = Operation {
    name: "project lookup",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/projects/projects/{project}",
        single::<v3::Project, Project>,
    )),
    v4: Some(get(
        "/fmeapiv4/projects/{project}",
        single::<v4::Project, Project>,
    )),
};

pub static PROJECT_ITEMS: Operation<Listing<ProjectItem>> = Operation {
    name: "project items",
    since_build: Some(build::CORE),
    v3: Some(get(
        "/fmerest/v3/projects/projects/{project}/items",
        list::<v3::ProjectItem, ProjectItem>,
    )),
    v4: Some(get(
        "/fmeapiv4/projects/{project}/items",
        list::<v4::ProjectItem, ProjectItem>,
    )),
};

pub static PROJECT_EXPORT: Operation<()> = Operation {
    name: "project download",
    since_build: Some(build::CORE),
    v3: Some(
        send(
            Verb::Post,
            "/fmerest/v3/projects/projects/{project}/export/download",
            Encoding::Form,
            OK,
            ignore,
        )
        .accepting(Accept::OctetStream),
    ),
    v4: Some(
        send(
            Verb::Post,
            "/fmeapiv4/projects/{project}/export",
            Encoding::Json,
            OK,
            ignore,
        )
        .accepting(Accept::OctetStream),
    ),
};

pub static PROJECT_UPLOAD: Operation<TaskHandle> = Operation {
    name: "project upload",
    since_build: Some(build::PROJECT_UPLOAD),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/projects/import/upload",
        Encoding::Binary,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/migrations/imports/upload",
        Encoding::Binary,
        &[200, 201, 202],
        object::<TaskHandle, TaskHandle>,
    )),
};

pub static PROJECT_IMPORT_RUN: Operation<()> = Operation {
    name: "project import",
    since_build: None,
    v3: None,
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/migrations/imports/{id}/run",
        Encoding::Json,
        &[200, 202, 204],
        ignore,
    )),
};

pub static PROJECT_IMPORT_STATUS: Operation<RequestStatus> = Operation {
    name: "project import status",
    since_build: None,
    v3: None,
    v4: Some(get(
        "/fmeapiv4/migrations/imports/{id}",
        object::<v4::RequestStatus, RequestStatus>,
    )),
};

pub static PROJECT_DELETE: Operation<()> = Operation {
    name: "project deletion",
    since_build: Some(build::CORE),
    v3: Some(send(
        Verb::Delete,
        "/fmerest/v3/projects/projects/{project}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
    v4: Some(send(
        Verb::Delete,
        "/fmeapiv4/projects/{project}/delete",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
};

pub static PROJECT_DELETE_ALL: Operation<()> = Operation {
    name: "project deletion with contents",
    since_build: Some(build::CORE),
    v3: None,
    v4: Some(send(
        Verb::Delete,
        "/fmeapiv4/projects/{project}/delete-all",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
};

// ---- deployment parameters ----

pub static DEPLOYMENT_PARAMETERS: Operation<Listing<DeploymentParameter>> = Operation {
    name: "deployment parameters",
    since_build: Some(build::DEPLOYMENT_PARAMETERS),
    v3: Some(get(
        "/fmerest/v3/deploymentparameters",
        list::<v3::DeploymentParameter, DeploymentParameter>,
    )),
    v4: Some(get(
        "/fmeapiv4/deploymentparameters",
        list::<v4::DeploymentParameter, DeploymentParameter>,
    )),
};

pub static DEPLOYMENT_PARAMETER: Operation<Listing<DeploymentParameter>> = Operation {
    name: "deployment parameter lookup",
    since_build: Some(build::DEPLOYMENT_PARAMETERS),
    v3: Some(get(
        "/fmerest/v3/deploymentparameters/{name}",
        single::<v3::DeploymentParameter, DeploymentParameter>,
    )),
    v4: Some(get(
        "/fmeapiv4/deploymentparameters/{name}",
        single::<v4::DeploymentParameter, DeploymentParameter>,
    )),
};

pub static DEPLOYMENT_PARAMETER_CREATE: Operation<()> = Operation {
    name: "deployment parameter creation",
    since_build: Some(build::DEPLOYMENT_PARAMETERS),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/deploymentparameters",
        Encoding::Form,
        CREATED,
        ignore,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/deploymentparameters",
        Encoding::Json,
        CREATED,
        ignore,
    )),
};

pub static DEPLOYMENT_PARAMETER_UPDATE: Operation<()> = Operation {
    name: "deployment parameter update",
    since_build: Some(build::DEPLOYMENT_PARAMETERS),
    v3: Some(send(
        Verb::Put,
        "/fmerest/v3/deploymentparameters/{name}",
        Encoding::Form,
        NO_CONTENT,
        ignore,
    )),
    v4: Some(send(
        Verb::Put,
        "/fmeapiv4/deploymentparameters/{name}",
        Encoding::Json,
        NO_CONTENT,
        ignore,
    )),
};

pub static DEPLOYMENT_PARAMETER_DELETE: Operation<()> = Operation {
    name: "deployment parameter deletion",
    since_build: Some(build::DEPLOYMENT_PARAMETERS),
    v3: Some(send(
        Verb::Delete,
        "/fmerest/v3/deploymentparameters/{name}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
    v4: Some(send(
        Verb::Delete,
        "/fmeapiv4/deploymentparameters/{name}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
};

// ---- connections (v4 only) ----

pub static CONNECTIONS: Operation<Listing<Connection>> = Operation {
    name: "connections",
    since_build: None,
    v3: None,
    v4: Some(get(
        "/fmeapiv4/connections",
        list::<v4::Connection, Connection>,
    )),
};

pub static CONNECTION: Operation<Listing<Connection>> = Operation {
    name: "connection lookup",
    since_build: None,
    v3: None,
    v4: Some(get(
        "/fmeapiv4/connections/{name}",
        single::<v4::Connection, Connection>,
    )),
};

pub static CONNECTION_CREATE: Operation<()> = Operation {
    name: "connection creation",
    since_build: None,
    v3: None,
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/connections",
        Encoding::Json,
        CREATED,
        ignore,
    )),
};

pub static CONNECTION_UPDATE: Operation<()> = Operation {
    name: "connection update",
    since_build: None,
    v3: None,
    v4: Some(send(
        Verb::Put,
        "/fmeapiv4/connections/{name}",
        Encoding::Json,
        NO_CONTENT,
        ignore,
    )),
};

pub static CONNECTION_DELETE: Operation<()> = Operation {
    name: "connection deletion",
    since_build: None,
    v3: None,
    v4: Some(send(
        Verb::Delete,
        "/fmeapiv4/connections/{name}",
        Encoding::None,
        NO_CONTENT,
        ignore,
    )),
};

// ---- licensing ----

pub static LICENSE_STATUS: Operation<Listing<LicenseStatus>> = Operation {
    name: "license status",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/licensing/license/status",
        single::<v3::LicenseStatus, LicenseStatus>,
    )),
    v4: Some(get(
        "/fmeapiv4/license/status",
        single::<v4::LicenseStatus, LicenseStatus>,
    )),
};

pub static LICENSE_MACHINE_KEY: Operation<MachineKey> = Operation {
    name: "machine key",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/licensing/machinekey",
        object::<v3::MachineKey, MachineKey>,
    )),
    v4: Some(get(
        "/fmeapiv4/license/machinekey",
        object::<v4::MachineKey, MachineKey>,
    )),
};

pub static LICENSE_SYSTEM_CODE: Operation<SystemCode> = Operation {
    name: "system code",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/licensing/systemcode",
        object::<v3::SystemCode, SystemCode>,
    )),
    v4: Some(get(
        "/fmeapiv4/license/systemcode",
        object::<v4::SystemCode, SystemCode>,
    )),
};

pub static LICENSE_REQUEST: Operation<()> = Operation {
    name: "license request",
    since_build: Some(build::MIGRATION),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/licensing/request",
        Encoding::Form,
        ACCEPTED,
        ignore,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/license/request",
        Encoding::Json,
        ACCEPTED,
        ignore,
    )),
};

pub static LICENSE_REQUEST_STATUS: Operation<RequestStatus> = Operation {
    name: "license request status",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/licensing/request/status",
        object::<v3::RequestStatus, RequestStatus>,
    )),
    v4: Some(get(
        "/fmeapiv4/license/request/status",
        object::<v4::RequestStatus, RequestStatus>,
    )),
};

pub static LICENSE_REQUEST_FILE: Operation<()> = Operation {
    name: "license request file",
    since_build: Some(build::MIGRATION),
    v3: Some(
        send(
            Verb::Post,
            "/fmerest/v3/licensing/requestfile",
            Encoding::Form,
            OK,
            ignore,
        )
        .accepting(Accept::Text),
    ),
    v4: Some(
        send(
            Verb::Post,
            "/fmeapiv4/license/requestfile",
            Encoding::Json,
            OK,
            ignore,
        )
        .accepting(Accept::Text),
    ),
};

pub static LICENSE_REFRESH: Operation<()> = Operation {
    name: "license refresh",
    since_build: Some(build::MIGRATION),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/licensing/refresh",
        Encoding::None,
        ACCEPTED,
        ignore,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/license/refresh",
        Encoding::None,
        ACCEPTED,
        ignore,
    )),
};

pub static LICENSE_REFRESH_STATUS: Operation<RequestStatus> = Operation {
    name: "license refresh status",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/licensing/refresh/status",
        object::<v3::RequestStatus, RequestStatus>,
    )),
    v4: Some(get(
        "/fmeapiv4/license/refresh/status",
        object::<v4::RequestStatus, RequestStatus>,
    )),
};

// ---- backup, restore, migration tasks ----

pub static BACKUP_DOWNLOAD: Operation<()> = Operation {
    name: "backup download",
    since_build: Some(build::MIGRATION),
    v3: Some(get("/fmerest/v3/migration/backup/download", ignore).accepting(Accept::OctetStream)),
    v4: Some(
        send(
            Verb::Post,
            "/fmeapiv4/migrations/backup/download",
            Encoding::Json,
            OK,
            ignore,
        )
        .accepting(Accept::OctetStream),
    ),
};

pub static BACKUP_RESOURCE: Operation<TaskHandle> = Operation {
    name: "backup to resource",
    since_build: Some(build::MIGRATION),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/migration/backup/resource",
        Encoding::Form,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/migrations/backup/resource",
        Encoding::Json,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
};

pub static RESTORE_UPLOAD: Operation<TaskHandle> = Operation {
    name: "restore upload",
    since_build: Some(build::MIGRATION),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/migration/restore/upload",
        Encoding::Binary,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/migrations/restore/upload",
        Encoding::Binary,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
};

pub static RESTORE_RESOURCE: Operation<TaskHandle> = Operation {
    name: "restore from resource",
    since_build: Some(build::MIGRATION),
    v3: Some(send(
        Verb::Post,
        "/fmerest/v3/migration/restore/resource",
        Encoding::Form,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
    v4: Some(send(
        Verb::Post,
        "/fmeapiv4/migrations/restore/resource",
        Encoding::Json,
        ACCEPTED,
        object::<TaskHandle, TaskHandle>,
    )),
};

pub static MIGRATION_TASKS: Operation<Listing<MigrationTask>> = Operation {
    name: "migration tasks",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/migration/tasks",
        list::<v3::MigrationTask, MigrationTask>,
    )),
    v4: Some(get(
        "/fmeapiv4/migrations/tasks",
        list::<v4::MigrationTask, MigrationTask>,
    )),
};

pub static MIGRATION_TASK: Operation<Listing<MigrationTask>> = Operation {
    name: "migration task lookup",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/migration/tasks/id/{id}",
        single::<v3::MigrationTask, MigrationTask>,
    )),
    v4: Some(get(
        "/fmeapiv4/migrations/tasks/{id}",
        single::<v4::MigrationTask, MigrationTask>,
    )),
};

pub static MIGRATION_TASK_STATUS: Operation<RequestStatus> = Operation {
    name: "migration task status",
    since_build: Some(build::MIGRATION),
    v3: Some(get(
        "/fmerest/v3/migration/tasks/id/{id}",
        object::<v3::MigrationTask, RequestStatus>,
    )),
    v4: Some(get(
        "/fmeapiv4/migrations/tasks/{id}",
        object::<v4::MigrationTask, RequestStatus>,
    )),
};

pub static MIGRATION_LOG: Operation<Listing<LogRecord>> = Operation {
    name: "migration task log",
    since_build: Some(build::MIGRATION),
    v3: Some(get("/fmerest/v3/migration/tasks/id/{id}/log", text_log).accepting(Accept::OctetStream)),
    v4: Some(get(
        "/fmeapiv4/migrations/tasks/{id}/log",
        list::<v4::LogRecord, LogRecord>,
    )),
};
