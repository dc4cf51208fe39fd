//! Schemas of the `/fmeapiv4` surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::PublishedParameter;
use crate::model;
use crate::timestamp::lenient;

// ---- responses ----

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default, with = "lenient")]
    pub current_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub license_management: Option<bool>,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl From<Info> for model::Info {
    fn from(v: Info) -> Self {
        Self {
            current_time: v.current_time,
            license_management: v.license_management,
            build: v.build,
            time_zone: v.time_zone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub build_number: u32,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl From<Version> for model::ServerVersion {
    fn from(v: Version) -> Self {
        Self {
            build_number: Some(v.build_number),
            build: v.build,
            version: v.version,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<Health> for model::Health {
    fn from(v: Health) -> Self {
        Self {
            status: v.status,
            message: v.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    pub name: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default, rename = "type")]
    pub engine_type: Option<String>,
    #[serde(default)]
    pub build_number: Option<u32>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub current_job_id: Option<i64>,
    #[serde(default)]
    pub queues: Vec<String>,
}

impl From<Engine> for model::Engine {
    fn from(v: Engine) -> Self {
        Self {
            name: v.name,
            host_name: v.host_name,
            engine_type: v.engine_type,
            build_number: v.build_number,
            platform: v.platform,
            current_job_id: v.current_job_id,
            queues: v.queues,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub engine_name: Option<String>,
    #[serde(default)]
    pub engine_host: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default, with = "lenient")]
    pub time_queued: Option<OffsetDateTime>,
    #[serde(default, with = "lenient")]
    pub time_started: Option<OffsetDateTime>,
    #[serde(default, with = "lenient")]
    pub time_finished: Option<OffsetDateTime>,
}

impl From<Job> for model::Job {
    fn from(v: Job) -> Self {
        Self {
            id: v.id,
            workspace: v.workspace,
            repository: v.repository,
            status: v.status,
            engine_name: v.engine_name,
            engine_host: v.engine_host,
            user_name: v.user_name,
            queue: v.queue,
            description: v.description,
            source_id: v.source_id,
            time_queued: v.time_queued,
            time_started: v.time_started,
            time_finished: v.time_finished,
        }
    }
}

impl From<Job> for model::RequestStatus {
    fn from(v: Job) -> Self {
        Self::new(v.status, v.description)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub sharable: Option<bool>,
}

impl From<Repository> for model::Repository {
    fn from(v: Repository) -> Self {
        Self {
            name: v.name,
            description: v.description,
            owner: v.owner,
            sharable: v.sharable,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryItem {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "lenient")]
    pub last_save_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub last_save_build: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl From<RepositoryItem> for model::Workspace {
    fn from(v: RepositoryItem) -> Self {
        Self {
            name: v.name,
            title: v.title,
            item_type: v.item_type,
            description: v.description,
            last_save_date: v.last_save_date,
            last_save_build: v.last_save_build,
            user_name: v.owner,
            file_size: v.file_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, with = "lenient")]
    pub last_updated: Option<OffsetDateTime>,
}

impl From<Project> for model::Project {
    fn from(v: Project) -> Self {
        Self {
            id: Some(v.id),
            name: v.name,
            owner: v.owner,
            description: v.description,
            version: v.version,
            last_updated: v.last_updated,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub owner: Option<String>,
}

impl From<ProjectItem> for model::ProjectItem {
    fn from(v: ProjectItem) -> Self {
        Self {
            id: v.id,
            name: v.name,
            item_type: v.item_type,
            owner: v.owner,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentParameter {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "type")]
    pub parameter_type: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, with = "lenient")]
    pub updated: Option<OffsetDateTime>,
}

impl From<DeploymentParameter> for model::DeploymentParameter {
    fn from(v: DeploymentParameter) -> Self {
        Self {
            name: v.name,
            value: v.value,
            parameter_type: v.parameter_type,
            owner: v.owner,
            updated: v.updated,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "type")]
    pub connection_type: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub authentication_method: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

impl From<Connection> for model::Connection {
    fn from(v: Connection) -> Self {
        let parameters = v
            .parameters
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();
        Self {
            name: v.name,
            category: v.category,
            connection_type: v.connection_type,
            owner: v.owner,
            authentication_method: v.authentication_method,
            username: v.username,
            parameters,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationTask {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "lenient")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "lenient")]
    pub end_date: Option<OffsetDateTime>,
}

impl From<MigrationTask> for model::MigrationTask {
    fn from(v: MigrationTask) -> Self {
        Self {
            id: v.id,
            task_type: v.task_type,
            user_name: v.user_name,
            status: v.status,
            package_name: v.package_name,
            result: v.message,
            start_date: v.start_date,
            finished_date: v.end_date,
        }
    }
}

impl From<MigrationTask> for model::RequestStatus {
    fn from(v: MigrationTask) -> Self {
        Self::new(v.status, v.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    #[serde(default, with = "lenient")]
    pub time: Option<OffsetDateTime>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl From<LogRecord> for model::LogRecord {
    fn from(v: LogRecord) -> Self {
        Self {
            time: v.time,
            level: v.level,
            message: v.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatus {
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub maximum_engines: Option<i64>,
    #[serde(default)]
    pub maximum_authors: Option<i64>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub expired: Option<bool>,
    #[serde(default)]
    pub licensed: Option<bool>,
    #[serde(default)]
    pub evaluation: Option<bool>,
}

impl From<LicenseStatus> for model::LicenseStatus {
    fn from(v: LicenseStatus) -> Self {
        Self {
            expiry_date: v.expiry_date,
            maximum_engines: v.maximum_engines,
            maximum_authors: v.maximum_authors,
            serial_number: v.serial_number,
            expired: v.expired,
            licensed: v.licensed,
            evaluation: v.evaluation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineKey {
    pub machine_key: String,
}

impl From<MachineKey> for model::MachineKey {
    fn from(v: MachineKey) -> Self {
        Self {
            machine_key: v.machine_key,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemCode {
    pub system_code: String,
}

impl From<SystemCode> for model::SystemCode {
    fn from(v: SystemCode) -> Self {
        Self {
            system_code: v.system_code,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<RequestStatus> for model::RequestStatus {
    fn from(v: RequestStatus) -> Self {
        Self::new(v.status, v.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub token: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

impl From<TokenGrant> for model::TokenGrant {
    fn from(v: TokenGrant) -> Self {
        Self {
            token: v.token,
            name: v.name,
            expiration_date: v.expiration_date,
        }
    }
}

// ---- requests ----

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub name: String,
    pub description: String,
    pub expiration_timeout: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmission {
    pub repository: String,
    pub workspace: String,
    pub published_parameters: Vec<PublishedParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_job_runtime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_job_runtime_units: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_in_queue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_in_queue_units: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub success_topics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_topics: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub directives: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCreate {
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub connection_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionUpdate {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

/// Restricts the values a database or web-connection parameter may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSettings {
    pub choice_set: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_services: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentParameterCreate {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_settings: Option<ChoiceSettings>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentParameterUpdate {
    pub value: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_settings: Option<ChoiceSettings>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExport {
    pub exclude_sensitive_info: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRun {
    pub overwrite: bool,
    pub pause_notifications: bool,
    pub disable_project_items: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDownload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_package: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResource {
    pub resource_name: String,
    pub export_package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_topic: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResource {
    pub resource_name: String,
    pub import_package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_mode: Option<String>,
    pub pause_notifications: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_import_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_topic: Option<String>,
}
