//! Schemas of the legacy `/fmerest/v3` surface.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::model;
use crate::timestamp::lenient;
use crate::{NameValue, PublishedParameter, parse_build_number};

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

impl From<Info> for model::ServerVersion {
    fn from(v: Info) -> Self {
        Self {
            build_number: parse_build_number(&v.build),
            build: Some(v.build),
            version: None,
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
    pub instance_name: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default, rename = "type")]
    pub engine_type: Option<String>,
    #[serde(default)]
    pub build_number: Option<u32>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default, rename = "currentJobID")]
    pub current_job_id: Option<i64>,
    #[serde(default)]
    pub assigned_queues: Vec<String>,
}

impl From<Engine> for model::Engine {
    fn from(v: Engine) -> Self {
        Self {
            name: v.instance_name,
            host_name: v.host_name,
            engine_type: v.engine_type,
            build_number: v.build_number,
            platform: v.platform,
            current_job_id: v.current_job_id.filter(|id| *id >= 0),
            queues: v.assigned_queues,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobRequest {
    #[serde(default, rename = "TMDirectives")]
    pub tm_directives: Option<TmDirectives>,
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
    pub description: Option<String>,
    #[serde(default, rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(default)]
    pub request: JobRequest,
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
            queue: v.request.tm_directives.and_then(|d| d.tag),
            description: v.description,
            source_id: v.source_id,
            time_queued: v.time_queued,
            time_started: v.time_started,
            time_finished: v.time_finished,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub num_features_output: Option<i64>,
    #[serde(default, with = "lenient")]
    pub time_requested: Option<OffsetDateTime>,
    #[serde(default, with = "lenient")]
    pub time_finished: Option<OffsetDateTime>,
}

impl From<JobResult> for model::JobResult {
    fn from(v: JobResult) -> Self {
        Self {
            id: v.id,
            status: v.status,
            status_message: v.status_message,
            features_output: v.num_features_output,
            time_requested: v.time_requested,
            time_finished: v.time_finished,
        }
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
    pub user_name: Option<String>,
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
            user_name: v.user_name,
            file_size: v.file_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, with = "lenient")]
    pub last_save_date: Option<OffsetDateTime>,
}

impl From<Project> for model::Project {
    fn from(v: Project) -> Self {
        Self {
            id: None,
            name: v.name,
            owner: v.owner,
            description: v.description,
            version: v.version,
            last_updated: v.last_save_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    #[serde(default, rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub owner: Option<String>,
}

impl From<ProjectItem> for model::ProjectItem {
    fn from(v: ProjectItem) -> Self {
        Self {
            id: None,
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
    pub result: Option<String>,
    #[serde(default, with = "lenient")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "lenient")]
    pub finished_date: Option<OffsetDateTime>,
}

impl From<MigrationTask> for model::MigrationTask {
    fn from(v: MigrationTask) -> Self {
        Self {
            id: v.id,
            task_type: v.task_type,
            user_name: v.user_name,
            status: v.status,
            package_name: v.package_name,
            result: v.result,
            start_date: v.start_date,
            finished_date: v.finished_date,
        }
    }
}

impl From<MigrationTask> for model::RequestStatus {
    fn from(v: MigrationTask) -> Self {
        Self::new(v.status, v.result)
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
    pub is_license_expired: Option<bool>,
    #[serde(default)]
    pub is_licensed: Option<bool>,
    #[serde(default)]
    pub is_evaluation: Option<bool>,
}

impl From<LicenseStatus> for model::LicenseStatus {
    fn from(v: LicenseStatus) -> Self {
        Self {
            expiry_date: v.expiry_date,
            maximum_engines: v.maximum_engines,
            maximum_authors: v.maximum_authors,
            serial_number: v.serial_number,
            expired: v.is_license_expired,
            licensed: v.is_licensed,
            evaluation: v.is_evaluation,
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
    pub restricted: bool,
    pub enabled: bool,
}

/// Transformation-manager directives of a v3 submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmDirectives {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttc: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TmDirectives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Notification-manager directives of a v3 submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NmDirectives {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub success_topics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_topics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<NameValue>,
}

impl NmDirectives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobSubmission {
    #[serde(rename = "publishedParameters")]
    pub published_parameters: Vec<PublishedParameter>,
    #[serde(rename = "TMDirectives", skip_serializing_if = "TmDirectives::is_empty")]
    pub tm_directives: TmDirectives,
    #[serde(rename = "NMDirectives", skip_serializing_if = "NmDirectives::is_empty")]
    pub nm_directives: NmDirectives,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Listing;

    #[test]
    fn job_listing_canonicalises() {
        let raw = r#"{
            "offset": 0, "limit": 100, "totalCount": 1,
            "items": [{
                "id": 7, "status": "SUCCESS", "workspace": "a.fmw",
                "repository": "Samples", "engineName": "e1",
                "request": {"TMDirectives": {"tag": "Default"}},
                "timeFinished": "2023-01-18T17:34:56"
            }]
        }"#;
        let wire: Listing<Job> = serde_json::from_str(raw).expect("decode");
        let listing = wire.map(model::Job::from);
        let job = &listing.items[0];
        assert_eq!(job.id, 7);
        assert_eq!(job.queue.as_deref(), Some("Default"));
        assert!(job.time_finished.is_some());
        assert_eq!(listing.total_count, Some(1));
    }

    #[test]
    fn info_yields_build_number() {
        let info: Info = serde_json::from_str(
            r#"{"currentTime":"Wed-18-Jan-2023 05:34:56 PM","licenseManagement":true,"build":"FME Server 2023.0 - Build 23166 - linux-x64","timeZone":"+0000"}"#,
        )
        .expect("decode");
        let version = model::ServerVersion::from(info);
        assert_eq!(version.build_number, Some(23166));
    }

    #[test]
    fn empty_directives_are_omitted() {
        let body = JobSubmission::default();
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json, serde_json::json!({"publishedParameters": []}));
    }

    #[test]
    fn idle_engine_has_no_current_job() {
        let engine: Engine = serde_json::from_str(
            r#"{"instanceName":"e1","hostName":"h","currentJobID":-1,"buildNumber":23166}"#,
        )
        .expect("decode");
        assert_eq!(model::Engine::from(engine).current_job_id, None);
    }
}
