//! Surface-independent entity shapes.
//!
//! Every field that only one surface reports is optional here. Renderers and
//! handlers work against these types, never against [`crate::v3`] or
//! [`crate::v4`] directly.

use std::collections::BTreeMap;

use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub current_time: Option<OffsetDateTime>,
    pub license_management: Option<bool>,
    pub build: String,
    pub time_zone: Option<String>,
}

/// Result of a version probe. `build_number` is the value cached in the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    pub build_number: Option<u32>,
    pub build: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub name: String,
    pub host_name: Option<String>,
    pub engine_type: Option<String>,
    pub build_number: Option<u32>,
    pub platform: Option<String>,
    pub current_job_id: Option<i64>,
    pub queues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub workspace: Option<String>,
    pub repository: Option<String>,
    pub status: String,
    pub engine_name: Option<String>,
    pub engine_host: Option<String>,
    pub user_name: Option<String>,
    pub queue: Option<String>,
    pub description: Option<String>,
    pub source_id: Option<String>,
    pub time_queued: Option<OffsetDateTime>,
    pub time_started: Option<OffsetDateTime>,
    pub time_finished: Option<OffsetDateTime>,
}

/// Outcome of a synchronous run.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub id: Option<i64>,
    pub status: String,
    pub status_message: Option<String>,
    pub features_output: Option<i64>,
    pub time_requested: Option<OffsetDateTime>,
    pub time_finished: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub sharable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub name: String,
    pub title: Option<String>,
    pub item_type: Option<String>,
    pub description: Option<String>,
    pub last_save_date: Option<OffsetDateTime>,
    pub last_save_build: Option<String>,
    pub user_name: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Option<String>,
    pub name: String,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub last_updated: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub id: Option<String>,
    pub name: String,
    pub item_type: String,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentParameter {
    pub name: String,
    pub value: Option<String>,
    pub parameter_type: Option<String>,
    pub owner: Option<String>,
    pub updated: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub name: String,
    pub category: String,
    pub connection_type: String,
    pub owner: Option<String>,
    pub authentication_method: Option<String>,
    pub username: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationTask {
    pub id: i64,
    pub task_type: Option<String>,
    pub user_name: Option<String>,
    pub status: String,
    pub package_name: Option<String>,
    pub result: Option<String>,
    pub start_date: Option<OffsetDateTime>,
    pub finished_date: Option<OffsetDateTime>,
}

/// One line of a paginated v4 migration log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time: Option<OffsetDateTime>,
    pub level: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LicenseStatus {
    pub expiry_date: Option<String>,
    pub maximum_engines: Option<i64>,
    pub maximum_authors: Option<i64>,
    pub serial_number: Option<String>,
    pub expired: Option<bool>,
    pub licensed: Option<bool>,
    pub evaluation: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineKey {
    pub machine_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCode {
    pub system_code: String,
}

/// Status of a long-running server task (license refresh/request,
/// migration, job).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStatus {
    pub state: TaskState,
    pub status: String,
    pub message: Option<String>,
}

impl RequestStatus {
    #[must_use]
    pub fn new(status: String, message: Option<String>) -> Self {
        Self {
            state: TaskState::parse(&status),
            status,
            message,
        }
    }

    /// The message when present, otherwise the raw status.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Succeeded,
    Failed,
    Unknown(String),
}

impl TaskState {
    /// Map a status string from either surface; the comparison is case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "requesting" | "processing" | "queued" | "running" | "pulled" | "submitted"
            | "pending" | "importing" | "exporting" | "in_progress" | "inprogress" => {
                Self::Running
            }
            "success" | "succeeded" | "successful" | "completed" | "complete" | "ok" => {
                Self::Succeeded
            }
            "failed" | "failure" | "fme_failure" | "job_failure" | "error" | "aborted"
            | "cancelled" | "canceled" => Self::Failed,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    #[must_use]
    pub fn in_progress(&self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub name: Option<String>,
    pub expiration_date: Option<String>,
}
