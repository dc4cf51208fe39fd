//! Default table columns for each canonical entity.

use fmeflow_api_types::model::{
    Connection, DeploymentParameter, Engine, Health, Info, Job, JobResult, LicenseStatus,
    MigrationTask, Project, ProjectItem, Repository, RequestStatus, Workspace,
};
use fmeflow_api_types::timestamp::display;

use super::Tabular;
use crate::util::bytes::format_size;

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn shown<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Tabular for Info {
    const HEADERS: &'static [&'static str] =
        &["CURRENT TIME", "LICENSE MANAGEMENT", "BUILD", "TIME ZONE"];

    fn row(&self) -> Vec<String> {
        vec![
            display(self.current_time),
            shown(self.license_management),
            self.build.clone(),
            text(self.time_zone.as_ref()),
        ]
    }
}

impl Tabular for Health {
    const HEADERS: &'static [&'static str] = &["STATUS", "MESSAGE"];

    fn row(&self) -> Vec<String> {
        vec![self.status.clone(), text(self.message.as_ref())]
    }
}

impl Tabular for Engine {
    const HEADERS: &'static [&'static str] = &[
        "NAME",
        "HOST",
        "BUILD",
        "PLATFORM",
        "TYPE",
        "CURRENT JOB",
        "QUEUES",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.host_name.as_ref()),
            shown(self.build_number),
            text(self.platform.as_ref()),
            text(self.engine_type.as_ref()),
            shown(self.current_job_id),
            self.queues.join(", "),
        ]
    }
}

impl Tabular for Job {
    const HEADERS: &'static [&'static str] =
        &["ID", "ENGINE", "REPOSITORY", "WORKSPACE", "STATUS", "QUEUED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            text(self.engine_name.as_ref()),
            text(self.repository.as_ref()),
            text(self.workspace.as_ref()),
            self.status.clone(),
            display(self.time_queued),
        ]
    }
}

impl Tabular for JobResult {
    const HEADERS: &'static [&'static str] =
        &["ID", "STATUS", "STATUS MESSAGE", "FEATURES OUTPUT"];

    fn row(&self) -> Vec<String> {
        vec![
            shown(self.id),
            self.status.clone(),
            text(self.status_message.as_ref()),
            shown(self.features_output),
        ]
    }
}

impl Tabular for Repository {
    const HEADERS: &'static [&'static str] = &["NAME", "DESCRIPTION", "OWNER"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.description.as_ref()),
            text(self.owner.as_ref()),
        ]
    }
}

impl Tabular for Workspace {
    const HEADERS: &'static [&'static str] =
        &["NAME", "TITLE", "LAST SAVE DATE", "SIZE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.title.as_ref()),
            display(self.last_save_date),
            format_size(self.file_size),
        ]
    }
}

impl Tabular for Project {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "OWNER", "DESCRIPTION", "LAST UPDATED"];

    fn row(&self) -> Vec<String> {
        vec![
            text(self.id.as_ref()),
            self.name.clone(),
            text(self.owner.as_ref()),
            text(self.description.as_ref()),
            display(self.last_updated),
        ]
    }
}

impl Tabular for ProjectItem {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "TYPE", "OWNER"];

    fn row(&self) -> Vec<String> {
        vec![
            text(self.id.as_ref()),
            self.name.clone(),
            self.item_type.clone(),
            text(self.owner.as_ref()),
        ]
    }
}

impl Tabular for DeploymentParameter {
    const HEADERS: &'static [&'static str] = &["NAME", "TYPE", "VALUE", "OWNER", "UPDATED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.parameter_type.as_ref()),
            text(self.value.as_ref()),
            text(self.owner.as_ref()),
            display(self.updated),
        ]
    }
}

impl Tabular for Connection {
    const HEADERS: &'static [&'static str] = &["NAME", "CATEGORY", "TYPE", "OWNER"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.clone(),
            self.connection_type.clone(),
            text(self.owner.as_ref()),
        ]
    }
}

impl Tabular for MigrationTask {
    const HEADERS: &'static [&'static str] =
        &["ID", "TYPE", "USER", "STATUS", "START", "END"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            text(self.task_type.as_ref()),
            text(self.user_name.as_ref()),
            self.status.clone(),
            display(self.start_date),
            display(self.finished_date),
        ]
    }
}

impl Tabular for LicenseStatus {
    const HEADERS: &'static [&'static str] = &[
        "EXPIRY DATE",
        "MAXIMUM ENGINES",
        "SERIAL NUMBER",
        "LICENSED",
        "EVALUATION",
        "EXPIRED",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            text(self.expiry_date.as_ref()),
            shown(self.maximum_engines),
            text(self.serial_number.as_ref()),
            shown(self.licensed),
            shown(self.evaluation),
            shown(self.expired),
        ]
    }
}

impl Tabular for RequestStatus {
    const HEADERS: &'static [&'static str] = &["STATUS", "MESSAGE"];

    fn row(&self) -> Vec<String> {
        vec![self.status.clone(), text(self.message.as_ref())]
    }
}
