use std::io::Write as _;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;

use crate::args::{
    BackupArgs, CancelArgs, ConnectionsArgs, ConnectionsCmd, DEFAULT_BACKUP_FILE,
    DEFAULT_SHARED_RESOURCE, DeploymentParametersArgs, DeploymentParametersCmd, EnginesArgs,
    JobsArgs, LicenseArgs, LicenseCmd, LicenseDetails, LicenseRefreshArgs, LoginArgs,
    MigrationArgs, MigrationCmd, MigrationTasksArgs, ParameterValueArgs, ProjectRef,
    ProjectUploadArgs, ProjectsArgs, ProjectsCmd, RunArgs,
};
use crate::client::Ctx;
use crate::error::CliError;
use crate::handlers::{
    backup, cancel, connections, deployment_parameters, engines, jobs, license, login, migration,
    projects, run,
};
use crate::output::OutputArgs;

fn ctx(server: &MockServer, build: u32) -> Ctx {
    let mut ctx = Ctx::new(&server.base_url(), Some("abc".into()), Some(build), false)
        .expect("ctx");
    ctx.poll_interval = Duration::from_millis(20);
    ctx
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).expect("utf-8 output")
}

fn connections_args(action: Option<ConnectionsCmd>) -> ConnectionsArgs {
    ConnectionsArgs {
        action,
        ..ConnectionsArgs::default()
    }
}

#[tokio::test]
async fn queued_jobs_render_as_a_table_on_v4() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fmeapiv4/jobs")
                .query_param("status", "queued")
                .header("authorization", "Bearer abc");
            then.status(200).json_body(json!({
                "items": [{"id": 5, "workspace": "a.fmw", "status": "queued"}],
                "totalCount": 1,
                "limit": 100,
                "offset": 0
            }));
        })
        .await;

    let mut out = Vec::new();
    let args = JobsArgs {
        queued: true,
        ..JobsArgs::default()
    };
    jobs::handle(&ctx(&server, 25300), &mut out, args).await?;
    mock.assert_async().await;

    let out = text(out);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "{out}");
    assert!(lines[0].starts_with("ID"));
    for cell in ["5", "a.fmw", "queued"] {
        assert!(lines[1].contains(cell), "{cell} missing from {}", lines[1]);
    }
    Ok(())
}

#[tokio::test]
async fn v3_active_jobs_merge_running_then_queued() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let running = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fmerest/v3/transformations/jobs/running")
                .header("authorization", "fmetoken token=abc");
            then.status(200).json_body(json!({
                "items": [{"id": 1, "status": "PULLED"}],
                "totalCount": 1
            }));
        })
        .await;
    let queued = server
        .mock_async(|when, then| {
            when.method(GET).path("/fmerest/v3/transformations/jobs/queued");
            then.status(200).json_body(json!({
                "items": [{"id": 2, "status": "SUBMITTED"}],
                "totalCount": 1
            }));
        })
        .await;

    let mut out = Vec::new();
    let args = JobsArgs {
        active: true,
        output: OutputArgs {
            output: "json".parse().expect("json output"),
            no_headers: false,
        },
        ..JobsArgs::default()
    };
    jobs::handle(&ctx(&server, 25000), &mut out, args).await?;
    running.assert_async().await;
    queued.assert_async().await;

    let doc: serde_json::Value = serde_json::from_slice(&out).expect("json");
    let ids: Vec<i64> = doc["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(doc["totalCount"], 2);
    Ok(())
}

#[tokio::test]
async fn connection_create_sends_string_parameters() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmeapiv4/connections")
                .header("authorization", "Bearer abc")
                .json_body(json!({
                    "name": "c",
                    "category": "database",
                    "type": "PostgreSQL",
                    "parameters": {"HOST": "a", "PORT": "5432"}
                }));
            then.status(201);
        })
        .await;

    let mut out = Vec::new();
    let args = connections_args(Some(ConnectionsCmd::Create {
        name: "c".into(),
        category: "database".into(),
        connection_type: "PostgreSQL".into(),
        authentication_method: None,
        username: None,
        password: None,
        parameter: vec!["HOST=a".into(), "PORT=5432".into()],
    }));
    connections::handle(&ctx(&server, 25300), &mut out, args).await?;
    mock.assert_async().await;
    assert_eq!(text(out), "Connection successfully created.\n");
    Ok(())
}

#[tokio::test]
async fn connection_update_hints_at_the_category_on_400() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/connections/pg");
            then.status(200).json_body(json!({
                "name": "pg",
                "category": "database",
                "type": "PostgreSQL",
                "parameters": {"HOST": "a"}
            }));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/fmeapiv4/connections/pg")
                .json_body(json!({
                    "category": "databse",
                    "parameters": {"HOST": "a"}
                }));
            then.status(400).json_body(json!({"message": "Invalid category"}));
        })
        .await;

    let mut out = Vec::new();
    let args = connections_args(Some(ConnectionsCmd::Update {
        name: "pg".into(),
        category: Some("databse".into()),
        authentication_method: None,
        username: None,
        password: None,
        parameter: Vec::new(),
    }));
    let err = connections::handle(&ctx(&server, 25300), &mut out, args)
        .await
        .expect_err("rejected update");
    put.assert_async().await;
    assert_eq!(
        err.to_string(),
        "Invalid category (HTTP 400): check that the category is correct"
    );
    assert!(out.is_empty());
}

#[tokio::test]
async fn project_delete_all_passes_dependencies() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/fmeapiv4/projects/X/delete-all")
                .query_param("deleteDependencies", "true");
            then.status(204);
        })
        .await;

    let mut out = Vec::new();
    let args = ProjectsArgs {
        action: Some(ProjectsCmd::Delete {
            project: ProjectRef {
                id: Some("X".into()),
                name: None,
            },
            all: true,
            dependencies: true,
            no_prompt: true,
        }),
        ..ProjectsArgs::default()
    };
    projects::handle(&ctx(&server, 25300), &mut out, args).await?;
    mock.assert_async().await;
    assert_eq!(text(out), "Project successfully deleted.\n");
    Ok(())
}

#[tokio::test]
async fn project_delete_by_name_looks_up_the_id() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fmeapiv4/projects")
                .query_param("filterString", "Roads")
                .query_param("filterProperties", "name");
            then.status(200).json_body(json!({
                "items": [
                    {"id": "p-2", "name": "Roads Archive"},
                    {"id": "p-1", "name": "Roads"}
                ],
                "totalCount": 2
            }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/fmeapiv4/projects/p-1/delete");
            then.status(204);
        })
        .await;

    let mut out = Vec::new();
    let args = ProjectsArgs {
        action: Some(ProjectsCmd::Delete {
            project: ProjectRef {
                id: None,
                name: Some("Roads".into()),
            },
            all: false,
            dependencies: false,
            no_prompt: true,
        }),
        ..ProjectsArgs::default()
    };
    projects::handle(&ctx(&server, 25300), &mut out, args).await?;
    lookup.assert_async().await;
    delete.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn project_upload_with_wait_prints_one_json_document() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmeapiv4/migrations/imports/upload")
                .header("content-type", "application/octet-stream")
                .body("PROJECT");
            then.status(202).json_body(json!({"id": 12}));
        })
        .await;
    let run = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmeapiv4/migrations/imports/12/run")
                .json_body(json!({
                    "overwrite": true,
                    "pauseNotifications": false,
                    "disableProjectItems": false
                }));
            then.status(202);
        })
        .await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/migrations/imports/12");
            then.status(200)
                .json_body(json!({"status": "success", "message": "Imported"}));
        })
        .await;

    let mut file = NamedTempFile::new().expect("tmp");
    file.write_all(b"PROJECT").expect("write");
    let mut ctx = ctx(&server, 25300);
    ctx.json = true;
    let mut out = Vec::new();
    let args = ProjectsArgs {
        action: Some(ProjectsCmd::Upload(ProjectUploadArgs {
            file: file.path().to_path_buf(),
            overwrite: true,
            wait: true,
            ..ProjectUploadArgs::default()
        })),
        ..ProjectsArgs::default()
    };
    projects::handle(&ctx, &mut out, args).await?;
    upload.assert_async().await;
    run.assert_async().await;
    status.assert_async().await;

    let doc: serde_json::Value = serde_json::from_slice(&out).expect("single document");
    assert_eq!(doc, json!({"status": "success", "message": "Imported"}));
    Ok(())
}

#[tokio::test]
async fn license_refresh_waits_until_the_task_settles() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let refresh = server
        .mock_async(|when, then| {
            when.method(POST).path("/fmeapiv4/license/refresh");
            then.status(202);
        })
        .await;
    let mut requesting = server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/license/refresh/status");
            then.status(200).json_body(json!({"status": "REQUESTING"}));
        })
        .await;

    let ctx = ctx(&server, 26000);
    let mut out = Vec::new();
    let args = LicenseArgs {
        action: LicenseCmd::Refresh(LicenseRefreshArgs {
            action: None,
            wait: true,
        }),
    };

    // Flip the status once the loop has seen the in-progress value.
    let flip = async {
        while requesting.hits_async().await < 1 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let success = server
            .mock_async(|when, then| {
                when.method(GET).path("/fmeapiv4/license/refresh/status");
                then.status(200)
                    .json_body(json!({"status": "SUCCESS", "message": "License refreshed"}));
            })
            .await;
        let seen = requesting.hits_async().await;
        requesting.delete_async().await;
        (success, seen)
    };
    let (result, (success, requesting_hits)) =
        tokio::join!(license::handle(&ctx, &mut out, args), flip);
    result?;

    refresh.assert_async().await;
    let polls = requesting_hits + success.hits_async().await;
    assert!(polls >= 2, "expected at least two status polls, saw {polls}");
    let out = text(out);
    assert!(out.starts_with("License Refresh Successfully sent.\n"), "{out}");
    assert!(out.ends_with("License refreshed\n"), "{out}");
    Ok(())
}

#[tokio::test]
async fn failed_license_refresh_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fmeapiv4/license/refresh");
            then.status(202);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/license/refresh/status");
            then.status(200)
                .json_body(json!({"status": "FAILED", "message": "No license server"}));
        })
        .await;

    let mut out = Vec::new();
    let args = LicenseArgs {
        action: LicenseCmd::Refresh(LicenseRefreshArgs {
            action: None,
            wait: true,
        }),
    };
    let err = license::handle(&ctx(&server, 26000), &mut out, args)
        .await
        .expect_err("failed task");
    assert!(matches!(err, CliError::TaskFailed(ref message) if message == "No license server"));
}

#[tokio::test]
async fn cancel_rewords_missing_and_finished_jobs() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fmeapiv4/jobs/404/cancel");
            then.status(404).json_body(json!({"message": "Not Found"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fmeapiv4/jobs/409/cancel");
            then.status(409).json_body(json!({"message": "Conflict"}));
        })
        .await;

    let ctx = ctx(&server, 25300);
    let mut out = Vec::new();
    let missing = cancel::handle(&ctx, &mut out, CancelArgs { id: 404 })
        .await
        .expect_err("missing job");
    assert_eq!(missing.to_string(), "job not found (HTTP 404)");
    let finished = cancel::handle(&ctx, &mut out, CancelArgs { id: 409 })
        .await
        .expect_err("finished job");
    assert_eq!(finished.to_string(), "job already complete (HTTP 409)");
}

#[tokio::test]
async fn cancel_on_v3_deletes_the_running_job() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/fmerest/v3/transformations/jobs/running/7")
                .header("authorization", "fmetoken token=abc");
            then.status(204);
        })
        .await;

    let mut out = Vec::new();
    cancel::handle(&ctx(&server, 25000), &mut out, CancelArgs { id: 7 }).await?;
    mock.assert_async().await;
    assert_eq!(text(out), "Success. The job with id 7 was cancelled.\n");
    Ok(())
}

#[tokio::test]
async fn deployment_parameter_update_keeps_the_current_type() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/deploymentparameters/db");
            then.status(200)
                .json_body(json!({"name": "db", "type": "dbConnection", "value": "old"}));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/fmeapiv4/deploymentparameters/db")
                .json_body(json!({
                    "value": "new",
                    "type": "dbConnection",
                    "choiceSettings": {"choiceSet": "dbConnections", "family": "PostgreSQL"}
                }));
            then.status(204);
        })
        .await;

    let mut out = Vec::new();
    let args = DeploymentParametersArgs {
        action: Some(DeploymentParametersCmd::Update {
            name: "db".into(),
            parameter_type: None,
            value: ParameterValueArgs {
                value: "new".into(),
                database_type: Some("PostgreSQL".into()),
                ..ParameterValueArgs::default()
            },
        }),
        ..DeploymentParametersArgs::default()
    };
    deployment_parameters::handle(&ctx(&server, 25300), &mut out, args).await?;
    lookup.assert_async().await;
    put.assert_async().await;
    assert_eq!(text(out), "Deployment Parameter successfully updated.\n");
    Ok(())
}

#[tokio::test]
async fn backup_to_resource_reports_the_task_id() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmerest/v3/migration/backup/resource")
                .header("content-type", "application/x-www-form-urlencoded")
                .form_urlencoded_tuple("resourceName", DEFAULT_SHARED_RESOURCE)
                .form_urlencoded_tuple("exportPackage", "nightly.fsconfig");
            then.status(202).json_body(json!({"id": 3}));
        })
        .await;

    let mut out = Vec::new();
    let args = BackupArgs {
        file: DEFAULT_BACKUP_FILE.into(),
        resource: true,
        resource_name: DEFAULT_SHARED_RESOURCE.into(),
        export_package: "nightly.fsconfig".into(),
        success_topic: None,
        failure_topic: None,
        wait: false,
    };
    backup::handle(&ctx(&server, 25300), &mut out, args).await?;
    mock.assert_async().await;
    assert_eq!(text(out), "Backup task submitted with id: 3\n");
    Ok(())
}

#[tokio::test]
async fn login_falls_back_to_v3_token_creation() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fmeapiv4/tokens");
            then.status(404);
        })
        .await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmerest/v3/tokens")
                .header_exists("authorization")
                .json_body_includes(r#"{"expirationTimeout": 3600, "enabled": true}"#);
            then.status(201).json_body(json!({"token": "t3"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/version");
            then.status(404);
        })
        .await;
    let info = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fmerest/v3/info")
                .header("authorization", "fmetoken token=t3");
            then.status(200)
                .json_body(json!({"build": "FME Server 2023.0 - Build 23166 - linux-x64"}));
        })
        .await;

    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("profile.yaml");
    let mut password = NamedTempFile::new().expect("tmp");
    password.write_all(b"secret\n").expect("write");

    let mut out = Vec::new();
    let args = LoginArgs {
        url: format!("{}/", server.base_url()),
        token: None,
        user: Some("admin".into()),
        password_file: Some(password.path().to_path_buf()),
        expiration: 3600,
    };
    login::handle(&path, false, None, &mut out, args).await?;
    token.assert_async().await;
    info.assert_async().await;

    let profile = crate::config::load(&path)?;
    assert_eq!(profile.token, "t3");
    assert_eq!(profile.build, Some(23166));
    assert_eq!(profile.url, server.base_url());
    Ok(())
}

fn run_args() -> RunArgs {
    RunArgs {
        repository: "Samples".into(),
        workspace: "austin.fmw".into(),
        ..RunArgs::default()
    }
}

fn log_args(id: i64, file: Option<std::path::PathBuf>) -> MigrationArgs {
    MigrationArgs {
        action: MigrationCmd::Tasks(MigrationTasksArgs {
            id: Some(id),
            log: true,
            file,
            ..MigrationTasksArgs::default()
        }),
    }
}

#[tokio::test]
async fn project_name_without_a_match_is_a_not_found_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/projects");
            then.status(200)
                .json_body(json!({"items": [{"id": "p-2", "name": "Roads Archive"}], "totalCount": 1}));
        })
        .await;

    let mut out = Vec::new();
    let args = ProjectsArgs {
        action: Some(ProjectsCmd::Delete {
            project: ProjectRef {
                id: None,
                name: Some("Roads".into()),
            },
            all: false,
            dependencies: false,
            no_prompt: true,
        }),
        ..ProjectsArgs::default()
    };
    let err = projects::handle(&ctx(&server, 25300), &mut out, args)
        .await
        .expect_err("no such project");
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.to_string(),
        "project `Roads` not found (HTTP 404): check that the specified project exists"
    );
}

#[tokio::test]
async fn engine_count_prefers_the_reported_total() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/engines");
            then.status(200).json_body(json!({
                "items": [{"name": "engine-1"}],
                "totalCount": 4,
                "limit": 1,
                "offset": 0
            }));
        })
        .await;

    let mut out = Vec::new();
    let args = EnginesArgs {
        count: true,
        ..EnginesArgs::default()
    };
    engines::handle(&ctx(&server, 25300), &mut out, args).await?;
    assert_eq!(text(out), "4\n");
    Ok(())
}

#[tokio::test]
async fn v3_run_submits_typed_parameters() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmerest/v3/transformations/submit/Samples/austin.fmw")
                .header("authorization", "fmetoken token=abc")
                .header("content-type", "application/json")
                .json_body(json!({
                    "publishedParameters": [
                        {"name": "DEST", "value": "out"},
                        {"name": "THEMES", "value": ["a,b", "c"]}
                    ],
                    "TMDirectives": {"tag": "fast"}
                }));
            then.status(202).json_body(json!({"id": 42}));
        })
        .await;

    let mut out = Vec::new();
    let args = RunArgs {
        published_parameter: vec!["DEST=out".into()],
        published_parameter_list: vec![r"THEMES=a\,b,c".into()],
        tag: Some("fast".into()),
        ..run_args()
    };
    run::handle(&ctx(&server, 23000), &mut out, args).await?;
    submit.assert_async().await;
    assert_eq!(text(out), "Job submitted with id: 42\n");
    Ok(())
}

#[tokio::test]
async fn v3_run_with_wait_uses_transact() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let transact = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmerest/v3/transformations/transact/Samples/austin.fmw")
                .header("content-type", "application/json")
                .json_body(json!({"publishedParameters": []}));
            then.status(200).json_body(json!({
                "id": 7,
                "status": "SUCCESS",
                "statusMessage": "Translation Successful",
                "numFeaturesOutput": 12
            }));
        })
        .await;

    let mut out = Vec::new();
    let args = RunArgs {
        wait: true,
        ..run_args()
    };
    run::handle(&ctx(&server, 23000), &mut out, args).await?;
    transact.assert_async().await;
    let out = text(out);
    assert!(out.starts_with("ID"), "{out}");
    assert!(out.contains("Translation Successful"), "{out}");
    assert!(out.contains("12"), "{out}");
    Ok(())
}

#[tokio::test]
async fn run_with_source_data_streams_the_file() {
    let server = MockServer::start_async().await;
    let transact = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmerest/v3/transformations/transactdata/Samples/austin.fmw")
                .query_param("tm_tag", "fast")
                .query_param("tm_ttc", "60")
                .query_param("DEST", "out")
                .header("content-type", "application/octet-stream")
                .body("x,y\n1,2\n");
            then.status(422).json_body(json!({
                "id": 8,
                "status": "FME_FAILURE",
                "statusMessage": "Translation failed"
            }));
        })
        .await;

    let mut data = NamedTempFile::new().expect("tmp");
    data.write_all(b"x,y\n1,2\n").expect("write");
    let mut out = Vec::new();
    let args = RunArgs {
        file: Some(data.path().to_path_buf()),
        published_parameter: vec!["DEST=out".into()],
        queue: Some("fast".into()),
        max_job_runtime: Some(60),
        ..run_args()
    };
    let err = run::handle(&ctx(&server, 26000), &mut out, args)
        .await
        .expect_err("failed translation");
    transact.assert_async().await;
    assert!(matches!(err, CliError::TaskFailed(ref message) if message == "Translation failed"));
    assert!(text(out).contains("FME_FAILURE"));
}

#[tokio::test]
async fn v4_run_with_wait_polls_the_job() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmeapiv4/jobs")
                .header("authorization", "Bearer abc")
                .json_body(json!({
                    "repository": "Samples",
                    "workspace": "austin.fmw",
                    "publishedParameters": [{"name": "DEST", "value": "out"}],
                    "queue": "fast",
                    "maxJobRuntime": 60,
                    "maxJobRuntimeUnits": "second"
                }));
            then.status(202).json_body(json!({"id": 42}));
        })
        .await;
    let mut running = server
        .mock_async(|when, then| {
            when.method(GET).path("/fmeapiv4/jobs/42");
            then.status(200)
                .json_body(json!({"id": 42, "workspace": "austin.fmw", "status": "running"}));
        })
        .await;

    let ctx = ctx(&server, 25300);
    let mut out = Vec::new();
    let args = RunArgs {
        wait: true,
        published_parameter: vec!["DEST=out".into()],
        queue: Some("fast".into()),
        time_until_canceled: Some(60),
        ..run_args()
    };

    let finish = async {
        while running.hits_async().await < 1 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let done = server
            .mock_async(|when, then| {
                when.method(GET).path("/fmeapiv4/jobs/42");
                then.status(200)
                    .json_body(json!({"id": 42, "workspace": "austin.fmw", "status": "success"}));
            })
            .await;
        let seen = running.hits_async().await;
        running.delete_async().await;
        (done, seen)
    };
    let (result, (done, running_hits)) = tokio::join!(run::handle(&ctx, &mut out, args), finish);
    result?;

    submit.assert_async().await;
    let polls = running_hits + done.hits_async().await;
    assert!(polls >= 2, "expected at least two job polls, saw {polls}");
    let out = text(out);
    let row = out.lines().last().unwrap_or_default();
    assert!(row.contains("42") && row.contains("success"), "{out}");
    Ok(())
}

#[tokio::test]
async fn v3_log_is_written_byte_for_byte() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let log = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fmerest/v3/migration/tasks/id/9/log")
                .header("accept", "application/octet-stream");
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body(b"caf\xE9\n");
        })
        .await;

    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("task.log");
    let ctx = ctx(&server, 25300);

    let mut out = Vec::new();
    migration::handle(&ctx, &mut out, log_args(9, Some(path.clone()))).await?;
    assert_eq!(std::fs::read(&path).expect("log file"), b"caf\xE9\n");
    assert_eq!(
        text(out),
        format!("Migration task log written to {}\n", path.display())
    );

    let mut out = Vec::new();
    migration::handle(&ctx, &mut out, log_args(9, None)).await?;
    assert_eq!(out, b"caf\xE9\n");
    log.assert_hits_async(2).await;
    Ok(())
}

#[tokio::test]
async fn v4_log_reads_every_page() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mut pages = Vec::new();
    for (offset, message) in ["first", "second", "third"].into_iter().enumerate() {
        let page = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/fmeapiv4/migrations/tasks/9/log")
                    .query_param("offset", offset.to_string())
                    .query_param("limit", "1000");
                then.status(200).json_body(json!({
                    "items": [{
                        "time": format!("2025-01-01T00:00:0{offset}Z"),
                        "level": "INFO",
                        "message": message
                    }],
                    "totalCount": 3,
                    "limit": 1,
                    "offset": offset
                }));
            })
            .await;
        pages.push(page);
    }

    let mut out = Vec::new();
    migration::handle(&ctx(&server, 26000), &mut out, log_args(9, None)).await?;
    for page in &pages {
        page.assert_async().await;
    }
    assert_eq!(
        text(out),
        "2025-01-01T00:00:00Z | INFO | first\n\
         2025-01-01T00:00:01Z | INFO | second\n\
         2025-01-01T00:00:02Z | INFO | third\n"
    );
    Ok(())
}

#[tokio::test]
async fn license_request_file_is_printed_unchanged() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fmeapiv4/license/requestfile")
                .header("accept", "text/plain")
                .json_body_includes(r#"{"firstName": "Ada", "email": "ada@example.com"}"#);
            then.status(200).body(b"REQ\xFF");
        })
        .await;

    let mut out = Vec::new();
    let args = LicenseArgs {
        action: LicenseCmd::Requestfile {
            details: LicenseDetails {
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                email: Some("ada@example.com".into()),
                ..LicenseDetails::default()
            },
            file: None,
        },
    };
    license::handle(&ctx(&server, 26000), &mut out, args).await?;
    mock.assert_async().await;
    assert_eq!(out, b"REQ\xFF\n");
    Ok(())
}
