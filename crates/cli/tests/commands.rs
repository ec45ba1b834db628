//! File commands driven against a canned GitLab backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use clap::Parser;
use serde_json::json;
use tempfile::TempDir;

use repofs_cli::cli::{Cli, Commands, ConfigCommands};
use repofs_cli::commands::handle_file_command;
use repofs_gitlab::http::{HttpExecutor, HttpRequest, HttpResponse, Method};
use repofs_gitlab::{ClientConfig, GitlabAdapter, GitlabClient, TransportError};

#[derive(Default)]
struct CannedExecutor {
    responses: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl CannedExecutor {
    fn push(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.into()));
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpExecutor for CannedExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((200, "{}".to_string()));
        Ok(HttpResponse {
            status,
            body: Bytes::from(body),
        })
    }
}

fn adapter() -> (GitlabAdapter, Arc<CannedExecutor>) {
    let executor = Arc::new(CannedExecutor::default());
    let client = GitlabClient::with_executor(
        ClientConfig::new("tok", "42", "main", "https://gitlab.example.com"),
        executor.clone(),
    );
    (GitlabAdapter::new(client), executor)
}

async fn run(cmd: Commands, adapter: &GitlabAdapter) -> eyre::Result<String> {
    let mut out = Vec::new();
    handle_file_command(cmd, adapter, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_cat_prints_raw_content() {
    let (adapter, executor) = adapter();
    executor.push(200, "hello\n");

    let output = run(
        Commands::Cat {
            path: "a.txt".to_string(),
        },
        &adapter,
    )
    .await
    .unwrap();

    assert_eq!(output, "hello\n");
}

#[tokio::test]
async fn test_ls_marks_directories() {
    let (adapter, executor) = adapter();
    executor.push(
        200,
        json!([
            {"id": "1", "name": "src", "type": "tree", "path": "src", "mode": "040000"},
            {"id": "2", "name": "a.rs", "type": "blob", "path": "src/a.rs", "mode": "100644"}
        ])
        .to_string(),
    );

    let output = run(
        Commands::Ls {
            dir: None,
            recursive: true,
        },
        &adapter,
    )
    .await
    .unwrap();

    assert_eq!(output, "d src\nf src/a.rs\n");
    assert!(executor.requests()[0].url.ends_with("tree?ref=main&recursive=true"));
}

#[tokio::test]
async fn test_put_uploads_local_file() {
    let temp_dir = TempDir::new().unwrap();
    let local = temp_dir.path().join("notes.txt");
    std::fs::write(&local, "from disk").unwrap();

    let (adapter, executor) = adapter();
    executor.push(201, json!({"file_path": "notes.txt", "branch": "main"}).to_string());

    let output = run(
        Commands::Put {
            path: "notes.txt".to_string(),
            file: Some(local),
            overwrite: false,
            message: Some("Add notes".to_string()),
        },
        &adapter,
    )
    .await
    .unwrap();

    assert_eq!(output, "Committed notes.txt to main\n");
    let request = &executor.requests()[0];
    assert_eq!(request.method, Method::Post);
    let form = request.form_pairs();
    assert!(form.contains(&("content".to_string(), "from disk".to_string())));
    assert!(form.contains(&("commit_message".to_string(), "Add notes".to_string())));
}

#[tokio::test]
async fn test_put_overwrite_uses_update_message() {
    let temp_dir = TempDir::new().unwrap();
    let local = temp_dir.path().join("x.txt");
    std::fs::write(&local, "v2").unwrap();

    let (adapter, executor) = adapter();
    executor.push(200, json!({"file_path": "x.txt"}).to_string());

    run(
        Commands::Put {
            path: "x.txt".to_string(),
            file: Some(local),
            overwrite: true,
            message: None,
        },
        &adapter,
    )
    .await
    .unwrap();

    let request = &executor.requests()[0];
    assert_eq!(request.method, Method::Put);
    assert!(
        request
            .form_pairs()
            .contains(&("commit_message".to_string(), "Updated x.txt".to_string()))
    );
}

#[tokio::test]
async fn test_exists_fails_for_missing_file() {
    let (adapter, executor) = adapter();
    executor.push(404, json!({"message": "404 File Not Found"}).to_string());

    let result = run(
        Commands::Exists {
            path: "missing.txt".to_string(),
        },
        &adapter,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_rm_with_custom_message() {
    let (adapter, executor) = adapter();
    executor.push(204, "");

    run(
        Commands::Rm {
            path: "old.txt".to_string(),
            message: Some("cleanup".to_string()),
        },
        &adapter,
    )
    .await
    .unwrap();

    let request = &executor.requests()[0];
    assert_eq!(request.method, Method::Delete);
    assert_eq!(
        request.form_pairs(),
        vec![
            ("branch".to_string(), "main".to_string()),
            ("commit_message".to_string(), "cleanup".to_string()),
        ]
    );
}

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "repofs",
        "ls",
        "docs",
        "--recursive",
        "--branch",
        "develop",
        "--project",
        "7",
    ])
    .unwrap();

    let overrides = cli.overrides();
    assert_eq!(overrides.branch.as_deref(), Some("develop"));
    assert_eq!(overrides.project_id.as_deref(), Some("7"));
    assert!(overrides.access_token.is_none());
    assert!(matches!(
        cli.command,
        Commands::Ls { dir: Some(ref d), recursive: true } if d == "docs"
    ));
}

#[test]
fn test_parse_config_set() {
    let cli = Cli::try_parse_from(["repofs", "config", "set", "gitlab.branch", "trunk"]).unwrap();

    match cli.command {
        Commands::Config {
            command: ConfigCommands::Set { key, value },
        } => {
            assert_eq!(key, "gitlab.branch");
            assert_eq!(value, "trunk");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
