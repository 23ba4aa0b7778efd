use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Variables that would otherwise leak the developer's settings into the child.
const LEGACY_ENV: [&str; 3] = ["TELER_API_KEY", "BACKEND_DOMAIN", "BITRIX_WEBHOOK_URL"];

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[crm]
base_url = "http://127.0.0.1:9/rest/1/token"

[telephony]
api_key = "startup-secret"
backend_domain = "calls.example.com"
"#,
        port
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Build the server command with a clean configuration environment.
fn server_command(work_dir: &Path) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_dialbridge"));
    command
        .current_dir(work_dir)
        .env_remove("DIALBRIDGE_CONFIG")
        .env("RUST_LOG", "error") // Quiet logs during tests
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    for key in LEGACY_ENV {
        command.env_remove(key);
    }
    command
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &Path, work_dir: &Path) -> tokio::process::Child {
    server_command(work_dir)
        .env("DIALBRIDGE_CONFIG", config_path)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_health_endpoint() {
    let port = get_available_port();
    let work_dir = TempDir::new().unwrap();
    let temp_file = write_config(&minimal_config(port));

    // Start server
    let mut server = spawn_server(temp_file.path(), work_dir.path()).await;

    // Wait for server to be ready
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    // Test health endpoint
    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/health", port))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_and_webhook_on_running_server() {
    let port = get_available_port();
    let work_dir = TempDir::new().unwrap();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path(), work_dir.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();

    let config = client
        .get(format!("http://127.0.0.1:{}/api/v1/config", port))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(config.contains("\"api_key_configured\":true"));
    assert!(!config.contains("startup-secret"));
    assert!(!config.contains("/rest/1/token"));

    let webhook = client
        .post(format!("http://127.0.0.1:{}/frejun-handler", port))
        .json(&serde_json::json!({"event": "call.completed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(webhook.status(), 200);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_env_overrides_file_port() {
    let file_port = get_available_port();
    let env_port = get_available_port();
    let work_dir = TempDir::new().unwrap();
    let temp_file = write_config(&minimal_config(file_port));

    let mut server = server_command(work_dir.path())
        .env("DIALBRIDGE_CONFIG", temp_file.path())
        .env("DIALBRIDGE_SERVER__PORT", env_port.to_string())
        .spawn()
        .expect("Failed to spawn server");

    assert!(
        wait_for_server(env_port, 40).await,
        "Server did not start on the overridden port"
    );

    server.kill().await.ok();
}

#[tokio::test]
async fn test_legacy_env_without_config_file() {
    let port = get_available_port();
    let work_dir = TempDir::new().unwrap();

    let mut server = server_command(work_dir.path())
        .env("DIALBRIDGE_SERVER__HOST", "127.0.0.1")
        .env("DIALBRIDGE_SERVER__PORT", port.to_string())
        .env("TELER_API_KEY", "legacy-key")
        .env("BACKEND_DOMAIN", "calls.example.com")
        .env("BITRIX_WEBHOOK_URL", "http://127.0.0.1:9/rest/1/token")
        .spawn()
        .expect("Failed to spawn server");

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start from environment settings"
    );

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits() {
    let work_dir = TempDir::new().unwrap();

    let mut server = server_command(work_dir.path())
        .env("DIALBRIDGE_CONFIG", work_dir.path().join("absent.toml"))
        .spawn()
        .expect("Failed to spawn server");

    let status = timeout(Duration::from_secs(10), server.wait())
        .await
        .expect("Server did not exit")
        .unwrap();
    assert!(!status.success());
}

#[tokio::test]
async fn test_missing_required_settings_exits() {
    let work_dir = TempDir::new().unwrap();

    // No file, no environment: crm and telephony sections are absent
    let mut server = server_command(work_dir.path())
        .spawn()
        .expect("Failed to spawn server");

    let status = timeout(Duration::from_secs(10), server.wait())
        .await
        .expect("Server did not exit")
        .unwrap();
    assert!(!status.success());
}

#[tokio::test]
async fn test_blank_api_key_exits() {
    let port = get_available_port();
    let work_dir = TempDir::new().unwrap();
    let temp_file = write_config(&minimal_config(port).replace("startup-secret", ""));

    let mut server = spawn_server(temp_file.path(), work_dir.path()).await;

    let status = timeout(Duration::from_secs(10), server.wait())
        .await
        .expect("Server did not exit")
        .unwrap();
    assert!(!status.success());
}
