//! Shared fixtures: HTTP stubs for the interpretation service and the API
//! under test, plus a throwaway workspace.
#![allow(clippy::unwrap_used, dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tstai_cli::context::AppContext;
use tstai_domain::ApiKey;
use tstai_infrastructure::{FileCredentialStore, ServiceConfig};

/// Request as seen by a stub.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

type Handler = dyn Fn(&Seen) -> (u16, String) + Send + Sync;

/// One-request-per-connection HTTP stub.
pub struct Stub {
    pub url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
    task: JoinHandle<()>,
}

impl Stub {
    pub async fn start(handler: impl Fn(&Seen) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let log = seen.clone();
        let task = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                let head_end = loop {
                    let n = stream.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break None;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break Some(pos + 4);
                    }
                };
                let Some(head_end) = head_end else { continue };

                let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                let mut lines = head.split("\r\n");
                let mut first = lines.next().unwrap_or_default().split(' ');
                let method = first.next().unwrap_or_default().to_string();
                let path = first.next().unwrap_or_default().to_string();
                let headers: BTreeMap<String, String> = lines
                    .filter_map(|l| l.split_once(':'))
                    .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
                    .collect();
                let length: usize = headers
                    .get("content-length")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                while buf.len() < head_end + length {
                    let n = stream.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                let request = Seen {
                    method,
                    path,
                    headers,
                    body: String::from_utf8_lossy(&buf[head_end..]).to_string(),
                };

                let (status, body) = handler(&request);
                log.lock().unwrap().push(request);
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, seen, task }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for Stub {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Interpretation service answering `/v1/parse` from `plans`
/// (instruction -> JSON answer) and `/v1/whoami` for the key `good-key`.
pub async fn interpreter(plans: Vec<(&'static str, String)>) -> Stub {
    Stub::start(move |request| {
        let authorized = request.headers.get("authorization").map(String::as_str)
            == Some("Bearer good-key");
        if !authorized {
            return (401, r#"{"error":"Invalid API key"}"#.to_string());
        }
        match request.path.as_str() {
            "/v1/whoami" => (
                200,
                r#"{"id":17,"email":"dev@example.com","name":"Dev"}"#.to_string(),
            ),
            "/v1/parse" => {
                let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
                let instruction = body["instruction"].as_str().unwrap_or_default();
                plans
                    .iter()
                    .find(|(known, _)| *known == instruction)
                    .map_or_else(
                        || (400, r#"{"message":"Could not understand instruction"}"#.to_string()),
                        |(_, answer)| (200, answer.clone()),
                    )
            }
            _ => (404, "{}".to_string()),
        }
    })
    .await
}

/// A `/v1/parse` answer.
pub fn plan(method: &str, endpoint: &str, expected_status: u16) -> String {
    serde_json::json!({
        "method": method,
        "endpoint": endpoint,
        "payload": {},
        "expected_status": expected_status,
    })
    .to_string()
}

/// Workspace directory with its own credential store.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_tests(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.path().join("home/.tstai/config.json")
    }

    pub fn context(&self, api_url: &str, environment_key: Option<&str>) -> AppContext {
        AppContext {
            service: ServiceConfig::new(api_url, None).unwrap(),
            environment_key: environment_key.and_then(ApiKey::new),
            store: Arc::new(FileCredentialStore::at(self.config_path())),
            workspace: self.path().to_path_buf(),
        }
    }
}
