//! Client for the remote interpretation service.
//!
//! `POST /v1/parse` turns an instruction into an execution plan and
//! `GET /v1/whoami` identifies the owner of an API key. Both calls carry the
//! key as a bearer token.

use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tstai_application::ports::{AccountService, InterpreterError, PlanResolver};
use tstai_domain::{ApiKey, ExecutionPlan, HttpMethod, Payload, Principal, StatusCode};

use super::reqwest_client::USER_AGENT;
use crate::config::ServiceConfig;

const PARSE_PATH: &str = "/v1/parse";
const WHOAMI_PATH: &str = "/v1/whoami";

const NOT_AUTHENTICATED: &str = "Not authenticated. Please run \"tstai login\" first.";
const INVALID_KEY: &str = "Invalid API key. Please run \"tstai login\" again.";
const SERVER_ERROR: &str = "Server error. Please try again later.";
const UNREACHABLE: &str = "Failed to connect to TSTAI API. Please check your internet connection.";

#[derive(Serialize)]
struct ParseRequest<'a> {
    instruction: &'a str,
}

/// Shape of a successful `/v1/parse` answer.
#[derive(Deserialize)]
struct ParseAnswer {
    method: String,
    endpoint: String,
    #[serde(default)]
    payload: Option<serde_json::Value>,
    expected_status: i64,
}

impl ParseAnswer {
    fn into_plan(self) -> Result<ExecutionPlan, InterpreterError> {
        let malformed = |message: String| InterpreterError::Malformed(message);

        let method = HttpMethod::from_str(&self.method).map_err(|e| malformed(e.to_string()))?;
        let payload = match self.payload {
            None | Some(serde_json::Value::Null) => Payload::new(),
            Some(serde_json::Value::Object(map)) => map,
            Some(other) => {
                return Err(malformed(format!("payload must be an object, got {other}")));
            }
        };
        ExecutionPlan::new(method, self.endpoint, payload, self.expected_status)
            .map_err(|e| malformed(e.to_string()))
    }
}

/// Error body the service sends with non-success statuses.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Interpretation service client.
///
/// Holds the active key for plan resolution; a missing key surfaces as an
/// authentication error on the first `resolve`, before any other traffic.
pub struct InterpreterClient {
    client: Client,
    config: ServiceConfig,
    key: Option<ApiKey>,
}

impl InterpreterClient {
    /// Creates a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the HTTP client cannot be created.
    pub fn new(config: ServiceConfig, key: Option<ApiKey>) -> Result<Self, InterpreterError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| InterpreterError::Upstream(e.to_string()))?;
        Ok(Self {
            client,
            config,
            key,
        })
    }

    async fn parse(&self, instruction: &str) -> Result<ExecutionPlan, InterpreterError> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| InterpreterError::Authentication(NOT_AUTHENTICATED.to_string()))?;

        let url = self.config.endpoint(PARSE_PATH);
        tracing::debug!(%url, instruction, "resolving instruction");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, key.bearer())
            .json(&ParseRequest { instruction })
            .send()
            .await
            .map_err(|e| unreachable(&e))?;

        let body = checked_body(response).await?;
        let answer: ParseAnswer = serde_json::from_slice(&body)
            .map_err(|e| InterpreterError::Malformed(e.to_string()))?;
        answer.into_plan()
    }

    async fn identify(&self, key: &ApiKey) -> Result<Principal, InterpreterError> {
        let url = self.config.endpoint(WHOAMI_PATH);
        tracing::debug!(%url, "looking up principal");
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, key.bearer())
            .send()
            .await
            .map_err(|e| unreachable(&e))?;

        let body = checked_body(response).await?;
        serde_json::from_slice(&body).map_err(|e| InterpreterError::Malformed(e.to_string()))
    }
}

fn unreachable(error: &reqwest::Error) -> InterpreterError {
    tracing::debug!(%error, "interpretation service unreachable");
    InterpreterError::Upstream(UNREACHABLE.to_string())
}

/// Returns the body of a 2xx answer, or classifies the failure.
async fn checked_body(response: reqwest::Response) -> Result<Vec<u8>, InterpreterError> {
    let status = StatusCode::new(response.status().as_u16());
    let body = response.bytes().await.map_err(|e| unreachable(&e))?.to_vec();
    if status.is_success() {
        return Ok(body);
    }
    Err(classify_failure(status, &body))
}

fn classify_failure(status: StatusCode, body: &[u8]) -> InterpreterError {
    if status.as_u16() == 401 {
        return InterpreterError::Authentication(INVALID_KEY.to_string());
    }
    if status.is_server_error() {
        return InterpreterError::Upstream(SERVER_ERROR.to_string());
    }
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .unwrap_or_else(|| format!("API error: {} {}", status.as_u16(), status.reason_phrase()));
    InterpreterError::Rejected {
        status: status.as_u16(),
        message,
    }
}

impl PlanResolver for InterpreterClient {
    fn resolve<'a>(
        &'a self,
        instruction: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionPlan, InterpreterError>> + Send + 'a>> {
        Box::pin(self.parse(instruction))
    }
}

impl AccountService for InterpreterClient {
    fn whoami<'a>(
        &'a self,
        key: &'a ApiKey,
    ) -> Pin<Box<dyn Future<Output = Result<Principal, InterpreterError>> + Send + 'a>> {
        Box::pin(self.identify(key))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::StubServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &StubServer, key: Option<&str>) -> InterpreterClient {
        let config = ServiceConfig::new(&server.url, None).unwrap();
        InterpreterClient::new(config, key.and_then(ApiKey::new)).unwrap()
    }

    #[tokio::test]
    async fn resolves_a_plan_with_bearer_key() {
        let server = StubServer::fixed(
            200,
            r#"{"method":"post","endpoint":"/posts","payload":{"title":"foo"},"expected_status":201}"#,
        )
        .await;
        let client = client_for(&server, Some("key-123"));

        let plan = client.resolve("create a post").await.unwrap();

        assert_eq!(plan.method(), HttpMethod::Post);
        assert_eq!(plan.endpoint(), "/posts");
        assert_eq!(plan.payload().get("title"), Some(&json!("foo")));
        assert_eq!(plan.expected_status(), 201);

        let received = server.received();
        assert_eq!(received[0].path, "/v1/parse");
        assert_eq!(received[0].headers["authorization"], "Bearer key-123");
        assert_eq!(received[0].json(), json!({"instruction": "create a post"}));
    }

    #[tokio::test]
    async fn missing_payload_becomes_empty_map() {
        let server = StubServer::fixed(
            200,
            r#"{"method":"GET","endpoint":"/users/1","expected_status":200}"#,
        )
        .await;
        let plan = client_for(&server, Some("k")).resolve("get user").await.unwrap();
        assert!(plan.payload().is_empty());
    }

    #[tokio::test]
    async fn same_answer_same_plan() {
        let server = StubServer::fixed(
            200,
            r#"{"method":"GET","endpoint":"/posts","payload":{},"expected_status":200}"#,
        )
        .await;
        let client = client_for(&server, Some("k"));
        let first = client.resolve("list posts").await.unwrap();
        let second = client.resolve("list posts").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(server.received().len(), 2);
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_service() {
        let server = StubServer::fixed(200, "{}").await;
        let err = client_for(&server, None).resolve("anything").await.unwrap_err();
        assert_eq!(err, InterpreterError::Authentication(NOT_AUTHENTICATED.to_string()));
        assert!(server.received().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_is_an_authentication_error() {
        let server = StubServer::fixed(401, r#"{"error":"bad key"}"#).await;
        let err = client_for(&server, Some("k")).resolve("x").await.unwrap_err();
        assert_eq!(err, InterpreterError::Authentication(INVALID_KEY.to_string()));
    }

    #[tokio::test]
    async fn server_errors_are_upstream() {
        let server = StubServer::fixed(503, "").await;
        let err = client_for(&server, Some("k")).resolve("x").await.unwrap_err();
        assert_eq!(err, InterpreterError::Upstream(SERVER_ERROR.to_string()));
    }

    #[tokio::test]
    async fn other_statuses_carry_service_message() {
        let server = StubServer::fixed(400, r#"{"message":"Instruction is too vague"}"#).await;
        let err = client_for(&server, Some("k")).resolve("x").await.unwrap_err();
        assert_eq!(
            err,
            InterpreterError::Rejected {
                status: 400,
                message: "Instruction is too vague".to_string()
            }
        );
    }

    #[tokio::test]
    async fn other_statuses_without_message_get_generic_text() {
        let server = StubServer::fixed(429, "slow down").await;
        let err = client_for(&server, Some("k")).resolve("x").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 429 Too Many Requests");
    }

    #[tokio::test]
    async fn malformed_answers_are_rejected() {
        let bodies = [
            "not json",
            r#"{"endpoint":"/posts","expected_status":200}"#,
            r#"{"method":"GET","expected_status":200}"#,
            r#"{"method":"GET","endpoint":"/posts"}"#,
            r#"{"method":"FETCH","endpoint":"/posts","expected_status":200}"#,
            r#"{"method":"GET","endpoint":"posts","expected_status":200}"#,
            r#"{"method":"GET","endpoint":"/posts","expected_status":700}"#,
            r#"{"method":"GET","endpoint":"/posts","payload":[1],"expected_status":200}"#,
        ];
        for body in bodies {
            let server = StubServer::fixed(200, body).await;
            let err = client_for(&server, Some("k")).resolve("x").await.unwrap_err();
            assert!(
                matches!(err, InterpreterError::Malformed(_)),
                "{body} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ServiceConfig::new(&format!("http://127.0.0.1:{port}"), None).unwrap();
        let client = InterpreterClient::new(config, ApiKey::new("k")).unwrap();
        let err = client.resolve("x").await.unwrap_err();
        assert_eq!(err, InterpreterError::Upstream(UNREACHABLE.to_string()));
    }

    #[tokio::test]
    async fn whoami_returns_principal() {
        let server =
            StubServer::fixed(200, r#"{"id":"u_1","email":"dev@example.com","name":"Dev"}"#).await;
        let client = client_for(&server, None);

        let principal = client.whoami(&ApiKey::new("abc").unwrap()).await.unwrap();

        assert_eq!(principal.email_or_unknown(), "dev@example.com");
        assert_eq!(principal.id_or_unknown(), "u_1");
        let received = server.received();
        assert_eq!(received[0].method, "GET");
        assert_eq!(received[0].path, "/v1/whoami");
        assert_eq!(received[0].headers["authorization"], "Bearer abc");
    }

    #[tokio::test]
    async fn whoami_with_bad_key_is_authentication_error() {
        let server = StubServer::fixed(401, "{}").await;
        let err = client_for(&server, None)
            .whoami(&ApiKey::new("nope").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, InterpreterError::Authentication(_)));
    }
}
