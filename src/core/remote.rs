//! Typed wrappers around the learnings service HTTP API.
//!
//! Every method is exactly one request/response exchange. Nothing here retries
//! and nothing here touches local state.

use crate::core::error::LearnsyncError;
use crate::core::output::compact_line;
use crate::core::pending::LearningRecord;
use crate::core::settings::Settings;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DETAIL_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginSession {
    pub access_token: String,
    pub user_id: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Who an API key belongs to, as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyIdentity {
    pub user_id: u64,
    pub project_id: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct GenerateKeyRequest {
    project_id: Value,
}

#[derive(Deserialize)]
struct GenerateKeyResponse {
    api_key: String,
}

#[derive(Deserialize)]
struct TestApiKeyResponse {
    user: TestApiKeyUser,
}

#[derive(Deserialize)]
struct TestApiKeyUser {
    user_id: u64,
    project_id: Value,
}

#[derive(Serialize)]
struct LearningPayload<'a> {
    file_path: &'a str,
    function_name: &'a str,
    library_name: &'a str,
    description: &'a str,
    code_snippet: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

impl<'a> From<&'a LearningRecord> for LearningPayload<'a> {
    fn from(record: &'a LearningRecord) -> Self {
        Self {
            file_path: &record.file_path,
            function_name: &record.function_name,
            library_name: &record.library_name,
            description: &record.description,
            code_snippet: &record.code_snippet,
            title: record.title.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http: Client,
}

impl RemoteClient {
    pub fn new(settings: &Settings) -> Result<Self, LearnsyncError> {
        Self::with_base_url(&settings.api_url, settings.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, LearnsyncError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("learnsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, label: &str, request: RequestBuilder) -> Result<Response, LearnsyncError> {
        let response = request.send()?;
        debug!(op = label, status = response.status().as_u16(), "remote exchange");
        Ok(response)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<LoginSession, LearnsyncError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password });
        let response = self.send("login", request)?;
        if !response.status().is_success() {
            let (_, detail) = failure_detail(response);
            return Err(LearnsyncError::AuthFailed(detail));
        }
        Ok(response.json()?)
    }

    /// Succeeds with `true` only when the token's account can see the project.
    pub fn verify_project_ownership(
        &self,
        access_token: &str,
        project_id: &str,
    ) -> Result<bool, LearnsyncError> {
        let request = self
            .http
            .get(self.url(&format!("/projects/{}", project_id)))
            .bearer_auth(access_token);
        let response = self.send("verify_project", request)?;
        if !response.status().is_success() {
            let (_, detail) = failure_detail(response);
            return Err(LearnsyncError::ProjectNotOwned {
                project_id: project_id.to_string(),
                detail,
            });
        }
        Ok(true)
    }

    pub fn issue_api_key(
        &self,
        access_token: &str,
        project_id: &str,
    ) -> Result<String, LearnsyncError> {
        let request = self
            .http
            .post(self.url("/auth/generate-key"))
            .bearer_auth(access_token)
            .json(&GenerateKeyRequest {
                project_id: project_id_value(project_id),
            });
        let response = self.send("issue_api_key", request)?;
        if !response.status().is_success() {
            let (_, detail) = failure_detail(response);
            return Err(LearnsyncError::KeyIssuanceFailed(detail));
        }
        let body: GenerateKeyResponse = response.json()?;
        if body.api_key.trim().is_empty() {
            return Err(LearnsyncError::KeyIssuanceFailed(
                "service returned an empty API key".to_string(),
            ));
        }
        Ok(body.api_key)
    }

    pub fn validate_api_key(&self, api_key: &str) -> Result<ApiKeyIdentity, LearnsyncError> {
        let request = self
            .http
            .get(self.url("/auth/test-api-key"))
            .header(AUTHORIZATION, format!("ApiKey {}", api_key));
        let response = self.send("validate_api_key", request)?;
        if !response.status().is_success() {
            let (_, detail) = failure_detail(response);
            return Err(LearnsyncError::InvalidApiKey(detail));
        }
        let body: TestApiKeyResponse = response.json()?;
        let project_id = id_to_string(&body.user.project_id).ok_or_else(|| {
            LearnsyncError::InvalidApiKey(format!(
                "unexpected project_id in response: {}",
                body.user.project_id
            ))
        })?;
        Ok(ApiKeyIdentity {
            user_id: body.user.user_id,
            project_id,
        })
    }

    pub fn submit_learning(
        &self,
        api_key: &str,
        project_id: &str,
        record: &LearningRecord,
    ) -> Result<(), LearnsyncError> {
        let request = self
            .http
            .post(self.url(&format!("/projects/{}/learnings", project_id)))
            .header(AUTHORIZATION, format!("ApiKey {}", api_key))
            .json(&LearningPayload::from(record));
        let response = self.send("submit_learning", request)?;
        if !response.status().is_success() {
            let (status, detail) = failure_detail(response);
            return Err(LearnsyncError::SubmissionFailed { status, detail });
        }
        Ok(())
    }
}

/// Numeric project ids travel as JSON numbers; anything else is sent verbatim.
fn project_id_value(project_id: &str) -> Value {
    project_id
        .trim()
        .parse::<u64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(project_id))
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn failure_detail(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    (status.as_u16(), extract_detail(status, &body))
}

/// Best human-readable reason from an error response body.
pub(crate) fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message", "error"] {
            match value.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => {
                    return compact_line(s, DETAIL_MAX_CHARS);
                }
                Some(Value::String(_)) | Some(Value::Null) | None => {}
                Some(other) => return compact_line(&other.to_string(), DETAIL_MAX_CHARS),
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return compact_line(trimmed, DETAIL_MAX_CHARS);
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_prefers_json_detail_field() {
        assert_eq!(
            extract_detail(StatusCode::UNAUTHORIZED, r#"{"detail":"Incorrect password"}"#),
            "Incorrect password"
        );
        assert_eq!(
            extract_detail(StatusCode::BAD_REQUEST, r#"{"message":"bad project"}"#),
            "bad project"
        );
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let detail = extract_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
        );
        assert!(detail.contains("field required"), "{detail}");
    }

    #[test]
    fn detail_falls_back_to_body_then_reason() {
        assert_eq!(
            extract_detail(StatusCode::BAD_GATEWAY, "upstream\n down"),
            "upstream down"
        );
        assert_eq!(
            extract_detail(StatusCode::SERVICE_UNAVAILABLE, "  "),
            "Service Unavailable"
        );
        assert_eq!(
            extract_detail(StatusCode::NOT_FOUND, r#"{"detail":""}"#),
            r#"{"detail":""}"#
        );
    }

    #[test]
    fn project_ids_compare_as_strings() {
        assert_eq!(id_to_string(&Value::from(42u64)), Some("42".to_string()));
        assert_eq!(id_to_string(&Value::from("42")), Some("42".to_string()));
        assert_eq!(id_to_string(&Value::Null), None);
        assert_eq!(project_id_value("42"), Value::from(42u64));
        assert_eq!(project_id_value("proj-a"), Value::from("proj-a"));
    }

    #[test]
    fn payload_uses_snake_case_keys() {
        let record = LearningRecord {
            file_path: "a.rs".to_string(),
            function_name: "f".to_string(),
            library_name: "serde".to_string(),
            description: "d".to_string(),
            code_snippet: "c".to_string(),
            title: None,
        };
        let value = serde_json::to_value(LearningPayload::from(&record)).expect("serialize");
        assert_eq!(value["file_path"], "a.rs");
        assert_eq!(value["code_snippet"], "c");
        assert!(value.get("title").is_none());
    }
}
