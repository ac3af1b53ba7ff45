//! AQS REST API
//!
//! The endpoints the BOQ dashboard and the board page read from, behind a
//! trait seam so stores and enrichment can run against any implementation.

use std::future::Future;
use std::time::Duration;

use aqs_models::EntityId;
use aqs_utils::{AqsError, AqsResult, ApiConfig, EndpointConfig};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// BOQ endpoints. Every call resolves to the response's `data` payload.
pub trait BoqApi: Sync {
    fn approved_projects(&self) -> impl Future<Output = AqsResult<Value>> + Send;

    fn approved_boq_list(
        &self,
        project_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send;

    fn approved_boq_details(
        &self,
        boq_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send;
}

/// Kanban board endpoints.
pub trait BoardApi: Sync {
    fn login_board_details(
        &self,
        employee_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send;
}

/// Check a required id before any request is made.
pub fn require_id<'a>(
    id: Option<&'a EntityId>,
    field: &str,
    message: &str,
) -> AqsResult<&'a EntityId> {
    match id {
        Some(EntityId::Text(text)) if text.trim().is_empty() => {
            Err(AqsError::missing_input(field, message))
        }
        Some(id) => Ok(id),
        None => Err(AqsError::missing_input(field, message)),
    }
}

/// The `data` field of a response envelope. Missing or falsy payloads read
/// as an empty list.
pub fn extract_data(envelope: Value) -> Value {
    let data = match envelope {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        _ => Value::Null,
    };

    match &data {
        Value::Null | Value::Bool(false) => Value::Array(Vec::new()),
        Value::String(s) if s.is_empty() => Value::Array(Vec::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Value::Array(Vec::new()),
        _ => data,
    }
}

/// reqwest-backed client.
pub struct HttpApi {
    client: Client,
    base_url: String,
    endpoints: EndpointConfig,
    auth_token: Option<String>,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> AqsResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
            auth_token: config.auth_token.clone().filter(|t| !t.is_empty()),
        })
    }

    async fn get_data(&self, path: String, service: &'static str) -> AqsResult<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "{} request failed", service);
            AqsError::transport(service, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::error!(status = %status, url = %url, "{} API Error: {}", service, message);
            return Err(AqsError::transport(service, message));
        }

        let envelope: Value = response.json().await?;
        tracing::debug!(url = %url, "{} API Response received", service);
        Ok(extract_data(envelope))
    }
}

/// Prefer the server's own error message, then its raw body, then the status.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        body.to_string()
    }
}

impl BoqApi for HttpApi {
    fn approved_projects(&self) -> impl Future<Output = AqsResult<Value>> + Send {
        self.get_data(self.endpoints.approved_projects.clone(), "BOQ Projects")
    }

    fn approved_boq_list(
        &self,
        project_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send {
        let path = format!("{}/{}", self.endpoints.approved_boq_list, project_id);
        self.get_data(path, "Approved BOQ List")
    }

    fn approved_boq_details(
        &self,
        boq_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send {
        let path = format!("{}/{}", self.endpoints.approved_boq_details, boq_id);
        self.get_data(path, "Approved BOQ Details")
    }
}

impl BoardApi for HttpApi {
    fn login_board_details(
        &self,
        employee_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send {
        let path = format!("{}/{}", self.endpoints.login_board_details, employee_id);
        self.get_data(path, "Login Board Details")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_data() {
        assert_eq!(extract_data(json!({"data": [1, 2]})), json!([1, 2]));
        assert_eq!(extract_data(json!({"data": {"boqId": 1}})), json!({"boqId": 1}));
        assert_eq!(extract_data(json!({"status": "ok"})), json!([]));
        assert_eq!(extract_data(json!({"data": null})), json!([]));
        assert_eq!(extract_data(json!({"data": ""})), json!([]));
        assert_eq!(extract_data(json!({"data": 0})), json!([]));
        assert_eq!(extract_data(json!([{"data": 1}])), json!([]));
    }

    #[test]
    fn test_require_id() {
        let id = EntityId::Number(4);
        assert!(require_id(Some(&id), "projectId", "Project ID is required").is_ok());

        let blank = EntityId::Text(" ".to_string());
        let err = require_id(Some(&blank), "projectId", "Project ID is required").unwrap_err();
        assert_eq!(err.user_message(), "Project ID is required");

        let err = require_id(None, "boqId", "BOQ ID is required").unwrap_err();
        assert_eq!(err.error_code(), "MISSING_INPUT");
    }

    #[test]
    fn test_error_message_preference() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message": "Invalid project"}"#),
            "Invalid project"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, ""),
            "Request failed with status 404 Not Found"
        );
    }

    #[test]
    fn test_http_api_trims_base_url() {
        let config = ApiConfig {
            base_url: "http://portal.local/".to_string(),
            ..Default::default()
        };
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(api.base_url, "http://portal.local");
        assert!(api.auth_token.is_none());
    }
}
