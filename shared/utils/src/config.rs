use aqs_models::{EntityId, SessionContext};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub auth_token: Option<String>,
    pub endpoints: EndpointConfig,
}

/// Endpoint paths, relative to `base_url`. Ids are appended as a trailing segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub approved_projects: String,
    pub approved_boq_list: String,
    pub approved_boq_details: String,
    pub login_board_details: String,
}

/// Stand-in for the browser session: who is logged in and what is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub employee_id: Option<String>,
    pub role_id: Option<u32>,
    pub project_id: Option<String>,
    pub boq_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("AQS")
                    .separator("__")
                    .try_parsing(true),
            );

        config.build()?.try_deserialize()
    }
}

impl SessionConfig {
    pub fn context(&self) -> SessionContext {
        SessionContext::new(non_blank_id(self.employee_id.as_deref()), self.role_id)
    }

    pub fn project_id(&self) -> Option<EntityId> {
        non_blank_id(self.project_id.as_deref())
    }

    pub fn boq_id(&self) -> Option<EntityId> {
        non_blank_id(self.boq_id.as_deref())
    }
}

fn non_blank_id(raw: Option<&str>) -> Option<EntityId> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(match raw.parse::<i64>() {
        Ok(n) => EntityId::Number(n),
        Err(_) => EntityId::Text(raw.to_string()),
    })
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
            auth_token: None,
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            approved_projects: "/api/boq/approved-projects".to_string(),
            approved_boq_list: "/api/boq/approved-list".to_string(),
            approved_boq_details: "/api/boq/approved-details".to_string(),
            login_board_details: "/api/kanban/login-board".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
            file_path: None,
        }
    }
}
