#![allow(dead_code)]

use authdemo::config::{extract, ConfigV1};
use authdemo::render::RenderOptions;
use authdemo::startup::{self, Action, Report};
use figment::{
    providers::{Format, Yaml},
    Figment,
};

pub const FRONTEND: &str = "http://localhost:5173";

pub const USER_BODY: &str = r#"{"user": {"id": "user_01HZ", "email": "ada@example.com",
    "first_name": "Ada", "last_name": "Lovelace", "organization_id": "org_01HZ"}}"#;

pub const DASHBOARD_BODY: &str = r#"{
    "user": {"id": "user_01HZ", "email": "ada@example.com", "first_name": "Ada",
             "last_name": "Lovelace", "organization_id": "org_01HZ"},
    "dashboard_data": {"last_login": "2024-03-01T10:00:00Z", "role": "user",
                       "permissions": ["read", "write"]}
}"#;

/// Config pointing the backend at a mock server.
pub fn config_for(backend_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
backend:
  base_url: "{backend_url}"
  timeout_in_ms: 2000
frontend:
  origin: "{FRONTEND}"
logging:
  level: "debug"
  format: "json"
"#
    );
    extract(Figment::new().merge(Yaml::string(&yaml))).expect("test config should load")
}

pub async fn visit(backend_url: &str, location: &str, action: Action) -> Report {
    startup::run(
        &config_for(backend_url),
        location,
        action,
        RenderOptions::default(),
    )
    .await
    .expect("visit should run")
}

pub fn text(report: &Report) -> String {
    report.lines.join("\n")
}
