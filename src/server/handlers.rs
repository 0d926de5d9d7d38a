/// HTTP handlers: status page, JSON endpoint and liveness probe
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::server::AppState;

/// Payload served at /data.json
#[derive(Debug, Serialize)]
pub struct MarketStatus {
    #[serde(rename = "is-market-open")]
    pub is_market_open: bool,
    /// RFC 3339 with an explicit +00:00 offset
    #[serde(rename = "next-bell")]
    pub next_bell: String,
}

/// Status page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let now = Utc::now();
    let is_open = state.registry.is_market_open_at(now)?;
    let next_bell = state.registry.next_bell_after(now)?;

    debug!(%now, is_open, %next_bell, "Rendering status page");

    Ok(Html(render_index(
        is_open,
        &next_bell.to_rfc3339(),
        &state.settings,
    )))
}

/// JSON endpoint
pub async fn data(State(state): State<AppState>) -> Result<Json<MarketStatus>, ApiError> {
    let now = Utc::now();
    let is_market_open = state.registry.is_market_open_at(now)?;
    let next_bell = state.registry.next_bell_after(now)?.to_rfc3339();

    Ok(Json(MarketStatus {
        is_market_open,
        next_bell,
    }))
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn render_index(is_open: bool, next_bell: &str, settings: &ServerConfig) -> String {
    let status = if is_open { "YES" } else { "NO" };
    let status_class = if is_open { "open" } else { "closed" };
    let keywords = settings.meta_tags.join(",");
    let style_href = format!(
        "{}/static/style.css",
        settings.url_base.trim_end_matches('/')
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="keywords" content="{keywords}">
  <title>Is the market open?</title>
  <link rel="stylesheet" href="{style_href}">
</head>
<body>
  <main>
    <h1>Is the market open?</h1>
    <p class="status {status_class}">{status}</p>
    <p class="next-bell">Next bell: <time datetime="{next_bell}">{next_bell}</time></p>
    <p class="api-hint">Programmatic access: <a href="data.json">data.json</a></p>
  </main>
</body>
</html>
"#
    )
}

/// Error wrapper mapping service errors onto HTTP responses
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            ServiceError::MissingCalendar(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!("Request failed: {}", self.0);

        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_status_json_keys() {
        let status = MarketStatus {
            is_market_open: true,
            next_bell: "2021-06-15T20:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["is-market-open"], true);
        assert_eq!(json["next-bell"], "2021-06-15T20:00:00+00:00");
    }

    #[test]
    fn test_render_index_shows_status_and_bell() {
        let settings = ServerConfig::default();
        let page = render_index(true, "2021-06-15T20:00:00+00:00", &settings);

        assert!(page.contains(">YES<"));
        assert!(page.contains("2021-06-15T20:00:00+00:00"));
        assert!(page.contains("/static/style.css"));
        assert!(page.contains("nyse"));

        let page = render_index(false, "2021-06-15T20:00:00+00:00", &settings);
        assert!(page.contains(">NO<"));
    }

    #[test]
    fn test_render_index_respects_url_base() {
        let settings = ServerConfig {
            url_base: "/status/".to_string(),
            ..ServerConfig::default()
        };
        let page = render_index(true, "2021-06-15T20:00:00+00:00", &settings);
        assert!(page.contains("/status/static/style.css"));
    }
}
