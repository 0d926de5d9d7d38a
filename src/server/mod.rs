/// HTTP server for the status page and JSON endpoint
pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tracing::info;

use crate::calendar::CalendarRegistry;
use crate::config::ServerConfig;
use crate::error::Result;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CalendarRegistry>,
    pub settings: Arc<ServerConfig>,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/data.json", get(handlers::data))
        .route("/health", get(handlers::health))
        .nest_service("/static", static_files)
        .with_state(state)
}

/// Run the server until Ctrl+C
pub async fn run_server(config: ServerConfig, registry: CalendarRegistry) -> Result<()> {
    let addr = format!("{}:{}", config.bind, config.port);
    let state = AppState {
        registry: Arc::new(registry),
        settings: Arc::new(config),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Status server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Status server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    info!("Ctrl+C received - shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Datelike, Duration, NaiveTime, Utc};
    use tower::ServiceExt;

    use crate::calendar::MarketCalendar;
    use crate::types::Window;

    fn window(h: u32) -> Window {
        Window::new(
            NaiveTime::from_hms_opt(h, 30, 0).unwrap(),
            Duration::hours(6) + Duration::minutes(30),
        )
        .unwrap()
    }

    fn make_state(years: Vec<i32>) -> AppState {
        let calendars = years
            .into_iter()
            .map(|year| {
                MarketCalendar::new(year, vec![], window(14), window(13), None, None, None, None)
                    .unwrap()
            })
            .collect();

        AppState {
            registry: Arc::new(CalendarRegistry::new(calendars)),
            settings: Arc::new(ServerConfig::default()),
        }
    }

    /// Registry covering this year and the next, so queries never fall off
    /// the table mid-test
    fn live_state() -> AppState {
        let year = Utc::now().year();
        make_state(vec![year, year + 1])
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let app = build_router(live_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_data_serves_json() {
        let app = build_router(live_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/data.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("application/json"));
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let app = build_router(live_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_uncovered_year_is_service_unavailable() {
        let app = build_router(make_state(vec![]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/data.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
