pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use relay_core::config::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Build the axum Router over a relay opened from `config`.
/// Used by `serve()` and available for integration testing.
pub fn build_router(config: &Config) -> Router {
    router(state::AppState::new(config))
}

/// Build the Router around an existing state.
pub fn router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = app_state.static_dir.clone();
    let index = ServeFile::new(static_dir.join("index.html"));

    Router::new()
        // Actions
        .route(
            "/actions",
            get(routes::actions::list_actions).post(routes::actions::create_action),
        )
        .route(
            "/actions/{id}",
            get(routes::actions::get_action)
                .put(routes::actions::update_action)
                .delete(routes::actions::delete_action),
        )
        .route(
            "/actions/{id}/trigger",
            post(routes::trigger::trigger_by_id),
        )
        // Trigger by name; names may contain '/'
        .route("/trigger/{*name}", get(routes::trigger::trigger_by_name))
        // Logs
        .route("/logs", get(routes::logs::list_logs))
        // Browser UI
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(index)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the relay server on `config.port`.
pub async fn serve(config: Config, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(config, listener, open_browser).await
}

/// Start the relay server on a pre-bound listener.
///
/// The caller can read the actual port before starting (useful when
/// `port = 0` and the OS picks a free port).
pub async fn serve_on(
    config: Config,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(&config);

    tracing::info!("Server running on port {actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
