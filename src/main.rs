mod config;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env();
    let port = config.port;
    tracing::info!(
        seed_demo_projects = config.seed_demo_projects,
        cookie_secure = config.cookie_secure,
        session_ttl_secs = config.session_ttl.as_secs(),
        "configuration loaded"
    );

    let state = state::AppState::new(config);
    let _reaper = services::session::spawn_session_reaper(state.clone());

    // Without Leptos configuration the API still serves; only SSR pages are missing.
    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos SSR disabled, serving API only");
            routes::api_routes(state)
        }
    };

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "aura listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
