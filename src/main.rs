use cinema_api::{app, config, database};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Cinema API in {:?} mode", config.environment);

    // The server still starts when the database is down; /health reports
    // degraded until it comes back.
    if let Err(e) = database::run_migrations().await {
        tracing::error!("could not run database migrations: {}", e);
    }

    let app = app::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Cinema API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
