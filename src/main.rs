use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use staynest::auth::token::TokenKeys;
use staynest::config::Config;
use staynest::{auth, bookings, db, messages, properties, users, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("staynest=debug,info")),
        )
        .init();

    let config = Config::from_env();

    let pool = db::connect(&config.database_url).await?;
    db::migrate(&pool).await?;

    let tokens = TokenKeys::new(&config.token_secret, config.token_ttl_minutes);
    let state = AppState::new(pool, tokens);

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router())
        .nest("/api/properties", properties::router())
        .nest("/api/bookings", bookings::router())
        .nest("/api/messages", messages::router())
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to StayNest API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "StayNest API is running" }))
}
