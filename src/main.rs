use axum::{middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use quill_api::database::DatabaseManager;
use quill_api::handlers::{protected, public};
use quill_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill_api=info,tower_http=info".into()),
        )
        .init();

    let config = quill_api::config::config();
    tracing::info!("starting Quill API in {:?} mode", config.environment);

    if config.database.run_migrations {
        // Non-fatal: the server still binds so /health can report the outage
        if let Err(e) = DatabaseManager::migrate().await {
            tracing::warn!("migrations not applied: {}", e);
        }
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("QUILL_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Quill API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        // Token acquisition
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
        // Published content
        .route("/posts", get(public::posts::list))
        .route("/posts/:id", get(public::posts::get))
        .route("/posts/slug/:slug", get(public::posts::get_by_slug))
        .route("/posts/:id/comments", get(public::posts::comments))
}

fn api_routes() -> Router {
    use axum::routing::{post, put};

    Router::new()
        // Posts
        .route("/api/posts", post(protected::posts::create))
        .route(
            "/api/posts/:id",
            put(protected::posts::update).delete(protected::posts::delete),
        )
        .route("/api/posts/edit/:slug", get(protected::posts::editable))
        // Drafts
        .route("/api/drafts", post(protected::drafts::create))
        .route(
            "/api/drafts/:id",
            get(protected::drafts::get).put(protected::drafts::update),
        )
        // Comments and likes
        .route("/api/posts/:id/comments", post(protected::comments::create))
        .route(
            "/api/comments/:id",
            put(protected::comments::update).delete(protected::comments::delete),
        )
        .route("/api/comments/:id/like", put(protected::comments::like))
        // Follows
        .route("/api/accounts/:id/follow", put(protected::accounts::follow))
        // Notifications
        .route("/api/notifications", get(protected::notifications::list))
        .route("/api/notifications/unseen", get(protected::notifications::unseen))
        .route(
            "/api/notifications/:id/seen",
            put(protected::notifications::mark_seen),
        )
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Quill API",
            "version": version,
            "description": "Blogging platform backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "posts": "/posts[?keyword=|?prop=], /posts/:id, /posts/slug/:slug, /posts/:id/comments (public)",
                "api_posts": "/api/posts[/:id], /api/posts/edit/:slug (protected)",
                "api_drafts": "/api/drafts[/:id] (protected)",
                "api_comments": "/api/posts/:id/comments, /api/comments/:id[/like] (protected)",
                "api_follows": "/api/accounts/:id/follow (protected)",
                "api_notifications": "/api/notifications[/unseen], /api/notifications/:id/seen (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
