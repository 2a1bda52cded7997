use axum::{middleware, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Build the full application router
pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;
    use handlers::public;

    Router::new()
        // Token acquisition and account creation
        .route("/login", post(public::login_post))
        .route("/user", post(public::user_post))
}

fn protected_routes() -> Router {
    use handlers::protected::{combos, seats, sessions, tickets, users};

    Router::new()
        // Screenings
        .route(
            "/sessao",
            get(sessions::sessao_list).post(sessions::sessao_post),
        )
        .route(
            "/sessao/:id",
            get(sessions::sessao_get)
                .put(sessions::sessao_put)
                .delete(sessions::sessao_delete),
        )
        // Users (registration stays public)
        .route("/user", get(users::user_list))
        .route(
            "/user/:id",
            get(users::user_get)
                .put(users::user_put)
                .delete(users::user_delete),
        )
        // Seats
        .route(
            "/poltrona",
            get(seats::poltrona_list).post(seats::poltrona_post),
        )
        .route(
            "/poltrona/:id",
            get(seats::poltrona_get).delete(seats::poltrona_delete),
        )
        // Tickets
        .route(
            "/bilhete",
            get(tickets::bilhete_list).post(tickets::bilhete_post),
        )
        .route(
            "/bilhete/:id",
            get(tickets::bilhete_get).delete(tickets::bilhete_delete),
        )
        // Combos
        .route("/combo", get(combos::combo_list).post(combos::combo_post))
        .route(
            "/combo/:id",
            get(combos::combo_get).delete(combos::combo_delete),
        )
        // Bearer token required for everything above
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Cinema API",
            "version": version,
            "description": "Movie-theater session and ticket booking backend",
            "endpoints": {
                "home": "/ (public)",
                "login": "/login (public - token acquisition)",
                "register": "POST /user (public)",
                "sessao": "/sessao[/:id] (protected)",
                "user": "/user[/:id] (protected)",
                "poltrona": "/poltrona[/:id] (protected)",
                "bilhete": "/bilhete[/:id] (protected)",
                "combo": "/combo[/:id] (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check().await {
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
