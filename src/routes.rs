use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected::clothing, public};
use crate::middleware::api_key_middleware;
use crate::state::AppState;

/// Full application router: public routes at the root, clothing under /api/v1
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .nest("/api/v1", api_v1_routes(state.clone()))
        .fallback(public::not_found)
        // Global middleware
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_v1_routes(state: AppState) -> Router<AppState> {
    clothing_routes().layer(middleware::from_fn_with_state(state, api_key_middleware))
}

fn clothing_routes() -> Router<AppState> {
    Router::new()
        // Collection, with or without the trailing slash
        .route("/clothing", get(clothing::list).post(clothing::create))
        .route("/clothing/", get(clothing::list).post(clothing::create))
        .route("/clothing/search", get(clothing::search))
        .route("/clothing/search/color", get(clothing::search_by_color))
        .route("/clothing/search/size", get(clothing::search_by_size))
        .route("/clothing/increase-stock", patch(clothing::increase_stock))
        .route("/clothing/decrease-stock", patch(clothing::decrease_stock))
        .route("/clothing/available", get(clothing::available))
        .route("/clothing/out-of-stock", get(clothing::out_of_stock))
        .route("/clothing/low-stock", get(clothing::low_stock))
        // Record-level operations
        .route(
            "/clothing/:id",
            get(clothing::get)
                .put(clothing::update)
                .delete(clothing::delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
