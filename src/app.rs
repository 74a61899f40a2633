use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(config));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health_get))
        .route("/token", post(public::token_post))
        .route("/users/auth", post(public::register_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(protected::users_list))
        .route("/api/user/:id", get(protected::user_get))
        .route("/api/insert", post(protected::user_insert))
        .route("/api/update/:id", put(protected::user_update))
        .route("/api/delete/:id", delete(protected::user_delete))
        .route("/api/users/search", get(protected::search_get))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_development() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
