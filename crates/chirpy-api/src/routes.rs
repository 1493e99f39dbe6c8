use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{admin, chirps, middleware::require_auth, users};

/// Build the full application router. Tracing and other outer layers are
/// left to the caller.
pub fn router(state: AppState) -> Router {
    let app_files = Router::new()
        .nest_service("/app", ServeDir::new(state.fileserver_root.clone()))
        .layer(middleware::from_fn_with_state(state.clone(), admin::count_hits));

    let users_route = post(users::create_user).merge(
        put(users::update_user)
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
    );

    Router::new()
        .route("/api/healthz", get(admin::healthz))
        .route("/api/reset", get(admin::reset))
        .route("/admin/metrics", get(admin::metrics))
        .route("/api/chirps", get(chirps::get_chirps).post(chirps::create_chirp))
        .route("/api/chirps/{id}", get(chirps::get_chirp))
        .route("/api/users", users_route)
        .route("/api/login", post(users::login))
        .merge(app_files)
        .with_state(state)
}
