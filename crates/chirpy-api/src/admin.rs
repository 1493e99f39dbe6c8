use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, Response},
};

use crate::state::AppState;

pub async fn healthz() -> &'static str {
    "OK"
}

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n<body>\n<h1>Welcome, Chirpy Admin</h1>\n<p>Chirpy has been visited {} times!</p>\n</body>\n</html>\n",
        state.hits()
    ))
}

pub async fn reset(State(state): State<AppState>) -> &'static str {
    state.reset_hits();
    "Hits reset"
}

/// Count every request reaching the static file server.
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.record_hit();
    next.run(req).await
}
