pub mod admin;
pub mod chirps;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod users;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::{AppState, AppStateInner};
