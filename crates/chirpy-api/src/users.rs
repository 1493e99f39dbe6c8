use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::{info, warn};

use chirpy_db::DbError;
use chirpy_db::models::UserRow;
use chirpy_types::api::{LoginRequest, LoginResponse, UserCredentialsRequest};
use chirpy_types::models::UserResponse;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

fn to_response(row: UserRow) -> UserResponse {
    UserResponse {
        id: row.id,
        email: row.email,
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<UserCredentialsRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    // Argon2 is CPU-bound and the insert writes to disk
    let st = state.clone();
    let row = tokio::task::spawn_blocking(move || -> ApiResult<UserRow> {
        let password_hash = st.hasher.hash(&req.password)?;
        Ok(st.db.create_user(&req.email, &password_hash)?)
    })
    .await??;

    info!("Registered user {}", row.id);
    Ok((StatusCode::CREATED, Json(to_response(row))))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state.db.find_user_by_email(&req.email).map_err(|e| match e {
        DbError::NotFound { .. } => {
            ApiError::BadRequest("Could not find user with that email".into())
        }
        other => other.into(),
    })?;

    let st = state.clone();
    let hash = user.password_hash.clone();
    let password = req.password;
    let matches = tokio::task::spawn_blocking(move || st.hasher.verify(&hash, &password)).await??;
    if !matches {
        warn!("Failed login for user {}", user.id);
        return Err(ApiError::Unauthorized("Passwords did not match".into()));
    }

    let token = state
        .tokens
        .issue(&user.id.to_string(), req.expires_in_seconds)?;

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        token,
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    WithRejection(Json(req), _): WithRejection<Json<UserCredentialsRequest>, ApiError>,
) -> ApiResult<Json<UserResponse>> {
    let st = state.clone();
    let row = tokio::task::spawn_blocking(move || -> ApiResult<UserRow> {
        let password_hash = st.hasher.hash(&req.password)?;
        Ok(st.db.update_user(auth.user_id, &req.email, &password_hash)?)
    })
    .await??;

    info!("Updated credentials for user {}", row.id);
    Ok(Json(to_response(row)))
}
