use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use chirpy_db::models::ChirpRow;
use chirpy_types::api::CreateChirpRequest;
use chirpy_types::models::Chirp;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validation::validate_chirp;

fn to_chirp(row: ChirpRow) -> Chirp {
    Chirp {
        id: row.id,
        body: row.body,
    }
}

pub async fn create_chirp(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateChirpRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let cleaned = validate_chirp(&req.body)?;

    // Write-through hits the disk, keep it off the async runtime
    let st = state.clone();
    let row = tokio::task::spawn_blocking(move || st.db.create_chirp(&cleaned)).await??;

    Ok((StatusCode::CREATED, Json(to_chirp(row))))
}

pub async fn get_chirps(State(state): State<AppState>) -> ApiResult<Json<Vec<Chirp>>> {
    let rows = state.db.get_chirps()?;
    Ok(Json(rows.into_iter().map(to_chirp).collect()))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Chirp>> {
    let id: u32 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid chirp ID".into()))?;

    let row = state.db.get_chirp(id)?;
    Ok(Json(to_chirp(row)))
}
