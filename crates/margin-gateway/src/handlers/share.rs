use crate::error::{AppError, Result};
use crate::model::{CreateShareResponse, GetShareResponse};
use crate::state::AppState;
use axum::extract::rejection::StringRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// `POST /api/share`: the raw request body is the Markdown document.
pub async fn create_share_handler(
    State(state): State<AppState>,
    body: std::result::Result<String, StringRejection>,
) -> Result<(StatusCode, Json<CreateShareResponse>)> {
    let markdown = body?;
    let created = state.sharer().create_share(markdown).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /api/share/{code}`
pub async fn get_share_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetShareResponse>> {
    let doc = state.sharer().get_share(&code).await?;
    Ok(Json(doc.into()))
}

pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}
