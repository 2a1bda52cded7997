// /poltrona - theater seat CRUD

use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::seat::Seat;
use crate::database::{db_pool, seats};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct CreateSeatRequest {
    pub fila: Option<String>,
    pub numero: Option<i32>,
}

/// GET /poltrona
pub async fn poltrona_list() -> ApiResult<Vec<Seat>> {
    let pool = db_pool().await?;
    Ok(ApiResponse::success(seats::list(&pool).await?))
}

/// GET /poltrona/:id
pub async fn poltrona_get(Path(id): Path<i32>) -> ApiResult<Seat> {
    let pool = db_pool().await?;
    let seat = seats::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("poltrona not found"))?;
    Ok(ApiResponse::success(seat))
}

/// POST /poltrona
pub async fn poltrona_post(Json(req): Json<CreateSeatRequest>) -> ApiResult<Seat> {
    let fila = req
        .fila
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::missing_field("fila"))?;
    let numero = req
        .numero
        .filter(|n| *n > 0)
        .ok_or_else(|| ApiError::missing_field("numero"))?;

    let pool = db_pool().await?;
    let seat = seats::insert(
        &pool,
        &seats::NewSeat {
            fila: fila.to_string(),
            numero,
        },
    )
    .await?;
    Ok(ApiResponse::success(seat))
}

/// DELETE /poltrona/:id
pub async fn poltrona_delete(Path(id): Path<i32>) -> ApiResult<Value> {
    let pool = db_pool().await?;
    if !seats::delete(&pool, id).await? {
        return Err(ApiError::not_found("poltrona not found"));
    }
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
