// /combo - concession combo CRUD

use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::combo::{Combo, COMBO_TYPES};
use crate::database::{combos, db_pool};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct CreateComboRequest {
    pub id_user: Option<i32>,
    pub value: Option<String>,
    pub tipo: Option<String>,
}

/// GET /combo
pub async fn combo_list() -> ApiResult<Vec<Combo>> {
    let pool = db_pool().await?;
    Ok(ApiResponse::success(combos::list(&pool).await?))
}

/// GET /combo/:id
pub async fn combo_get(Path(id): Path<i32>) -> ApiResult<Combo> {
    let pool = db_pool().await?;
    let combo = combos::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("combo not found"))?;
    Ok(ApiResponse::success(combo))
}

/// POST /combo
pub async fn combo_post(Json(req): Json<CreateComboRequest>) -> ApiResult<Combo> {
    let id_user = req
        .id_user
        .ok_or_else(|| ApiError::missing_field("id_user"))?;
    let value = req
        .value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::missing_field("value"))?;
    let tipo = req
        .tipo
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::missing_field("tipo"))?;

    if !COMBO_TYPES.contains(&tipo) {
        return Err(ApiError::invalid_format("tipo", tipo));
    }

    let pool = db_pool().await?;
    let combo = combos::insert(
        &pool,
        &combos::NewCombo {
            id_user,
            value: value.to_string(),
            tipo: tipo.to_string(),
        },
    )
    .await?;
    Ok(ApiResponse::success(combo))
}

/// DELETE /combo/:id
pub async fn combo_delete(Path(id): Path<i32>) -> ApiResult<Value> {
    let pool = db_pool().await?;
    if !combos::delete(&pool, id).await? {
        return Err(ApiError::not_found("combo not found"));
    }
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
