// /sessao - screening CRUD, guarded by the scheduling validator

use axum::extract::Path;
use axum::Json;
use serde_json::{json, Value};

use crate::database::db_pool;
use crate::database::models::screening::Screening;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::screenings::store::{PgScreeningStore, ScreeningStore};
use crate::screenings::validator::{
    self, CreateScreeningRequest, UpdateScreeningRequest,
};

async fn store() -> Result<PgScreeningStore, ApiError> {
    Ok(PgScreeningStore::new(db_pool().await?))
}

/// GET /sessao - list all screenings
pub async fn sessao_list() -> ApiResult<Vec<Screening>> {
    let store = store().await?;
    Ok(ApiResponse::success(store.list().await?))
}

/// GET /sessao/:id - fetch one screening
pub async fn sessao_get(Path(id): Path<i32>) -> ApiResult<Screening> {
    let store = store().await?;
    let screening = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("sessao not found"))?;
    Ok(ApiResponse::success(screening))
}

/// POST /sessao - create a screening after full validation
pub async fn sessao_post(Json(req): Json<CreateScreeningRequest>) -> ApiResult<Screening> {
    let store = store().await?;
    let new = validator::validate_create(&store, &req).await?;
    let created = store.insert(&new).await?;

    tracing::info!(
        id = created.id,
        id_sala = created.id_sala,
        "scheduled screening"
    );
    Ok(ApiResponse::success(created))
}

/// PUT /sessao/:id - update title and description only
pub async fn sessao_put(
    Path(id): Path<i32>,
    Json(req): Json<UpdateScreeningRequest>,
) -> ApiResult<Screening> {
    let update = validator::validate_update(&req)?;

    let store = store().await?;
    let updated = store
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("sessao not found"))?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /sessao/:id
pub async fn sessao_delete(Path(id): Path<i32>) -> ApiResult<Value> {
    let store = store().await?;
    if !store.delete(id).await? {
        return Err(ApiError::not_found("sessao not found"));
    }
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
