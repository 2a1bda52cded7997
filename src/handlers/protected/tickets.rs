// /bilhete - ticket CRUD; referenced seat and screening must exist

use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::ticket::Ticket;
use crate::database::{db_pool, tickets};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct CreateTicketRequest {
    pub id_poltrona: Option<i32>,
    pub id_sessao: Option<i32>,
}

/// GET /bilhete
pub async fn bilhete_list() -> ApiResult<Vec<Ticket>> {
    let pool = db_pool().await?;
    Ok(ApiResponse::success(tickets::list(&pool).await?))
}

/// GET /bilhete/:id
pub async fn bilhete_get(Path(id): Path<i32>) -> ApiResult<Ticket> {
    let pool = db_pool().await?;
    let ticket = tickets::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("bilhete not found"))?;
    Ok(ApiResponse::success(ticket))
}

/// POST /bilhete
pub async fn bilhete_post(Json(req): Json<CreateTicketRequest>) -> ApiResult<Ticket> {
    let id_poltrona = req
        .id_poltrona
        .ok_or_else(|| ApiError::missing_field("id_poltrona"))?;
    let id_sessao = req
        .id_sessao
        .ok_or_else(|| ApiError::missing_field("id_sessao"))?;

    let pool = db_pool().await?;
    let ticket = tickets::insert(
        &pool,
        &tickets::NewTicket {
            id_poltrona,
            id_sessao,
        },
    )
    .await?;
    Ok(ApiResponse::success(ticket))
}

/// DELETE /bilhete/:id
pub async fn bilhete_delete(Path(id): Path<i32>) -> ApiResult<Value> {
    let pool = db_pool().await?;
    if !tickets::delete(&pool, id).await? {
        return Err(ApiError::not_found("bilhete not found"));
    }
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
