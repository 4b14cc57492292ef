use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use contracts::domain::a001_cost_sheet::aggregate::{
    CheckStyleResponse, CostSheetListResponse, CostSheetPayload, CostSheetRecord, CostSheetUpdate,
};

use crate::domain::a001_cost_sheet::service::{self, CostSheetError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckStyleQuery {
    pub style: Option<String>,
}

fn map_error(e: CostSheetError) -> StatusCode {
    match e {
        CostSheetError::StyleExists { .. } => StatusCode::CONFLICT,
        CostSheetError::NotFound => StatusCode::NOT_FOUND,
        CostSheetError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CostSheetError::Other(e) => {
            tracing::error!("Cost sheet operation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /api/cost-sheets
pub async fn list_paginated(
    Query(query): Query<ListQuery>,
) -> Result<Json<CostSheetListResponse>, StatusCode> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * limit;

    match service::list_paginated(query.search, limit, offset).await {
        Ok(result) => {
            let total_pages = ((result.total + limit - 1) / limit).max(1);
            Ok(Json(CostSheetListResponse {
                sanitized: result.items,
                page: page as usize,
                total_pages: total_pages as usize,
                has_next_page: page < total_pages,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to list cost sheets: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/cost-sheets/check-style
pub async fn check_style(
    Query(query): Query<CheckStyleQuery>,
) -> Result<Json<CheckStyleResponse>, StatusCode> {
    let style = query.style.unwrap_or_default();
    match service::check_style(&style).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to check style {}: {}", style, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/cost-sheets/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CostSheetRecord>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match service::get_by_id(uuid).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get cost sheet {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/cost-sheets
pub async fn create(
    Json(payload): Json<CostSheetPayload>,
) -> Result<Json<CostSheetRecord>, StatusCode> {
    service::create(payload, "admin".to_string())
        .await
        .map(Json)
        .map_err(map_error)
}

/// PUT /api/cost-sheets/:id
pub async fn update(
    Path(id): Path<String>,
    Json(body): Json<CostSheetUpdate>,
) -> Result<Json<CostSheetRecord>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    service::update(uuid, body.data).await.map(Json).map_err(map_error)
}

/// DELETE /api/cost-sheets/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete cost sheet {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
