use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use contracts::domain::a002_tna_schedule::aggregate::TnaScheduleDto;

use crate::domain::a002_tna_schedule as tna;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TnaListResponse {
    pub items: Vec<TnaScheduleDto>,
    pub page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
}

/// GET /api/tna-schedules
pub async fn list_paginated(
    Query(query): Query<ListQuery>,
) -> Result<Json<TnaListResponse>, StatusCode> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * limit;

    match tna::service::list_paginated(query.search, limit, offset).await {
        Ok(result) => {
            let total_pages = ((result.total + limit - 1) / limit).max(1);
            Ok(Json(TnaListResponse {
                items: result
                    .items
                    .iter()
                    .map(TnaScheduleDto::from_aggregate)
                    .collect(),
                page: page as usize,
                total_pages: total_pages as usize,
                has_next_page: page < total_pages,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to list TNA schedules: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/tna-schedules/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<TnaScheduleDto>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match tna::service::get_by_id(uuid).await {
        Ok(Some(schedule)) => Ok(Json(TnaScheduleDto::from_aggregate(&schedule))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get TNA schedule {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/tna-schedules (create, or update when the id field is set)
pub async fn upsert(
    Json(dto): Json<TnaScheduleDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        tna::service::update(dto).await.map(|_| Uuid::nil().to_string())
    } else {
        tna::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Failed to save TNA schedule: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/tna-schedules/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match tna::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete TNA schedule {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
