use contracts::domain::a001_cost_sheet::aggregate::{
    CheckStyleResponse, CostSheet, CostSheetPayload, CostSheetRecord,
};
use uuid::Uuid;

use super::repository::{self, CostSheetListQuery};

/// Service-level failures the handler layer maps to HTTP statuses
#[derive(Debug, thiserror::Error)]
pub enum CostSheetError {
    #[error("style {style} is already registered by {creator_name}")]
    StyleExists {
        style: String,
        creator_name: String,
    },
    #[error("cost sheet not found")]
    NotFound,
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct PaginatedSheets {
    pub items: Vec<CostSheetRecord>,
    pub total: u64,
}

/// Paginated list; every record goes out with recomputed totals
pub async fn list_paginated(
    search_query: Option<String>,
    limit: u64,
    offset: u64,
) -> anyhow::Result<PaginatedSheets> {
    let result = repository::list_paginated(CostSheetListQuery {
        search_query,
        limit,
        offset,
    })
    .await?;
    Ok(PaginatedSheets {
        items: result.items.iter().map(CostSheet::to_record).collect(),
        total: result.total,
    })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CostSheetRecord>> {
    Ok(repository::get_by_id(id).await?.map(|s| s.to_record()))
}

/// The style-uniqueness pre-check behind the blur handler on the style field
pub async fn check_style(style: &str) -> anyhow::Result<CheckStyleResponse> {
    if style.trim().is_empty() {
        return Ok(CheckStyleResponse {
            exists: false,
            creator_name: None,
        });
    }
    let existing = repository::get_by_style(style).await?;
    Ok(match existing {
        Some(sheet) => CheckStyleResponse {
            exists: true,
            creator_name: Some(sheet.created_by),
        },
        None => CheckStyleResponse {
            exists: false,
            creator_name: None,
        },
    })
}

/// Create a new sheet. An already-registered style blocks creation.
pub async fn create(
    payload: CostSheetPayload,
    created_by: String,
) -> Result<CostSheetRecord, CostSheetError> {
    if let Some(existing) = repository::get_by_style(&payload.style_info.style).await? {
        return Err(CostSheetError::StyleExists {
            style: existing.style,
            creator_name: existing.created_by,
        });
    }

    let created_by = payload
        .created_by
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(created_by);

    let mut aggregate = CostSheet::new_from_payload(&payload, created_by);
    aggregate.validate().map_err(CostSheetError::Invalid)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate.to_record())
}

/// Full-replace update; last write wins
pub async fn update(id: Uuid, payload: CostSheetPayload) -> Result<CostSheetRecord, CostSheetError> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(CostSheetError::NotFound)?;

    // a renamed style must not collide with another live sheet
    if let Some(other) = repository::get_by_style(&payload.style_info.style).await? {
        if other.base.id != aggregate.base.id {
            return Err(CostSheetError::StyleExists {
                style: other.style,
                creator_name: other.created_by,
            });
        }
    }

    aggregate.apply_payload(&payload);
    aggregate.validate().map_err(CostSheetError::Invalid)?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(aggregate.to_record())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}
