use contracts::domain::a002_tna_schedule::aggregate::{TnaSchedule, TnaScheduleDto};
use uuid::Uuid;

use super::repository::{self, TnaListQuery, TnaListResult};

pub async fn create(dto: TnaScheduleDto) -> anyhow::Result<Uuid> {
    let mut aggregate = TnaSchedule::new_for_insert(&dto);
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();
    repository::insert(&aggregate).await
}

pub async fn update(dto: TnaScheduleDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<TnaSchedule>> {
    repository::get_by_id(id).await
}

pub async fn list_paginated(
    search_query: Option<String>,
    limit: u64,
    offset: u64,
) -> anyhow::Result<TnaListResult> {
    repository::list_paginated(TnaListQuery {
        search_query,
        limit,
        offset,
    })
    .await
}
