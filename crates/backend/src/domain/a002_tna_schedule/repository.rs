use chrono::Utc;
use contracts::domain::a002_tna_schedule::aggregate::{TnaSchedule, TnaScheduleId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_tna_schedule")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub order_no: String,
    pub style: String,
    pub buyer: String,
    pub order_date: String,
    pub shipment_date: String,
    pub lines_json: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TnaSchedule {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        TnaSchedule {
            base: BaseAggregate::with_metadata(
                TnaScheduleId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            order_no: m.order_no,
            style: m.style,
            buyer: m.buyer,
            order_date: m.order_date,
            shipment_date: m.shipment_date,
            lines_json: m.lines_json,
        }
    }
}

fn to_active_model(aggregate: &TnaSchedule) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        order_no: Set(aggregate.order_no.clone()),
        style: Set(aggregate.style.clone()),
        buyer: Set(aggregate.buyer.clone()),
        order_date: Set(aggregate.order_date.clone()),
        shipment_date: Set(aggregate.shipment_date.clone()),
        lines_json: Set(aggregate.lines_json.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

#[derive(Debug, Clone)]
pub struct TnaListQuery {
    pub search_query: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

pub struct TnaListResult {
    pub items: Vec<TnaSchedule>,
    pub total: u64,
}

pub async fn list_paginated(query: TnaListQuery) -> anyhow::Result<TnaListResult> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(search) = query
        .search_query
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let pattern = format!("%{}%", search);
        select = select.filter(
            Column::OrderNo
                .like(pattern.clone())
                .or(Column::Style.like(pattern.clone()))
                .or(Column::Buyer.like(pattern)),
        );
    }

    let total = select.clone().count(conn()).await?;

    let items = select
        .order_by_desc(Column::ShipmentDate)
        .offset(query.offset)
        .limit(query.limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(TnaListResult { items, total })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<TnaSchedule>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &TnaSchedule) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &TnaSchedule) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
