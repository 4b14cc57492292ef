use chrono::Utc;
use contracts::domain::a001_cost_sheet::aggregate::{CostSheet, CostSheetId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_cost_sheet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub style: String,
    pub item: String,
    pub style_group: String,
    pub size: String,
    pub fabric_type: String,
    pub gsm: String,
    pub color: String,
    pub quantity: String,
    pub cad_json: Option<String>,
    pub fabric_json: Option<String>,
    pub trims_json: Option<String>,
    pub others_json: Option<String>,
    pub factory_cm: f64,
    pub commercial_percent: f64,
    pub profit_percent: f64,
    pub created_by: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CostSheet {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        CostSheet {
            base: BaseAggregate::with_metadata(
                CostSheetId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            style: m.style,
            item: m.item,
            group: m.style_group,
            size: m.size,
            fabric_type: m.fabric_type,
            gsm: m.gsm,
            color: m.color,
            quantity: m.quantity,
            cad_json: m.cad_json,
            fabric_json: m.fabric_json,
            trims_json: m.trims_json,
            others_json: m.others_json,
            factory_cm: m.factory_cm,
            commercial_percent: m.commercial_percent,
            profit_percent: m.profit_percent,
            created_by: m.created_by,
        }
    }
}

fn to_active_model(aggregate: &CostSheet) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        style: Set(aggregate.style.clone()),
        item: Set(aggregate.item.clone()),
        style_group: Set(aggregate.group.clone()),
        size: Set(aggregate.size.clone()),
        fabric_type: Set(aggregate.fabric_type.clone()),
        gsm: Set(aggregate.gsm.clone()),
        color: Set(aggregate.color.clone()),
        quantity: Set(aggregate.quantity.clone()),
        cad_json: Set(aggregate.cad_json.clone()),
        fabric_json: Set(aggregate.fabric_json.clone()),
        trims_json: Set(aggregate.trims_json.clone()),
        others_json: Set(aggregate.others_json.clone()),
        factory_cm: Set(aggregate.factory_cm),
        commercial_percent: Set(aggregate.commercial_percent),
        profit_percent: Set(aggregate.profit_percent),
        created_by: Set(aggregate.created_by.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Query parameters for the paginated list
#[derive(Debug, Clone)]
pub struct CostSheetListQuery {
    pub search_query: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

pub struct CostSheetListResult {
    pub items: Vec<CostSheet>,
    pub total: u64,
}

pub async fn list_paginated(query: CostSheetListQuery) -> anyhow::Result<CostSheetListResult> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(search) = query
        .search_query
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let pattern = format!("%{}%", search);
        select = select.filter(
            Column::Style
                .like(pattern.clone())
                .or(Column::Item.like(pattern)),
        );
    }

    let total = select.clone().count(conn()).await?;

    let items = select
        .order_by_desc(Column::CreatedAt)
        .offset(query.offset)
        .limit(query.limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(CostSheetListResult { items, total })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CostSheet>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Style lookup among live records. SQLite LIKE without wildcards gives
/// the case-insensitive match style codes need.
pub async fn get_by_style(style: &str) -> anyhow::Result<Option<CostSheet>> {
    let result = Entity::find()
        .filter(Column::Style.like(style.trim()))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &CostSheet) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &CostSheet) -> anyhow::Result<()> {
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
