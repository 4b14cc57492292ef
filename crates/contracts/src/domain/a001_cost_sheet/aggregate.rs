use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};

use super::compute::{summary_chain, SummaryChain, SummaryOverrides};
use super::rows::{
    CadTable, CadTableJson, FabricTable, FabricTableJson, OthersTable, OthersTableJson,
    TrimsTable, TrimsTableJson,
};

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostSheetId(pub Uuid);

impl CostSheetId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CostSheetId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CostSheetId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

/// Style header of a sheet; all fields kept as entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub style: String,
    pub item: String,
    pub group: String,
    pub size: String,
    pub fabric_type: String,
    pub gsm: String,
    pub color: String,
    pub quantity: String,
}

/// The full-replace body of POST and PUT. Assembled from the live tables,
/// never from cached totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSheetPayload {
    #[serde(flatten)]
    pub style_info: StyleInfo,
    pub cad_consumption: CadTableJson,
    pub fabric_cost: FabricTableJson,
    pub trims_accessories: TrimsTableJson,
    pub others: OthersTableJson,
    pub summary: SummaryOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl CostSheetPayload {
    /// Package the current tables. Every envelope rebuilds its totals from
    /// its rows here.
    pub fn assemble(
        style_info: StyleInfo,
        cad: &CadTable,
        fabric: &FabricTable,
        trims: &TrimsTable,
        others: &OthersTable,
        summary: SummaryOverrides,
    ) -> Self {
        Self {
            style_info,
            cad_consumption: cad.to_json(),
            fabric_cost: fabric.to_json(),
            trims_accessories: trims.to_json(),
            others: others.to_json(),
            summary,
            created_by: None,
        }
    }

    /// Derive the summary chain from the payload's own rows
    pub fn summary_chain(&self) -> SummaryChain {
        let fabric = FabricTable::from_json(&self.fabric_cost);
        let trims = TrimsTable::from_json(&self.trims_accessories);
        let others = OthersTable::from_json(&self.others);
        summary_chain(
            fabric.total_fabric_cost(),
            trims.total(),
            others.subtotal(),
            &self.summary,
        )
    }
}

/// PUT body wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSheetUpdate {
    pub data: CostSheetPayload,
}

/// Canonical record returned by GET; all table totals recomputed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSheetRecord {
    pub id: String,
    #[serde(flatten)]
    pub style_info: StyleInfo,
    pub cad_consumption: CadTableJson,
    pub fabric_cost: FabricTableJson,
    pub trims_accessories: TrimsTableJson,
    pub others: OthersTableJson,
    pub summary: SummaryOverrides,
    pub created_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl CostSheetRecord {
    pub fn summary_chain(&self) -> SummaryChain {
        summary_chain(
            self.fabric_cost.total_fabric_cost,
            self.trims_accessories.total,
            self.others.subtotal,
            &self.summary,
        )
    }
}

/// GET /api/cost-sheets response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSheetListResponse {
    pub sanitized: Vec<CostSheetRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
}

/// GET /api/cost-sheets/check-style response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStyleResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Cost sheet for one style. The four row-set tables are persisted as JSON
/// text; the summary persists only its three scalar overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSheet {
    #[serde(flatten)]
    pub base: BaseAggregate<CostSheetId>,

    pub style: String,
    pub item: String,
    pub group: String,
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
}

fn encode_table<T: Serialize>(table: &T) -> Option<String> {
    serde_json::to_string(table).ok()
}

impl CostSheet {
    pub fn new_from_payload(payload: &CostSheetPayload, created_by: String) -> Self {
        let style = payload.style_info.style.trim().to_string();
        let description = if payload.style_info.item.trim().is_empty() {
            style.clone()
        } else {
            format!("{} — {}", style, payload.style_info.item.trim())
        };
        let base = BaseAggregate::new(CostSheetId::new_v4(), style.clone(), description);

        let mut sheet = Self {
            base,
            style,
            item: String::new(),
            group: String::new(),
            size: String::new(),
            fabric_type: String::new(),
            gsm: String::new(),
            color: String::new(),
            quantity: String::new(),
            cad_json: None,
            fabric_json: None,
            trims_json: None,
            others_json: None,
            factory_cm: 0.0,
            commercial_percent: 0.0,
            profit_percent: 0.0,
            created_by,
        };
        sheet.apply_payload(payload);
        sheet
    }

    /// Full-replace update: every row set and the summary overrides are
    /// taken from the incoming payload.
    pub fn apply_payload(&mut self, payload: &CostSheetPayload) {
        self.style = payload.style_info.style.trim().to_string();
        self.item = payload.style_info.item.clone();
        self.group = payload.style_info.group.clone();
        self.size = payload.style_info.size.clone();
        self.fabric_type = payload.style_info.fabric_type.clone();
        self.gsm = payload.style_info.gsm.clone();
        self.color = payload.style_info.color.clone();
        self.quantity = payload.style_info.quantity.clone();

        // re-assemble through the tables so stored envelopes never carry
        // stale totals
        self.cad_json = encode_table(&CadTable::from_json(&payload.cad_consumption).to_json());
        self.fabric_json = encode_table(&FabricTable::from_json(&payload.fabric_cost).to_json());
        self.trims_json =
            encode_table(&TrimsTable::from_json(&payload.trims_accessories).to_json());
        self.others_json = encode_table(&OthersTable::from_json(&payload.others).to_json());

        self.factory_cm = payload.summary.factory_cm;
        self.commercial_percent = payload.summary.commercial_percent;
        self.profit_percent = payload.summary.profit_percent;

        self.base.code = self.style.clone();
        self.base.description = if self.item.trim().is_empty() {
            self.style.clone()
        } else {
            format!("{} — {}", self.style, self.item.trim())
        };
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn cad_table(&self) -> CadTable {
        self.cad_json
            .as_deref()
            .and_then(|s| serde_json::from_str::<CadTableJson>(s).ok())
            .map(|json| CadTable::from_json(&json))
            .unwrap_or_default()
    }

    pub fn fabric_table(&self) -> FabricTable {
        self.fabric_json
            .as_deref()
            .and_then(|s| serde_json::from_str::<FabricTableJson>(s).ok())
            .map(|json| FabricTable::from_json(&json))
            .unwrap_or_default()
    }

    pub fn trims_table(&self) -> TrimsTable {
        self.trims_json
            .as_deref()
            .and_then(|s| serde_json::from_str::<TrimsTableJson>(s).ok())
            .map(|json| TrimsTable::from_json(&json))
            .unwrap_or_default()
    }

    pub fn others_table(&self) -> OthersTable {
        self.others_json
            .as_deref()
            .and_then(|s| serde_json::from_str::<OthersTableJson>(s).ok())
            .map(|json| OthersTable::from_json(&json))
            .unwrap_or_default()
    }

    pub fn summary_overrides(&self) -> SummaryOverrides {
        SummaryOverrides {
            factory_cm: self.factory_cm,
            commercial_percent: self.commercial_percent,
            profit_percent: self.profit_percent,
        }
    }

    /// Canonical wire record with every derived total rebuilt from rows
    pub fn to_record(&self) -> CostSheetRecord {
        CostSheetRecord {
            id: self.to_string_id(),
            style_info: StyleInfo {
                style: self.style.clone(),
                item: self.item.clone(),
                group: self.group.clone(),
                size: self.size.clone(),
                fabric_type: self.fabric_type.clone(),
                gsm: self.gsm.clone(),
                color: self.color.clone(),
                quantity: self.quantity.clone(),
            },
            cad_consumption: self.cad_table().to_json(),
            fabric_cost: self.fabric_table().to_json(),
            trims_accessories: self.trims_table().to_json(),
            others: self.others_table().to_json(),
            summary: self.summary_overrides(),
            created_by: self.created_by.clone(),
            created_at: self.base.metadata.created_at,
            updated_at: self.base.metadata.updated_at,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.style.trim().is_empty() {
            return Err("Style is required".into());
        }
        if !self.quantity.trim().is_empty()
            && !crate::shared::numeric::is_decimal_input(self.quantity.trim())
        {
            return Err("Quantity must be a number".into());
        }
        if self.factory_cm < 0.0 || self.commercial_percent < 0.0 || self.profit_percent < 0.0 {
            return Err("Summary percentages cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for CostSheet {
    type Id = CostSheetId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "cost_sheet"
    }

    fn element_name() -> &'static str {
        "Cost sheet"
    }

    fn list_name() -> &'static str {
        "Cost sheets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> CostSheetPayload {
        let mut cad = CadTable::default_template();
        let cad_id = cad.rows[0].id.clone();
        cad.update_field(&cad_id, "weight", "10");
        cad.update_field(&cad_id, "percent", "10");

        let mut fabric = FabricTable::default_template();
        let yarn_id = fabric.rows[0].id.clone();
        fabric.update_field(&yarn_id, "unit", "5");
        fabric.update_field(&yarn_id, "rate", "2.50");

        let mut trims = TrimsTable::default();
        trims.add_row();
        trims.add_row();
        let ids: Vec<String> = trims.rows.iter().map(|r| r.id.clone()).collect();
        trims.update_field(&ids[0], "cost", "1.00");
        trims.update_field(&ids[1], "cost", "2.00");

        let others = OthersTable::default();

        CostSheetPayload::assemble(
            StyleInfo {
                style: "ST-1024".into(),
                item: "Polo shirt".into(),
                quantity: "12000".into(),
                ..Default::default()
            },
            &cad,
            &fabric,
            &trims,
            &others,
            SummaryOverrides {
                factory_cm: 14.0,
                commercial_percent: 15.0,
                profit_percent: 10.0,
            },
        )
    }

    #[test]
    fn payload_serializes_with_wire_field_names() {
        let payload = sample_payload();
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("style").is_some());
        assert!(value.get("fabricType").is_some());
        assert_eq!(
            value["cadConsumption"]["tableName"],
            serde_json::json!("cadConsumption")
        );
        assert_eq!(value["trimsAccessories"]["adjustmentPercent"], 8.0);
        assert!(value["summary"].get("factoryCM").is_some());
        assert!(value["summary"].get("commercialPercent").is_some());
        // derived values never persist in the summary
        assert!(value["summary"].get("fobPrice").is_none());
    }

    #[test]
    fn reload_is_idempotent() {
        let payload = sample_payload();
        let sheet = CostSheet::new_from_payload(&payload, "admin".into());
        let record = sheet.to_record();

        // re-submitting the loaded record unchanged keeps all totals
        let mut again = sheet.clone();
        let second = CostSheetPayload {
            style_info: record.style_info.clone(),
            cad_consumption: record.cad_consumption.clone(),
            fabric_cost: record.fabric_cost.clone(),
            trims_accessories: record.trims_accessories.clone(),
            others: record.others.clone(),
            summary: record.summary,
            created_by: None,
        };
        again.apply_payload(&second);
        let record2 = again.to_record();

        assert_eq!(record.fabric_cost.total_fabric_cost, 12.5);
        assert_eq!(
            record2.fabric_cost.total_fabric_cost,
            record.fabric_cost.total_fabric_cost
        );
        assert_eq!(record2.trims_accessories.total, record.trims_accessories.total);
        assert_eq!(
            record2.summary_chain().fob_price,
            record.summary_chain().fob_price
        );
    }

    #[test]
    fn record_chain_matches_payload_chain() {
        // show mode reads the record, edit mode recomputes from tables;
        // both must agree exactly
        let payload = sample_payload();
        let sheet = CostSheet::new_from_payload(&payload, "admin".into());
        let record = sheet.to_record();
        assert_eq!(record.summary_chain(), payload.summary_chain());
        assert_eq!(format!("{:.3}", record.summary_chain().price_per_piece), "3.135");
    }

    #[test]
    fn validate_requires_style_and_numeric_quantity() {
        let mut payload = sample_payload();
        payload.style_info.style = "  ".into();
        let sheet = CostSheet::new_from_payload(&payload, "admin".into());
        assert!(sheet.validate().is_err());

        let mut payload = sample_payload();
        payload.style_info.quantity = "12x".into();
        let sheet = CostSheet::new_from_payload(&payload, "admin".into());
        assert!(sheet.validate().is_err());

        let sheet = CostSheet::new_from_payload(&sample_payload(), "admin".into());
        assert!(sheet.validate().is_ok());
    }
}
