//! Editable row sets of a cost sheet
//!
//! Every table keeps its numeric cells exactly as the user typed them
//! (String) and recomputes the derived `value` of a row synchronously on
//! each accepted edit. The wire envelopes (`*TableJson`) are what gets
//! persisted and sent over the REST boundary; building an envelope always
//! recomputes the totals from the rows, cached totals are never trusted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::numeric::{is_decimal_input, parse_input};

fn new_row_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// CAD consumption
// ============================================================================

/// One garment part with its per-dozen fabric weight and wastage percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadRow {
    pub id: String,
    pub field_name: String,
    pub weight: String,
    pub percent: String,
    /// weight + weight * percent / 100
    pub value: f64,
}

impl CadRow {
    fn new(field_name: &str) -> Self {
        Self {
            id: new_row_id(),
            field_name: field_name.to_string(),
            weight: String::new(),
            percent: String::new(),
            value: 0.0,
        }
    }

    fn recompute(&mut self) {
        let weight = parse_input(&self.weight);
        let percent = parse_input(&self.percent);
        self.value = weight + weight * percent / 100.0;
    }
}

/// Wire envelope of the CAD consumption table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadTableJson {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<CadRow>,
    pub total_weight: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CadTable {
    pub rows: Vec<CadRow>,
}

impl CadTable {
    pub const TABLE_NAME: &'static str = "cadConsumption";

    /// Template used when a new sheet is opened
    pub fn default_template() -> Self {
        Self {
            rows: vec![
                CadRow::new("Body"),
                CadRow::new("Sleeve"),
                CadRow::new("Neck rib"),
            ],
        }
    }

    /// Rebuild from a persisted envelope; row values are recomputed
    pub fn from_json(json: &CadTableJson) -> Self {
        let mut rows = json.rows.clone();
        for row in &mut rows {
            row.recompute();
        }
        Self { rows }
    }

    pub fn add_row(&mut self) {
        self.rows.push(CadRow::new(""));
    }

    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    /// Apply one cell edit. Numeric cells are gated by the decimal-input
    /// pattern; a rejected edit leaves the table untouched.
    pub fn update_field(&mut self, id: &str, field: &str, input: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        match field {
            "fieldName" => row.field_name = input.to_string(),
            "weight" if is_decimal_input(input) => row.weight = input.to_string(),
            "percent" if is_decimal_input(input) => row.percent = input.to_string(),
            _ => return false,
        }
        row.recompute();
        true
    }

    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|r| parse_input(&r.weight)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn to_json(&self) -> CadTableJson {
        CadTableJson {
            table_name: Self::TABLE_NAME.to_string(),
            columns: ["fieldName", "weight", "percent", "value"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: self.rows.clone(),
            total_weight: self.total_weight(),
            subtotal: self.subtotal(),
        }
    }
}

// ============================================================================
// Fabric cost
// ============================================================================

/// Fabric cost section a row belongs to. Print/embroidery rows are carried
/// on the wire but excluded from the fabric totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FabricSegment {
    Yarn,
    Knitting,
    Dyeing,
    PrintEmb,
}

/// One fabric cost line: per-dozen quantity times rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricRow {
    pub id: String,
    pub segment: FabricSegment,
    pub description: String,
    pub unit: String,
    pub rate: String,
    /// unit * rate
    pub value: f64,
}

impl FabricRow {
    fn new(segment: FabricSegment, description: &str) -> Self {
        Self {
            id: new_row_id(),
            segment,
            description: description.to_string(),
            unit: String::new(),
            rate: String::new(),
            value: 0.0,
        }
    }

    fn recompute(&mut self) {
        self.value = parse_input(&self.unit) * parse_input(&self.rate);
    }
}

/// Wire envelope of the fabric cost table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricTableJson {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<FabricRow>,
    pub yarn_total: f64,
    pub knitting_total: f64,
    pub dyeing_total: f64,
    pub total_fabric_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FabricTable {
    pub rows: Vec<FabricRow>,
}

impl FabricTable {
    pub const TABLE_NAME: &'static str = "fabricCost";

    pub fn default_template() -> Self {
        Self {
            rows: vec![
                FabricRow::new(FabricSegment::Yarn, "Yarn"),
                FabricRow::new(FabricSegment::Knitting, "Knitting"),
                FabricRow::new(FabricSegment::Dyeing, "Dyeing"),
                FabricRow::new(FabricSegment::PrintEmb, "Print / Embroidery"),
            ],
        }
    }

    pub fn from_json(json: &FabricTableJson) -> Self {
        let mut rows = json.rows.clone();
        for row in &mut rows {
            row.recompute();
        }
        Self { rows }
    }

    pub fn add_row(&mut self, segment: FabricSegment) {
        self.rows.push(FabricRow::new(segment, ""));
    }

    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn update_field(&mut self, id: &str, field: &str, input: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        match field {
            "description" => row.description = input.to_string(),
            "unit" if is_decimal_input(input) => row.unit = input.to_string(),
            "rate" if is_decimal_input(input) => row.rate = input.to_string(),
            _ => return false,
        }
        row.recompute();
        true
    }

    pub fn segment_rows(&self, segment: FabricSegment) -> Vec<&FabricRow> {
        self.rows.iter().filter(|r| r.segment == segment).collect()
    }

    pub fn segment_total(&self, segment: FabricSegment) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.segment == segment)
            .map(|r| r.value)
            .sum()
    }

    /// yarn + knitting + dyeing; print/emb does not participate
    pub fn total_fabric_cost(&self) -> f64 {
        self.segment_total(FabricSegment::Yarn)
            + self.segment_total(FabricSegment::Knitting)
            + self.segment_total(FabricSegment::Dyeing)
    }

    pub fn to_json(&self) -> FabricTableJson {
        FabricTableJson {
            table_name: Self::TABLE_NAME.to_string(),
            columns: ["segment", "description", "unit", "rate", "value"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: self.rows.clone(),
            yarn_total: self.segment_total(FabricSegment::Yarn),
            knitting_total: self.segment_total(FabricSegment::Knitting),
            dyeing_total: self.segment_total(FabricSegment::Dyeing),
            total_fabric_cost: self.total_fabric_cost(),
        }
    }
}

// ============================================================================
// Trims & accessories
// ============================================================================

/// One trims line; the entered cost is the value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimsRow {
    pub id: String,
    pub description: String,
    pub cost: String,
    pub value: f64,
}

impl TrimsRow {
    fn new(description: &str) -> Self {
        Self {
            id: new_row_id(),
            description: description.to_string(),
            cost: String::new(),
            value: 0.0,
        }
    }

    fn recompute(&mut self) {
        self.value = parse_input(&self.cost);
    }
}

/// Wire envelope of the trims & accessories table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimsTableJson {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<TrimsRow>,
    pub subtotal: f64,
    pub adjustment_percent: f64,
    pub adjustment: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrimsTable {
    pub rows: Vec<TrimsRow>,
    /// Percent added on top of the subtotal, as entered
    pub adjustment_percent: String,
}

impl TrimsTable {
    pub const TABLE_NAME: &'static str = "trimsAccessories";
    pub const DEFAULT_ADJUSTMENT_PERCENT: &'static str = "8";

    pub fn default_template() -> Self {
        Self {
            rows: vec![
                TrimsRow::new("Sewing thread"),
                TrimsRow::new("Main label"),
                TrimsRow::new("Care label"),
                TrimsRow::new("Hang tag"),
                TrimsRow::new("Poly bag"),
                TrimsRow::new("Carton"),
            ],
            adjustment_percent: Self::DEFAULT_ADJUSTMENT_PERCENT.to_string(),
        }
    }

    pub fn from_json(json: &TrimsTableJson) -> Self {
        let mut rows = json.rows.clone();
        for row in &mut rows {
            row.recompute();
        }
        Self {
            rows,
            adjustment_percent: crate::shared::numeric::format_input(json.adjustment_percent),
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(TrimsRow::new(""));
    }

    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn update_field(&mut self, id: &str, field: &str, input: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        match field {
            "description" => row.description = input.to_string(),
            "cost" if is_decimal_input(input) => row.cost = input.to_string(),
            _ => return false,
        }
        row.recompute();
        true
    }

    pub fn update_adjustment_percent(&mut self, input: &str) -> bool {
        if !is_decimal_input(input) {
            return false;
        }
        self.adjustment_percent = input.to_string();
        true
    }

    pub fn subtotal(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn adjustment(&self) -> f64 {
        self.subtotal() * parse_input(&self.adjustment_percent) / 100.0
    }

    /// subtotal plus the adjustment; this is what feeds the summary as the
    /// accessories cost
    pub fn total(&self) -> f64 {
        self.subtotal() + self.adjustment()
    }

    pub fn to_json(&self) -> TrimsTableJson {
        TrimsTableJson {
            table_name: Self::TABLE_NAME.to_string(),
            columns: ["description", "cost", "value"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: self.rows.clone(),
            subtotal: self.subtotal(),
            adjustment_percent: parse_input(&self.adjustment_percent),
            adjustment: self.adjustment(),
            total: self.total(),
        }
    }
}

impl Default for TrimsTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            adjustment_percent: Self::DEFAULT_ADJUSTMENT_PERCENT.to_string(),
        }
    }
}

// ============================================================================
// Others
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OthersRow {
    pub id: String,
    pub description: String,
    pub cost: String,
    pub value: f64,
}

impl OthersRow {
    fn new(description: &str) -> Self {
        Self {
            id: new_row_id(),
            description: description.to_string(),
            cost: String::new(),
            value: 0.0,
        }
    }

    fn recompute(&mut self) {
        self.value = parse_input(&self.cost);
    }
}

/// Wire envelope of the others table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OthersTableJson {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<OthersRow>,
    pub subtotal: f64,
}

/// Free-form extra cost lines; a new sheet starts with none
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OthersTable {
    pub rows: Vec<OthersRow>,
}

impl OthersTable {
    pub const TABLE_NAME: &'static str = "others";

    pub fn from_json(json: &OthersTableJson) -> Self {
        let mut rows = json.rows.clone();
        for row in &mut rows {
            row.recompute();
        }
        Self { rows }
    }

    pub fn add_row(&mut self) {
        self.rows.push(OthersRow::new(""));
    }

    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn update_field(&mut self, id: &str, field: &str, input: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        match field {
            "description" => row.description = input.to_string(),
            "cost" if is_decimal_input(input) => row.cost = input.to_string(),
            _ => return false,
        }
        row.recompute();
        true
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn to_json(&self) -> OthersTableJson {
        OthersTableJson {
            table_name: Self::TABLE_NAME.to_string(),
            columns: ["description", "cost", "value"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: self.rows.clone(),
            subtotal: self.subtotal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cad_row_value_is_weight_plus_wastage() {
        let mut table = CadTable::default_template();
        let id = table.rows[0].id.clone();
        assert!(table.update_field(&id, "weight", "10"));
        assert!(table.update_field(&id, "percent", "10"));
        assert_eq!(table.rows[0].value, 11.0);
        assert_eq!(table.to_json().subtotal, 11.0);
    }

    #[test]
    fn fabric_row_value_is_unit_times_rate() {
        let mut table = FabricTable::default_template();
        let id = table.rows[0].id.clone();
        assert!(table.update_field(&id, "unit", "5"));
        assert!(table.update_field(&id, "rate", "2.50"));
        assert_eq!(table.rows[0].value, 12.5);
    }

    #[test]
    fn print_emb_is_excluded_from_fabric_total() {
        let mut table = FabricTable::default_template();
        let print_id = table
            .segment_rows(FabricSegment::PrintEmb)
            .first()
            .map(|r| r.id.clone())
            .unwrap();
        table.update_field(&print_id, "unit", "100");
        table.update_field(&print_id, "rate", "100");
        assert_eq!(table.total_fabric_cost(), 0.0);
        assert_eq!(table.segment_total(FabricSegment::PrintEmb), 10000.0);
    }

    #[test]
    fn trims_total_applies_adjustment_once() {
        let mut table = TrimsTable::default();
        table.add_row();
        table.add_row();
        let ids: Vec<String> = table.rows.iter().map(|r| r.id.clone()).collect();
        table.update_field(&ids[0], "cost", "1.00");
        table.update_field(&ids[1], "cost", "2.00");
        assert_eq!(table.subtotal(), 3.0);
        assert_eq!(table.adjustment(), 0.24);
        assert_eq!(table.total(), 3.24);
    }

    #[test]
    fn malformed_input_is_rejected_without_state_change() {
        let mut table = CadTable::default_template();
        let id = table.rows[0].id.clone();
        table.update_field(&id, "weight", "10.5");
        assert!(!table.update_field(&id, "weight", "10.5.1"));
        assert!(!table.update_field(&id, "weight", "-3"));
        assert!(!table.update_field(&id, "weight", "abc"));
        assert_eq!(table.rows[0].weight, "10.5");
        assert_eq!(table.rows[0].value, 10.5);
    }

    #[test]
    fn label_edits_are_never_gated() {
        let mut table = OthersTable::default();
        table.add_row();
        let id = table.rows[0].id.clone();
        assert!(table.update_field(&id, "description", "Testing & inspection"));
        assert_eq!(table.rows[0].description, "Testing & inspection");
    }

    #[test]
    fn subtotal_is_invariant_under_reordering() {
        let mut table = TrimsTable::default();
        for cost in ["0.35", "1.2", "0.05"] {
            table.add_row();
            let id = table.rows.last().map(|r| r.id.clone()).unwrap();
            table.update_field(&id, "cost", cost);
        }
        let before = table.subtotal();
        table.rows.reverse();
        assert_eq!(table.subtotal(), before);
    }

    #[test]
    fn deleting_all_rows_zeroes_the_subtotal() {
        let mut table = OthersTable::default();
        table.add_row();
        let id = table.rows[0].id.clone();
        table.update_field(&id, "cost", "7");
        assert!(table.delete_row(&id));
        assert!(table.is_empty());
        assert_eq!(table.subtotal(), 0.0);
        assert!(!table.delete_row(&id));
    }

    #[test]
    fn from_json_recomputes_stale_cached_totals() {
        let mut table = CadTable::default_template();
        let id = table.rows[0].id.clone();
        table.update_field(&id, "weight", "10");
        let mut json = table.to_json();
        // simulate a tampered persisted record
        json.rows[0].value = 999.0;
        json.subtotal = 999.0;
        let reloaded = CadTable::from_json(&json);
        assert_eq!(reloaded.rows[0].value, 10.0);
        assert_eq!(reloaded.to_json().subtotal, 10.0);
    }
}
