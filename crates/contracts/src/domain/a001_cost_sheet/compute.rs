//! Summary computation for a cost sheet
//!
//! The whole derived chain lives here and nowhere else: create, edit and
//! show modes, as well as the backend sanitizer, all call into the same
//! functions, so rendered totals can never drift between modes.
//!
//! All per-dozen amounts; the final price divides by twelve.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The unit of account is one dozen garments
pub const PIECES_PER_DOZEN: f64 = 12.0;

/// The three persisted summary scalars. Everything else in the summary is
/// derived and recomputed on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOverrides {
    /// Factory making charge per dozen
    #[serde(rename = "factoryCM")]
    pub factory_cm: f64,
    pub commercial_percent: f64,
    pub profit_percent: f64,
}

impl Default for SummaryOverrides {
    fn default() -> Self {
        Self {
            factory_cm: 14.0,
            commercial_percent: 15.0,
            profit_percent: 15.0,
        }
    }
}

/// The fully derived summary chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryChain {
    pub fabric_cost: f64,
    pub accessories_cost: f64,
    pub others_total: f64,
    #[serde(rename = "factoryCM")]
    pub factory_cm: f64,
    pub commercial_percent: f64,
    pub profit_percent: f64,
    pub total_cost: f64,
    pub commercial_cost: f64,
    pub total_cost_with_commercial: f64,
    pub profit_cost: f64,
    pub fob_price: f64,
    pub price_per_piece: f64,
}

/// Derive the summary chain from already-flattened inputs.
///
/// The accessories cost must arrive with the trims adjustment already
/// applied (the trims table owns that); it is not reapplied here. Profit
/// is taken on the commercial-inclusive total.
pub fn summary_chain(
    fabric_cost: f64,
    accessories_cost: f64,
    others_total: f64,
    overrides: &SummaryOverrides,
) -> SummaryChain {
    let total_cost = fabric_cost + accessories_cost + overrides.factory_cm + others_total;
    let commercial_cost = total_cost * overrides.commercial_percent / 100.0;
    let total_cost_with_commercial = total_cost + commercial_cost;
    let profit_cost = total_cost_with_commercial * overrides.profit_percent / 100.0;
    let fob_price = total_cost_with_commercial + profit_cost;
    let price_per_piece = fob_price / PIECES_PER_DOZEN;

    SummaryChain {
        fabric_cost,
        accessories_cost,
        others_total,
        factory_cm: overrides.factory_cm,
        commercial_percent: overrides.commercial_percent,
        profit_percent: overrides.profit_percent,
        total_cost,
        commercial_cost,
        total_cost_with_commercial,
        profit_cost,
        fob_price,
        price_per_piece,
    }
}

// ============================================================================
// Row-set normalization
// ============================================================================

/// A row set flattened to the one number the summary needs
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRowSet {
    pub rows: Vec<Value>,
    pub total: f64,
}

fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let parsed = s.trim().parse::<f64>().ok()?;
            parsed.is_finite().then_some(parsed)
        }
        _ => None,
    }
}

fn row_value(row: &Value) -> f64 {
    row.get("value")
        .and_then(number)
        .or_else(|| row.get("cost").and_then(number))
        .unwrap_or(0.0)
}

fn sum_rows(rows: &[Value]) -> f64 {
    rows.iter().map(row_value).sum()
}

/// Flatten any accepted row-set shape to `{rows, total}`.
///
/// The same logical table may arrive as a bare row array (fresh local
/// state), as a `{rows: [...], subtotal/total/...}` envelope (assembled
/// payload), or wrapped one level deeper as `{json: {...}}` (older
/// persisted records). An explicit adjusted/overall total on the envelope
/// wins over the plain subtotal, so the trims adjustment is never applied
/// a second time downstream.
pub fn normalize_row_set(value: &Value) -> NormalizedRowSet {
    match value {
        Value::Array(rows) => NormalizedRowSet {
            total: sum_rows(rows),
            rows: rows.clone(),
        },
        Value::Object(map) => {
            if let Some(inner) = map.get("json") {
                return normalize_row_set(inner);
            }
            let rows = map
                .get("rows")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let total = ["total", "totalFabricCost", "subtotal", "totalValue"]
                .iter()
                .find_map(|key| map.get(*key).and_then(number))
                .unwrap_or_else(|| sum_rows(&rows));
            NormalizedRowSet { rows, total }
        }
        _ => NormalizedRowSet {
            rows: Vec::new(),
            total: 0.0,
        },
    }
}

/// Aggregator entry point: normalize each row-set shape, then derive the
/// chain. Callers hand over whatever shape they currently hold.
pub fn summarize(
    fabric: &Value,
    trims: &Value,
    others: &Value,
    overrides: &SummaryOverrides,
) -> SummaryChain {
    summary_chain(
        normalize_row_set(fabric).total,
        normalize_row_set(trims).total,
        normalize_row_set(others).total,
        overrides,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn summary_chain_scenario() {
        let overrides = SummaryOverrides {
            factory_cm: 14.0,
            commercial_percent: 15.0,
            profit_percent: 10.0,
        };
        let chain = summary_chain(12.50, 3.24, 0.0, &overrides);
        assert_close(chain.total_cost, 29.74);
        assert_close(chain.commercial_cost, 4.461);
        assert_close(chain.total_cost_with_commercial, 34.201);
        assert_close(chain.profit_cost, 3.4201);
        assert_close(chain.fob_price, 37.6211);
        assert_eq!(format!("{:.3}", chain.price_per_piece), "3.135");
    }

    #[test]
    fn zero_percent_overrides_collapse_the_chain() {
        let overrides = SummaryOverrides {
            factory_cm: 0.0,
            commercial_percent: 0.0,
            profit_percent: 0.0,
        };
        let chain = summary_chain(10.0, 2.0, 1.0, &overrides);
        assert_close(chain.total_cost, 13.0);
        assert_close(chain.fob_price, 13.0);
        assert_close(chain.price_per_piece, 13.0 / 12.0);
    }

    #[test]
    fn normalizes_bare_array() {
        let set = normalize_row_set(&json!([
            {"id": "1", "value": 1.5},
            {"id": "2", "value": 2.0},
        ]));
        assert_eq!(set.rows.len(), 2);
        assert_close(set.total, 3.5);
    }

    #[test]
    fn normalizes_rows_envelope_with_explicit_total() {
        let set = normalize_row_set(&json!({
            "tableName": "trimsAccessories",
            "rows": [{"value": 1.0}, {"value": 2.0}],
            "subtotal": 3.0,
            "adjustment": 0.24,
            "total": 3.24,
        }));
        // the adjusted total wins over the subtotal
        assert_close(set.total, 3.24);
    }

    #[test]
    fn normalizes_json_wrapped_envelope() {
        let set = normalize_row_set(&json!({
            "json": {
                "rows": [{"value": 4.0}],
                "totalFabricCost": 4.0,
            }
        }));
        assert_close(set.total, 4.0);
        assert_eq!(set.rows.len(), 1);
    }

    #[test]
    fn falls_back_to_summing_row_values() {
        let set = normalize_row_set(&json!({
            "rows": [{"value": "1.5"}, {"cost": 2.5}, {"note": "n/a"}],
        }));
        assert_close(set.total, 4.0);
    }

    #[test]
    fn summarize_does_not_reapply_trims_adjustment() {
        let fabric = json!({"rows": [], "totalFabricCost": 12.5});
        let trims = json!({"rows": [{"value": 1.0}, {"value": 2.0}], "subtotal": 3.0, "total": 3.24});
        let others = json!([]);
        let chain = summarize(&fabric, &trims, &others, &SummaryOverrides::default());
        assert_close(chain.accessories_cost, 3.24);
        assert_close(chain.total_cost, 12.5 + 3.24 + 14.0);
    }
}
