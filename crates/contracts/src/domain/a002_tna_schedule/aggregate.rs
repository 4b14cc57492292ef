use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TnaScheduleId(pub Uuid);

impl TnaScheduleId {
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

impl AggregateId for TnaScheduleId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TnaScheduleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Milestones
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MilestoneStatus {
    Pending,
    Late,
    Done,
}

/// One time-and-action line: a named production milestone with its planned
/// date and, once reached, the actual date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    /// Planned date, YYYY-MM-DD
    pub planned: String,
    /// Actual date once completed, YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(default)]
    pub remarks: String,
}

impl Milestone {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            planned: String::new(),
            actual: None,
            remarks: String::new(),
        }
    }

    /// Status relative to `today`. A completed milestone is done no matter
    /// when it happened; an uncompleted one goes late the day after its
    /// planned date. An unparsable planned date keeps the line pending.
    pub fn status(&self, today: NaiveDate) -> MilestoneStatus {
        if self.actual.is_some() {
            return MilestoneStatus::Done;
        }
        match NaiveDate::parse_from_str(self.planned.trim(), "%Y-%m-%d") {
            Ok(planned) if today > planned => MilestoneStatus::Late,
            _ => MilestoneStatus::Pending,
        }
    }

    /// Days behind plan: completion lateness for done lines, running
    /// lateness for open ones. Zero when on time or not parseable.
    pub fn days_late(&self, today: NaiveDate) -> i64 {
        let Ok(planned) = NaiveDate::parse_from_str(self.planned.trim(), "%Y-%m-%d") else {
            return 0;
        };
        let reference = match &self.actual {
            Some(actual) => match NaiveDate::parse_from_str(actual.trim(), "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => return 0,
            },
            None => today,
        };
        (reference - planned).num_days().max(0)
    }

    /// Standard template for a fresh schedule
    pub fn default_template() -> Vec<Milestone> {
        [
            "Order confirmation",
            "Lab dip approval",
            "Fabric booking",
            "Sample approval",
            "Fabric in-house",
            "Production start",
            "Final inspection",
            "Ex-factory",
        ]
        .iter()
        .map(|name| Milestone::new(name))
        .collect()
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Time-and-Action schedule for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TnaSchedule {
    #[serde(flatten)]
    pub base: BaseAggregate<TnaScheduleId>,

    pub order_no: String,
    pub style: String,
    pub buyer: String,
    /// YYYY-MM-DD
    pub order_date: String,
    /// YYYY-MM-DD
    pub shipment_date: String,

    /// JSON array of milestone lines
    pub lines_json: Option<String>,
}

impl TnaSchedule {
    pub fn new_for_insert(dto: &TnaScheduleDto) -> Self {
        let description = format!("{} — {}", dto.order_no.trim(), dto.buyer.trim());
        let base = BaseAggregate::new(
            TnaScheduleId::new_v4(),
            dto.order_no.trim().to_string(),
            description,
        );
        let mut schedule = Self {
            base,
            order_no: String::new(),
            style: String::new(),
            buyer: String::new(),
            order_date: String::new(),
            shipment_date: String::new(),
            lines_json: None,
        };
        schedule.update(dto);
        schedule
    }

    pub fn update(&mut self, dto: &TnaScheduleDto) {
        self.order_no = dto.order_no.trim().to_string();
        self.style = dto.style.trim().to_string();
        self.buyer = dto.buyer.clone();
        self.order_date = dto.order_date.clone();
        self.shipment_date = dto.shipment_date.clone();
        self.lines_json = if dto.milestones.is_empty() {
            None
        } else {
            serde_json::to_string(&dto.milestones).ok()
        };
        self.base.code = self.order_no.clone();
        self.base.description = format!("{} — {}", self.order_no, self.buyer.trim());
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn parse_milestones(&self) -> Vec<Milestone> {
        self.lines_json
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.order_no.trim().is_empty() {
            return Err("Order no is required".into());
        }
        if self.style.trim().is_empty() {
            return Err("Style is required".into());
        }
        for date in [&self.order_date, &self.shipment_date] {
            if !date.trim().is_empty()
                && NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err()
            {
                return Err(format!("Bad date: {}", date));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for TnaSchedule {
    type Id = TnaScheduleId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "tna_schedule"
    }

    fn element_name() -> &'static str {
        "TNA schedule"
    }

    fn list_name() -> &'static str {
        "TNA schedules"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TnaScheduleDto {
    pub id: Option<String>,
    pub order_no: String,
    pub style: String,
    pub buyer: String,
    pub order_date: String,
    pub shipment_date: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl TnaScheduleDto {
    pub fn from_aggregate(schedule: &TnaSchedule) -> Self {
        Self {
            id: Some(schedule.to_string_id()),
            order_no: schedule.order_no.clone(),
            style: schedule.style.clone(),
            buyer: schedule.buyer.clone(),
            order_date: schedule.order_date.clone(),
            shipment_date: schedule.shipment_date.clone(),
            milestones: schedule.parse_milestones(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn milestone_status_derivation() {
        let mut m = Milestone::new("Fabric in-house");
        m.planned = "2026-08-01".into();

        assert_eq!(m.status(date("2026-07-20")), MilestoneStatus::Pending);
        assert_eq!(m.status(date("2026-08-01")), MilestoneStatus::Pending);
        assert_eq!(m.status(date("2026-08-02")), MilestoneStatus::Late);

        m.actual = Some("2026-08-05".into());
        assert_eq!(m.status(date("2026-08-02")), MilestoneStatus::Done);
    }

    #[test]
    fn days_late_counts_from_actual_or_today() {
        let mut m = Milestone::new("Ex-factory");
        m.planned = "2026-08-01".into();
        assert_eq!(m.days_late(date("2026-08-10")), 9);

        m.actual = Some("2026-08-04".into());
        assert_eq!(m.days_late(date("2026-08-10")), 3);

        m.actual = Some("2026-07-30".into());
        assert_eq!(m.days_late(date("2026-08-10")), 0);
    }

    #[test]
    fn milestones_round_trip_through_lines_json() {
        let mut dto = TnaScheduleDto {
            order_no: "PO-7791".into(),
            style: "ST-1024".into(),
            buyer: "H&M".into(),
            order_date: "2026-06-01".into(),
            shipment_date: "2026-09-15".into(),
            milestones: Milestone::default_template(),
            ..Default::default()
        };
        dto.milestones[0].planned = "2026-06-03".into();

        let schedule = TnaSchedule::new_for_insert(&dto);
        assert!(schedule.validate().is_ok());
        let parsed = schedule.parse_milestones();
        assert_eq!(parsed.len(), 8);
        assert_eq!(parsed[0].planned, "2026-06-03");
    }
}
