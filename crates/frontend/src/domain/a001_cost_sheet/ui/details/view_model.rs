use contracts::domain::a001_cost_sheet::aggregate::{CostSheetPayload, CostSheetRecord, StyleInfo};
use contracts::domain::a001_cost_sheet::compute::{summary_chain, SummaryChain, SummaryOverrides};
use contracts::domain::a001_cost_sheet::rows::{
    CadTable, FabricSegment, FabricTable, OthersTable, TrimsTable,
};
use contracts::shared::numeric::{format_input, is_decimal_input, parse_input};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use super::super::SheetMode;
use super::model::{self, SaveError};
use crate::shared::session::SessionStore;

/// Result of the style-uniqueness pre-check
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCheck {
    Unchecked,
    Checking,
    Available,
    Taken { creator_name: String },
}

/// ViewModel shared by every section of the cost sheet form
#[derive(Clone, Copy)]
pub struct CostSheetDetailsViewModel {
    pub mode: RwSignal<SheetMode>,
    pub record_id: RwSignal<Option<String>>,

    pub style_info: RwSignal<StyleInfo>,
    pub cad: RwSignal<CadTable>,
    pub fabric: RwSignal<FabricTable>,
    pub trims: RwSignal<TrimsTable>,
    pub others: RwSignal<OthersTable>,

    // summary overrides, as entered
    pub factory_cm: RwSignal<String>,
    pub commercial_percent: RwSignal<String>,
    pub profit_percent: RwSignal<String>,

    pub style_check: RwSignal<StyleCheck>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub created_by: RwSignal<String>,
}

impl CostSheetDetailsViewModel {
    pub fn new(mode: SheetMode) -> Self {
        let defaults = SummaryOverrides::default();
        let creating = mode == SheetMode::Create;
        Self {
            mode: RwSignal::new(mode),
            record_id: RwSignal::new(None),
            style_info: RwSignal::new(StyleInfo::default()),
            // a fresh sheet starts from the built-in templates
            cad: RwSignal::new(if creating {
                CadTable::default_template()
            } else {
                CadTable::default()
            }),
            fabric: RwSignal::new(if creating {
                FabricTable::default_template()
            } else {
                FabricTable::default()
            }),
            trims: RwSignal::new(if creating {
                TrimsTable::default_template()
            } else {
                TrimsTable::default()
            }),
            others: RwSignal::new(OthersTable::default()),
            factory_cm: RwSignal::new(format_input(defaults.factory_cm)),
            commercial_percent: RwSignal::new(format_input(defaults.commercial_percent)),
            profit_percent: RwSignal::new(format_input(defaults.profit_percent)),
            style_check: RwSignal::new(StyleCheck::Unchecked),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            created_by: RwSignal::new(String::new()),
        }
    }

    /// Load the canonical record into local editable copies
    pub fn load_record(&self, record: &CostSheetRecord) {
        self.record_id.set(Some(record.id.clone()));
        self.style_info.set(record.style_info.clone());
        self.cad.set(CadTable::from_json(&record.cad_consumption));
        self.fabric.set(FabricTable::from_json(&record.fabric_cost));
        self.trims
            .set(TrimsTable::from_json(&record.trims_accessories));
        self.others.set(OthersTable::from_json(&record.others));
        self.factory_cm.set(format_input(record.summary.factory_cm));
        self.commercial_percent
            .set(format_input(record.summary.commercial_percent));
        self.profit_percent
            .set(format_input(record.summary.profit_percent));
        self.created_by.set(record.created_by.clone());
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            return;
        };
        let vm = *self;
        vm.loading.set(true);
        spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(record) => vm.load_record(&record),
                Err(e) => vm.error.set(Some(format!("Failed to load: {}", e))),
            }
            vm.loading.set(false);
        });
    }

    pub fn editable(&self) -> bool {
        self.mode.get().editable()
    }

    /// Detail sections stay hidden until a style code is entered
    pub fn sections_visible(&self) -> bool {
        self.mode.get() != SheetMode::Create
            || !self.style_info.get().style.trim().is_empty()
    }

    /// Show mode gains a local, non-persisted edit toggle
    pub fn enter_edit(&self) {
        self.mode.set(SheetMode::Edit);
    }

    // ------------------------------------------------------------------
    // Row-set commands; each one funnels through the contracts tables so
    // recomputation happens synchronously with the edit
    // ------------------------------------------------------------------

    pub fn cad_add_row(&self) {
        self.cad.update(|t| t.add_row());
    }

    pub fn cad_delete_row(&self, id: &str) {
        self.cad.update(|t| {
            t.delete_row(id);
        });
    }

    pub fn cad_update_field(&self, id: &str, field: &str, value: &str) {
        // rejected edits still notify, so the input snaps back to the
        // stored cell value
        self.cad.update(|t| {
            t.update_field(id, field, value);
        });
    }

    pub fn fabric_add_row(&self, segment: FabricSegment) {
        self.fabric.update(|t| t.add_row(segment));
    }

    pub fn fabric_delete_row(&self, id: &str) {
        self.fabric.update(|t| {
            t.delete_row(id);
        });
    }

    pub fn fabric_update_field(&self, id: &str, field: &str, value: &str) {
        self.fabric.update(|t| {
            t.update_field(id, field, value);
        });
    }

    pub fn trims_add_row(&self) {
        self.trims.update(|t| t.add_row());
    }

    pub fn trims_delete_row(&self, id: &str) {
        self.trims.update(|t| {
            t.delete_row(id);
        });
    }

    pub fn trims_update_field(&self, id: &str, field: &str, value: &str) {
        self.trims.update(|t| {
            t.update_field(id, field, value);
        });
    }

    pub fn trims_update_adjustment(&self, value: &str) {
        self.trims.update(|t| {
            t.update_adjustment_percent(value);
        });
    }

    pub fn others_add_row(&self) {
        self.others.update(|t| t.add_row());
    }

    pub fn others_delete_row(&self, id: &str) {
        self.others.update(|t| {
            t.delete_row(id);
        });
    }

    pub fn others_update_field(&self, id: &str, field: &str, value: &str) {
        self.others.update(|t| {
            t.update_field(id, field, value);
        });
    }

    pub fn update_scalar(&self, signal: RwSignal<String>, value: &str) {
        if is_decimal_input(value) {
            signal.set(value.to_string());
        } else {
            // notify so the bound input reverts to the accepted value
            signal.update(|_| {});
        }
    }

    pub fn update_style_field(&self, apply: impl FnOnce(&mut StyleInfo)) {
        self.style_info.update(apply);
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    pub fn overrides(&self) -> SummaryOverrides {
        SummaryOverrides {
            factory_cm: parse_input(&self.factory_cm.get()),
            commercial_percent: parse_input(&self.commercial_percent.get()),
            profit_percent: parse_input(&self.profit_percent.get()),
        }
    }

    /// The full derived chain, recomputed on every tracked change
    pub fn chain(&self) -> SummaryChain {
        summary_chain(
            self.fabric.get().total_fabric_cost(),
            self.trims.get().total(),
            self.others.get().subtotal(),
            &self.overrides(),
        )
    }

    pub fn can_save(&self) -> bool {
        if !self.editable() || self.saving.get() {
            return false;
        }
        if self.style_info.get().style.trim().is_empty() {
            return false;
        }
        // an existing style blocks creating a new sheet
        !(self.mode.get() == SheetMode::Create
            && matches!(self.style_check.get(), StyleCheck::Taken { .. }))
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Style-field blur handler in create mode
    pub fn run_style_check(&self) {
        if self.mode.get_untracked() != SheetMode::Create {
            return;
        }
        let style = self.style_info.get_untracked().style.trim().to_string();
        if style.is_empty() {
            self.style_check.set(StyleCheck::Unchecked);
            return;
        }
        let vm = *self;
        vm.style_check.set(StyleCheck::Checking);
        spawn_local(async move {
            match model::check_style(&style).await {
                Ok(result) if result.exists => vm.style_check.set(StyleCheck::Taken {
                    creator_name: result
                        .creator_name
                        .unwrap_or_else(|| "another user".to_string()),
                }),
                Ok(_) => vm.style_check.set(StyleCheck::Available),
                // a failed pre-check is not a workflow error; the backend
                // still enforces uniqueness on save
                Err(_) => vm.style_check.set(StyleCheck::Unchecked),
            }
        });
    }

    /// Package the current tables; totals are rebuilt from rows here
    pub fn assemble_payload(&self, session: &SessionStore) -> CostSheetPayload {
        let mut payload = CostSheetPayload::assemble(
            self.style_info.get_untracked(),
            &self.cad.get_untracked(),
            &self.fabric.get_untracked(),
            &self.trims.get_untracked(),
            &self.others.get_untracked(),
            self.overrides(),
        );
        payload.created_by = session.user.get_untracked().map(|u| u.username);
        payload
    }

    /// Create or full-replace update; local state is left untouched on
    /// failure so the user can retry
    pub fn save_command(&self, session: &SessionStore, on_saved: Arc<dyn Fn(CostSheetRecord) + Send + Sync>) {
        let payload = self.assemble_payload(session);
        let mode = self.mode.get_untracked();
        let record_id = self.record_id.get_untracked();
        let vm = *self;

        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = match (mode, record_id) {
                (SheetMode::Create, _) => model::create(&payload).await,
                (_, Some(id)) => model::update(&id, payload).await,
                (_, None) => Err(SaveError::Other("No record id to update".into())),
            };
            match result {
                Ok(record) => on_saved(record),
                Err(SaveError::StyleConflict) => {
                    vm.error
                        .set(Some("This style is already registered".to_string()));
                    vm.run_style_check();
                }
                Err(SaveError::Other(e)) => vm.error.set(Some(format!("Save failed: {}", e))),
            }
            vm.saving.set(false);
        });
    }
}
