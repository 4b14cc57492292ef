use contracts::domain::a001_cost_sheet::aggregate::CostSheetRecord;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct CostSheetListState {
    pub items: Vec<CostSheetRecord>,
    pub search_query: String,
    pub is_loaded: bool,
    /// 1-indexed, as the backend counts
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
}

impl Default for CostSheetListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            is_loaded: false,
            page: 1,
            page_size: 10,
            total_pages: 0,
            has_next_page: false,
        }
    }
}

pub fn create_state() -> RwSignal<CostSheetListState> {
    RwSignal::new(CostSheetListState::default())
}
