//! Cost sheet details UI
//!
//! MVVM split:
//! - model.rs: API calls (fetch, check-style, create, update)
//! - view_model.rs: editable table state and the save/check commands
//! - view.rs: the mode-parameterized Leptos components

mod model;
mod view;
mod view_model;

pub use view::CostSheetDetails;
pub use view_model::CostSheetDetailsViewModel;
