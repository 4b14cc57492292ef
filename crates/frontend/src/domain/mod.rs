pub mod a001_cost_sheet;
pub mod a002_tna_schedule;
