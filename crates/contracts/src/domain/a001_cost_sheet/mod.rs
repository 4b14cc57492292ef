pub mod aggregate;
pub mod compute;
pub mod rows;
