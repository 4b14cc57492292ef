use super::EntityMetadata;

/// Trait implemented by every aggregate root
///
/// Instance accessors plus the static naming metadata the backend and the
/// UI need (table names, list titles).
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for the database (e.g. "cost_sheet")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Cost sheet")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Cost sheets")
    fn list_name() -> &'static str;

    /// Full system name, e.g. "a001_cost_sheet"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
