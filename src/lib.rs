pub mod applied_step;
pub mod error;
/// Ordered collection of applied steps, unique per step reference
pub mod ledger;
pub mod meta;
pub mod refs;
// Result base with add/merge/query operations
pub mod scored_result;
