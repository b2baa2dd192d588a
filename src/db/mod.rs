// Submission attribute store
//
// The relational store is read-only for scoring: one bulk load per table,
// joined in memory (see sqlite.rs), behind the AttributeStore trait so
// tests can run against an in-memory table.

pub mod memory;
pub mod sqlite;
pub mod store;

pub use memory::InMemoryAttributeStore;
pub use sqlite::SqliteAttributeStore;
pub use store::{AttributeStore, AttributeTable, SubmissionRecord};
