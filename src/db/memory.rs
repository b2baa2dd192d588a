// In-memory attribute store, for tests and ad-hoc runs

use super::store::{insert_merged, AttributeStore, AttributeTable, SubmissionRecord};
use crate::error::Result;

/// Attribute store backed by a prebuilt table
#[derive(Debug, Default, Clone)]
pub struct InMemoryAttributeStore {
    table: AttributeTable,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: SubmissionRecord) {
        insert_merged(&mut self.table, record);
    }
}

impl AttributeStore for InMemoryAttributeStore {
    async fn load(&self) -> Result<AttributeTable> {
        Ok(self.table.clone())
    }
}
