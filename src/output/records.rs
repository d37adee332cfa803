//! Synthetic record identifiers

use crate::types::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fetched record as it is written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Random v4 UUID, hex without hyphens
    pub id: String,
    /// The record exactly as the API returned it
    #[serde(rename = "RawData")]
    pub raw_data: Record,
}

impl StoredRecord {
    /// Tag a record with a fresh identifier
    pub fn new(raw_data: Record) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            raw_data,
        }
    }
}

/// Tag every record, keeping order
pub fn prepare_records(records: Vec<Record>) -> Vec<StoredRecord> {
    records.into_iter().map(StoredRecord::new).collect()
}
