use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use super::errors::RepositoryError;
use crate::models::medical_record::MedicalRecord;

/// In-memory storage for medical records, used when the database pool is
/// unavailable. Shared between clones so every handler sees the same data.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    records: Arc<Mutex<HashMap<String, MedicalRecord>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a record in memory
    pub async fn store_record(&self, record: &MedicalRecord) -> Result<MedicalRecord, RepositoryError> {
        let mut store = self
            .records
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    /// Get a record by ID from memory
    pub async fn get_by_id(&self, id: &Uuid) -> Result<Option<MedicalRecord>, RepositoryError> {
        let store = self
            .records
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;
        Ok(store.get(&id.to_string()).cloned())
    }

    /// Get all records for a patient from memory, oldest first
    pub async fn get_by_patient_id(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, RepositoryError> {
        let store = self
            .records
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let mut records: Vec<MedicalRecord> = store
            .values()
            .filter(|record| record.patient_id == patient_id)
            .cloned()
            .collect();

        // RFC 3339 timestamps sort lexicographically
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(records)
    }
}
