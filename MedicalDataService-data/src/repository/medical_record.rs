use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error};
use uuid::Uuid;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::DatabaseStorage;
use crate::database::get_db_pool;
use crate::models::medical_record::{CreateMedicalRecord, MedicalRecord};

/// Repository trait for medical records
#[async_trait]
pub trait MedicalRecordRepositoryTrait {
    /// Insert a new medical record, assigning its id and creation timestamp
    async fn create(&self, request: CreateMedicalRecord) -> Result<MedicalRecord, RepositoryError>;

    /// Get a medical record by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<MedicalRecord>, RepositoryError>;

    /// Get all medical records for a patient
    async fn get_by_patient_id(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, RepositoryError>;
}

/// Repository for medical records.
///
/// Serves from the SQLite pool when it is initialized and degrades to
/// process-local in-memory storage otherwise, so the service stays usable
/// without a writable database path.
#[derive(Debug, Clone, Default)]
pub struct MedicalRecordRepository {
    /// In-memory storage for when the database is not available
    storage: InMemoryStorage,
}

impl MedicalRecordRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl MedicalRecordRepositoryTrait for MedicalRecordRepository {
    async fn create(&self, request: CreateMedicalRecord) -> Result<MedicalRecord, RepositoryError> {
        // id and created_at are assigned here, exactly once
        let record = MedicalRecord {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            systolic_pressure: request.systolic_pressure,
            diastolic_pressure: request.diastolic_pressure,
            heartbeat_rate: request.heartbeat_rate,
            created_at: Utc::now().to_rfc3339(),
        };

        match get_db_pool() {
            Ok(pool) => {
                debug!("Storing medical record in database: {}", record.id);
                match DatabaseStorage::store_record(&pool, &record).await {
                    Ok(()) => Ok(record),
                    Err(e) => {
                        error!("Failed to store record in database: {}", e);
                        self.storage.store_record(&record).await
                    }
                }
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.store_record(&record).await
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<MedicalRecord>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting medical record by ID from database: {}", id);
                match DatabaseStorage::get_by_id(&pool, &id).await {
                    Ok(record) => Ok(record),
                    Err(e) => {
                        error!("Failed to get record by ID from database: {}", e);
                        self.storage.get_by_id(&id).await
                    }
                }
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage for get_by_id", e);
                self.storage.get_by_id(&id).await
            }
        }
    }

    async fn get_by_patient_id(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting medical records for patient from database: {}", patient_id);
                match DatabaseStorage::get_by_patient_id(&pool, patient_id).await {
                    Ok(records) => Ok(records),
                    Err(e) => {
                        error!("Failed to get records by patient ID from database: {}", e);
                        self.storage.get_by_patient_id(patient_id).await
                    }
                }
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for get_by_patient_id",
                    e
                );
                self.storage.get_by_patient_id(patient_id).await
            }
        }
    }
}

/// Mock medical record repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Mock implementation of the repository trait backed by a plain Vec.
    pub struct MockMedicalRecordRepository {
        records: Arc<Mutex<Vec<MedicalRecord>>>,
        fail_on_create: bool,
    }

    impl Default for MockMedicalRecordRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockMedicalRecordRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                records: Arc::new(Mutex::new(Vec::new())),
                fail_on_create: false,
            }
        }

        /// Create a mock repository with predefined records
        pub fn with_records(records: Vec<MedicalRecord>) -> Self {
            Self {
                records: Arc::new(Mutex::new(records)),
                fail_on_create: false,
            }
        }

        /// Make the next create call fail with a database error
        pub fn with_create_failure(mut self) -> Self {
            self.fail_on_create = true;
            self
        }
    }

    #[async_trait]
    impl MedicalRecordRepositoryTrait for MockMedicalRecordRepository {
        async fn create(&self, request: CreateMedicalRecord) -> Result<MedicalRecord, RepositoryError> {
            if self.fail_on_create {
                return Err(RepositoryError::Database(
                    crate::database::DatabaseError::QueryError("mock create failure".to_string()),
                ));
            }

            let record = MedicalRecord {
                id: Uuid::new_v4().to_string(),
                patient_id: request.patient_id,
                systolic_pressure: request.systolic_pressure,
                diastolic_pressure: request.diastolic_pressure,
                heartbeat_rate: request.heartbeat_rate,
                created_at: Utc::now().to_rfc3339(),
            };

            self.records.lock()?.push(record.clone());
            Ok(record)
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<MedicalRecord>, RepositoryError> {
            let records = self.records.lock()?;
            Ok(records.iter().find(|r| r.id == id.to_string()).cloned())
        }

        async fn get_by_patient_id(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, RepositoryError> {
            let records = self.records.lock()?;
            Ok(records
                .iter()
                .filter(|r| r.patient_id == patient_id)
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod repository_tests {
    use super::tests::MockMedicalRecordRepository;
    use super::*;

    fn create_request(patient_id: &str) -> CreateMedicalRecord {
        CreateMedicalRecord {
            patient_id: patient_id.to_string(),
            systolic_pressure: Some(120),
            diastolic_pressure: Some(80),
            heartbeat_rate: 75,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        // No database pool in tests, so this exercises the in-memory path
        let repo = MedicalRecordRepository::new();

        let record = repo.create(create_request("patient-123")).await.unwrap();

        assert!(Uuid::parse_str(&record.id).is_ok());
        assert!(!record.created_at.is_empty());
        assert_eq!(record.patient_id, "patient-123");
        assert_eq!(record.heartbeat_rate, 75);
    }

    #[tokio::test]
    async fn test_create_then_get_by_id_round_trip() {
        let repo = MedicalRecordRepository::new();

        let created = repo.create(create_request("patient-123")).await.unwrap();
        let id = Uuid::parse_str(&created.id).unwrap();

        let found = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.systolic_pressure, Some(120));
        assert_eq!(found.diastolic_pressure, Some(80));
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_get_by_patient_id_returns_only_matching() {
        let repo = MedicalRecordRepository::new();

        repo.create(create_request("patient-123")).await.unwrap();
        repo.create(create_request("patient-123")).await.unwrap();
        repo.create(create_request("patient-456")).await.unwrap();

        let records = repo.get_by_patient_id("patient-123").await.unwrap();
        assert_eq!(records.len(), 2);

        let empty = repo.get_by_patient_id("patient-unknown").await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_mock_create_failure() {
        let repo = MockMedicalRecordRepository::new().with_create_failure();

        let result = repo.create(create_request("patient-123")).await;
        assert!(result.is_err());
    }
}
