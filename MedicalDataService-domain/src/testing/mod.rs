// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use medical_data_service_data::repository::tests::MockMedicalRecordRepository;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::entities::conversions::parse_string_to_uuid;
use crate::entities::medical_data::{BloodPressure, CreateMedicalDataRequest, MedicalData};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};
use crate::services::medical_data::{MedicalDataServiceError, MedicalDataServiceTrait};

/// Mock implementation of the MedicalDataServiceTrait for testing
pub struct MockMedicalDataService {
    records: RwLock<HashMap<String, MedicalData>>,
    should_fail_validation: bool,
    should_fail_creation: bool,
}

impl Default for MockMedicalDataService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMedicalDataService {
    /// Create a new mock medical data service
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            should_fail_validation: false,
            should_fail_creation: false,
        }
    }

    /// Configure the mock to fail validation
    pub fn with_validation_failure(mut self) -> Self {
        self.should_fail_validation = true;
        self
    }

    /// Configure the mock to fail creation
    pub fn with_creation_failure(mut self) -> Self {
        self.should_fail_creation = true;
        self
    }

    /// Add a pre-defined record to the mock
    pub fn with_record(self, record: MedicalData) -> Self {
        {
            let mut records = self.records.write().unwrap();
            records.insert(record.id.clone(), record);
        }
        self
    }

    /// Add multiple pre-defined records to the mock
    pub fn with_records(self, records: Vec<MedicalData>) -> Self {
        {
            let mut records_map = self.records.write().unwrap();
            for record in records {
                records_map.insert(record.id.clone(), record);
            }
        }
        self
    }
}

#[async_trait]
impl MedicalDataServiceTrait for MockMedicalDataService {
    fn validate_create_request(
        &self,
        _request: &CreateMedicalDataRequest,
    ) -> Result<(), MedicalDataServiceError> {
        if self.should_fail_validation {
            Err(MedicalDataServiceError::InvalidArgument(
                "Validation failed - mock is configured to fail validation".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    async fn create_medical_data(
        &self,
        request: CreateMedicalDataRequest,
    ) -> Result<MedicalData, MedicalDataServiceError> {
        // First validate the request
        self.validate_create_request(&request)?;

        if self.should_fail_creation {
            return Err(MedicalDataServiceError::Repository(
                "Repository error - mock is configured to fail creation".to_string(),
            ));
        }

        let blood_pressure = match (request.systolic_pressure, request.diastolic_pressure) {
            (Some(systolic), Some(diastolic)) => Some(BloodPressure {
                systolic_pressure: systolic,
                diastolic_pressure: diastolic,
            }),
            _ => None,
        };

        let record = MedicalData {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            blood_pressure,
            heartbeat_rate: request.heartbeat_rate,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        // Store the record
        let mut records = self.records.write().unwrap();
        records.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    async fn get_medical_data_by_id(&self, id: &str) -> Result<MedicalData, MedicalDataServiceError> {
        // Behave like the real service for malformed identifiers
        parse_string_to_uuid(id).map_err(MedicalDataServiceError::InvalidArgument)?;

        let records = self.records.read().unwrap();

        match records.get(id) {
            Some(record) => Ok(record.clone()),
            None => Err(MedicalDataServiceError::NotFound(format!(
                "Medical data not found with ID: {}",
                id
            ))),
        }
    }

    async fn get_medical_data_by_patient_id(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalData>, MedicalDataServiceError> {
        let records = self.records.read().unwrap();
        let matching: Vec<MedicalData> = records
            .values()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();

        if matching.is_empty() {
            return Err(MedicalDataServiceError::NotFound(format!(
                "No medical data found for patient with ID: {}",
                patient_id
            )));
        }

        Ok(matching)
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Database component status
    database_status: ComponentStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            database_status: ComponentStatus::Healthy,
        }
    }

    /// Configure the mock with a degraded database
    pub fn with_degraded_database(mut self) -> Self {
        self.database_status = ComponentStatus::Degraded;
        self
    }

    /// Configure the mock with an unhealthy database
    pub fn with_unhealthy_database(mut self) -> Self {
        self.database_status = ComponentStatus::Unhealthy;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    /// Get the system health
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        // Add database component
        components.insert(
            "database".to_string(),
            HealthComponent {
                status: self.database_status.clone(),
                details: match self.database_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Database is experiencing high load".to_string()),
                    ComponentStatus::Unhealthy => Some("Database connection failed".to_string()),
                },
            },
        );

        // Add API component
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        // Overall status follows the worst component
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        SystemHealth { status, components }
    }

    /// Check database status
    async fn check_database_status(&self) -> Result<bool, String> {
        match self.database_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(true),
            ComponentStatus::Unhealthy => Err("Database connection failed".to_string()),
        }
    }
}

/// Factory function to create a mock medical data service
pub fn create_mock_medical_data_service() -> impl MedicalDataServiceTrait {
    MockMedicalDataService::new()
}

/// Factory function to create a mock health service
pub fn create_mock_health_service() -> impl HealthServiceTrait {
    MockHealthService::new()
}
