use async_trait::async_trait;
use thiserror::Error;

use crate::entities::conversions;
use crate::entities::medical_data::{CreateMedicalDataRequest, MedicalData};
use medical_data_service_data::repository::{MedicalRecordRepositoryTrait, RepositoryError};

/// Medical data service errors
#[derive(Debug, Error)]
pub enum MedicalDataServiceError {
    /// A well-formed request carried a semantically invalid value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested record or patient history does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for medical data service operations
#[async_trait]
pub trait MedicalDataServiceTrait {
    /// Validate the cross-field rules of a create request
    fn validate_create_request(
        &self,
        request: &CreateMedicalDataRequest,
    ) -> Result<(), MedicalDataServiceError>;

    /// Record a new set of measurements
    async fn create_medical_data(
        &self,
        request: CreateMedicalDataRequest,
    ) -> Result<MedicalData, MedicalDataServiceError>;

    /// Get a single record by its ID
    async fn get_medical_data_by_id(&self, id: &str) -> Result<MedicalData, MedicalDataServiceError>;

    /// Get every record for a patient
    async fn get_medical_data_by_patient_id(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalData>, MedicalDataServiceError>;
}

/// Medical data service for domain logic
pub struct MedicalDataService<R: MedicalRecordRepositoryTrait> {
    repository: R,
}

impl<R: MedicalRecordRepositoryTrait> MedicalDataService<R> {
    /// Create a new medical data service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> MedicalDataServiceError {
        match err {
            RepositoryError::NotFound(msg) => MedicalDataServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => MedicalDataServiceError::InvalidArgument(msg),
            _ => MedicalDataServiceError::Repository(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: MedicalRecordRepositoryTrait + Send + Sync> MedicalDataServiceTrait for MedicalDataService<R> {
    /// Validate the cross-field rules of a create request
    ///
    /// Field-level constraints (ranges, required fields) are checked at the
    /// API boundary; this covers the rules that span more than one field.
    fn validate_create_request(
        &self,
        request: &CreateMedicalDataRequest,
    ) -> Result<(), MedicalDataServiceError> {
        match (request.systolic_pressure, request.diastolic_pressure) {
            // A complete pair must also be internally consistent
            (Some(systolic), Some(diastolic)) => {
                if systolic <= diastolic {
                    return Err(MedicalDataServiceError::InvalidArgument(format!(
                        "Systolic pressure ({}) must be greater than diastolic pressure ({})",
                        systolic, diastolic
                    )));
                }
            }
            // No blood pressure at all is fine
            (None, None) => {}
            // A half-supplied pair is not
            _ => {
                return Err(MedicalDataServiceError::InvalidArgument(
                    "Both systolic and diastolic pressures must be provided together".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Record a new set of measurements
    async fn create_medical_data(
        &self,
        request: CreateMedicalDataRequest,
    ) -> Result<MedicalData, MedicalDataServiceError> {
        // Validate the request
        self.validate_create_request(&request)?;

        // Convert domain entity to data model using the centralized conversion function
        let data_request = conversions::convert_to_data_create_request(&request);

        // Call repository method
        let data_record = self
            .repository
            .create(data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        // Convert back to domain entity using the centralized conversion function
        Ok(conversions::convert_to_domain_medical_data(data_record))
    }

    /// Get a single record by its ID
    async fn get_medical_data_by_id(&self, id: &str) -> Result<MedicalData, MedicalDataServiceError> {
        // Convert to UUID using the centralized helper function
        let id_uuid = conversions::parse_string_to_uuid(id)
            .map_err(MedicalDataServiceError::InvalidArgument)?;

        // Call repository method
        let data_record = self
            .repository
            .get_by_id(id_uuid)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                MedicalDataServiceError::NotFound(format!("Medical data not found with ID: {}", id))
            })?;

        // Convert to domain entity using the centralized conversion function
        Ok(conversions::convert_to_domain_medical_data(data_record))
    }

    /// Get every record for a patient
    ///
    /// An empty result set is reported as not-found rather than an empty
    /// list, so callers get the same error for an unknown patient and a
    /// patient with no recorded data.
    async fn get_medical_data_by_patient_id(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalData>, MedicalDataServiceError> {
        // Call repository method
        let data_records = self
            .repository
            .get_by_patient_id(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        if data_records.is_empty() {
            return Err(MedicalDataServiceError::NotFound(format!(
                "No medical data found for patient with ID: {}",
                patient_id
            )));
        }

        // Convert to domain entities using the centralized conversion function
        let domain_records = data_records
            .into_iter()
            .map(conversions::convert_to_domain_medical_data)
            .collect();

        Ok(domain_records)
    }
}

/// Create a default medical data service using the repository from the data layer
pub fn create_default_medical_data_service() -> impl MedicalDataServiceTrait + Send + Sync {
    let repository = medical_data_service_data::repository::MedicalRecordRepository::new();
    MedicalDataService::new(repository)
}

/// Create a mock medical data service for testing
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_medical_data_service() -> impl MedicalDataServiceTrait + Send {
    crate::testing::MockMedicalDataService::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medical_data_service_data::models::medical_record::MedicalRecord;
    use medical_data_service_data::repository::tests::MockMedicalRecordRepository;

    /// Create a valid create request with a full blood pressure pair
    fn create_test_request() -> CreateMedicalDataRequest {
        CreateMedicalDataRequest {
            patient_id: "patient-123".to_string(),
            systolic_pressure: Some(120),
            diastolic_pressure: Some(80),
            heartbeat_rate: 75,
        }
    }

    fn service_with_records(records: Vec<MedicalRecord>) -> MedicalDataService<MockMedicalRecordRepository> {
        MedicalDataService::new(MockMedicalRecordRepository::with_records(records))
    }

    #[test]
    fn test_validate_create_request_valid() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        assert!(service.validate_create_request(&create_test_request()).is_ok());
    }

    #[test]
    fn test_validate_create_request_without_pressure() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let request = CreateMedicalDataRequest {
            patient_id: "patient-123".to_string(),
            systolic_pressure: None,
            diastolic_pressure: None,
            heartbeat_rate: 75,
        };

        assert!(service.validate_create_request(&request).is_ok());
    }

    #[test]
    fn test_validate_create_request_half_pair() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let request = CreateMedicalDataRequest {
            patient_id: "patient-123".to_string(),
            systolic_pressure: Some(120),
            diastolic_pressure: None,
            heartbeat_rate: 75,
        };

        let result = service.validate_create_request(&request);
        assert!(result.is_err());

        let message = match result.unwrap_err() {
            MedicalDataServiceError::InvalidArgument(msg) => msg,
            other => panic!("Expected InvalidArgument, got {:?}", other),
        };
        assert_eq!(
            message,
            "Both systolic and diastolic pressures must be provided together"
        );
    }

    #[test]
    fn test_validate_create_request_systolic_not_greater_than_diastolic() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let request = CreateMedicalDataRequest {
            patient_id: "patient-123".to_string(),
            systolic_pressure: Some(80),
            diastolic_pressure: Some(80),
            heartbeat_rate: 75,
        };

        let result = service.validate_create_request(&request);
        assert!(result.is_err());

        let message = match result.unwrap_err() {
            MedicalDataServiceError::InvalidArgument(msg) => msg,
            other => panic!("Expected InvalidArgument, got {:?}", other),
        };
        assert_eq!(
            message,
            "Systolic pressure (80) must be greater than diastolic pressure (80)"
        );
    }

    #[tokio::test]
    async fn test_create_medical_data() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let record = service.create_medical_data(create_test_request()).await.unwrap();

        assert!(!record.id.is_empty());
        assert_eq!(record.patient_id, "patient-123");
        assert_eq!(record.heartbeat_rate, 75);
        let pressure = record.blood_pressure.unwrap();
        assert_eq!(pressure.systolic_pressure, 120);
        assert_eq!(pressure.diastolic_pressure, 80);
        assert!(!record.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_create_medical_data_rejects_invalid_pair() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let request = CreateMedicalDataRequest {
            patient_id: "patient-123".to_string(),
            systolic_pressure: None,
            diastolic_pressure: Some(80),
            heartbeat_rate: 75,
        };

        let result = service.create_medical_data(request).await;
        assert!(matches!(result, Err(MedicalDataServiceError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_create_medical_data_repository_failure() {
        let service =
            MedicalDataService::new(MockMedicalRecordRepository::new().with_create_failure());

        let result = service.create_medical_data(create_test_request()).await;
        assert!(matches!(result, Err(MedicalDataServiceError::Repository(_))));
    }

    #[tokio::test]
    async fn test_get_medical_data_by_id() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let created = service.create_medical_data(create_test_request()).await.unwrap();
        let found = service.get_medical_data_by_id(&created.id).await.unwrap();

        assert_eq!(found, created);

        // Records are immutable, so a repeated read returns the same data
        let found_again = service.get_medical_data_by_id(&created.id).await.unwrap();
        assert_eq!(found_again, found);
    }

    #[tokio::test]
    async fn test_get_medical_data_by_id_invalid_uuid() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let result = service.get_medical_data_by_id("not-a-uuid").await;

        let message = match result.unwrap_err() {
            MedicalDataServiceError::InvalidArgument(msg) => msg,
            other => panic!("Expected InvalidArgument, got {:?}", other),
        };
        assert_eq!(message, "Invalid UUID format: not-a-uuid");
    }

    #[tokio::test]
    async fn test_get_medical_data_by_id_not_found() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        let id = "123e4567-e89b-12d3-a456-426614174000";
        let result = service.get_medical_data_by_id(id).await;

        let message = match result.unwrap_err() {
            MedicalDataServiceError::NotFound(msg) => msg,
            other => panic!("Expected NotFound, got {:?}", other),
        };
        assert_eq!(
            message,
            "Medical data not found with ID: 123e4567-e89b-12d3-a456-426614174000"
        );
    }

    #[tokio::test]
    async fn test_get_medical_data_by_patient_id() {
        let service = MedicalDataService::new(MockMedicalRecordRepository::new());

        service.create_medical_data(create_test_request()).await.unwrap();
        service.create_medical_data(create_test_request()).await.unwrap();

        let records = service.get_medical_data_by_patient_id("patient-123").await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_get_medical_data_by_patient_id_empty_is_not_found() {
        let service = service_with_records(vec![]);

        let result = service.get_medical_data_by_patient_id("patient-999").await;

        let message = match result.unwrap_err() {
            MedicalDataServiceError::NotFound(msg) => msg,
            other => panic!("Expected NotFound, got {:?}", other),
        };
        assert_eq!(message, "No medical data found for patient with ID: patient-999");
    }
}
