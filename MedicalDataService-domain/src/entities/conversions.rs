use crate::entities::medical_data::{BloodPressure, CreateMedicalDataRequest, MedicalData};
use uuid::Uuid;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]
/// as specified in the architectural rules

/// Helper function to safely parse a string ID to UUID
///
/// This centralizes UUID parsing logic to ensure consistent handling across the application.
/// When an invalid UUID is provided, it returns a descriptive error message.
///
/// # Arguments
/// * `id` - The string ID to parse into a UUID
///
/// # Returns
/// * `Result<Uuid, String>` - The parsed UUID or an error message
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Convert from data model to domain entity for a medical data record.
///
/// The two pressure columns are recombined into the domain pair; a row
/// where only one of them is set yields no blood pressure at all.
pub fn convert_to_domain_medical_data(
    data_record: medical_data_service_data::models::medical_record::MedicalRecord,
) -> MedicalData {
    let blood_pressure = match (data_record.systolic_pressure, data_record.diastolic_pressure) {
        (Some(systolic), Some(diastolic)) => Some(BloodPressure {
            systolic_pressure: systolic,
            diastolic_pressure: diastolic,
        }),
        _ => None,
    };

    MedicalData {
        id: data_record.id,
        patient_id: data_record.patient_id,
        blood_pressure,
        heartbeat_rate: data_record.heartbeat_rate,
        created_at: data_record.created_at,
    }
}

/// Convert from domain entity to data model for create request
pub fn convert_to_data_create_request(
    domain_request: &CreateMedicalDataRequest,
) -> medical_data_service_data::models::medical_record::CreateMedicalRecord {
    medical_data_service_data::models::medical_record::CreateMedicalRecord {
        patient_id: domain_request.patient_id.clone(),
        systolic_pressure: domain_request.systolic_pressure,
        diastolic_pressure: domain_request.diastolic_pressure,
        heartbeat_rate: domain_request.heartbeat_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_string_to_uuid_valid() {
        let result = parse_string_to_uuid("123e4567-e89b-12d3-a456-426614174000");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_string_to_uuid_invalid() {
        let result = parse_string_to_uuid("not-a-uuid");
        assert_eq!(result.unwrap_err(), "Invalid UUID format: not-a-uuid");
    }

    #[test]
    fn test_convert_to_domain_medical_data_with_pressure() {
        // Create a data model
        let data_record = medical_data_service_data::models::medical_record::MedicalRecord {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            patient_id: "patient-123".to_string(),
            systolic_pressure: Some(120),
            diastolic_pressure: Some(80),
            heartbeat_rate: 75,
            created_at: Utc::now().to_rfc3339(),
        };

        // Convert to domain entity
        let domain_record = convert_to_domain_medical_data(data_record.clone());

        // Verify conversion
        assert_eq!(domain_record.id, data_record.id);
        assert_eq!(domain_record.patient_id, data_record.patient_id);
        assert_eq!(
            domain_record.blood_pressure,
            Some(BloodPressure {
                systolic_pressure: 120,
                diastolic_pressure: 80,
            })
        );
        assert_eq!(domain_record.heartbeat_rate, data_record.heartbeat_rate);
        assert_eq!(domain_record.created_at, data_record.created_at);
    }

    #[test]
    fn test_convert_to_domain_medical_data_without_pressure() {
        let data_record = medical_data_service_data::models::medical_record::MedicalRecord {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            patient_id: "patient-123".to_string(),
            systolic_pressure: None,
            diastolic_pressure: None,
            heartbeat_rate: 75,
            created_at: Utc::now().to_rfc3339(),
        };

        let domain_record = convert_to_domain_medical_data(data_record);
        assert_eq!(domain_record.blood_pressure, None);
    }

    #[test]
    fn test_convert_to_domain_medical_data_half_pair_drops_pressure() {
        // A row with only one pressure column set should not surface a pair
        let data_record = medical_data_service_data::models::medical_record::MedicalRecord {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            patient_id: "patient-123".to_string(),
            systolic_pressure: Some(120),
            diastolic_pressure: None,
            heartbeat_rate: 75,
            created_at: Utc::now().to_rfc3339(),
        };

        let domain_record = convert_to_domain_medical_data(data_record);
        assert_eq!(domain_record.blood_pressure, None);
    }

    #[test]
    fn test_convert_to_data_create_request() {
        // Create a domain entity
        let domain_request = CreateMedicalDataRequest {
            patient_id: "patient-123".to_string(),
            systolic_pressure: Some(120),
            diastolic_pressure: Some(80),
            heartbeat_rate: 75,
        };

        // Convert to data model
        let data_request = convert_to_data_create_request(&domain_request);

        // Verify conversion
        assert_eq!(data_request.patient_id, domain_request.patient_id);
        assert_eq!(data_request.systolic_pressure, domain_request.systolic_pressure);
        assert_eq!(data_request.diastolic_pressure, domain_request.diastolic_pressure);
        assert_eq!(data_request.heartbeat_rate, domain_request.heartbeat_rate);
    }
}
