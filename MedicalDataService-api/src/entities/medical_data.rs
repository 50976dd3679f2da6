use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for recording a new medical data measurement
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDataRequest {
    /// Identifier of the patient the measurement belongs to
    #[validate(length(min = 1, message = "Patient ID is required"))]
    pub patient_id: String,

    /// Optional blood pressure measurement
    #[validate]
    pub blood_pressure: Option<BloodPressureRequest>,

    /// Heartbeat rate in beats per minute
    #[validate(range(min = 0, max = 300, message = "Heartbeat rate must be between 0 and 300"))]
    pub heartbeat_rate: i32,
}

/// Blood pressure component of a measurement request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BloodPressureRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 0, max = 300, message = "Systolic pressure must be between 0 and 300"))]
    pub systolic: Option<i32>,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 0, max = 200, message = "Diastolic pressure must be between 0 and 200"))]
    pub diastolic: Option<i32>,
}

/// Public representation of a stored medical data measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDataResponse {
    /// Unique identifier for the measurement
    pub id: Uuid,

    /// Identifier of the patient the measurement belongs to
    pub patient_id: String,

    /// Blood pressure measurement, if one was recorded
    pub blood_pressure: Option<BloodPressureResponse>,

    /// Heartbeat rate in beats per minute
    pub heartbeat_rate: i32,

    /// When the measurement was recorded in the system
    pub created_at: DateTime<Utc>,
}

/// Blood pressure component of a stored measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureResponse {
    /// Systolic blood pressure (the higher number)
    pub systolic: i32,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: i32,
}

/// Response returned after successfully recording a measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicalDataCreateResponse {
    /// Unique identifier assigned to the new measurement
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> MedicalDataRequest {
        MedicalDataRequest {
            patient_id: "patient-123".to_string(),
            blood_pressure: Some(BloodPressureRequest {
                systolic: Some(120),
                diastolic: Some(80),
            }),
            heartbeat_rate: 72,
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_blank_patient_id_fails_validation() {
        let mut request = valid_request();
        request.patient_id = String::new();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("patient_id"));
    }

    #[test]
    fn test_heartbeat_rate_out_of_range_fails_validation() {
        let mut request = valid_request();
        request.heartbeat_rate = 301;

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("heartbeat_rate"));
    }

    #[test]
    fn test_nested_blood_pressure_is_validated() {
        let mut request = valid_request();
        request.blood_pressure = Some(BloodPressureRequest {
            systolic: Some(-1),
            diastolic: Some(250),
        });

        // Both nested fields are out of range
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_blood_pressure_is_allowed() {
        let mut request = valid_request();
        request.blood_pressure = None;

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_deserializes_from_camel_case() {
        let json = r#"{
            "patientId": "patient-123",
            "bloodPressure": { "systolic": 120, "diastolic": 80 },
            "heartbeatRate": 72
        }"#;

        let request: MedicalDataRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.patient_id, "patient-123");
        assert_eq!(request.heartbeat_rate, 72);
        let pressure = request.blood_pressure.unwrap();
        assert_eq!(pressure.systolic, Some(120));
        assert_eq!(pressure.diastolic, Some(80));
    }

    #[test]
    fn test_response_serializes_to_camel_case() {
        let response = MedicalDataResponse {
            id: Uuid::new_v4(),
            patient_id: "patient-123".to_string(),
            blood_pressure: None,
            heartbeat_rate: 72,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("patientId").is_some());
        assert!(json.get("heartbeatRate").is_some());
        assert!(json.get("createdAt").is_some());
        // A measurement without blood pressure serializes the field as null
        assert!(json.get("bloodPressure").unwrap().is_null());
    }
}
