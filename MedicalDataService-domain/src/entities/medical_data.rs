use serde::{Deserialize, Serialize};

/// A blood pressure measurement, always carried as a complete pair.
///
/// Partial pairs never reach this type: requests that supply only one of
/// the two values are rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    /// Systolic (upper) pressure in mmHg
    pub systolic_pressure: i32,
    /// Diastolic (lower) pressure in mmHg
    pub diastolic_pressure: i32,
}

/// A recorded set of vital-sign measurements for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalData {
    /// Unique identifier (UUID), assigned by the service
    pub id: String,
    /// Identifier of the patient the measurements belong to
    pub patient_id: String,
    /// Optional blood pressure measurement
    pub blood_pressure: Option<BloodPressure>,
    /// Heartbeat rate in beats per minute
    pub heartbeat_rate: i32,
    /// Creation timestamp in RFC 3339 format, assigned by the service
    pub created_at: String,
}

/// Request to record a new set of measurements.
///
/// The pressures are kept as independent options here so the service can
/// tell a missing pair apart from a half-supplied one and reject the
/// latter as an invalid argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicalDataRequest {
    /// Identifier of the patient the measurements belong to
    pub patient_id: String,
    /// Systolic pressure in mmHg, if a blood pressure was measured
    pub systolic_pressure: Option<i32>,
    /// Diastolic pressure in mmHg, if a blood pressure was measured
    pub diastolic_pressure: Option<i32>,
    /// Heartbeat rate in beats per minute
    pub heartbeat_rate: i32,
}
