use serde::{Deserialize, Serialize};

/// Storage model for one medical data record.
///
/// Blood pressure is stored flattened into two nullable columns; both are
/// set or both are null (the semantic validation upstream guarantees it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    /// Unique identifier for the record
    pub id: String,

    /// Identifier of the patient the record belongs to
    pub patient_id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic_pressure: Option<i32>,

    /// Diastolic blood pressure (the lower number)
    pub diastolic_pressure: Option<i32>,

    /// Heartbeat rate in beats per minute
    pub heartbeat_rate: i32,

    /// When the record was created, RFC 3339
    pub created_at: String,
}

/// Input data for inserting a new medical record.
///
/// `id` and `created_at` are absent on purpose; both are assigned by the
/// repository at insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicalRecord {
    /// Identifier of the patient the record belongs to
    pub patient_id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic_pressure: Option<i32>,

    /// Diastolic blood pressure (the lower number)
    pub diastolic_pressure: Option<i32>,

    /// Heartbeat rate in beats per minute
    pub heartbeat_rate: i32,
}
