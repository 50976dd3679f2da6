// Data storage models
pub mod medical_record;

// Re-export common types for easier imports
pub use medical_record::{CreateMedicalRecord, MedicalRecord};
