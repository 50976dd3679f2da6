// Domain entities and value objects
pub mod conversions;
pub mod medical_data;

// Re-export common types for easier imports
pub use medical_data::{BloodPressure, CreateMedicalDataRequest, MedicalData};
