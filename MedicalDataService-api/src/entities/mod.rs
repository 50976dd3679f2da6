// Public entities for the MedicalDataService API
// This module contains data structures that are shared across the application boundary

// Re-export data structures for medical data
pub mod medical_data;

// Common entities for error handling
pub mod common;
