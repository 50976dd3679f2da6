pub mod medical_data;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use medical_data::{
    create_default_medical_data_service, MedicalDataServiceError, MedicalDataServiceTrait,
};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use medical_data::create_mock_medical_data_service;
