// MedicalDataService Domain
// This crate contains the business logic for the MedicalDataService application

// Services that implement business logic
pub mod services;

// Authentication
pub mod auth;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the database module from medical-data-service-data for convenience
pub use medical_data_service_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
