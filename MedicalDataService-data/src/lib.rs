// Medical Data Service - data layer
// This crate handles data access and storage for medical records

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
