pub mod health;
pub mod medical_data;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use medical_data::{create_medical_data, get_medical_data_by_id, get_medical_data_for_patient};
