pub mod errors;

mod in_memory;
mod medical_record;
mod storage;

pub use errors::RepositoryError;
pub use medical_record::{MedicalRecordRepository, MedicalRecordRepositoryTrait};

#[cfg(any(test, feature = "mock"))]
pub use medical_record::tests;
