use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::medical_record::MedicalRecord;

/// Database storage operations for medical records
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Store a record in the database
    pub async fn store_record(pool: &DatabasePool, record: &MedicalRecord) -> Result<(), RepositoryError> {
        debug!("Storing medical record in database: id={}", record.id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get().map_err(RepositoryError::Pool)?;

                conn.execute(
                    "INSERT INTO medical_records
                     (id, patient_id, systolic_pressure, diastolic_pressure, heartbeat_rate, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    (
                        &record.id,
                        &record.patient_id,
                        record.systolic_pressure,
                        record.diastolic_pressure,
                        record.heartbeat_rate,
                        &record.created_at,
                    ),
                )
                .map_err(RepositoryError::Sqlite)?;

                Ok(())
            }
        }
    }

    /// Get a record by ID from the database
    pub async fn get_by_id(pool: &DatabasePool, id: &Uuid) -> Result<Option<MedicalRecord>, RepositoryError> {
        debug!("Getting medical record by ID from database: id={}", id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut stmt = conn.prepare(
                    "SELECT id, patient_id, systolic_pressure, diastolic_pressure, heartbeat_rate, created_at
                     FROM medical_records WHERE id = ?",
                )?;

                let record = stmt.query_row([&id.to_string()], |row| {
                    Ok(MedicalRecord {
                        id: row.get(0)?,
                        patient_id: row.get(1)?,
                        systolic_pressure: row.get(2)?,
                        diastolic_pressure: row.get(3)?,
                        heartbeat_rate: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                });

                match record {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(RepositoryError::Sqlite(e)),
                }
            }
        }
    }

    /// Get all records for a patient from the database
    pub async fn get_by_patient_id(
        pool: &DatabasePool,
        patient_id: &str,
    ) -> Result<Vec<MedicalRecord>, RepositoryError> {
        debug!("Getting medical records by patient ID from database: patient_id={}", patient_id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut stmt = conn.prepare(
                    "SELECT id, patient_id, systolic_pressure, diastolic_pressure, heartbeat_rate, created_at
                     FROM medical_records WHERE patient_id = ?
                     ORDER BY created_at",
                )?;

                let records = stmt.query_map([patient_id], |row| {
                    Ok(MedicalRecord {
                        id: row.get(0)?,
                        patient_id: row.get(1)?,
                        systolic_pressure: row.get(2)?,
                        diastolic_pressure: row.get(3)?,
                        heartbeat_rate: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?;

                let mut result = Vec::new();
                for record in records {
                    result.push(record?);
                }

                Ok(result)
            }
        }
    }
}
