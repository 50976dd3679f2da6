use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_medical_records_table(conn)?;
    create_patient_id_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the medical records table
fn create_medical_records_table(conn: &Connection) -> Result<(), String> {
    info!("Creating medical_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS medical_records (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL,
            systolic_pressure INTEGER,
            diastolic_pressure INTEGER,
            heartbeat_rate INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Create index on patient_id for the per-patient lookup
fn create_patient_id_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on patient_id");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_medical_records_patient_id
        ON medical_records (patient_id)",
        [],
    )
    .map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
