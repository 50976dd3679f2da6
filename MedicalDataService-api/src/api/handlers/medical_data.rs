use std::sync::Arc;
use axum::{
    extract::{Json, OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// Import domain entities and services
use medical_data_service_domain::entities::{CreateMedicalDataRequest, MedicalData};
use medical_data_service_domain::services::{
    create_default_medical_data_service, MedicalDataServiceError, MedicalDataServiceTrait,
};

// Import our entities
use crate::api::error::{ApiError, ValidatedJson};
use crate::entities::common::ErrorResponse;
use crate::entities::medical_data::{
    BloodPressureResponse, MedicalDataCreateResponse, MedicalDataRequest, MedicalDataResponse,
};

/// Service type for dependency injection
pub type MedicalDataService = Arc<dyn MedicalDataServiceTrait + Send + Sync>;

/// Create a default service for the handlers to use
pub fn create_service() -> MedicalDataService {
    Arc::new(create_default_medical_data_service())
}

/// Record a new medical data measurement
#[utoipa::path(
    post,
    path = "/api/v1/medical-data",
    request_body = MedicalDataRequest,
    responses(
        (status = 201, description = "Measurement recorded", body = MedicalDataCreateResponse),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Authenticated user lacks the required role", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "medical_data"
)]
#[instrument(skip(service, request))]
pub async fn create_medical_data(
    State(service): State<MedicalDataService>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<MedicalDataRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Received request to create medical data for patient ID: {}", request.patient_id);

    // Convert public request to domain request
    let domain_request = convert_to_domain_request(request);

    // Call domain service
    match service.create_medical_data(domain_request).await {
        Ok(record) => {
            debug!("Created medical data with ID: {}", record.id);
            let id = Uuid::parse_str(&record.id).unwrap_or_else(|_| Uuid::new_v4());
            Ok((StatusCode::CREATED, Json(MedicalDataCreateResponse { id })))
        }
        Err(e) => Err(map_service_error(e, uri.path())),
    }
}

/// Get a single medical data measurement by ID
#[utoipa::path(
    get,
    path = "/api/v1/medical-data/{id}",
    params(
        ("id" = String, Path, description = "Medical data record ID")
    ),
    responses(
        (status = 200, description = "Measurement found", body = MedicalDataResponse),
        (status = 400, description = "Malformed record ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Authenticated user lacks the required role", body = ErrorResponse),
        (status = 404, description = "No measurement with the given ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "medical_data"
)]
#[instrument(skip(service))]
pub async fn get_medical_data_by_id(
    State(service): State<MedicalDataService>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Received request to fetch medical data with ID: {}", id);

    // The service parses and validates the identifier so a malformed UUID
    // is reported as an invalid argument rather than a routing failure
    match service.get_medical_data_by_id(&id).await {
        Ok(record) => {
            debug!("Found medical data with ID: {}", record.id);
            Ok((StatusCode::OK, Json(convert_to_public_response(record))))
        }
        Err(e) => Err(map_service_error(e, uri.path())),
    }
}

/// Get every medical data measurement recorded for a patient
#[utoipa::path(
    get,
    path = "/api/v1/medical-data/patient/{patientId}",
    params(
        ("patientId" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Measurements found", body = [MedicalDataResponse]),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Authenticated user lacks the required role", body = ErrorResponse),
        (status = 404, description = "No measurements recorded for the patient", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "medical_data"
)]
#[instrument(skip(service))]
pub async fn get_medical_data_for_patient(
    State(service): State<MedicalDataService>,
    OriginalUri(uri): OriginalUri,
    Path(patient_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Received request to fetch medical data for patient ID: {}", patient_id);

    match service.get_medical_data_by_patient_id(&patient_id).await {
        Ok(records) => {
            debug!("Found {} medical data records for patient ID: {}", records.len(), patient_id);
            let responses: Vec<MedicalDataResponse> =
                records.into_iter().map(convert_to_public_response).collect();
            Ok((StatusCode::OK, Json(responses)))
        }
        Err(e) => Err(map_service_error(e, uri.path())),
    }
}

/// Map a domain service error onto the API error catalog
fn map_service_error(error: MedicalDataServiceError, path: &str) -> ApiError {
    match error {
        MedicalDataServiceError::InvalidArgument(message) => {
            warn!("Rejecting invalid request: {}", message);
            ApiError::invalid_argument(message, path)
        }
        MedicalDataServiceError::NotFound(message) => {
            info!("Requested medical data does not exist: {}", message);
            ApiError::not_found(message, path)
        }
        MedicalDataServiceError::Repository(message) => {
            error!("Repository failure while handling request: {}", message);
            ApiError::internal(path)
        }
    }
}

/// Convert the public request into its domain form
fn convert_to_domain_request(request: MedicalDataRequest) -> CreateMedicalDataRequest {
    let (systolic, diastolic) = match request.blood_pressure {
        Some(pressure) => (pressure.systolic, pressure.diastolic),
        None => (None, None),
    };

    CreateMedicalDataRequest {
        patient_id: request.patient_id,
        systolic_pressure: systolic,
        diastolic_pressure: diastolic,
        heartbeat_rate: request.heartbeat_rate,
    }
}

/// Convert a domain record into its public representation
fn convert_to_public_response(record: MedicalData) -> MedicalDataResponse {
    let created_at = match chrono::DateTime::parse_from_rfc3339(&record.created_at) {
        Ok(dt) => dt.with_timezone(&chrono::Utc),
        Err(_) => chrono::Utc::now(), // Fallback to current time if parsing fails
    };

    MedicalDataResponse {
        id: Uuid::parse_str(&record.id).unwrap_or_else(|_| Uuid::new_v4()),
        patient_id: record.patient_id,
        blood_pressure: record.blood_pressure.map(|pressure| BloodPressureResponse {
            systolic: pressure.systolic_pressure,
            diastolic: pressure.diastolic_pressure,
        }),
        heartbeat_rate: record.heartbeat_rate,
        created_at,
    }
}
