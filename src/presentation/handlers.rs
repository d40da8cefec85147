use crate::application::service::RentalService;
use crate::data::memory::{InMemoryBookingRepository, InMemoryCarRepository};
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::models::CreateBooking;
use crate::domain::user::RegisterUser;
use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the service
pub struct AppState {
    pub service:
        RentalService<InMemoryCarRepository, InMemoryUserRepository, InMemoryBookingRepository>,
}

// Uniform error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("End date must not precede start date")]
    InvalidDateRange,
    #[error("Car is not available for the requested period")]
    CarUnavailable,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for RentalError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            RentalError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            RentalError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            RentalError::InvalidDateRange => actix_web::http::StatusCode::BAD_REQUEST,
            RentalError::CarUnavailable => actix_web::http::StatusCode::CONFLICT,
            RentalError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        match self {
            RentalError::Internal(_) => {
                error!(error = %error_msg, status = %status, "Internal error")
            }
            _ => warn!(error = %error_msg, status = %status, "Request rejected"),
        }

        let error_response = ErrorResponse {
            error: error_msg.clone(),
            details: serde_json::json!({ "message": error_msg }),
        };

        HttpResponse::build(status).json(error_response)
    }
}

impl From<anyhow::Error> for RentalError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => RentalError::Validation(msg.clone()),
            Some(DomainError::NotFound(msg)) => RentalError::NotFound(msg.clone()),
            Some(DomainError::InvalidDateRange) => RentalError::InvalidDateRange,
            Some(DomainError::CarUnavailable) => RentalError::CarUnavailable,
            Some(DomainError::Internal(msg)) => RentalError::Internal(msg.clone()),
            None => RentalError::Internal(err.to_string()),
        }
    }
}

/// Maps malformed JSON payloads (bad dates, wrong types, missing fields) to
/// the uniform error body before they reach business logic.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RentalError::Validation(format!("Invalid request payload: {err}")).into()
}

// Handlers

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[instrument(skip(state))]
pub async fn list_cars(state: web::Data<AppState>) -> Result<HttpResponse, RentalError> {
    let cars = state.service.list_cars().await.map_err(|e| {
        error!(error = %e, "Failed to list cars");
        RentalError::from(e)
    })?;
    info!(count = cars.len(), "Catalog listed");
    Ok(HttpResponse::Ok().json(cars))
}

#[instrument(skip(state), fields(user_id))]
pub async fn register_user(
    state: web::Data<AppState>,
    req: web::Json<RegisterUser>,
) -> Result<HttpResponse, RentalError> {
    info!(email = %req.email, "Registering new user");
    let user = state
        .service
        .register_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            RentalError::from(e)
        })?;
    tracing::Span::current().record("user_id", user.id);
    info!(user_id = user.id, email = %user.email, "User registered successfully");
    Ok(HttpResponse::Created().json(user))
}

#[instrument(skip(state), fields(booking_id, user_id = req.user_id, car_id = req.car_id))]
pub async fn create_booking(
    state: web::Data<AppState>,
    req: web::Json<CreateBooking>,
) -> Result<HttpResponse, RentalError> {
    info!(
        user_id = req.user_id,
        car_id = req.car_id,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Processing booking request"
    );
    let booking = state
        .service
        .create_booking(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create booking");
            RentalError::from(e)
        })?;
    tracing::Span::current().record("booking_id", booking.id);
    info!(booking_id = booking.id, "Booking created successfully");
    Ok(HttpResponse::Created().json(booking))
}

#[instrument(skip(state))]
pub async fn list_bookings(state: web::Data<AppState>) -> Result<HttpResponse, RentalError> {
    let bookings = state.service.list_bookings().await.map_err(|e| {
        error!(error = %e, "Failed to list bookings");
        RentalError::from(e)
    })?;
    info!(count = bookings.len(), "Bookings listed");
    Ok(HttpResponse::Ok().json(bookings))
}
