use serde::Serialize;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Precondition failures raised by the curve and migration logic.
/// All of them are raised before any mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SaleError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Capacity error: {0}")]
    Capacity(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    ValidationError(String),
    StateError(String),
    CapacityError(String),
    PersistenceError(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::StateError(msg) => write!(f, "State error: {}", msg),
            ApiError::CapacityError(msg) => write!(f, "Capacity error: {}", msg),
            ApiError::PersistenceError(e) => write!(f, "Persistence error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SaleError> for ApiError {
    fn from(e: SaleError) -> Self {
        match e {
            SaleError::Validation(msg) => ApiError::ValidationError(msg),
            SaleError::State(msg) => ApiError::StateError(msg),
            SaleError::Capacity(msg) => ApiError::CapacityError(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::PersistenceError(e)
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotFound(_) => {
                HttpResponse::NotFound().json(ErrorResponse {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
            ApiError::ValidationError(_) => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
            ApiError::StateError(_) => {
                HttpResponse::Conflict().json(ErrorResponse {
                    code: "STATE_ERROR".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
            ApiError::CapacityError(_) => {
                HttpResponse::Conflict().json(ErrorResponse {
                    code: "CAPACITY_ERROR".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
            ApiError::PersistenceError(_) => {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    code: "PERSISTENCE_ERROR".to_string(),
                    message: "Internal server error".to_string(),
                    details: None,
                })
            }
        }
    }
}
