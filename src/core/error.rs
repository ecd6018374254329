//! Typed error handling for the board
//!
//! Every fallible operation returns a [`BoardError`] so callers can match on
//! the specific failure instead of string-sniffing an `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: Entity Store failures (unknown id, duplicate id, bad patch)
//! - [`SelectionError`]: bulk actions attempted without a selection
//! - [`ValidationError`]: draft validation and wizard transitions
//! - [`ConfigError`]: configuration parsing and lookups
//! - [`RequestError`]: malformed HTTP input
//!
//! # Example
//!
//! ```rust,ignore
//! match service.update("job-42", json!({"status": "closed"})).await {
//!     Ok(job) => println!("closed {}", job.id),
//!     Err(BoardError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("job {} is gone", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type BoardResult<T> = std::result::Result<T, BoardError>;

/// The main error type for the board
#[derive(Debug, Error)]
pub enum BoardError {
    /// Entity Store errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Selection errors
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (poisoned locks and the like)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BoardError {
    /// Name of the error kind as reported in bulk outcomes
    /// (`NotFoundError`, `DuplicateIdError`, `NoSelectionError`, ...)
    pub fn kind(&self) -> &'static str {
        match self {
            BoardError::Entity(e) => e.kind(),
            BoardError::Selection(_) => "NoSelectionError",
            BoardError::Validation(_) => "ValidationError",
            BoardError::Config(_) => "ConfigError",
            BoardError::Request(_) => "RequestError",
            BoardError::Internal(_) => "InternalError",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::Entity(e) => e.status_code(),
            BoardError::Selection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BoardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BoardError::Config(e) => e.status_code(),
            BoardError::Request(_) => StatusCode::BAD_REQUEST,
            BoardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            BoardError::Entity(e) => e.error_code(),
            BoardError::Selection(_) => "NO_SELECTION",
            BoardError::Validation(ValidationError::InvalidTransition { .. }) => {
                "INVALID_TRANSITION"
            }
            BoardError::Validation(_) => "VALIDATION_ERROR",
            BoardError::Config(_) => "CONFIG_ERROR",
            BoardError::Request(_) => "BAD_REQUEST",
            BoardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BoardError::Entity(EntityError::NotFound { entity_type, id })
            | BoardError::Entity(EntityError::DuplicateId { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id,
                }))
            }
            BoardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors raised by the Entity Store
#[derive(Debug, Error)]
pub enum EntityError {
    /// No record with this id
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Insert collided with an existing id
    #[error("{entity_type} with id '{id}' already exists")]
    DuplicateId { entity_type: String, id: String },

    /// Patch could not be merged into the record
    #[error("Invalid patch for {entity_type} '{id}': {message}")]
    InvalidPatch {
        entity_type: String,
        id: String,
        message: String,
    },

    /// Entity kind is not registered
    #[error("Unknown entity type: {entity_type}")]
    UnknownType { entity_type: String },
}

impl EntityError {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "NotFoundError",
            EntityError::DuplicateId { .. } => "DuplicateIdError",
            EntityError::InvalidPatch { .. } => "InvalidPatchError",
            EntityError::UnknownType { .. } => "UnknownTypeError",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } | EntityError::UnknownType { .. } => {
                StatusCode::NOT_FOUND
            }
            EntityError::DuplicateId { .. } => StatusCode::CONFLICT,
            EntityError::InvalidPatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::DuplicateId { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::InvalidPatch { .. } => "INVALID_PATCH",
            EntityError::UnknownType { .. } => "UNKNOWN_ENTITY_TYPE",
        }
    }
}

// =============================================================================
// Selection Errors
// =============================================================================

/// Errors related to the Selection Tracker
#[derive(Debug, Error)]
pub enum SelectionError {
    /// A bulk action was requested with nothing selected
    #[error("No items selected for '{action}'")]
    Empty { action: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One field failed
    #[error("Validation failed for '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Several fields failed
    #[error("Validation failed: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldError>),

    /// State machine transition not allowed from the current state
    #[error("Cannot {action} from step '{from}'")]
    InvalidTransition { from: String, action: String },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Field errors carried by this error, if any
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ValidationError::FieldError { field, message } => vec![FieldError {
                field: field.clone(),
                message: message.clone(),
            }],
            ValidationError::FieldErrors(errors) => errors.clone(),
            ValidationError::InvalidTransition { .. } => Vec::new(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML could not be parsed
    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    /// File could not be read
    #[error("Failed to read configuration file '{path}': {message}")]
    Io { path: String, message: String },

    /// Referenced entity kind is not configured
    #[error("Entity '{name}' is not configured")]
    UnknownEntity { name: String },
}

impl ConfigError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConfigError::UnknownEntity { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_yaml::Error> for BoardError {
    fn from(err: serde_yaml::Error) -> Self {
        BoardError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP input
#[derive(Debug, Error)]
pub enum RequestError {
    /// Body was not the expected JSON
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Unknown bulk action name
    #[error("Unknown action '{action}'")]
    UnknownAction { action: String },
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}
