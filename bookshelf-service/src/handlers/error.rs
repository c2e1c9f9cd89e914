//! API error types for handler operations
//!
//! Four outcomes end a request early: a malformed path identifier, a body that
//! is not valid JSON for the entity, a missing row, and any other store failure.
//! Each maps to a fixed status code and the body `{"error": "<message>"}`.
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use bookshelf_service::handlers::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::invalid_identifier(ApiOperation::Get, "Book", "abc");
//! assert_eq!(error.message, "Invalid Book ID");
//! assert_eq!(error.kind.status_code(), StatusCode::BAD_REQUEST);
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, RepositoryOperation};

/// Message sent for any body that fails to decode
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing a page of entities
    List,
    /// Getting a single entity by ID
    Get,
    /// Creating a new entity
    Create,
    /// Overwriting an existing entity
    Update,
    /// Deleting an entity
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl From<RepositoryOperation> for ApiOperation {
    fn from(op: RepositoryOperation) -> Self {
        match op {
            RepositoryOperation::FindById => Self::Get,
            RepositoryOperation::FindPage => Self::List,
            RepositoryOperation::Create => Self::Create,
            RepositoryOperation::Update => Self::Update,
            RepositoryOperation::Delete => Self::Delete,
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Path identifier is not a positive integer
    InvalidIdentifier,
    /// Request body is not valid JSON for the entity
    DecodeError,
    /// No row matches the identifier
    NotFound,
    /// Any other store-layer failure (connectivity, constraint, timeout)
    StoreError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier => write!(f, "invalid_identifier"),
            Self::DecodeError => write!(f, "decode_error"),
            Self::NotFound => write!(f, "not_found"),
            Self::StoreError => write!(f, "store_error"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier | Self::DecodeError => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured API error with operation context
///
/// Only `message` reaches the client. `detail` and the entity context are logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Client-facing message
    pub message: String,
    /// Underlying cause, for logs only
    pub detail: Option<String>,
    /// The type of entity involved ("Book", "Author", "Publisher")
    pub entity_type: Option<String>,
    /// The ID of the entity involved, as received
    pub entity_id: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            detail: None,
            entity_type: None,
            entity_id: None,
        }
    }

    /// The path segment `raw` is not a valid identifier for `entity_type`
    pub fn invalid_identifier(
        operation: ApiOperation,
        entity_type: &str,
        raw: impl Into<String>,
    ) -> Self {
        Self::new(
            operation,
            ApiErrorKind::InvalidIdentifier,
            format!("Invalid {} ID", entity_type),
        )
        .with_entity(entity_type, raw)
    }

    /// The request body could not be decoded
    pub fn decode_error(operation: ApiOperation, detail: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::DecodeError, INVALID_PAYLOAD).with_detail(detail)
    }

    /// No `entity_type` row with `entity_id`
    pub fn not_found(entity_type: &str, entity_id: impl Into<String>) -> Self {
        Self::new(
            ApiOperation::Get,
            ApiErrorKind::NotFound,
            format!("{} not found", entity_type),
        )
        .with_entity(entity_type, entity_id)
    }

    /// Store failure with its leaf message
    pub fn store_error(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::StoreError, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Add the entity type alone, when there is no identifier to report
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                detail = ?self.detail,
                "API error: {}", self.message
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                detail = ?self.detail,
                "API error: {}", self.message
            );
        }

        (status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let detail = err.to_string();
        let mut api = ApiError::store_error(ApiOperation::from(err.operation), err.message);
        api.entity_type = err.entity_type;
        api.entity_id = err.entity_id;
        api.with_detail(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_operation_display() {
        assert_eq!(format!("{}", ApiOperation::List), "list");
        assert_eq!(format!("{}", ApiOperation::Get), "get");
        assert_eq!(format!("{}", ApiOperation::Create), "create");
        assert_eq!(format!("{}", ApiOperation::Update), "update");
        assert_eq!(format!("{}", ApiOperation::Delete), "delete");
    }

    #[test]
    fn test_api_error_kind_status_codes() {
        assert_eq!(
            ApiErrorKind::InvalidIdentifier.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiErrorKind::DecodeError.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiErrorKind::StoreError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_identifier_message() {
        for entity in ["Book", "Author", "Publisher"] {
            let error = ApiError::invalid_identifier(ApiOperation::Delete, entity, "x1");
            assert_eq!(error.message, format!("Invalid {} ID", entity));
            assert_eq!(error.entity_id.as_deref(), Some("x1"));
            assert_eq!(error.operation, ApiOperation::Delete);
        }
    }

    #[test]
    fn test_decode_error_hides_detail() {
        let error = ApiError::decode_error(ApiOperation::Create, "expected value at line 1");
        assert_eq!(error.message, INVALID_PAYLOAD);
        assert_eq!(error.detail.as_deref(), Some("expected value at line 1"));
    }

    #[test]
    fn test_not_found_message() {
        let error = ApiError::not_found("Author", "11");
        assert_eq!(error.message, "Author not found");
        assert_eq!(error.kind, ApiErrorKind::NotFound);
    }

    #[test]
    fn test_display_with_entity() {
        let display = ApiError::not_found("Book", "11").to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("[Book: 11]"));
    }

    #[test]
    fn test_from_repository_timeout_keeps_leaf_message() {
        let repo_err =
            RepositoryError::timeout(RepositoryOperation::FindPage, "Store call timed out");
        let api_err: ApiError = repo_err.into();

        assert_eq!(api_err.kind, ApiErrorKind::StoreError);
        assert_eq!(api_err.operation, ApiOperation::List);
        assert_eq!(api_err.message, "Store call timed out");
        assert!(api_err.detail.unwrap().contains("timeout"));
    }

    #[test]
    fn test_from_repository_constraint_violation() {
        let repo_err = RepositoryError::constraint_violation(
            RepositoryOperation::Update,
            "violates foreign key constraint",
        )
        .with_entity("Book", "4");
        let api_err: ApiError = repo_err.into();

        assert_eq!(api_err.kind, ApiErrorKind::StoreError);
        assert_eq!(api_err.message, "violates foreign key constraint");
        assert_eq!(api_err.entity_type.as_deref(), Some("Book"));
    }

    #[test]
    fn test_from_repository_missing_row_is_store_error() {
        let repo_err = RepositoryError::from(sqlx::Error::RowNotFound)
            .with_operation(RepositoryOperation::Create)
            .with_entity("Publisher", "9");
        let api_err: ApiError = repo_err.into();

        assert_eq!(api_err.kind, ApiErrorKind::StoreError);
        assert_eq!(api_err.operation, ApiOperation::Create);
        assert_eq!(api_err.entity_id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = ApiError::not_found("Book", "11").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Book not found"})
        );
    }

    #[tokio::test]
    async fn test_store_error_response() {
        let response =
            ApiError::store_error(ApiOperation::Create, "connection refused").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "connection refused"})
        );
    }
}
