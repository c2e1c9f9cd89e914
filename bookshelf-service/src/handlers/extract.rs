//! Turning raw path segments and bodies into typed values

use axum::extract::{rejection::PathRejection, Path};

use super::error::{ApiError, ApiOperation};
use crate::{ids::RecordId, models::Entity};

/// Parse a path segment into an identifier for `E`
///
/// Fails with `Invalid <Entity> ID` for anything but a positive decimal integer.
pub fn parse_id<E: Entity>(operation: ApiOperation, raw: &str) -> Result<RecordId, ApiError> {
    raw.parse::<RecordId>()
        .map_err(|_| ApiError::invalid_identifier(operation, E::NAME, raw))
}

/// Identifier from an extracted `{id}` path segment
///
/// A segment axum could not extract (for instance one that is not valid UTF-8)
/// is reported the same way as any other bad identifier.
pub fn path_id<E: Entity>(
    operation: ApiOperation,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordId, ApiError> {
    match path {
        Ok(Path(raw)) => parse_id::<E>(operation, &raw),
        Err(rejection) => Err(ApiError::invalid_identifier(
            operation,
            E::NAME,
            rejection.body_text(),
        )),
    }
}

/// Decode a JSON request body into the draft for `E`
///
/// Any syntax or type error yields `Invalid request payload`; field values are
/// otherwise passed through untouched.
pub fn decode_draft<E: Entity>(operation: ApiOperation, body: &[u8]) -> Result<E::Draft, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::decode_error(operation, e.to_string()).with_entity_type(E::NAME))
}
