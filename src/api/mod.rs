pub mod employee;
pub mod response;
pub mod team;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Path ids must be ObjectId hex; anything else cannot match a document,
/// so it reports as the resource's not-found signal.
pub(crate) fn validate_doc_id<'a>(raw: &'a str, not_found: &'static str) -> Result<&'a str, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::NotFound(not_found))?;
    Ok(raw)
}
