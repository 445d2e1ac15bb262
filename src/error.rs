use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error};
use derive_more::Display;
use once_cell::sync::Lazy;
use serde_json::json;
use tracing::error;

/// Raw store errors are suppressed from response bodies in production.
static PRODUCTION: Lazy<bool> =
    Lazy::new(|| std::env::var("APP_ENV").map(|v| v == "production").unwrap_or(false));

#[derive(Debug, Display)]
pub enum ApiError {
    /// No document matches the requested id.
    #[display(fmt = "{}", _0)]
    NotFound(&'static str),
    /// Required-field, type, enum or range violations, one message each.
    #[display(fmt = "Validation error")]
    Validation(Vec<String>),
    /// Store unreachable or an uncategorized driver failure.
    #[display(fmt = "{}", message)]
    Database { message: &'static str, source: mongodb::error::Error },
}

impl ApiError {
    pub fn db(message: &'static str, source: mongodb::error::Error) -> Self {
        error!(error = %source, "{message}");
        Self::Database { message, source }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::NotFound(message) => json!({
                "success": false,
                "message": message,
            }),
            ApiError::Validation(errors) => json!({
                "success": false,
                "message": "Validation error",
                "errors": errors,
            }),
            ApiError::Database { message, source } => {
                if *PRODUCTION {
                    json!({ "success": false, "message": message })
                } else {
                    json!({
                        "success": false,
                        "message": message,
                        "error": source.to_string(),
                    })
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Shape bodies actix-web rejects before a handler runs (malformed JSON,
/// wrong content type) into the same validation envelope.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = json!({
        "success": false,
        "message": "Validation error",
        "errors": [err.to_string()],
    });
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(ApiError::NotFound("Team not found").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation(vec!["email is required".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn validation_body_carries_the_field_messages() {
        let err = ApiError::Validation(vec!["email is required".into()]);
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(resp.into_body());
        let body = futures::executor::block_on(body).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Validation error");
        assert_eq!(json["errors"][0], "email is required");
    }

    #[test]
    fn not_found_body_names_the_resource() {
        let resp = ApiError::NotFound("Employee not found").error_response();
        let body = actix_web::body::to_bytes(resp.into_body());
        let body = futures::executor::block_on(body).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Employee not found");
        assert!(json.get("errors").is_none());
    }
}
