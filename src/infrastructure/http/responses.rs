//! HTTP responses module
//!
//! Turns rejections into JSON error bodies so no request ends in an untyped
//! error page.

use crate::shared::error::AppError;
use serde_json::{json, Value};
use std::convert::Infallible;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// JSON body with status code
    pub fn json_with_status(body: &Value, status: StatusCode) -> warp::reply::Response {
        warp::reply::with_status(warp::reply::json(body), status).into_response()
    }

    /// Format an application error
    pub fn from_app_error(error: &AppError) -> warp::reply::Response {
        Self::json_with_status(&error.to_response_body(), error.http_status_code())
    }
}

/// Final rejection handler for the whole route tree
pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(app_error) = rejection.find::<AppError>() {
        match app_error {
            AppError::Config(_) | AppError::Internal(_) => {
                error!(error = %app_error, "Request failed")
            }
            _ => warn!(error = %app_error, "Request rejected"),
        }
        return Ok(ResponseFormatter::from_app_error(app_error));
    }

    let (status, detail) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else if let Some(invalid) = rejection.find::<warp::reject::InvalidHeader>() {
        (StatusCode::BAD_REQUEST, invalid.to_string())
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large".to_string())
    } else {
        error!(rejection = ?rejection, "Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(ResponseFormatter::json_with_status(&json!({ "detail": detail }), status))
}
