use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::models::employee::Violation;

#[derive(Debug)]
pub enum AppError {
    Validation(Vec<Violation>),
    BadRequest(String),
    NotFound(String),
    Conflict(String, String),
    DatabaseError(String, String),
}

#[derive(Serialize)]
struct MessageResponse<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
    error: &'a str,
}

#[derive(Serialize)]
struct ValidationResponse<'a> {
    message: &'a str,
    errors: &'a [Violation],
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(violations) => {
                write!(f, "Validation Error: {} violation(s)", violations.len())
            }
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg, detail) => write!(f, "Conflict: {}: {}", msg, detail),
            AppError::DatabaseError(msg, detail) => {
                write!(f, "Database Error: {}: {}", msg, detail)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(..) => StatusCode::CONFLICT,
            AppError::DatabaseError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(violations) => response.json(ValidationResponse {
                message: "Validation Error",
                errors: violations,
            }),
            AppError::BadRequest(detail) => response.json(ErrorResponse {
                message: "Invalid request payload",
                error: detail,
            }),
            AppError::NotFound(msg) => response.json(MessageResponse { message: msg }),
            AppError::Conflict(msg, detail) | AppError::DatabaseError(msg, detail) => {
                response.json(ErrorResponse { message: msg, error: detail })
            }
        }
    }
}
