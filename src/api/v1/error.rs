use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if let Some(err) = err.find::<ApiErrorCode>() {
        (err.clone(), err.to_string())
    } else if let Some(InvalidInput(msg)) = err.find::<InvalidInput>() {
        (ApiErrorCode::InvalidInput, msg.clone())
    } else if err.is_not_found() {
        (ApiErrorCode::NotFound, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (ApiErrorCode::InvalidInput, e.to_string())
    } else if err.find::<warp::reject::MissingHeader>().is_some() {
        (ApiErrorCode::InvalidToken, ApiErrorCode::InvalidToken.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (ApiErrorCode::PayloadTooLarge, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (ApiErrorCode::LengthRequired, "Content-Length required".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (ApiErrorCode::UnsupportedMediaType, "Expected application/json".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (ApiErrorCode::MethodNotAllowed, "Method not allowed".to_string())
    } else {
        (
            ApiErrorCode::InternalError,
            format!("Unhandled error: {:?}", err),
        )
    };

    let status = code.status();
    let json = warp::reply::json(&ApiResponse::<()>::err(code, message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
pub enum ApiErrorCode {
    #[error("Invalid input")]
    InvalidInput,
    #[error("Email already registered")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token is not valid")]
    InvalidToken,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Content-Length required")]
    LengthRequired,
    #[error("Unsupported media type")]
    UnsupportedMediaType,
    #[error("Service unavailable")]
    Unavailable,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ApiErrorCode::EmailTaken => StatusCode::CONFLICT,
            ApiErrorCode::UserNotFound | ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidCredentials | ApiErrorCode::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            ApiErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorCode::LengthRequired => StatusCode::LENGTH_REQUIRED,
            ApiErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

/// Carries the validation message through the rejection chain.
#[derive(Debug)]
pub struct InvalidInput(pub String);

impl reject::Reject for InvalidInput {}

pub fn reject_account_error(error: AccountError) -> Rejection {
    match error {
        AccountError::Validation(msg) => reject::custom(InvalidInput(msg)),
        other => reject::custom(ApiErrorCode::from(other)),
    }
}

impl From<AccountError> for ApiErrorCode {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::Validation(_) => ApiErrorCode::InvalidInput,
            AccountError::Conflict => ApiErrorCode::EmailTaken,
            AccountError::NotFound => ApiErrorCode::UserNotFound,
            AccountError::InvalidCredentials => ApiErrorCode::InvalidCredentials,
            AccountError::TokenInvalid | AccountError::TokenExpired => ApiErrorCode::InvalidToken,
            AccountError::Store(e) => ApiErrorCode::internal(e),
            AccountError::Internal(e) => ApiErrorCode::internal(e),
        }
    }
}
