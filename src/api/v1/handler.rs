use super::error::*;
use crate::application_port::UserService;
use crate::domain_model::{InputUser, SignInInput, UserId};
use crate::logger::*;
use crate::server::Services;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct MeResponse {
    user_id: UserId,
}

pub async fn signup(
    request: SignUpRequest,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = InputUser {
        name: request.name,
        email: request.email,
        password: request.password,
    };

    let out = user_service
        .sign_up(input)
        .await
        .map_err(reject_account_error)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::ok(out)),
        StatusCode::CREATED,
    ))
}

pub async fn signin(
    request: SignInRequest,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = SignInInput {
        email: request.email,
        password: request.password,
    };

    let out = user_service
        .sign_in(input)
        .await
        .map_err(reject_account_error)?;

    Ok(warp::reply::json(&ApiResponse::ok(out)))
}

pub async fn me(user_id: UserId) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&ApiResponse::ok(MeResponse { user_id })))
}

pub async fn health(services: Arc<Services>) -> Result<impl warp::Reply, warp::Rejection> {
    let probes = services.health().await;
    let failed: Vec<&str> = probes.iter().filter(|p| !p.ok).map(|p| p.name).collect();

    if failed.is_empty() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&ApiResponse::ok(probes)),
            StatusCode::OK,
        ));
    }

    for p in probes.iter().filter(|p| !p.ok) {
        warn!(probe = p.name, error = ?p.error, "health probe failed");
    }
    let message = format!("unhealthy: {}", failed.join(", "));
    let code = ApiErrorCode::Unavailable;
    let status = code.status();
    let response = ApiResponse {
        success: false,
        data: Some(probes),
        error: Some(ApiError { code, message }),
    };
    Ok(warp::reply::with_status(warp::reply::json(&response), status))
}
