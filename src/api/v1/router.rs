use super::error::*;
use super::handler;
use crate::application_port::UserService;
use crate::domain_model::UserId;
use crate::server::Services;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn routes(
    services: Arc<Services>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let signup = warp::path("signup")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(services.user.clone()))
        .and_then(handler::signup);

    let signin = warp::path("signin")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(services.user.clone()))
        .and_then(handler::signin);

    let me = warp::path("me")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_verification(services.user.clone()))
        .and_then(handler::me);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with(services))
        .and_then(handler::health);

    signup.or(signin).or(me).or(health)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_verification(
    user_service: Arc<dyn UserService>,
) -> impl Filter<Extract = (UserId,), Error = warp::Rejection> + Clone {
    warp::header::<String>(http::header::AUTHORIZATION.as_str()).and_then(move |token: String| {
        let user_service = user_service.clone();
        async move {
            if let Some(token) = token.strip_prefix("Bearer ") {
                let user_id = user_service
                    .verify_token(token.trim())
                    .await
                    .map_err(ApiErrorCode::from)
                    .map_err(reject::custom)?;
                Ok(user_id)
            } else {
                Err(reject::custom(ApiErrorCode::InvalidToken))
            }
        }
    })
}
