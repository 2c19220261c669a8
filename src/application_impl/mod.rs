mod credential_hasher_argon2;
mod token_manager_jwt;
mod user_service_fake;
mod user_service_impl;

pub use credential_hasher_argon2::*;
pub use token_manager_jwt::*;
pub use user_service_fake::*;
pub use user_service_impl::*;
