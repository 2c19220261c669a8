mod account;
mod user_service;

pub use account::*;
pub use user_service::*;
