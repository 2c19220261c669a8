mod health_probe;
mod user_repo;

pub use health_probe::*;
pub use user_repo::*;
