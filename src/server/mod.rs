mod server;
mod services;

pub use server::*;
pub use services::*;
