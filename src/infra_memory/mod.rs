mod user_repo_memory;

pub use user_repo_memory::*;
