mod health_probe_redis;

pub use health_probe_redis::*;
