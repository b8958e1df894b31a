//! Store backends owned by the binary.

pub mod redis_kv;

pub use redis_kv::RedisKv;
