pub mod memory_dashmap;
pub mod redis_deadpool;
