pub mod balance_store_redis;
pub mod keys;
