pub mod balance_store;
