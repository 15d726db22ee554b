//! handlers/mod.rs
pub mod call_handler;
pub mod customer_handler;
