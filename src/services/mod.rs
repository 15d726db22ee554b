//! services/mod.rs
//! Módulo que agrupa los "servicios" o capas de negocio de la app.

pub mod call_orchestrator_service;
pub mod record_store_service;
pub mod voice_call_service;
