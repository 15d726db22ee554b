//! tests/mod.rs
//! Pruebas de la app: modelos, config, orquestación, endpoints y clientes HTTP.

mod config_tests;
mod handler_tests;
