//! errors.rs
//! Tipos de error del dominio: fallos del record store, fallos por llamada
//! y errores de configuración.

use thiserror::Error;

/// Falla de la consulta al record store. Aborta toda la petición (HTTP 500).
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("record store unreachable: {0}")]
    Transport(String),

    #[error("record store rejected the query ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid record store response: {0}")]
    Decode(String),
}

/// Falla de una sola llamada. Se guarda en el outcome del target, nunca se propaga.
#[derive(Debug, Error)]
pub enum CallDispatchError {
    #[error("{0}")]
    Transport(String),

    /// El Display es exactamente el cuerpo devuelto por la voice API.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    #[error("invalid call response: {0}")]
    Decode(String),

    #[error("customer has no phone number")]
    MissingPhone,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
