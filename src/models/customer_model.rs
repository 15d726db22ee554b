//! models/customer_model.rs
//! Registros de clientes del record store y su proyección a targets de llamada.

use serde::{Deserialize, Serialize};

/// Nombre que se usa cuando el registro no trae `Name`.
pub const UNNAMED_CUSTOMER: &str = "Unnamed Customer";

pub const FIELD_PHONE: &str = "PhoneNumber";
pub const FIELD_NAME: &str = "Name";
pub const FIELD_FEEDBACK: &str = "Feedback";

/// Campos tal cual los devuelve el record store (Airtable omite los vacíos).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    #[serde(rename = "PhoneNumber", default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Feedback", default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Registro crudo `{id, fields}`; es lo que expone `GET /customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: String,
    #[serde(default)]
    pub fields: CustomerFields,
}

/// Cliente normalizado. Inmutable dentro de una petición.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub feedback: String,
}

impl From<StoreRecord> for CustomerRecord {
    fn from(record: StoreRecord) -> Self {
        let CustomerFields {
            phone_number,
            name,
            feedback,
        } = record.fields;
        CustomerRecord {
            id: record.id,
            phone: phone_number.unwrap_or_default(),
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_CUSTOMER.to_string()),
            feedback: feedback.unwrap_or_default(),
        }
    }
}

/// Lo mínimo para poder marcar a un cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    pub phone: String,
    pub name: String,
    /// ID del registro de origen; `None` si el target vino directo del request.
    pub customer_id: Option<String>,
}

impl CallTarget {
    /// Target armado con los datos del request, sin registro asociado.
    pub fn direct(phone: impl Into<String>, name: Option<String>) -> Self {
        CallTarget {
            phone: phone.into(),
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_CUSTOMER.to_string()),
            customer_id: None,
        }
    }
}

impl From<CustomerRecord> for CallTarget {
    fn from(record: CustomerRecord) -> Self {
        CallTarget {
            phone: record.phone,
            name: record.name,
            customer_id: Some(record.id),
        }
    }
}

/// Predicado de selección de clientes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityFilter {
    /// Clientes que aún no dejaron feedback.
    FeedbackEmpty,
    /// Clientes cuyo teléfono es exactamente este.
    PhoneEquals(String),
}

impl EligibilityFilter {
    /// Un teléfono ausente o en blanco selecciona el filtro de feedback vacío.
    pub fn from_phone(phone: Option<&str>) -> Self {
        match phone.map(str::trim) {
            Some(p) if !p.is_empty() => EligibilityFilter::PhoneEquals(p.to_string()),
            _ => EligibilityFilter::FeedbackEmpty,
        }
    }

    /// Fórmula `filterByFormula` del record store.
    pub fn formula(&self) -> String {
        match self {
            EligibilityFilter::FeedbackEmpty => format!("{{{}}} = \"\"", FIELD_FEEDBACK),
            EligibilityFilter::PhoneEquals(phone) => {
                format!("{{{}}} = \"{}\"", FIELD_PHONE, escape_formula_literal(phone))
            }
        }
    }
}

fn escape_formula_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
