//! models/call_model.rs
//! Requests/responses de la orquestación de llamadas y payload de la voice API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CallDispatchError;
use crate::models::customer_model::CallTarget;

/// Body de `POST /call-customer`. Sin `phone` se llama a todos los pendientes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallRequest {
    pub phone: Option<String>,
    pub name: Option<String>,
}

/// Payload que espera la voice API para iniciar una llamada.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPayload {
    pub assistant_id: String,
    pub customer: CallCustomer,
    /// Máximo 40 caracteres (validado al cargar la config).
    pub name: String,
    pub phone_number: ProviderPhoneNumber,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallCustomer {
    pub number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderPhoneNumber {
    #[serde(rename = "twilioAccountSid")]
    pub provider_account_id: String,
    #[serde(rename = "twilioAuthToken")]
    pub provider_auth_token: String,
    #[serde(rename = "twilioPhoneNumber")]
    pub provider_number: String,
}

/// Identificador del outcome: `customerId` si el target salió de un registro,
/// `phone` si vino directo del request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutcomeIdentifier {
    #[serde(rename = "customerId")]
    CustomerId(String),
    #[serde(rename = "phone")]
    Phone(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeDetail {
    Success { call: Value },
    Failed { error: String },
}

/// Resultado de un intento de llamada. Uno por target, en el mismo orden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallOutcome {
    #[serde(flatten)]
    pub identifier: OutcomeIdentifier,
    #[serde(flatten)]
    pub detail: OutcomeDetail,
}

impl CallOutcome {
    pub fn from_result(target: &CallTarget, result: Result<Value, CallDispatchError>) -> Self {
        let identifier = match &target.customer_id {
            Some(id) => OutcomeIdentifier::CustomerId(id.clone()),
            None => OutcomeIdentifier::Phone(target.phone.clone()),
        };
        let detail = match result {
            Ok(call) => OutcomeDetail::Success { call },
            Err(e) => OutcomeDetail::Failed {
                error: e.to_string(),
            },
        };
        CallOutcome { identifier, detail }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.detail, OutcomeDetail::Success { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CallResultsResponse {
    pub results: Vec<CallOutcome>,
}

/// Respuesta de error genérica `{error, details}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}
