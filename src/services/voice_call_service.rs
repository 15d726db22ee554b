//! services/voice_call_service.rs
//! Cliente de la voice API (Vapi): inicia una llamada saliente por target.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::app_config::VoiceApiConfig,
    errors::CallDispatchError,
    models::{
        call_model::{CallCustomer, CallPayload, ProviderPhoneNumber},
        customer_model::CallTarget,
    },
};

/// Coloca una llamada. Cada `Ok` significa una llamada real al cliente
/// (no es idempotente: volver a invocar vuelve a marcar).
#[async_trait]
pub trait CallPlacer: Send + Sync {
    async fn place_call(&self, target: &CallTarget) -> Result<Value, CallDispatchError>;
}

#[derive(Clone)]
pub struct VapiCaller {
    http_client: Client,
    config: VoiceApiConfig,
}

impl VapiCaller {
    pub fn new(config: VoiceApiConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    pub fn build_payload(&self, target: &CallTarget) -> CallPayload {
        let telephony = &self.config.telephony;
        CallPayload {
            assistant_id: self.config.assistant_id.clone(),
            customer: CallCustomer {
                number: target.phone.clone(),
            },
            name: self.config.display_name.clone(),
            phone_number: ProviderPhoneNumber {
                provider_account_id: telephony.account_sid.clone(),
                provider_auth_token: telephony.auth_token.clone(),
                provider_number: telephony.phone_number.clone(),
            },
        }
    }
}

#[async_trait]
impl CallPlacer for VapiCaller {
    async fn place_call(&self, target: &CallTarget) -> Result<Value, CallDispatchError> {
        if target.phone.trim().is_empty() {
            return Err(CallDispatchError::MissingPhone);
        }

        let url = format!("{}/call", self.config.api_url);
        let payload = self.build_payload(target);

        let resp = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CallDispatchError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CallDispatchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(CallDispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| CallDispatchError::Decode(e.to_string()))
    }
}
