//! config/app_config.rs
//! Configuración de la app leída de variables de entorno (o de `.env` vía dotenv).
//! Todas las credenciales e identificadores fijos del payload de llamada viven aquí.

use std::fmt;

use crate::errors::ConfigError;

pub const MAX_DISPLAY_NAME_LEN: usize = 40;

const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
const DEFAULT_AIRTABLE_TABLE: &str = "Customer";
const DEFAULT_VAPI_API_URL: &str = "https://api.vapi.ai";
const DEFAULT_DISPLAY_NAME: &str = "Dental Feedback";

/// Acceso al record store (Airtable).
#[derive(Clone)]
pub struct RecordStoreConfig {
    pub api_url: String,
    pub api_key: String,
    pub base_id: String,
    pub table: String,
}

/// Cuenta del proveedor de telefonía que la voice API usa para marcar.
#[derive(Clone)]
pub struct TelephonyConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
}

/// Acceso a la voice API (Vapi) y datos fijos del payload.
#[derive(Clone)]
pub struct VoiceApiConfig {
    pub api_url: String,
    pub api_key: String,
    pub assistant_id: String,
    pub display_name: String,
    pub telephony: TelephonyConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub record_store: RecordStoreConfig,
    pub voice_api: VoiceApiConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda
    /// (en tests se le pasa un HashMap en vez del entorno real).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let record_store = RecordStoreConfig {
            api_url: trim_url(get("AIRTABLE_API_URL").unwrap_or_else(|| DEFAULT_AIRTABLE_API_URL.to_string())),
            api_key: required("AIRTABLE_API_KEY")?,
            base_id: required("AIRTABLE_BASE_ID")?,
            table: get("AIRTABLE_TABLE").unwrap_or_else(|| DEFAULT_AIRTABLE_TABLE.to_string()),
        };

        let display_name = get("CALL_DISPLAY_NAME").unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
        if display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(ConfigError::Invalid {
                var: "CALL_DISPLAY_NAME",
                reason: format!("must be at most {} characters", MAX_DISPLAY_NAME_LEN),
            });
        }

        let voice_api = VoiceApiConfig {
            api_url: trim_url(get("VAPI_API_URL").unwrap_or_else(|| DEFAULT_VAPI_API_URL.to_string())),
            api_key: required("VAPI_API_KEY")?,
            assistant_id: required("VAPI_ASSISTANT_ID")?,
            display_name,
            telephony: TelephonyConfig {
                account_sid: required("TWILIO_ACCOUNT_SID")?,
                auth_token: required("TWILIO_AUTH_TOKEN")?,
                phone_number: required("TWILIO_PHONE_NUMBER")?,
            },
        };

        let server = ServerConfig {
            host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("SERVER_PORT", get("SERVER_PORT"), 5022)?,
            workers: parse_or("SERVER_WORKERS", get("SERVER_WORKERS"), 1)?,
        };

        Ok(AppConfig {
            record_store,
            voice_api,
            server,
        })
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

// Debug manual: nunca imprimir secretos en logs.
impl fmt::Debug for RecordStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStoreConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .finish()
    }
}

impl fmt::Debug for TelephonyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelephonyConfig")
            .field("account_sid", &"***")
            .field("auth_token", &"***")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

impl fmt::Debug for VoiceApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceApiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .field("assistant_id", &self.assistant_id)
            .field("display_name", &self.display_name)
            .field("telephony", &self.telephony)
            .finish()
    }
}
