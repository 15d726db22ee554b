//! services/record_store_service.rs
//! Cliente del record store (API REST de Airtable): selección de clientes por fórmula.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::app_config::RecordStoreConfig,
    errors::DataSourceError,
    models::customer_model::{
        CustomerRecord, EligibilityFilter, StoreRecord, FIELD_FEEDBACK, FIELD_NAME, FIELD_PHONE,
    },
};

/// Fuente de clientes. La consulta es todo-o-nada: o vienen todos los registros
/// que cumplen el filtro o un `DataSourceError`.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Registros crudos `{id, fields}` en el orden del store.
    async fn fetch_records(
        &self,
        filter: &EligibilityFilter,
    ) -> Result<Vec<StoreRecord>, DataSourceError>;

    /// Igual que `fetch_records` pero normalizado a `CustomerRecord`.
    async fn fetch_customers(
        &self,
        filter: &EligibilityFilter,
    ) -> Result<Vec<CustomerRecord>, DataSourceError> {
        let records = self.fetch_records(filter).await?;
        Ok(records.into_iter().map(CustomerRecord::from).collect())
    }
}

/// Una página de `GET /v0/{base}/{table}`.
#[derive(Debug, Deserialize)]
struct ListRecordsPage {
    #[serde(default)]
    records: Vec<StoreRecord>,
    offset: Option<String>,
}

#[derive(Clone)]
pub struct AirtableStore {
    http_client: Client,
    config: RecordStoreConfig,
}

impl AirtableStore {
    pub fn new(config: RecordStoreConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_url,
            self.config.base_id,
            urlencoding::encode(&self.config.table)
        )
    }

    async fn fetch_page(
        &self,
        formula: &str,
        offset: Option<&str>,
    ) -> Result<ListRecordsPage, DataSourceError> {
        let mut query = vec![
            ("filterByFormula", formula),
            ("fields[]", FIELD_PHONE),
            ("fields[]", FIELD_NAME),
            ("fields[]", FIELD_FEEDBACK),
        ];
        if let Some(offset) = offset {
            query.push(("offset", offset));
        }

        let resp = self
            .http_client
            .get(self.table_url())
            .bearer_auth(&self.config.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| DataSourceError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DataSourceError::Transport(e.to_string()))?;

        if !status.is_success() {
            log::error!(
                "(fetch_page) El record store respondió status={} body='{}'",
                status,
                body
            );
            return Err(DataSourceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| DataSourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CustomerStore for AirtableStore {
    async fn fetch_records(
        &self,
        filter: &EligibilityFilter,
    ) -> Result<Vec<StoreRecord>, DataSourceError> {
        let formula = filter.formula();
        log::info!("(fetch_records) Consultando tabla '{}'", self.config.table);
        log::debug!("(fetch_records) Fórmula: {}", formula);

        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut seen_offsets = HashSet::new();
        loop {
            let page = self.fetch_page(&formula, offset.as_deref()).await?;
            records.extend(page.records);
            match page.offset {
                // Cursor ya visto: el store no avanza.
                Some(next) if !seen_offsets.insert(next.clone()) => {
                    log::error!("(fetch_records) El record store repitió el offset '{}'", next);
                    return Err(DataSourceError::Decode(format!(
                        "record store repeated pagination offset '{}'",
                        next
                    )));
                }
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        log::info!("(fetch_records) Se obtuvieron {} registros.", records.len());
        Ok(records)
    }
}
