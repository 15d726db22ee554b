//! handlers/customer_handler.rs
//! Listado de clientes para la UI.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    models::{call_model::ErrorResponse, customer_model::EligibilityFilter},
    services::record_store_service::CustomerStore,
};

pub const STORE_ERROR_MESSAGE: &str = "Failed to fetch data from Airtable";

#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    phone: Option<String>,
}

/// GET /customers
/// Sin `phone` devuelve los clientes que aún no dejaron feedback.
pub async fn list_customers_endpoint(
    store: web::Data<dyn CustomerStore>,
    query: web::Query<CustomerQuery>,
) -> HttpResponse {
    let filter = EligibilityFilter::from_phone(query.phone.as_deref());

    match store.fetch_records(&filter).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            log::error!("(list_customers_endpoint) Error consultando clientes: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: STORE_ERROR_MESSAGE.to_string(),
                details: e.to_string(),
            })
        }
    }
}
