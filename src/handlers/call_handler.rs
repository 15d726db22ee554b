//! handlers/call_handler.rs
use actix_web::{web, HttpResponse};

use crate::{
    handlers::customer_handler::STORE_ERROR_MESSAGE,
    models::call_model::{CallRequest, CallResultsResponse, ErrorResponse},
    services::call_orchestrator_service::CallOrchestrator,
};

/// Body vacío (o solo espacios) equivale a `{}`: llamada masiva.
fn parse_call_request(body: &[u8]) -> Result<CallRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CallRequest::default());
    }
    serde_json::from_slice(body)
}

/// POST /call-customer
/// Body `{phone?, name?}`. Los fallos por llamada van dentro de `results` con 200;
/// solo un fallo del record store devuelve 500.
pub async fn call_customer_endpoint(
    orchestrator: web::Data<CallOrchestrator>,
    body: web::Bytes,
) -> HttpResponse {
    let req = match parse_call_request(&body) {
        Ok(req) => req,
        Err(e) => {
            log::warn!("(call_customer_endpoint) Body inválido: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid request body".to_string(),
                details: e.to_string(),
            });
        }
    };

    match orchestrator.run(req).await {
        Ok(results) => HttpResponse::Ok().json(CallResultsResponse { results }),
        Err(e) => HttpResponse::InternalServerError().json(ErrorResponse {
            error: STORE_ERROR_MESSAGE.to_string(),
            details: e.to_string(),
        }),
    }
}
