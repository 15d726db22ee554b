//! app.rs
use crate::handlers::{call_handler, customer_handler};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/customers",
        web::get().to(customer_handler::list_customers_endpoint),
    )
    .route(
        "/call-customer",
        web::post().to(call_handler::call_customer_endpoint),
    );
}
