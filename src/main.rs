use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::call_orchestrator_service::CallOrchestrator;
use crate::services::record_store_service::{AirtableStore, CustomerStore};
use crate::services::voice_call_service::{CallPlacer, VapiCaller};

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().context("Configuración inválida")?;
    log::debug!("Configuración cargada: {:?}", config);

    let store: Arc<dyn CustomerStore> = Arc::new(AirtableStore::new(config.record_store.clone()));
    let placer: Arc<dyn CallPlacer> = Arc::new(VapiCaller::new(config.voice_api.clone()));
    let orchestrator = CallOrchestrator::new(store.clone(), placer);

    let server = config.server;
    log::info!("Levantando servidor en {}:{}", server.host, server.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::new(orchestrator.clone()))
            .configure(app::init_app)
    })
    .workers(server.workers)
    .bind((server.host.as_str(), server.port))
    .with_context(|| format!("No se pudo enlazar {}:{}", server.host, server.port))?
    .run()
    .await
    .context("El servidor terminó con error")?;

    Ok(())
}
