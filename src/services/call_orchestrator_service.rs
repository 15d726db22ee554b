//! services/call_orchestrator_service.rs
//! Orquestación de llamadas: selecciona los clientes elegibles y despacha una
//! llamada por target, juntando un outcome por cada uno.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::DataSourceError,
    models::{
        call_model::{CallOutcome, CallRequest},
        customer_model::{CallTarget, EligibilityFilter},
    },
    services::{record_store_service::CustomerStore, voice_call_service::CallPlacer},
};

#[derive(Clone)]
pub struct CallOrchestrator {
    store: Arc<dyn CustomerStore>,
    placer: Arc<dyn CallPlacer>,
}

impl CallOrchestrator {
    pub fn new(store: Arc<dyn CustomerStore>, placer: Arc<dyn CallPlacer>) -> Self {
        Self { store, placer }
    }

    /// Punto de entrada único para llamada individual y masiva.
    ///
    /// Con `phone` se llama una sola vez a ese teléfono (sin mirar feedback),
    /// usando el registro que lo tenga si existe. Sin `phone` se
    /// llama a todos los clientes sin feedback. Si la consulta al store falla
    /// no se hace ninguna llamada.
    pub async fn run(&self, req: CallRequest) -> Result<Vec<CallOutcome>, DataSourceError> {
        let run_id = Uuid::new_v4();
        let filter = EligibilityFilter::from_phone(req.phone.as_deref());
        let mode = match filter {
            EligibilityFilter::FeedbackEmpty => "masiva",
            EligibilityFilter::PhoneEquals(_) => "individual",
        };
        log::info!("(run) Iniciando run_id={} en modo {}", run_id, mode);

        let targets = match self.select_targets(&filter, req.name).await {
            Ok(targets) => targets,
            Err(e) => {
                log::error!("(run) run_id={} falló la consulta al store: {}", run_id, e);
                return Err(e);
            }
        };

        let outcomes = self.dispatch(&targets).await;
        let ok = outcomes.iter().filter(|o| o.is_success()).count();
        log::info!(
            "(run) Finalizado run_id={}: {} llamadas, {} exitosas, {} fallidas",
            run_id,
            outcomes.len(),
            ok,
            outcomes.len() - ok
        );
        Ok(outcomes)
    }

    /// Resuelve el filtro a la lista de targets a llamar.
    ///
    /// Con `PhoneEquals` el resultado es siempre un único target: el primer
    /// registro con ese teléfono, o el número recibido si no hay ninguno.
    pub async fn select_targets(
        &self,
        filter: &EligibilityFilter,
        name: Option<String>,
    ) -> Result<Vec<CallTarget>, DataSourceError> {
        let customers = self.store.fetch_customers(filter).await?;

        let phone = match filter {
            EligibilityFilter::FeedbackEmpty => {
                return Ok(customers.into_iter().map(CallTarget::from).collect());
            }
            EligibilityFilter::PhoneEquals(phone) => phone,
        };

        if customers.len() > 1 {
            log::warn!(
                "(select_targets) {} registros comparten el teléfono buscado; se llamará solo a {}",
                customers.len(),
                customers[0].id
            );
        }
        let target = match customers.into_iter().next() {
            Some(customer) => CallTarget::from(customer),
            None => {
                log::warn!(
                    "(select_targets) Ningún registro con el teléfono buscado; se llamará directo al número recibido"
                );
                CallTarget::direct(phone.clone(), name)
            }
        };
        Ok(vec![target])
    }

    /// Llama secuencialmente a cada target. Un fallo queda en su outcome y no
    /// corta el resto; siempre devuelve un outcome por target, en orden.
    pub async fn dispatch(&self, targets: &[CallTarget]) -> Vec<CallOutcome> {
        let mut outcomes = Vec::with_capacity(targets.len());
        for (idx, target) in targets.iter().enumerate() {
            let customer = target.customer_id.as_deref().unwrap_or("directo");
            log::info!("(dispatch) Llamada {}/{} (cliente={})", idx + 1, targets.len(), customer);
            let result = self.placer.place_call(target).await;
            if let Err(e) = &result {
                log::error!("(dispatch) Falló la llamada {} (cliente={}): {}", idx + 1, customer, e);
            }
            outcomes.push(CallOutcome::from_result(target, result));
        }
        outcomes
    }
}
