//! logger.rs
//! Logger de la app (env_logger). `RUST_LOG` manda; sin él, `info` para la app
//! y solo advertencias de los clientes HTTP.

const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

/// Inicializa el logger global. Llamarla de nuevo no hace nada.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);

    let result = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();

    if result.is_err() {
        log::debug!("(init_logger) El logger ya estaba inicializado");
    }
}
