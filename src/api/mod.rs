pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::{error, web, HttpResponse};

use crate::utils::StoreError;

/// Parsing de JSON para todas as rotas: corpo inválido vira 400 com detalhe
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = StoreError::Validation(err.to_string()).body();
        log::warn!("⚠️ Rejected JSON body: {}", body.message);
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Registra parsing de JSON, rotas de usuários, health e metrics
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics));
    users::configure(cfg);
}
