mod api;
mod config;
mod database;
mod middleware;
mod models;
mod utils;

use std::sync::Arc;

use actix_web::{middleware::Compress, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::{MongoDB, MongoUserStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Users Service...");
    log::info!("📊 Database: {} ({})", config.mongodb_uri, config.database);

    let db = MongoDB::new(&config.mongodb_uri, &config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(db.clone()));

    // Sem REQUIRE_DATABASE o servidor sobe mesmo sem MongoDB
    database::check_store(store.as_ref(), config.require_database).await?;

    let store_data = web::Data::from(store);

    let (host, port) = config.bind_address();

    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(Compress::default())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind((host.as_str(), port))?;

    log::info!("🌐 Server running at http://{}:{}", host, port);

    server.run().await?;

    db.shutdown().await;
    Ok(())
}
