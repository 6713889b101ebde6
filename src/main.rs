use std::sync::Arc;
use actix_web::{App, HttpServer, HttpResponse, web};
use actix_cors::Cors;
use log::info;
use dotenv::dotenv;

use token_sale_backend::config::ServerConfig;
use token_sale_backend::routes;
use token_sale_backend::services::{SaleService, SaleStore};
use token_sale_backend::utils::clock::SystemClock;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let config = ServerConfig::load()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.clone()));
    config.log_summary();

    let store = SaleStore::open(&config.data_dir)?;
    let sale_service = web::Data::new(SaleService::new(Arc::new(store), Arc::new(SystemClock)));

    let (host, port) = (config.host.clone(), config.port);
    info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        // Configure CORS middleware
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_headers(vec!["content-type", "content-length", "accept"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(sale_service.clone())
            .configure(routes::configure)
            .route("/health", web::get().to(|| async {
                info!("Health check");
                HttpResponse::Ok().body("OK")
            }))
    })
    .bind(format!("{host}:{port}"))?
    .run()
    .await?;

    info!("Server shutting down");
    Ok(())
}
