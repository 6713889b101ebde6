use actix_web::web;
use crate::handlers::sale_handlers;
use crate::models::ApiError;

// Malformed or incomplete bodies answer with the same JSON error shape as the handlers
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::ValidationError(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sales")
            .app_data(json_config())
            .route("", web::post().to(sale_handlers::create_sale))
            .route("", web::get().to(sale_handlers::get_all_sales))
            .route("/{id}", web::get().to(sale_handlers::get_sale))
            .route("/{id}/price", web::get().to(sale_handlers::get_price))
            .route("/{id}/quote", web::post().to(sale_handlers::quote))
            .route("/{id}/buy", web::post().to(sale_handlers::buy))
            .route("/{id}/migration", web::get().to(sale_handlers::get_migration_status))
            .route("/{id}/migrate", web::post().to(sale_handlers::migrate))
    );
}
