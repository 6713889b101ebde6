mod sale_routes;

pub use sale_routes::configure as configure_sale_routes;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    configure_sale_routes(cfg);
}
