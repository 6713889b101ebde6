pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
