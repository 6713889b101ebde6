pub mod sale_handlers;

pub use sale_handlers::*;
