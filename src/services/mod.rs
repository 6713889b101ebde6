mod sale_store;
pub mod sale_service;

pub use sale_store::{SaleStore, SaleHandle};
pub use sale_service::SaleService;
