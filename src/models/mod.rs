pub mod error;
pub mod sale;

pub use error::*;
pub use sale::*;
