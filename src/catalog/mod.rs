mod error;
mod fetch;
mod parsing;

pub use error::CatalogError;
pub use fetch::{fetch_catalog, read_catalog};
pub use parsing::{find_elements, OrbitalElements};
