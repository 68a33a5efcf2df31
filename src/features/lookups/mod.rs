pub mod regions;
pub mod specialties;
pub mod types;

pub use types::{Region, Specialty, STATUS_ACTIVE};
