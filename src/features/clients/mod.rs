pub mod client;
pub mod types;

pub use types::{normalize_cpf, Client, ClientFieldError, ClientPayload};
