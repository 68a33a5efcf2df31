//! Feature modules, one per backend area. Wire types live in `types.rs`;
//! endpoint wrappers sit next to them.

pub mod auth;
pub mod clients;
pub mod lookups;
pub mod reset;
pub mod users;
