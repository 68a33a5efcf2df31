//! Login and session handling.

pub mod client;
pub mod state;
pub mod store;
pub mod types;

pub use state::{AuthContext, AuthError};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};
pub use types::{LoginRequest, LoginResponse, Session};
