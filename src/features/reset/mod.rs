//! Password reset wizard: request a code, verify it, set a new password.
//!
//! [`flow::ResetFlow`] is the controller; it talks to the backend only through
//! the [`service::ResetService`] trait so the same state machine runs against
//! [`client::HttpResetService`] in production and against fakes in tests.

pub mod client;
pub mod flow;
pub mod service;
pub mod types;
pub mod validate;

pub use client::HttpResetService;
pub use flow::{Phase, Rejection, ResetError, ResetFlow, StepIndicator, StepOutcome};
pub use service::{CodeRequestReceipt, ResetService};
pub use validate::ValidationError;
