//! The password reset wizard as a state machine.
//!
//! `ResetFlow` owns exactly one `ResetSession` and moves it forward through
//! `RequestCode -> VerifyCode -> SetPassword -> Complete`. A phase only advances
//! after its own service call reports success; validation failures, refusals and
//! transport errors leave the phase untouched and are kept as `last_error` for the
//! UI. While a call is in flight the flow is busy and further submissions are
//! ignored. Every call is bounded by the configured timeout.

use super::{
    service::ResetService,
    validate::{CodeForm, EmailForm, PasswordForm, ValidationError},
};
use crate::api::{ApiError, DEFAULT_TIMEOUT};
use secrecy::SecretString;
use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    #[default]
    RequestCode,
    VerifyCode,
    SetPassword,
    Complete,
}

impl Phase {
    /// 1-based position in the wizard; `Complete` sits past the last step.
    #[must_use]
    pub const fn step(self) -> u8 {
        match self {
            Self::RequestCode => 1,
            Self::VerifyCode => 2,
            Self::SetPassword => 3,
            Self::Complete => 4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RequestCode => "Email",
            Self::VerifyCode => "Code",
            Self::SetPassword => "New password",
            Self::Complete => "Done",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::RequestCode => Self::VerifyCode,
            Self::VerifyCode => Self::SetPassword,
            Self::SetPassword | Self::Complete => Self::Complete,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a submission did to the flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The service confirmed the step; the flow is now in this phase.
    Advanced(Phase),
    /// Another submission was already in flight; nothing was sent.
    Ignored,
    /// The flow was reset while the call was in flight; its result was dropped.
    Abandoned,
}

/// Explicit refusals by the backend, one per phase.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("reset code request was not accepted")]
    CodeRequest,
    #[error("invalid or expired")]
    Code,
    #[error("password reset failed, try again")]
    Reset,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ApiError),
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("{attempted} is not available while the flow is at {actual}")]
    OutOfPhase { attempted: Phase, actual: Phase },
}

/// One entry of the step-progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: u8,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Default)]
struct ResetSession {
    email: String,
    verification_token: Option<SecretString>,
    phase: Phase,
}

#[derive(Default)]
struct FlowState {
    session: ResetSession,
    busy: bool,
    last_error: Option<String>,
    // bumped on every reset so late results from an abandoned attempt are dropped
    attempt: u64,
}

/// Clears the busy flag when a submission ends, including when its future is dropped.
struct BusyGuard<'a> {
    state: &'a Mutex<FlowState>,
    attempt: u64,
    armed: bool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.attempt == self.attempt {
            state.busy = false;
        }
    }
}

/// Data captured from the session when a submission starts.
struct Ticket<'a> {
    guard: BusyGuard<'a>,
    email: String,
    token: Option<SecretString>,
}

pub struct ResetFlow<S> {
    service: S,
    timeout: Duration,
    state: Mutex<FlowState>,
}

impl<S: ResetService> ResetFlow<S> {
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            service,
            timeout: DEFAULT_TIMEOUT,
            state: Mutex::new(FlowState::default()),
        }
    }

    /// Bounds every service call; a zero duration falls back to the default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().session.phase
    }

    /// Email the flow is bound to, once a code has been requested.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        let state = self.lock();
        if state.session.phase == Phase::RequestCode {
            None
        } else {
            Some(state.session.email.clone())
        }
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::Complete
    }

    #[must_use]
    pub fn has_verification_token(&self) -> bool {
        self.lock().session.verification_token.is_some()
    }

    /// Step-progress indicator: a step is active once the flow has reached it.
    #[must_use]
    pub fn progress(&self) -> [StepIndicator; 3] {
        let current = self.phase().step();
        [Phase::RequestCode, Phase::VerifyCode, Phase::SetPassword].map(|phase| StepIndicator {
            step: phase.step(),
            label: phase.label(),
            active: phase.step() <= current,
        })
    }

    /// Discards the session and starts over at `RequestCode`.
    /// A call still in flight for the old session will have its result dropped.
    pub fn reset(&self) {
        let mut state = self.lock();
        let attempt = state.attempt.wrapping_add(1);
        *state = FlowState {
            attempt,
            ..FlowState::default()
        };
        debug!("reset flow restarted");
    }

    /// Phase 1: ask the backend to send a code to `email`.
    ///
    /// # Errors
    /// `Validation` for a blank or malformed email, `Service` on transport failure or
    /// timeout, `Rejected` if the backend refuses, `OutOfPhase` outside `RequestCode`.
    pub async fn request_code(&self, email: &str) -> Result<StepOutcome, ResetError> {
        let form = EmailForm::new(email);
        let Some((ticket, email)) = self.begin(Phase::RequestCode, || form.validate())? else {
            return Ok(StepOutcome::Ignored);
        };

        let result = self
            .bounded(self.service.generate_reset_code(&email))
            .await
            .and_then(|receipt| {
                if receipt.accepted {
                    Ok(())
                } else {
                    Err(Rejection::CodeRequest.into())
                }
            });

        self.finish(ticket, result, |session| {
            session.email = email;
        })
    }

    /// Phase 2: check the code the user received.
    ///
    /// # Errors
    /// `Validation` unless the sanitized code is six digits, `Service` on transport
    /// failure or timeout, `Rejected` ("invalid or expired") if the backend says no,
    /// `OutOfPhase` outside `VerifyCode`.
    pub async fn verify_code(&self, code: &str) -> Result<StepOutcome, ResetError> {
        let form = CodeForm::new(code);
        let Some((ticket, code)) = self.begin(Phase::VerifyCode, || form.validate())? else {
            return Ok(StepOutcome::Ignored);
        };

        let result = self
            .bounded(self.service.verify_reset_code(&ticket.email, &code))
            .await
            .and_then(|verified| {
                if verified {
                    Ok(())
                } else {
                    Err(Rejection::Code.into())
                }
            });

        self.finish(ticket, result, |session| {
            session.verification_token = Some(SecretString::from(code));
        })
    }

    /// Phase 3: set the new password using the verified code.
    ///
    /// # Errors
    /// `Validation` for a short or mismatched password, `Service` on transport failure
    /// or timeout, `Rejected` if the backend refuses, `OutOfPhase` outside `SetPassword`.
    pub async fn set_new_password(
        &self,
        password: SecretString,
        confirmation: SecretString,
    ) -> Result<StepOutcome, ResetError> {
        let form = PasswordForm::new(password, confirmation);
        let Some((ticket, ())) = self.begin(Phase::SetPassword, || form.validate())? else {
            return Ok(StepOutcome::Ignored);
        };

        let result = match &ticket.token {
            Some(token) => self
                .bounded(
                    self.service
                        .reset_password(&ticket.email, token, &form.password),
                )
                .await
                .and_then(|done| {
                    if done {
                        Ok(())
                    } else {
                        Err(Rejection::Reset.into())
                    }
                }),
            // SetPassword is only reachable after a verified code
            None => Err(Rejection::Code.into()),
        };

        self.finish(ticket, result, |session| {
            session.verification_token = None;
        })
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Gatekeeper for a submission: busy check, phase check, then validation.
    /// Returns `None` when another submission is in flight.
    fn begin<T>(
        &self,
        expected: Phase,
        validate: impl FnOnce() -> Result<T, ValidationError>,
    ) -> Result<Option<(Ticket<'_>, T)>, ResetError> {
        let mut state = self.lock();

        if state.busy {
            debug!(phase = %expected, "submission ignored, request in flight");
            return Ok(None);
        }

        if state.session.phase != expected {
            return Err(ResetError::OutOfPhase {
                attempted: expected,
                actual: state.session.phase,
            });
        }

        let value = match validate() {
            Ok(value) => value,
            Err(err) => {
                state.last_error = Some(err.to_string());
                return Err(err.into());
            }
        };

        state.busy = true;
        state.last_error = None;

        let ticket = Ticket {
            guard: BusyGuard {
                state: &self.state,
                attempt: state.attempt,
                armed: true,
            },
            email: state.session.email.clone(),
            token: state.session.verification_token.clone(),
        };

        Ok(Some((ticket, value)))
    }

    /// Applies a finished call: advance on success, record the error otherwise.
    fn finish(
        &self,
        mut ticket: Ticket<'_>,
        result: Result<(), ResetError>,
        on_success: impl FnOnce(&mut ResetSession),
    ) -> Result<StepOutcome, ResetError> {
        // busy is settled below under the same lock
        ticket.guard.armed = false;
        let mut state = self.lock();

        if state.attempt != ticket.guard.attempt {
            debug!("dropping result of an abandoned reset attempt");
            return Ok(StepOutcome::Abandoned);
        }

        state.busy = false;

        match result {
            Ok(()) => {
                on_success(&mut state.session);
                let next = state.session.phase.next();
                state.session.phase = next;
                info!(phase = %next, "reset flow advanced");
                Ok(StepOutcome::Advanced(next))
            }
            Err(err) => {
                warn!(phase = %state.session.phase, error = %err, "reset step failed");
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ResetError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(ResetError::from),
            Err(_) => Err(ApiError::Timeout(format!(
                "Request timed out after {:?}.",
                self.timeout
            ))
            .into()),
        }
    }
}
