//! # resetflow
//!
//! Client for the technician services backend. The centerpiece is the
//! password-reset wizard in [`features::reset`]; the remaining feature modules
//! are thin wrappers around the backend's login, user, client, specialty and
//! region endpoints.
//!
//! ## Password reset
//!
//! 1. **Request code:** the user submits an email and the backend sends a
//!    6-digit code out of band.
//! 2. **Verify code:** the code is checked against the backend; only a
//!    positive answer unlocks the last step.
//! 3. **Set password:** the new password (and its confirmation) is sent along
//!    with the verified code.
//!
//! The code generated by the backend is never read back into the client, even
//! when the backend includes it in its response.
//!
//! ## Sessions
//!
//! Login state lives in an explicitly constructed
//! [`features::auth::AuthContext`], hydrated from a session file at startup
//! and cleared on logout. Tokens are opaque and wrapped in `SecretString`.

pub mod api;
pub mod cli;
pub mod features;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
