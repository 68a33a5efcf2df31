//! Request and response types for login. The request carries the plain
//! password and the response may carry a bearer token, so neither derives
//! `Debug`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub senha: &'a str,
}

impl<'a> LoginRequest<'a> {
    #[must_use]
    pub fn new(email: &'a str, password: &'a SecretString) -> Self {
        Self {
            email,
            senha: password.expose_secret(),
        }
    }
}

impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("senha", &"***")
            .finish()
    }
}

/// Login answer. Deployments differ: some return the token DTO
/// (`id`, `tipo`, `token`, `nome`), others the user record itself, where the
/// account kind is `nivelAcesso` and no token is issued.
#[derive(Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "tipo", alias = "nivelAcesso", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("name", &self.name)
            .field("email", &self.email)
            .finish()
    }
}

/// Authenticated user as kept in memory.
pub struct Session {
    pub user_id: Option<i64>,
    pub email: String,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub token: Option<SecretString>,
}

impl Session {
    /// Builds a session from a login answer; `email` is what the user typed
    /// and is used when the backend does not echo one.
    #[must_use]
    pub fn from_login(email: &str, response: LoginResponse) -> Self {
        Self {
            user_id: response.id,
            email: response.email.unwrap_or_else(|| email.to_string()),
            name: response.name,
            kind: response.kind,
            token: response
                .token
                .filter(|token| !token.trim().is_empty())
                .map(SecretString::from),
        }
    }

    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            user_id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            kind: self.kind.clone(),
            token: self
                .token
                .as_ref()
                .map(|token| SecretString::from(token.expose_secret().to_string())),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}
