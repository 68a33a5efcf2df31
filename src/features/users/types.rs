//! User records as the backend serializes them. The password is write-only:
//! it appears in `UserPayload` for create/update and never in `User`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "nivelAcesso", default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
    #[serde(rename = "dataCadastro", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(rename = "statusUsuario", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body for creating or replacing a user.
pub struct UserPayload {
    pub name: String,
    pub email: String,
    /// Required on create; `None` on update keeps the stored password.
    pub password: Option<SecretString>,
    pub access_level: Option<String>,
}

#[derive(Serialize)]
struct UserPayloadWire<'a> {
    nome: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    senha: Option<&'a str>,
    #[serde(rename = "nivelAcesso", skip_serializing_if = "Option::is_none")]
    access_level: Option<&'a str>,
}

impl Serialize for UserPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        UserPayloadWire {
            nome: &self.name,
            email: &self.email,
            senha: self.password.as_ref().map(|password| password.expose_secret()),
            access_level: self.access_level.as_deref(),
        }
        .serialize(serializer)
    }
}

impl std::fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("access_level", &self.access_level)
            .finish()
    }
}
