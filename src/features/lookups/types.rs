//! Reference data used to classify technicians: specialties (skills) and
//! service regions. Both carry the backend's `valid`/`mensagemErro` pair.

use serde::{Deserialize, Serialize};

/// Status value the backend uses for records offered to users.
pub const STATUS_ACTIVE: &str = "ATIVO";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specialty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "statusEspecialidade",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(default = "default_valid", skip_serializing)]
    pub valid: bool,
    #[serde(rename = "mensagemErro", default, skip_serializing)]
    pub error_message: Option<String>,
}

impl Specialty {
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            status: Some(STATUS_ACTIVE.to_string()),
            valid: true,
            error_message: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "statusRegiao", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default = "default_valid", skip_serializing)]
    pub valid: bool,
    #[serde(rename = "mensagemErro", default, skip_serializing)]
    pub error_message: Option<String>,
}

impl Region {
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: None,
            city: city.into(),
            name: name.into(),
            description,
            status: Some(STATUS_ACTIVE.to_string()),
            valid: true,
            error_message: None,
        }
    }
}

fn default_valid() -> bool {
    true
}

/// Records whose body can carry a backend validation verdict.
pub(super) trait Verdict {
    fn verdict(&self) -> Option<String>;
}

fn verdict(valid: bool, message: Option<&str>, fallback: &str) -> Option<String> {
    if valid {
        return None;
    }
    Some(
        message
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string(),
    )
}

impl Verdict for Specialty {
    fn verdict(&self) -> Option<String> {
        verdict(self.valid, self.error_message.as_deref(), "Specialty was rejected.")
    }
}

impl Verdict for Region {
    fn verdict(&self) -> Option<String> {
        verdict(self.valid, self.error_message.as_deref(), "Region was rejected.")
    }
}
