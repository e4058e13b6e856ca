use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Name given to the owner account created by the bootstrap step.
pub const BOOTSTRAP_OWNER_NAME: &str = "Owner";

/// Authenticated operator session as returned by `/api/admin/login`.
///
/// Any JSON object from a successful login is a session. Only `name` and
/// `token` are interpreted, both empty when absent; anything else the backend
/// returns is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self { name: name.into(), token: token.into(), extra: Map::new() }
    }
}

/// Body of `POST /api/admin/bootstrap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Body of `POST /api/admin/login`.
///
/// `password_hash` is opaque operator-supplied text and is sent as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password_hash: String,
}

impl LoginRequest {
    /// Bootstrap request carrying the same credentials.
    pub fn to_bootstrap(&self) -> BootstrapRequest {
        BootstrapRequest {
            name: BOOTSTRAP_OWNER_NAME.to_string(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
        }
    }
}
