use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

/// Service availability. The backend may return values beyond the two the
/// console offers; those are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    #[default]
    Active,
    Paused,
    Other(String),
}

impl ServiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Paused => "paused",
            ServiceStatus::Other(s) => s,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ServiceStatus::Active)
    }
}

impl From<String> for ServiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => ServiceStatus::Active,
            "paused" => ServiceStatus::Paused,
            _ => ServiceStatus::Other(value),
        }
    }
}

impl From<&str> for ServiceStatus {
    fn from(value: &str) -> Self {
        ServiceStatus::from(value.to_string())
    }
}

impl From<ServiceStatus> for String {
    fn from(value: ServiceStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lenient_status<'de, D>(d: D) -> Result<ServiceStatus, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::string(d).map(ServiceStatus::from)
}

/// A sellable catalog entry, priced per 1000 units in PKR.
///
/// Rows are decoded leniently: a missing, `null` or off-type field becomes
/// its zero value instead of failing the whole list. `min <= max` is not
/// checked here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::number")]
    pub rate_per_1k_pkr: f64,
    #[serde(deserialize_with = "lenient::number", serialize_with = "lenient::serialize_quantity")]
    pub min: f64,
    #[serde(deserialize_with = "lenient::number", serialize_with = "lenient::serialize_quantity")]
    pub max: f64,
    #[serde(deserialize_with = "lenient_status")]
    pub status: ServiceStatus,
}
