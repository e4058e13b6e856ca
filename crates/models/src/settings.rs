use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::lenient;

/// Panel-wide configuration.
///
/// Unknown backend fields are preserved in `extra` so a save sends back the
/// full object it was given. Known fields decode leniently; a field the
/// backend leaves out of a reply is empty, not the hardcoded default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "lenient::string")]
    pub panel_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub currency: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub announcement: Option<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub payment_methods: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Hardcoded values shown before (or instead of) the backend's.
    pub fn defaults() -> Self {
        Self {
            panel_name: "SMM Panel (PK)".to_string(),
            currency: "PKR".to_string(),
            announcement: Some(String::new()),
            payment_methods: vec!["JazzCash".to_string(), "EasyPaisa".to_string()],
            extra: Map::new(),
        }
    }

    /// Overlay a fetched settings object on top of the defaults, field by field.
    /// Keys absent from `fetched` keep their default value.
    pub fn merged_over_defaults(fetched: Map<String, Value>) -> Result<Self, ModelError> {
        let mut base = match serde_json::to_value(Self::defaults()) {
            Ok(Value::Object(m)) => m,
            Ok(_) => return Err(ModelError::Decode("defaults are not an object".into())),
            Err(e) => return Err(ModelError::Decode(e.to_string())),
        };
        base.extend(fetched);
        serde_json::from_value(Value::Object(base)).map_err(|e| ModelError::Decode(e.to_string()))
    }

    pub fn announcement_text(&self) -> &str {
        self.announcement.as_deref().unwrap_or_default()
    }
}
