//! Panel settings editor.

use tracing::{debug, info, warn};

use models::{Session, Settings};

use crate::backend::PanelApi;

/// Local settings draft. Starts from the hardcoded defaults; edits stay local
/// until [`SettingsPanel::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    settings: Settings,
    loaded: bool,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self { settings: Settings::defaults(), loaded: false }
    }
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch once per mount and merge over the defaults. Failures keep the
    /// current values. Returns whether a fetch was issued.
    pub async fn load(&mut self, api: &dyn PanelApi) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;
        match api.fetch_settings().await {
            Ok(fetched) => match Settings::merged_over_defaults(fetched) {
                Ok(merged) => {
                    debug!(panel_name = %merged.panel_name, "settings loaded");
                    self.settings = merged;
                }
                Err(e) => warn!(error = %e, "settings response could not be merged, keeping defaults"),
            },
            Err(e) => warn!(outcome = e.outcome(), error = %e, "settings fetch failed, keeping defaults"),
        }
        true
    }

    pub fn set_panel_name(&mut self, v: impl Into<String>) {
        self.settings.panel_name = v.into();
    }

    pub fn set_announcement(&mut self, v: impl Into<String>) {
        self.settings.announcement = Some(v.into());
    }

    /// Post the whole draft. Local state becomes exactly what the backend
    /// echoes; on failure the draft is left as is.
    pub async fn save(&mut self, api: &dyn PanelApi, session: &Session) -> bool {
        match api.save_settings(session, &self.settings).await {
            Ok(echoed) => {
                info!(event = "settings_saved", panel_name = %echoed.panel_name, "settings saved");
                self.settings = echoed;
                true
            }
            Err(e) => {
                warn!(event = "settings_save_ignored", outcome = e.outcome(), error = %e, "settings save failed");
                false
            }
        }
    }
}
