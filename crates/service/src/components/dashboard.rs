//! Root controller for an authenticated operator.
//!
//! Holds the session, the active tab, and the refresh counter that drives the
//! services table. Switching tabs drops the previous view's state and mounts
//! the new view fresh.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use models::Session;

use super::service_form::{ServiceForm, SubmitOutcome};
use super::services_table::ServicesTable;
use super::settings_panel::SettingsPanel;
use crate::backend::PanelApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Services,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Services, Tab::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Services => "services",
            Tab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Services => "Services",
            Tab::Settings => "Settings",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "services" => Ok(Tab::Services),
            "settings" => Ok(Tab::Settings),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

/// Services tab: creation form above the catalog table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicesView {
    pub form: ServiceForm,
    pub table: ServicesTable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveView {
    Services(ServicesView),
    Settings(SettingsPanel),
}

impl ActiveView {
    fn mount(tab: Tab) -> Self {
        match tab {
            Tab::Services => ActiveView::Services(ServicesView::default()),
            Tab::Settings => ActiveView::Settings(SettingsPanel::new()),
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            ActiveView::Services(_) => Tab::Services,
            ActiveView::Settings(_) => Tab::Settings,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    session: Session,
    view: ActiveView,
    refresh: u64,
}

impl Dashboard {
    pub fn new(session: Session) -> Self {
        Self { session, view: ActiveView::mount(Tab::Services), refresh: 0 }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn title(&self) -> String {
        format!("{}'s Admin • PKR", self.session.name)
    }

    pub fn tab(&self) -> Tab {
        self.view.tab()
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn refresh(&self) -> u64 {
        self.refresh
    }

    /// Select a tab. Re-selecting the active tab keeps its state.
    pub fn select(&mut self, tab: Tab) -> bool {
        if self.view.tab() == tab {
            return false;
        }
        debug!(from = %self.view.tab(), to = %tab, "switching tab");
        self.view = ActiveView::mount(tab);
        true
    }

    pub fn service_form_mut(&mut self) -> Option<&mut ServiceForm> {
        match &mut self.view {
            ActiveView::Services(v) => Some(&mut v.form),
            ActiveView::Settings(_) => None,
        }
    }

    pub fn settings_mut(&mut self) -> Option<&mut SettingsPanel> {
        match &mut self.view {
            ActiveView::Settings(p) => Some(p),
            ActiveView::Services(_) => None,
        }
    }

    /// Submit the service form; a successful creation bumps the refresh
    /// counter exactly once.
    pub async fn create_service(&mut self, api: &dyn PanelApi) -> SubmitOutcome {
        let ActiveView::Services(view) = &mut self.view else {
            warn!("service submitted while the services tab is not active");
            return SubmitOutcome::Ignored;
        };
        let outcome = view.form.submit(api, &self.session).await;
        if outcome == SubmitOutcome::Created {
            self.refresh += 1;
        }
        outcome
    }

    /// Save the settings draft, if the settings tab is active.
    pub async fn save_settings(&mut self, api: &dyn PanelApi) -> bool {
        let ActiveView::Settings(panel) = &mut self.view else {
            warn!("settings saved while the settings tab is not active");
            return false;
        };
        panel.save(api, &self.session).await
    }

    /// Run the active view's mount/refresh fetch before rendering.
    pub async fn prepare(&mut self, api: &dyn PanelApi) {
        match &mut self.view {
            ActiveView::Services(v) => {
                v.table.sync(api, self.refresh).await;
            }
            ActiveView::Settings(p) => {
                p.load(api).await;
            }
        }
    }
}
