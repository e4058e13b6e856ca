use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use service::components::Tab;

use crate::auth::{ConsoleSession, ConsoleState};
use crate::errors::ConsoleError;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct TabForm {
    pub tab: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rate_per_1k_pkr: String,
    #[serde(default)]
    pub min: String,
    #[serde(default)]
    pub max: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsInput {
    #[serde(default)]
    pub panel_name: String,
    #[serde(default)]
    pub announcement: String,
}

/// Render the active tab, running its mount/refresh fetch first.
pub async fn show(State(state): State<ConsoleState>, session: ConsoleSession) -> Html<String> {
    let mut dashboard = session.dashboard.lock().await;
    dashboard.prepare(state.api.as_ref()).await;
    Html(views::dashboard_page(&dashboard))
}

pub async fn select_tab(session: ConsoleSession, Form(form): Form<TabForm>) -> Result<Redirect, ConsoleError> {
    let tab = form.tab.parse::<Tab>().map_err(ConsoleError::BadRequest)?;
    session.dashboard.lock().await.select(tab);
    Ok(Redirect::to("/dashboard"))
}

pub async fn create_service(
    State(state): State<ConsoleState>,
    session: ConsoleSession,
    Form(input): Form<ServiceInput>,
) -> Redirect {
    let mut dashboard = session.dashboard.lock().await;
    if let Some(form) = dashboard.service_form_mut() {
        form.set_name(input.name);
        form.set_category(input.category);
        form.set_description(input.description);
        form.set_rate(input.rate_per_1k_pkr);
        form.set_min(&input.min);
        form.set_max(&input.max);
        if !input.status.is_empty() {
            form.set_status(input.status);
        }
    }
    dashboard.create_service(state.api.as_ref()).await;
    Redirect::to("/dashboard")
}

pub async fn save_settings(
    State(state): State<ConsoleState>,
    session: ConsoleSession,
    Form(input): Form<SettingsInput>,
) -> Redirect {
    let mut dashboard = session.dashboard.lock().await;
    if let Some(panel) = dashboard.settings_mut() {
        panel.set_panel_name(input.panel_name);
        panel.set_announcement(input.announcement);
    }
    dashboard.save_settings(state.api.as_ref()).await;
    Redirect::to("/dashboard")
}
