//! Panel backend API.
//!
//! `PanelApi` is the seam between the view components and the network; the
//! console uses [`http::HttpPanelApi`], tests use `mock::MockPanelApi`.

use async_trait::async_trait;
use serde_json::{Map, Value};

use models::{BootstrapRequest, LoginRequest, Service, Session, Settings};

use crate::errors::ClientError;

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use http::HttpPanelApi;

/// Header carrying the session token on privileged requests.
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

pub const BOOTSTRAP_PATH: &str = "/api/admin/bootstrap";
pub const LOGIN_PATH: &str = "/api/admin/login";
pub const SERVICES_PATH: &str = "/api/services";
pub const SETTINGS_PATH: &str = "/api/settings";

#[async_trait]
pub trait PanelApi: Send + Sync {
    /// `POST /api/admin/bootstrap`: try to create the first owner account.
    async fn bootstrap(&self, req: &BootstrapRequest) -> Result<(), ClientError>;
    /// `POST /api/admin/login`
    async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError>;
    /// `GET /api/services`
    async fn list_services(&self) -> Result<Vec<Service>, ClientError>;
    /// `POST /api/services` (token required)
    async fn create_service(&self, session: &Session, service: &Service) -> Result<(), ClientError>;
    /// `GET /api/settings`, returned raw so callers can merge it over defaults.
    async fn fetch_settings(&self) -> Result<Map<String, Value>, ClientError>;
    /// `POST /api/settings` (token required); returns the backend's echo.
    async fn save_settings(&self, session: &Session, settings: &Settings) -> Result<Settings, ClientError>;
}
