//! In-memory `PanelApi` for tests: scripted replies plus a call log.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use models::{BootstrapRequest, LoginRequest, Service, Session, Settings};

use super::PanelApi;
use crate::errors::ClientError;

/// One recorded backend call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Bootstrap(BootstrapRequest),
    Login(LoginRequest),
    ListServices,
    CreateService { token: String, service: Service },
    FetchSettings,
    SaveSettings { token: String, settings: Settings },
}

/// Scripted failure for a mocked endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Status(u16),
    Network,
}

impl Failure {
    fn into_error(self) -> ClientError {
        match self {
            Failure::Status(status) => ClientError::Status { status, body: String::new() },
            Failure::Network => ClientError::Network("connection refused".into()),
        }
    }
}

fn fail(f: Option<Failure>) -> Result<(), ClientError> {
    match f {
        Some(f) => Err(f.into_error()),
        None => Ok(()),
    }
}

#[derive(Default)]
struct MockState {
    calls: Vec<ApiCall>,
    bootstrap_failure: Option<Failure>,
    login: Option<Session>,
    login_failure: Option<Failure>,
    services: Vec<Service>,
    list_failure: Option<Failure>,
    create_failure: Option<Failure>,
    settings: Map<String, Value>,
    settings_failure: Option<Failure>,
    save_failure: Option<Failure>,
    save_echo: Option<Settings>,
}

/// Behaves like a cooperative backend unless told otherwise: bootstrap
/// succeeds, created services are appended to the list, and settings saves
/// echo the request. Login is rejected with 401 until a session is scripted.
#[derive(Default)]
pub struct MockPanelApi {
    state: Mutex<MockState>,
}

impl MockPanelApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(self, session: Session) -> Self {
        self.state.lock().unwrap().login = Some(session);
        self
    }

    pub fn with_login_failure(self, f: Failure) -> Self {
        self.state.lock().unwrap().login_failure = Some(f);
        self
    }

    pub fn with_bootstrap_failure(self, f: Failure) -> Self {
        self.state.lock().unwrap().bootstrap_failure = Some(f);
        self
    }

    pub fn with_services(self, services: Vec<Service>) -> Self {
        self.state.lock().unwrap().services = services;
        self
    }

    pub fn with_list_failure(self, f: Failure) -> Self {
        self.state.lock().unwrap().list_failure = Some(f);
        self
    }

    pub fn with_create_failure(self, f: Failure) -> Self {
        self.state.lock().unwrap().create_failure = Some(f);
        self
    }

    pub fn with_settings(self, settings: Map<String, Value>) -> Self {
        self.state.lock().unwrap().settings = settings;
        self
    }

    pub fn with_settings_failure(self, f: Failure) -> Self {
        self.state.lock().unwrap().settings_failure = Some(f);
        self
    }

    pub fn with_save_failure(self, f: Failure) -> Self {
        self.state.lock().unwrap().save_failure = Some(f);
        self
    }

    /// Reply to saves with this body instead of echoing the request.
    pub fn with_save_echo(self, settings: Settings) -> Self {
        self.state.lock().unwrap().save_echo = Some(settings);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::ListServices))
    }
}

#[async_trait]
impl PanelApi for MockPanelApi {
    async fn bootstrap(&self, req: &BootstrapRequest) -> Result<(), ClientError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(ApiCall::Bootstrap(req.clone()));
        fail(s.bootstrap_failure)
    }

    async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(ApiCall::Login(req.clone()));
        fail(s.login_failure)?;
        s.login.clone().ok_or_else(|| Failure::Status(401).into_error())
    }

    async fn list_services(&self) -> Result<Vec<Service>, ClientError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(ApiCall::ListServices);
        fail(s.list_failure)?;
        Ok(s.services.clone())
    }

    async fn create_service(&self, session: &Session, service: &Service) -> Result<(), ClientError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(ApiCall::CreateService { token: session.token.clone(), service: service.clone() });
        fail(s.create_failure)?;
        s.services.push(service.clone());
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<Map<String, Value>, ClientError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(ApiCall::FetchSettings);
        fail(s.settings_failure)?;
        Ok(s.settings.clone())
    }

    async fn save_settings(&self, session: &Session, settings: &Settings) -> Result<Settings, ClientError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(ApiCall::SaveSettings { token: session.token.clone(), settings: settings.clone() });
        fail(s.save_failure)?;
        Ok(s.save_echo.clone().unwrap_or_else(|| settings.clone()))
    }
}
