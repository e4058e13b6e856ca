use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use common::metrics;
use configs::BackendConfig;
use models::{BootstrapRequest, LoginRequest, Service, Session, Settings};

use super::{PanelApi, ADMIN_TOKEN_HEADER, BOOTSTRAP_PATH, LOGIN_PATH, SERVICES_PATH, SETTINGS_PATH};
use crate::errors::ClientError;

/// reqwest-backed client for the panel backend.
///
/// One request per call; no retries, no caching.
#[derive(Clone, Debug)]
pub struct HttpPanelApi {
    client: Client,
    base_url: String,
}

impl HttpPanelApi {
    /// Client without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().map_err(|e| ClientError::Setup(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ClientError> {
        Self::with_timeout(cfg.base_url.clone(), cfg.request_timeout_secs.map(Duration::from_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and turn any non-2xx status into `ClientError::Status`.
    async fn send(&self, endpoint: &'static str, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        debug!(endpoint, status = status.as_u16(), "backend responded");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status: status.as_u16(), body });
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        resp.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Record the call's outcome in metrics and logs, passing the result through.
fn observe<T>(endpoint: &'static str, result: Result<T, ClientError>) -> Result<T, ClientError> {
    match &result {
        Ok(_) => metrics::record_backend_request(endpoint, "ok"),
        Err(e) => {
            metrics::record_backend_request(endpoint, e.outcome());
            warn!(endpoint, outcome = e.outcome(), error = %e, "backend request failed");
        }
    }
    result
}

#[async_trait]
impl PanelApi for HttpPanelApi {
    async fn bootstrap(&self, req: &BootstrapRequest) -> Result<(), ClientError> {
        let res = self
            .send("bootstrap", self.client.post(self.url(BOOTSTRAP_PATH)).json(req))
            .await
            .map(|_| ());
        observe("bootstrap", res)
    }

    async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError> {
        let res = async {
            let resp = self.send("login", self.client.post(self.url(LOGIN_PATH)).json(req)).await?;
            Self::decode::<Session>(resp).await
        }
        .await;
        observe("login", res)
    }

    async fn list_services(&self) -> Result<Vec<Service>, ClientError> {
        let res = async {
            let resp = self.send("list_services", self.client.get(self.url(SERVICES_PATH))).await?;
            Self::decode::<Vec<Service>>(resp).await
        }
        .await;
        observe("list_services", res)
    }

    async fn create_service(&self, session: &Session, service: &Service) -> Result<(), ClientError> {
        let req = self
            .client
            .post(self.url(SERVICES_PATH))
            .header(ADMIN_TOKEN_HEADER, &session.token)
            .json(service);
        let res = self.send("create_service", req).await.map(|_| ());
        observe("create_service", res)
    }

    async fn fetch_settings(&self) -> Result<Map<String, Value>, ClientError> {
        let res = async {
            let resp = self.send("fetch_settings", self.client.get(self.url(SETTINGS_PATH))).await?;
            Self::decode::<Map<String, Value>>(resp).await
        }
        .await;
        observe("fetch_settings", res)
    }

    async fn save_settings(&self, session: &Session, settings: &Settings) -> Result<Settings, ClientError> {
        let res = async {
            let req = self
                .client
                .post(self.url(SETTINGS_PATH))
                .header(ADMIN_TOKEN_HEADER, &session.token)
                .json(settings);
            let resp = self.send("save_settings", req).await?;
            Self::decode::<Settings>(resp).await
        }
        .await;
        observe("save_settings", res)
    }
}
