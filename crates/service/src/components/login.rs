//! Operator login: an explicit two-step registration-or-login flow.
//!
//! 1. **Bootstrap**: ask the backend to create an owner account with the
//!    entered credentials. On an already provisioned backend this is expected
//!    to be declined; the outcome is logged and otherwise ignored.
//! 2. **Login**: always issued afterwards with the same credentials.

use tracing::{info, instrument, warn};

use common::metrics;
use models::{LoginRequest, Session};

use crate::backend::PanelApi;
use crate::errors::ClientError;

pub const DEFAULT_EMAIL: &str = "admin@panel.pk";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const BACKEND_UNREACHABLE: &str = "Unable to reach the panel backend";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the panel backend";

/// What happened to the bootstrap step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// An owner account was created.
    Provisioned,
    /// The backend refused, normally because an owner already exists.
    Declined(u16),
    /// No usable response.
    Unreachable(String),
}

/// Run the bootstrap step. Never fails: every outcome is a value.
pub async fn bootstrap(api: &dyn PanelApi, credentials: &LoginRequest) -> BootstrapOutcome {
    match api.bootstrap(&credentials.to_bootstrap()).await {
        Ok(()) => BootstrapOutcome::Provisioned,
        Err(ClientError::Status { status, .. }) => BootstrapOutcome::Declined(status),
        Err(e) => BootstrapOutcome::Unreachable(e.to_string()),
    }
}

/// Login form state.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminLogin {
    pub email: String,
    /// Opaque, operator-supplied; sent exactly as typed.
    pub password_hash: String,
    pub show: bool,
    pub error: Option<String>,
}

impl Default for AdminLogin {
    fn default() -> Self {
        Self { email: DEFAULT_EMAIL.to_string(), password_hash: String::new(), show: false, error: None }
    }
}

impl AdminLogin {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, show: bool) -> Self {
        Self { email: email.into(), password_hash: password_hash.into(), show, error: None }
    }

    pub fn toggle_visibility(&mut self) {
        self.show = !self.show;
    }

    pub fn password_input_type(&self) -> &'static str {
        if self.show { "text" } else { "password" }
    }

    pub fn credentials(&self) -> LoginRequest {
        LoginRequest { email: self.email.clone(), password_hash: self.password_hash.clone() }
    }

    /// Bootstrap, then log in. Returns the session on success; otherwise
    /// `error` holds the text to show.
    #[instrument(skip(self, api), fields(email = %self.email))]
    pub async fn submit(&mut self, api: &dyn PanelApi) -> Option<Session> {
        self.error = None;
        let credentials = self.credentials();

        let outcome = bootstrap(api, &credentials).await;
        match &outcome {
            BootstrapOutcome::Provisioned => info!(event = "bootstrap", "owner account provisioned"),
            BootstrapOutcome::Declined(status) => info!(event = "bootstrap", status, "bootstrap declined, continuing with login"),
            BootstrapOutcome::Unreachable(e) => warn!(event = "bootstrap", error = %e, "bootstrap failed, continuing with login"),
        }

        match api.login(&credentials).await {
            Ok(session) => {
                metrics::record_login_attempt("success");
                info!(event = "login", name = %session.name, "operator logged in");
                Some(session)
            }
            Err(e) => {
                let text = match &e {
                    ClientError::Status { .. } => {
                        metrics::record_login_attempt("rejected");
                        INVALID_CREDENTIALS
                    }
                    ClientError::Decode(_) => {
                        metrics::record_login_attempt("failed");
                        UNEXPECTED_RESPONSE
                    }
                    ClientError::Network(_) | ClientError::Setup(_) => {
                        metrics::record_login_attempt("failed");
                        BACKEND_UNREACHABLE
                    }
                };
                warn!(event = "login", outcome = e.outcome(), error = %e, "login failed");
                self.error = Some(text.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{ApiCall, Failure, MockPanelApi};

    fn login_form() -> AdminLogin {
        AdminLogin::new("admin@panel.pk", "5e884898da28", false)
    }

    #[tokio::test]
    async fn bootstrap_always_precedes_login() {
        for failure in [None, Some(Failure::Status(409)), Some(Failure::Network)] {
            let mut api = MockPanelApi::new().with_login(Session::new("Owner", "tok"));
            if let Some(f) = failure {
                api = api.with_bootstrap_failure(f);
            }
            let mut form = login_form();
            let session = form.submit(&api).await;
            assert!(session.is_some(), "login should proceed after bootstrap {:?}", failure);

            let calls = api.calls();
            assert_eq!(calls.len(), 2);
            assert!(matches!(&calls[0], ApiCall::Bootstrap(b) if b.name == "Owner" && b.email == "admin@panel.pk" && b.password_hash == "5e884898da28"));
            assert!(matches!(&calls[1], ApiCall::Login(l) if l.email == "admin@panel.pk" && l.password_hash == "5e884898da28"));
        }
    }

    #[tokio::test]
    async fn success_hands_back_parsed_session() {
        let mut expected = Session::new("Ayesha", "tok-123");
        expected.extra.insert("role".into(), serde_json::json!("owner"));
        let api = MockPanelApi::new().with_login(expected.clone());
        let mut form = login_form();
        let session = form.submit(&api).await;
        assert_eq!(session, Some(expected));
        assert_eq!(form.error, None);
    }

    #[tokio::test]
    async fn rejected_login_shows_error_and_no_session() {
        let api = MockPanelApi::new().with_login_failure(Failure::Status(401));
        let mut form = login_form();
        assert!(form.submit(&api).await.is_none());
        assert_eq!(form.error.as_deref(), Some(INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn network_failure_shows_generic_text() {
        let api = MockPanelApi::new().with_login_failure(Failure::Network);
        let mut form = login_form();
        assert!(form.submit(&api).await.is_none());
        assert_eq!(form.error.as_deref(), Some(BACKEND_UNREACHABLE));
    }

    #[tokio::test]
    async fn resubmit_clears_previous_error() {
        let api = MockPanelApi::new().with_login(Session::new("Owner", "tok"));
        let mut form = login_form();
        form.error = Some(INVALID_CREDENTIALS.into());
        assert!(form.submit(&api).await.is_some());
        assert!(form.error.is_none());
    }

    #[tokio::test]
    async fn bootstrap_outcomes_are_classified() {
        let creds = login_form().credentials();
        let ok = MockPanelApi::new();
        assert_eq!(bootstrap(&ok, &creds).await, BootstrapOutcome::Provisioned);
        let declined = MockPanelApi::new().with_bootstrap_failure(Failure::Status(409));
        assert_eq!(bootstrap(&declined, &creds).await, BootstrapOutcome::Declined(409));
        let down = MockPanelApi::new().with_bootstrap_failure(Failure::Network);
        assert!(matches!(bootstrap(&down, &creds).await, BootstrapOutcome::Unreachable(_)));
    }

    #[tokio::test]
    async fn successful_reply_without_token_still_logs_in() {
        let body: Session = serde_json::from_value(serde_json::json!({"name": "Owner", "access_token": "abc"})).unwrap();
        let api = MockPanelApi::new().with_login(body);
        let mut form = login_form();
        let session = form.submit(&api).await.expect("session from 2xx reply");
        assert_eq!(session.name, "Owner");
        assert_eq!(session.token, "");
        assert_eq!(session.extra.get("access_token"), Some(&serde_json::json!("abc")));
        assert_eq!(form.error, None);
    }

    #[test]
    fn visibility_toggle_switches_input_type() {
        let mut form = AdminLogin::default();
        assert_eq!(form.email, DEFAULT_EMAIL);
        assert_eq!(form.password_input_type(), "password");
        form.toggle_visibility();
        assert_eq!(form.password_input_type(), "text");
    }
}
