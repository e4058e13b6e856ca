//! Console sessions.
//!
//! A console session is one logged-in browser: a cookie holding a random id
//! that maps to that operator's [`Dashboard`]. Sessions live only in this
//! process's memory.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use models::Session;
use service::backend::PanelApi;
use service::components::Dashboard;

pub const SESSION_COOKIE: &str = "smm_console";

/// Dashboards of logged-in browsers, keyed by cookie id.
///
/// Entries are never removed: there is no sign-out and no expiry, so the map
/// holds one entry per successful login for the life of the process.
#[derive(Default)]
pub struct SessionStore {
    inner: DashMap<Uuid, Arc<Mutex<Dashboard>>>,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Start a console session for a freshly authenticated operator.
    pub fn open(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        info!(console_session = %id, name = %session.name, "console session opened");
        self.inner.insert(id, Arc::new(Mutex::new(Dashboard::new(session))));
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<Mutex<Dashboard>>> {
        self.inner.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[derive(Clone)]
pub struct ConsoleState {
    pub api: Arc<dyn PanelApi>,
    pub sessions: Arc<SessionStore>,
}

impl ConsoleState {
    pub fn new(api: Arc<dyn PanelApi>) -> Self {
        Self { api, sessions: SessionStore::new() }
    }
}

pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// The caller's dashboard, resolved from the session cookie.
/// Unknown or missing cookies redirect to the login page.
pub struct ConsoleSession {
    pub id: Uuid,
    pub dashboard: Arc<Mutex<Dashboard>>,
}

#[async_trait]
impl FromRequestParts<ConsoleState> for ConsoleSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &ConsoleState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(id) = jar.get(SESSION_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok()) else {
            debug!(path = %parts.uri.path(), "no console session cookie");
            return Err(Redirect::to("/login"));
        };
        match state.sessions.get(&id) {
            Some(dashboard) => Ok(Self { id, dashboard }),
            None => {
                debug!(console_session = %id, "unknown console session");
                Err(Redirect::to("/login"))
            }
        }
    }
}
