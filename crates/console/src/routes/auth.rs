use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use service::components::AdminLogin;

use crate::auth::{session_cookie, ConsoleSession, ConsoleState};
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub show: bool,
    /// `toggle` flips password visibility; anything else logs in.
    #[serde(default)]
    pub action: Option<String>,
}

pub async fn index(session: Option<ConsoleSession>) -> Redirect {
    match session {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

pub async fn login_page() -> Html<String> {
    Html(views::login_page(&AdminLogin::default()))
}

/// Run the registration-or-login flow; on success open a console session.
pub async fn login_submit(
    State(state): State<ConsoleState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut login = AdminLogin::new(form.email, form.password_hash, form.show);

    if form.action.as_deref() == Some("toggle") {
        login.toggle_visibility();
        return Html(views::login_page(&login)).into_response();
    }

    match login.submit(state.api.as_ref()).await {
        Some(session) => {
            let id = state.sessions.open(session);
            info!(console_session = %id, "redirecting to dashboard");
            (jar.add(session_cookie(id)), Redirect::to("/dashboard")).into_response()
        }
        None => (StatusCode::UNAUTHORIZED, Html(views::login_page(&login))).into_response(),
    }
}
