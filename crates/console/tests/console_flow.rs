use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{header, StatusCode};
use serde_json::json;
use tokio::net::TcpListener;

use models::{Service, Session};
use service::backend::mock::{ApiCall, Failure, MockPanelApi};

struct TestApp {
    base_url: String,
    api: Arc<MockPanelApi>,
}

async fn start_console(api: MockPanelApi) -> anyhow::Result<TestApp> {
    let api = Arc::new(api);
    let app = console::build_app(api.clone());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, api })
}

// 不自动跟随重定向，便于断言 303 与 Location
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client")
}

fn location(res: &reqwest::Response) -> Option<&str> {
    res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

async fn login(app: &TestApp, http: &reqwest::Client) -> anyhow::Result<reqwest::Response> {
    let res = http
        .post(format!("{}/login", app.base_url))
        .form(&[("email", "admin@panel.pk"), ("password_hash", "5e88489"), ("action", "login")])
        .send()
        .await?;
    Ok(res)
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new()).await?;
    let res = client().get(format!("{}/healthz", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"status": "ok"}));
    assert!(app.api.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new()).await?;
    let http = client();

    let res = http.get(format!("{}/dashboard", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));

    let res = http.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(location(&res), Some("/login"));

    let res = http
        .get(format!("{}/dashboard", app.base_url))
        .header(header::COOKIE, "smm_console=00000000-0000-0000-0000-000000000000")
        .send()
        .await?;
    assert_eq!(location(&res), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn login_page_has_default_email_and_footer() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new()).await?;
    let body = client().get(format!("{}/login", app.base_url)).send().await?.text().await?;
    assert!(body.contains(r#"value="admin@panel.pk""#));
    assert!(body.contains(r#"type="password" name="password_hash""#));
    assert!(body.contains("Pakistan-ready SMM panel. Payments: JazzCash • EasyPaisa"));
    Ok(())
}

#[tokio::test]
async fn toggle_rerenders_without_backend_calls() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new()).await?;
    let res = client()
        .post(format!("{}/login", app.base_url))
        .form(&[("email", "ops@panel.pk"), ("password_hash", "abc"), ("show", "false"), ("action", "toggle")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains(r#"type="text" name="password_hash""#));
    assert!(body.contains(r#"value="ops@panel.pk""#));
    assert!(app.api.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_login_shows_invalid_credentials() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new().with_login_failure(Failure::Status(401))).await?;
    let res = login(&app, &client()).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    assert!(res.text().await?.contains("Invalid credentials"));

    // 先注册后登录
    let calls = app.api.calls();
    assert!(matches!(calls[0], ApiCall::Bootstrap(_)));
    assert!(matches!(calls[1], ApiCall::Login(_)));
    Ok(())
}

#[tokio::test]
async fn login_opens_session_and_renders_dashboard() -> anyhow::Result<()> {
    let services = vec![Service {
        name: "TikTok Views".into(),
        category: "TikTok".into(),
        rate_per_1k_pkr: 1.5,
        min: 100.0,
        max: 100000.0,
        status: "active".into(),
        ..Default::default()
    }];
    let api = MockPanelApi::new().with_login(Session::new("Owner", "tok-e2e")).with_services(services);
    let app = start_console(api).await?;
    let http = client();

    let res = login(&app, &http).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/dashboard"));
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("smm_console="));
    assert!(cookie.contains("HttpOnly"));

    let res = http.get(format!("{}/dashboard", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("Owner&#x27;s Admin • PKR"));
    assert!(body.contains("TikTok Views"));
    assert!(body.contains("status-active"));
    assert_eq!(app.api.list_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn creating_a_service_uses_token_and_refetches() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new().with_login(Session::new("Owner", "tok-svc"))).await?;
    let http = client();
    login(&app, &http).await?;
    http.get(format!("{}/dashboard", app.base_url)).send().await?;
    assert_eq!(app.api.list_calls(), 1);

    let res = http
        .post(format!("{}/services", app.base_url))
        .form(&[
            ("name", "Instagram Followers"),
            ("category", "Instagram"),
            ("description", ""),
            ("rate_per_1k_pkr", "3.2"),
            ("min", "100"),
            ("max", "5000"),
            ("status", "active"),
        ])
        .send()
        .await?;
    assert_eq!(location(&res), Some("/dashboard"));

    let body = http.get(format!("{}/dashboard", app.base_url)).send().await?.text().await?;
    assert!(body.contains("<strong>Instagram Followers</strong>"));
    assert_eq!(app.api.list_calls(), 2);

    let created: Vec<_> = app
        .api
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            ApiCall::CreateService { token, service } => Some((token, service)),
            _ => None,
        })
        .collect();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "tok-svc");
    assert_eq!(created[0].1.rate_per_1k_pkr, 3.2);
    assert_eq!(created[0].1.min, 100.0);
    Ok(())
}

#[tokio::test]
async fn settings_tab_loads_and_saves() -> anyhow::Result<()> {
    let mut stored = serde_json::Map::new();
    stored.insert("panel_name".into(), json!("Karachi Boost"));
    let api = MockPanelApi::new().with_login(Session::new("Owner", "tok-set")).with_settings(stored);
    let app = start_console(api).await?;
    let http = client();
    login(&app, &http).await?;

    let res = http.post(format!("{}/dashboard/tab", app.base_url)).form(&[("tab", "settings")]).send().await?;
    assert_eq!(location(&res), Some("/dashboard"));

    let body = http.get(format!("{}/dashboard", app.base_url)).send().await?.text().await?;
    assert!(body.contains(r#"value="Karachi Boost""#));
    assert!(body.contains(r#"value="PKR" readonly"#));

    http.post(format!("{}/settings", app.base_url))
        .form(&[("panel_name", "Lahore Likes"), ("announcement", "Eid sale")])
        .send()
        .await?;
    let body = http.get(format!("{}/dashboard", app.base_url)).send().await?.text().await?;
    assert!(body.contains(r#"value="Lahore Likes""#));
    assert!(body.contains(r#"value="Eid sale""#));

    let saved = app.api.calls().into_iter().find_map(|c| match c {
        ApiCall::SaveSettings { token, settings } => Some((token, settings)),
        _ => None,
    });
    let (token, settings) = saved.expect("settings saved");
    assert_eq!(token, "tok-set");
    assert_eq!(settings.currency, "PKR");
    assert_eq!(settings.payment_methods, vec!["JazzCash".to_string(), "EasyPaisa".to_string()]);
    Ok(())
}

#[tokio::test]
async fn unknown_tab_is_bad_request() -> anyhow::Result<()> {
    let app = start_console(MockPanelApi::new().with_login(Session::new("Owner", "tok"))).await?;
    let http = client();
    login(&app, &http).await?;
    let res = http.post(format!("{}/dashboard/tab", app.base_url)).form(&[("tab", "billing")]).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
