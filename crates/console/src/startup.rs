use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tracing::info;

use configs::AppConfig;
use service::backend::{HttpPanelApi, PanelApi};

use crate::auth::ConsoleState;
use crate::errors::StartupError;
use crate::routes;

/// Build the console app around any backend implementation.
pub fn build_app(api: Arc<dyn PanelApi>) -> Router {
    routes::build_router(ConsoleState::new(api))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("console bind address {}: {e}", cfg.bind_addr())))
}

/// Public entry: connect the backend client and serve the console.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let api = HttpPanelApi::from_config(&cfg.backend).map_err(StartupError::from)?;
    info!(
        backend = %api.base_url(),
        timeout_secs = ?cfg.backend.request_timeout_secs,
        "panel backend client ready"
    );

    let app = build_app(Arc::new(api));

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(StartupError::from)?;
    info!(%addr, "console listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.console.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
