use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Backend base URL baked in at build time, if any.
pub const BUILD_BACKEND_URL: Option<&str> = option_env!("PANEL_BACKEND_URL");
pub const FALLBACK_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8090, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendConfig {
    #[serde(default)]
    pub base_url: String,
    /// Unset means requests wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); a missing file falls back to
    /// environment variables and defaults.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_and_validate_from(&path)
    }

    /// Only a missing file falls back to the environment; unreadable or
    /// malformed files are errors.
    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("failed to load config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from `CONSOLE_HOST` / `CONSOLE_PORT` / `TOKIO_WORKER_THREADS`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("CONSOLE_HOST") {
            cfg.console.host = host;
        }
        if let Some(port) = std::env::var("CONSOLE_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.console.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.console.worker_threads = Some(w);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.console.normalize()?;
        // 后端地址：配置文件 > 环境变量 BACKEND_URL > 编译期 PANEL_BACKEND_URL > 默认值
        self.backend.normalize_from_env();
        self.backend.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.console.host, self.console.port)
    }
}

impl ConsoleConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("console.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl BackendConfig {
    pub fn normalize_from_env(&mut self) {
        if self.base_url.trim().is_empty() {
            self.base_url = std::env::var("BACKEND_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .or_else(|| BUILD_BACKEND_URL.map(str::to_string))
                .unwrap_or_else(|| FALLBACK_BACKEND_URL.to_string());
        }
        // 去掉结尾的 '/'，拼接路径时统一以 '/' 开头
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        self.base_url = trimmed;
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("backend.base_url must start with http:// or https://"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(anyhow!("backend.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = load_from_str(
            r#"
            [console]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [backend]
            base_url = "https://panel.example.pk/"
            request_timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(cfg.console.port, 9000);
        assert_eq!(cfg.backend.request_timeout_secs, Some(15));
    }

    #[test]
    fn normalize_trims_trailing_slash_and_fixes_threads() {
        let mut cfg = AppConfig::default();
        cfg.console.worker_threads = Some(0);
        cfg.backend.base_url = "https://panel.example.pk/".into();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.backend.base_url, "https://panel.example.pk");
        assert_eq!(cfg.console.worker_threads, Some(4));
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8090");
    }

    #[test]
    fn rejects_non_http_backend() {
        let mut cfg = AppConfig::default();
        cfg.backend.base_url = "ftp://panel".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = std::env::temp_dir().join(format!("smm-console-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[console]\nport = \"nine thousand\"\n").unwrap();
        let res = AppConfig::load_and_validate_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("failed to load config file"));
    }

    #[test]
    fn missing_file_falls_back_to_env_defaults() {
        let cfg = AppConfig::load_and_validate_from("/nonexistent/smm-console.toml").unwrap();
        assert!(!cfg.backend.base_url.is_empty());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut cfg = AppConfig::default();
        cfg.backend.base_url = "http://panel".into();
        cfg.backend.request_timeout_secs = Some(0);
        assert!(cfg.normalize_and_validate().is_err());
    }
}
