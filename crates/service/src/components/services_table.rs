//! Catalog table.

use tracing::{debug, warn};

use models::{Service, ServiceStatus};

use crate::backend::PanelApi;

pub const STATUS_ACTIVE_CLASS: &str = "status-active";
pub const STATUS_INACTIVE_CLASS: &str = "status-inactive";

/// Binary colour encoding: `active` versus anything else.
pub fn status_class(status: &ServiceStatus) -> &'static str {
    if status.is_active() { STATUS_ACTIVE_CLASS } else { STATUS_INACTIVE_CLASS }
}

/// Rows as last fetched, unsorted and unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicesTable {
    rows: Vec<Service>,
    synced_key: Option<u64>,
}

impl ServicesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Service] {
        &self.rows
    }

    /// Fetch on the first sync after mount and whenever `refresh_key` changed
    /// since the last one. Returns whether a fetch was issued.
    pub async fn sync(&mut self, api: &dyn PanelApi, refresh_key: u64) -> bool {
        if self.synced_key == Some(refresh_key) {
            return false;
        }
        self.synced_key = Some(refresh_key);
        match api.list_services().await {
            Ok(rows) => {
                debug!(count = rows.len(), refresh_key, "services fetched");
                self.rows = rows;
            }
            Err(e) => {
                warn!(outcome = e.outcome(), error = %e, "services fetch failed, showing empty table");
                self.rows.clear();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{Failure, MockPanelApi};

    fn row(name: &str, status: &str) -> Service {
        Service { name: name.into(), status: status.into(), ..Default::default() }
    }

    #[tokio::test]
    async fn fetches_on_mount_and_on_key_change_only() {
        let api = MockPanelApi::new().with_services(vec![row("Instagram Likes", "active")]);
        let mut table = ServicesTable::new();

        assert!(table.sync(&api, 0).await);
        assert!(!table.sync(&api, 0).await);
        assert_eq!(api.list_calls(), 1);
        assert_eq!(table.rows().len(), 1);

        assert!(table.sync(&api, 1).await);
        assert_eq!(api.list_calls(), 2);
    }

    #[tokio::test]
    async fn failure_resets_rows_to_empty() {
        let ok = MockPanelApi::new().with_services(vec![row("A", "active"), row("B", "paused")]);
        let mut table = ServicesTable::new();
        table.sync(&ok, 0).await;
        assert_eq!(table.rows().len(), 2);

        let down = MockPanelApi::new().with_list_failure(Failure::Network);
        table.sync(&down, 1).await;
        assert!(table.rows().is_empty());
    }

    #[tokio::test]
    async fn rows_keep_backend_order() {
        let api = MockPanelApi::new().with_services(vec![row("Zeta", "paused"), row("Alpha", "active")]);
        let mut table = ServicesTable::new();
        table.sync(&api, 0).await;
        let names: Vec<_> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn odd_rows_from_the_backend_are_still_listed() {
        let rows: Vec<Service> = serde_json::from_value(serde_json::json!([
            {"name": "Instagram Followers", "category": "Instagram", "rate_per_1k_pkr": 3.2, "min": 100, "max": 5000, "status": "active"},
            {"name": "YouTube Views", "description": null, "rate_per_1k_pkr": "3.20", "min": 50.5, "status": "paused"}
        ]))
        .unwrap();
        let api = MockPanelApi::new().with_services(rows);
        let mut table = ServicesTable::new();
        table.sync(&api, 0).await;
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].description, "");
        assert_eq!(table.rows()[1].rate_per_1k_pkr, 3.2);
        assert_eq!(table.rows()[1].min, 50.5);
    }

    #[test]
    fn status_colour_is_binary() {
        assert_eq!(status_class(&ServiceStatus::Active), STATUS_ACTIVE_CLASS);
        assert_eq!(status_class(&ServiceStatus::Paused), STATUS_INACTIVE_CLASS);
        assert_eq!(status_class(&"archived".into()), STATUS_INACTIVE_CLASS);
    }
}
