//! New-service form.

use tracing::{info, warn};

use models::{Service, ServiceStatus, Session};

use crate::backend::PanelApi;

pub const DEFAULT_MIN: f64 = 10.0;
pub const DEFAULT_MAX: f64 = 10_000.0;

/// Form fields as the operator typed them. The rate stays text until submit;
/// quantities are coerced as they are entered.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub rate_per_1k_pkr: String,
    pub min: f64,
    pub max: f64,
    pub status: ServiceStatus,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            description: String::new(),
            rate_per_1k_pkr: String::new(),
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            status: ServiceStatus::Active,
        }
    }
}

/// Parse the longest leading number in `text`: `"5.5"` is 5.5, `"3.2 PKR"` is
/// 3.2, and empty or non-numeric text is 0.
pub fn coerce_rate(text: &str) -> f64 {
    let t = text.trim_start();
    let end = t
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(t.len());
    let candidate = &t[..end];
    (1..=candidate.len())
        .rev()
        .find_map(|n| candidate[..n].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Quantity input coercion: the number as typed (fractions kept), blank or
/// unparsable input is 0.
pub fn coerce_quantity(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    /// Backend refused or was unreachable; nothing is shown to the operator.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceForm {
    draft: ServiceDraft,
}

impl ServiceForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ServiceDraft {
        &self.draft
    }

    pub fn set_name(&mut self, v: impl Into<String>) {
        self.draft.name = v.into();
    }

    pub fn set_category(&mut self, v: impl Into<String>) {
        self.draft.category = v.into();
    }

    pub fn set_description(&mut self, v: impl Into<String>) {
        self.draft.description = v.into();
    }

    pub fn set_rate(&mut self, v: impl Into<String>) {
        self.draft.rate_per_1k_pkr = v.into();
    }

    pub fn set_min(&mut self, text: &str) {
        self.draft.min = coerce_quantity(text);
    }

    pub fn set_max(&mut self, text: &str) {
        self.draft.max = coerce_quantity(text);
    }

    pub fn set_status(&mut self, v: impl Into<ServiceStatus>) {
        self.draft.status = v.into();
    }

    /// Body sent to `POST /api/services`.
    pub fn payload(&self) -> Service {
        let d = &self.draft;
        Service {
            name: d.name.clone(),
            category: d.category.clone(),
            description: d.description.clone(),
            rate_per_1k_pkr: coerce_rate(&d.rate_per_1k_pkr),
            min: d.min,
            max: d.max,
            status: d.status.clone(),
        }
    }

    /// Create the service. On success the draft resets; on failure it is kept
    /// and the failure is only logged.
    pub async fn submit(&mut self, api: &dyn PanelApi, session: &Session) -> SubmitOutcome {
        let payload = self.payload();
        match api.create_service(session, &payload).await {
            Ok(()) => {
                info!(event = "service_created", name = %payload.name, category = %payload.category, "service created");
                self.draft = ServiceDraft::default();
                SubmitOutcome::Created
            }
            Err(e) => {
                warn!(event = "service_create_ignored", outcome = e.outcome(), error = %e, "service creation failed");
                SubmitOutcome::Ignored
            }
        }
    }
}
