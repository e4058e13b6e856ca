//! View components of the admin console.
//!
//! Each component owns its local view state and talks to the backend only
//! through [`PanelApi`](crate::backend::PanelApi). The authenticated
//! [`Session`](models::Session) is passed in explicitly by the caller.

pub mod login;
pub mod service_form;
pub mod services_table;
pub mod settings_panel;
pub mod dashboard;

pub use dashboard::{ActiveView, Dashboard, ServicesView, Tab};
pub use login::{AdminLogin, BootstrapOutcome};
pub use service_form::{ServiceDraft, ServiceForm, SubmitOutcome};
pub use services_table::ServicesTable;
pub use settings_panel::SettingsPanel;
