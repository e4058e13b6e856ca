//! Wire and domain types shared by the backend client and the console.
//! - Shapes follow the panel backend's JSON exactly.
//! - No invariant enforcement: the backend is the sole authority.

pub mod errors;
pub mod lenient;
pub mod session;
pub mod catalog;
pub mod settings;

pub use catalog::{Service, ServiceStatus};
pub use session::{BootstrapRequest, LoginRequest, Session};
pub use settings::Settings;
