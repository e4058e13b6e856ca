pub mod auth;
pub mod routes;
pub mod startup;
pub mod errors;
pub mod views;

pub use auth::ConsoleState;
pub use startup::{build_app, run};
