//! Client-side logic for the SMM panel admin console.
//! - `backend`: typed access to the panel backend's HTTP/JSON API.
//! - `components`: framework-independent view state (login, service form,
//!   services table, settings, dashboard) driven by the console's handlers.

pub mod errors;
pub mod backend;
pub mod components;
