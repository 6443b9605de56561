//! Typed client for the HR API: HTTP session handling, per-controller
//! service wrappers and the shared view state of a front end.

pub mod http;
pub mod services;
pub mod state;

pub use http::{HttpClient, UserSession};
pub use services::{CrudClient, HrClient, UserAccountClient};
pub use state::{View, ViewEvent, ViewState};
