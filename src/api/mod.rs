//! HTTP API
//!
//! - [`routes`]: handlers and the router
//! - [`server`]: shared state, middleware and the listener
//! - [`error`]: JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use server::{ApiServer, AppState, ServerError, ServerInfo};
