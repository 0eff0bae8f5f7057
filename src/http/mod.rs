//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing table)
//!     → request.rs (request ID, title validation, form body)
//!     → handlers.rs (view / edit / save)
//!     → storage + render
//!     → response.rs (HTML, 302 redirect, or error status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{PageBody, ValidTitle, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
