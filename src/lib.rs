//! A minimal file-backed wiki server.
//!
//! Pages are addressed by title through three routes:
//!
//! ```text
//! GET  /view/<title>   render the page, or 302 to /edit/<title>
//! GET  /edit/<title>   render the editor (blank for a new page)
//! POST /save/<title>   write <title>.txt, then 302 to /view/<title>
//! ```
//!
//! Anything else is a 404.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod storage;

pub use config::WikiConfig;
pub use error::WikiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::{Page, PageStore};
