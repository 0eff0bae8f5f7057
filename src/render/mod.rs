//! Page rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     templates.dir (or built-in sources)
//!     → templates.rs (parse view.html / edit.html once)
//!     → TemplateRegistry (immutable, shared via Arc)
//!
//! Per request:
//!     Page → PageContext { title, body } → named template → HTML string
//! ```
//!
//! # Design Decisions
//! - Templates are parsed once; nothing mutates the registry afterwards
//! - HTML auto-escaping is on for both templates (names end in `.html`)

pub mod templates;

pub use templates::{PageTemplate, TemplateError, TemplateRegistry};
