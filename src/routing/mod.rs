//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (route lookup: view / edit / save)
//!     → matcher.rs (evaluate the route+title pattern)
//!     → Return: RouteMatch { route, title } or NoMatch (404)
//! ```
//!
//! # Design Decisions
//! - Pattern compiled at startup, immutable at runtime
//! - This is the only place a title is validated; storage trusts it
//! - Titles are ASCII word characters only, so `/`, `.` and `%` never
//!   reach the filesystem

pub mod matcher;
pub mod router;

pub use matcher::{Title, TitleMatcher};
pub use router::{Route, RouteMatch, Router};
