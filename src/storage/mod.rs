//! Page persistence subsystem.
//!
//! # Data Flow
//! ```text
//! load(title):  <data_dir>/<title>.txt → bytes → Page
//! save(page):   Page.body → <data_dir>/.<title>.<uuid>.tmp → rename → <title>.txt
//! ```
//!
//! # Design Decisions
//! - One flat file per page, raw bytes, no header or metadata
//! - Titles are trusted: validation happens in `routing` only
//! - No locking; concurrent saves of one title race and the last rename wins
//! - Writes go through a temporary file so a failed save never truncates
//!   the previous content

pub mod page;
pub mod store;

pub use page::Page;
pub use store::PageStore;
