//! Route and title pattern matching.
//!
//! # Responsibilities
//! - Match `/(view|edit|save)/<title>` against the raw request path
//! - Restrict titles to `[A-Za-z0-9_]+`
//!
//! # Design Decisions
//! - The character class is spelled out instead of `\w`; the regex crate's
//!   `\w` is Unicode-aware and would accept titles such as `café`
//! - The pattern is anchored at both ends

use regex::Regex;
use std::fmt;

const ROUTE_PATTERN: &str = r"^/(view|edit|save)/([A-Za-z0-9_]+)$";

/// A page title that passed route validation.
///
/// Only [`TitleMatcher`] hands these out to request handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compiled route+title pattern.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    pattern: Regex,
}

impl TitleMatcher {
    pub fn new() -> Self {
        Self {
            // The pattern is a literal; a failure here is a programming error.
            pattern: Regex::new(ROUTE_PATTERN).expect("route pattern must compile"),
        }
    }

    /// Returns the route segment and title if the whole path matches.
    pub fn captures<'p>(&self, path: &'p str) -> Option<(&'p str, Title)> {
        let caps = self.pattern.captures(path)?;
        let route = caps.get(1)?.as_str();
        let title = caps.get(2)?.as_str();
        Some((route, Title(title.to_string())))
    }
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new()
    }
}
