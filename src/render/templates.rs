//! Pre-parsed template registry.

use minijinja::Environment;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::TemplateConfig;
use crate::error::WikiError;
use crate::storage::Page;

const BUILTIN_VIEW: &str = include_str!("../../templates/view.html");
const BUILTIN_EDIT: &str = include_str!("../../templates/edit.html");

/// The templates a page can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    View,
    Edit,
}

impl PageTemplate {
    pub fn file_name(self) -> &'static str {
        match self {
            PageTemplate::View => "view.html",
            PageTemplate::Edit => "edit.html",
        }
    }
}

/// Errors building the registry at startup.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {name}: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// Values exposed to templates as `title` and `body`.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'a str,
    body: Cow<'a, str>,
}

impl<'a> From<&'a Page> for PageContext<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            title: &page.title,
            body: page.body_text(),
        }
    }
}

/// Parsed `view.html` and `edit.html`, immutable after construction.
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Build from template sources.
    pub fn from_sources(
        view: impl Into<String>,
        edit: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for (kind, source) in [
            (PageTemplate::View, view.into()),
            (PageTemplate::Edit, edit.into()),
        ] {
            env.add_template_owned(kind.file_name(), source)
                .map_err(|source| TemplateError::Parse {
                    name: kind.file_name(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// The templates compiled into the binary.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_sources(BUILTIN_VIEW, BUILTIN_EDIT)
    }

    /// Load `view.html` and `edit.html` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let read = |kind: PageTemplate| {
            let path = dir.join(kind.file_name());
            fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source })
        };
        Self::from_sources(read(PageTemplate::View)?, read(PageTemplate::Edit)?)
    }

    pub fn from_config(config: &TemplateConfig) -> Result<Self, TemplateError> {
        match &config.dir {
            Some(dir) => {
                tracing::info!(dir = ?dir, "Loading templates from directory");
                Self::from_dir(dir)
            }
            None => {
                tracing::info!("Using built-in templates");
                Self::builtin()
            }
        }
    }

    /// Merge a page into the named template.
    pub fn render(&self, template: PageTemplate, page: &Page) -> Result<String, WikiError> {
        let tmpl = self.env.get_template(template.file_name())?;
        Ok(tmpl.render(PageContext::from(page))?)
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry").finish_non_exhaustive()
    }
}
