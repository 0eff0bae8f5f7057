//! File-backed page store.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::WikiError;
use crate::storage::page::Page;

const PAGE_EXTENSION: &str = "txt";

/// Reads and writes `<title>.txt` files in a single directory.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
    file_mode: u32,
}

impl PageStore {
    pub fn new(data_dir: impl Into<PathBuf>, file_mode: u32) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_mode,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.data_dir.clone(), config.file_mode)
    }

    /// File name for a title, relative to the data directory.
    pub fn file_name(title: &str) -> String {
        format!("{}.{}", title, PAGE_EXTENSION)
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        self.data_dir.join(Self::file_name(title))
    }

    /// Load a page by title.
    ///
    /// Any read failure (missing file, permissions, ...) is reported as
    /// [`WikiError::NotFound`].
    pub async fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        match fs::read(&path).await {
            Ok(body) => Ok(Page::new(title, body)),
            Err(e) => {
                tracing::debug!(title = %title, path = ?path, error = %e, "Page load failed");
                Err(WikiError::NotFound(title.to_string()))
            }
        }
    }

    /// Persist a page, replacing any previous content for its title.
    pub async fn save(&self, page: &Page) -> Result<(), WikiError> {
        let target = self.path_for(&page.title);
        let tmp = self.data_dir.join(format!(
            ".{}.{}.tmp",
            page.title,
            Uuid::new_v4().simple()
        ));

        let result = async {
            self.write_new(&tmp, &page.body).await?;
            fs::rename(&tmp, &target).await
        }
        .await;

        if let Err(source) = result {
            // The temp file may or may not exist depending on where we failed.
            let _ = fs::remove_file(&tmp).await;
            tracing::warn!(title = %page.title, path = ?target, error = %source, "Page save failed");
            return Err(WikiError::Io {
                file: Self::file_name(&page.title),
                source,
            });
        }

        tracing::debug!(title = %page.title, bytes = page.body.len(), "Page saved");
        Ok(())
    }

    async fn write_new(&self, path: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(self.file_mode);

        let mut file = options.open(path).await?;
        file.write_all(body).await?;
        file.flush().await?;
        file.sync_all().await
    }
}
