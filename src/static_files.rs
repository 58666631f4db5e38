//! Document root resolution and file reads.

use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;
use crate::http::error::HttpError;

/// The document root files are served from.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    default_page: String,
    params_page: String,
}

impl StaticFiles {
    pub fn new(cfg: &StaticFilesConfig) -> Self {
        Self {
            root: cfg.root.clone(),
            default_page: cfg.default_page.clone(),
            params_page: cfg.params_page.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto a filesystem path under the root.
    ///
    /// `/` maps to the default page. Only normal components are joined, so
    /// `..`, `.` and absolute prefixes can never lead outside the root.
    pub fn resolve(&self, requested: &str) -> PathBuf {
        let relative = if requested == "/" {
            self.default_page.as_str()
        } else {
            requested
        };

        let mut path = self.root.clone();
        for component in Path::new(relative).components() {
            if let Component::Normal(part) = component {
                path.push(part);
            }
        }
        path
    }

    /// Whether `requested` names the parameter-echo page.
    pub fn is_params_page(&self, requested: &str) -> bool {
        requested.strip_prefix('/') == Some(self.params_page.as_str())
    }

    /// Reads a resolved file.
    ///
    /// A path that cannot be stat'ed or that is a directory is `NotFound`;
    /// a failure reading an existing file is `Internal`.
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>, HttpError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|_| HttpError::NotFound(path.to_path_buf()))?;

        if meta.is_dir() {
            return Err(HttpError::NotFound(path.to_path_buf()));
        }

        tokio::fs::read(path)
            .await
            .map_err(|source| HttpError::Internal {
                path: path.to_path_buf(),
                source,
            })
    }
}
