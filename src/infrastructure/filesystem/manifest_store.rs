use serde_json::json;
use std::path::{Path, PathBuf};

use crate::common::error::Error;
use crate::domain::entities::manifest::{Manifest, DEFAULT_MANIFEST_FILE};
use crate::monad::result::{self, Result, ResultE};
use crate::monad::Future;

/// Reads manifests relative to a workspace root.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    root: PathBuf,
}

impl ManifestStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the manifest path: `file` relative to the root, or the default file name
    pub fn manifest_path(&self, file: Option<&Path>) -> PathBuf {
        match file {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.root.join(path),
            None => self.root.join(DEFAULT_MANIFEST_FILE),
        }
    }

    /// Read and parse the manifest.
    ///
    /// A missing file and a parse failure both come back as `Err`.
    pub fn read_manifest(&self, file: Option<&Path>) -> Result<Manifest> {
        let path = self.manifest_path(file);
        tracing::debug!("Reading manifest from {}", path.display());

        if !path.exists() {
            return result::err(Error::filesystem_error(
                format!("No manifest file in {}", path.display()),
                Some(path),
            ));
        }

        result::wrap_res(std::fs::read_to_string(&path).map_err(|e| {
            Error::filesystem_error_with_source(
                format!("Failed to read manifest {}", path.display()),
                Some(path.clone()),
                e,
            )
        }))
        .and_then(|content| Self::parse(&content, &path))
    }

    /// Same as [`read_manifest`](Self::read_manifest), reading on the Tokio runtime.
    pub fn read_manifest_async(&self, file: Option<&Path>) -> Future<Manifest> {
        let path = self.manifest_path(file);
        Future::spawn(async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => Self::parse(&content, &path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => result::err(
                    Error::filesystem_error(format!("No manifest file in {}", path.display()), Some(path)),
                ),
                Err(e) => result::err(Error::filesystem_error_with_source(
                    format!("Failed to read manifest {}", path.display()),
                    Some(path),
                    e,
                )),
            }
        })
    }

    /// An empty document (or one holding only `null`) is `Missing`.
    fn parse(content: &str, path: &Path) -> Result<Manifest> {
        let parse_error = |e: serde_yaml::Error| {
            Error::serialization_error_with_source(
                format!("Failed to parse manifest {}", path.display()),
                e,
            )
        };

        let document = match serde_yaml::from_str::<serde_yaml::Value>(content) {
            Ok(document) => document,
            Err(e) => return result::err(parse_error(e)),
        };
        let document = result::missing_with_info(
            Some(document).filter(|d| !d.is_null()),
            format!("Manifest {} is empty", path.display()),
            json!({ "path": path.display().to_string() }),
        );

        document.and_then(|document| match serde_yaml::from_value::<Manifest>(document) {
            Ok(manifest) => {
                tracing::debug!("Manifest lists {} repositories", manifest.repos.len());
                ResultE::Ok(manifest)
            }
            Err(e) => result::err(parse_error(e)),
        })
    }
}
