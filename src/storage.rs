// src/storage.rs

//! Binary object store for listing images, keyed by relative path and
//! served back under a public URL prefix.

use crate::errors::ServerError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reject absolute paths, empty segments and anything that walks upward.
    fn resolve(&self, key: &str) -> Result<PathBuf, ServerError> {
        let bad = || ServerError::BadRequest(format!("invalid object path: {key}"));

        if key.is_empty() || key.starts_with('/') || key.contains('\\') {
            return Err(bad());
        }

        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(bad());
            }
            path.push(segment);
        }
        Ok(path)
    }

    pub fn upload(&self, key: &str, bytes: &[u8]) -> Result<(), ServerError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ServerError::Storage(format!("create dir failed: {e}")))?;
        }
        fs::write(&path, bytes).map_err(|e| ServerError::Storage(format!("write failed: {e}")))?;

        debug!(key, size = bytes.len(), "stored object");
        Ok(())
    }

    pub fn read(&self, key: &str) -> Result<Vec<u8>, ServerError> {
        let path = self.resolve(key)?;
        if !path.is_file() {
            return Err(ServerError::NotFound);
        }
        fs::read(&path).map_err(|e| ServerError::Storage(format!("read failed: {e}")))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{PUBLIC_PREFIX}/{key}")
    }
}

/// Lowercased extension of an uploaded file name, restricted to image types.
pub fn image_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "avif" => Some(ext),
        _ => None,
    }
}

pub fn content_type_for(key: &str) -> mime::Mime {
    let ext = key.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        "avif" => "image/avif".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
