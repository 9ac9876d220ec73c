//! Image upload collaborators and upload key generation.

use std::fs;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::ObjectReference;

use super::ObjectPayload;

/// Uploads an embedded image and returns the URI it is hosted at.
pub trait ImageUploader: Send + Sync {
    /// Upload one image under `key`.
    fn upload(&self, key: &str, image: &ObjectPayload<'_>) -> Result<String>;
}

/// How upload keys are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadKeyStrategy {
    /// A random UUID per image
    #[default]
    Random,
    /// MD5 digest of the image bytes; identical images share a key
    ContentHash,
}

impl UploadKeyStrategy {
    /// Build the upload key `<token>.<format>` for an image.
    pub fn key(&self, reference: &ObjectReference, data: &[u8]) -> String {
        let token = match self {
            UploadKeyStrategy::Random => Uuid::new_v4().simple().to_string(),
            UploadKeyStrategy::ContentHash => format!("{:x}", Md5::digest(data)),
        };
        format!("{}.{}", token, reference.extension())
    }
}

impl std::str::FromStr for UploadKeyStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "uuid" => Ok(UploadKeyStrategy::Random),
            "hash" | "content-hash" | "md5" => Ok(UploadKeyStrategy::ContentHash),
            other => Err(Error::Other(format!("Unknown key strategy: {}", other))),
        }
    }
}

/// Adapter turning a closure into an [`ImageUploader`].
pub struct FnUploader<F>(pub F);

impl<F> ImageUploader for FnUploader<F>
where
    F: Fn(&str, &ObjectPayload<'_>) -> Result<String> + Send + Sync,
{
    fn upload(&self, key: &str, image: &ObjectPayload<'_>) -> Result<String> {
        (self.0)(key, image)
    }
}

/// Stores images in a local directory and returns `<url_prefix><key>`.
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    dir: PathBuf,
    url_prefix: String,
}

impl DirectoryUploader {
    /// Create an uploader writing into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            url_prefix: String::new(),
        })
    }

    /// Set the prefix prepended to keys in returned URIs.
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageUploader for DirectoryUploader {
    fn upload(&self, key: &str, image: &ObjectPayload<'_>) -> Result<String> {
        let path = self.dir.join(key);
        fs::write(&path, image.data)
            .map_err(|e| Error::Upload(format!("{}: {}", path.display(), e)))?;
        Ok(format!("{}{}", self.url_prefix, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_keys_are_unique() {
        let reference = ObjectReference::new("rId1", "word/media/image1.png").with_format("png");
        let a = UploadKeyStrategy::Random.key(&reference, b"same");
        let b = UploadKeyStrategy::Random.key(&reference, b"same");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert_eq!(a.len(), 32 + 4);
    }

    #[test]
    fn test_content_hash_key() {
        let reference = ObjectReference::new("rId1", "word/media/image1.gif").with_format("gif");
        let key = UploadKeyStrategy::ContentHash.key(&reference, b"");
        assert_eq!(key, "d41d8cd98f00b204e9800998ecf8427e.gif");
    }

    #[test]
    fn test_key_without_format() {
        let reference = ObjectReference::new("rId1", "word/media/blob");
        let key = UploadKeyStrategy::ContentHash.key(&reference, b"");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_key_strategy_from_str() {
        assert_eq!("uuid".parse::<UploadKeyStrategy>().unwrap(), UploadKeyStrategy::Random);
        assert_eq!("MD5".parse::<UploadKeyStrategy>().unwrap(), UploadKeyStrategy::ContentHash);
        assert!("sha".parse::<UploadKeyStrategy>().is_err());
    }

    #[test]
    fn test_directory_uploader() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = DirectoryUploader::new(dir.path().join("images"))
            .unwrap()
            .with_url_prefix("https://cdn.example.com/");
        let reference = ObjectReference::new("rId1", "word/media/image1.png").with_format("png");

        let uri = uploader
            .upload("k.png", &ObjectPayload::new(&reference, b"\x89PNG"))
            .unwrap();

        assert_eq!(uri, "https://cdn.example.com/k.png");
        let written = fs::read(dir.path().join("images/k.png")).unwrap();
        assert_eq!(written, b"\x89PNG");
    }
}
