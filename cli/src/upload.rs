//! HTTP upload of extracted images.

use reqwest::blocking::Client;

use undocx::{Error, ImageUploader, ObjectPayload, Result};

/// Uploads each image with an HTTP PUT to `<base_url>/<key>`.
///
/// The returned URI is `<public_prefix><key>` when a public prefix is set,
/// otherwise the upload URL itself.
pub struct HttpUploader {
    client: Client,
    base_url: String,
    public_prefix: Option<String>,
}

impl HttpUploader {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("undocx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Upload(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            public_prefix: None,
        })
    }

    pub fn with_public_prefix(mut self, prefix: Option<String>) -> Self {
        self.public_prefix = prefix;
        self
    }

    fn target(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

impl ImageUploader for HttpUploader {
    fn upload(&self, key: &str, image: &ObjectPayload<'_>) -> Result<String> {
        let url = self.target(key);
        log::debug!("PUT {} ({} bytes)", url, image.data.len());

        let response = self
            .client
            .put(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                content_type(image.reference.extension()),
            )
            .body(image.data.to_vec())
            .send()
            .map_err(|e| Error::Upload(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Upload(format!("{}: HTTP {}", url, response.status())));
        }

        Ok(match &self.public_prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => url,
        })
    }
}

fn content_type(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "emf" => "image/emf",
        "wmf" => "image/wmf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("png"), "image/png");
        assert_eq!(content_type("jpeg"), "image/jpeg");
        assert_eq!(content_type("bin"), "application/octet-stream");
    }

    #[test]
    fn test_target_url() {
        let uploader = HttpUploader::new("https://store.example.com/bucket/").unwrap();
        assert_eq!(
            uploader.target("abc.png"),
            "https://store.example.com/bucket/abc.png"
        );
    }
}
