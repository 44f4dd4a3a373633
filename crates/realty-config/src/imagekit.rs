use std::env;
use std::fmt;

/// Credentials and endpoints for the ImageKit media CDN.
#[derive(Clone)]
pub struct ImageKitConfig {
    pub public_key: String,
    pub private_key: String,
    pub url_endpoint: String,
    pub upload_url: String,
    pub api_url: String,
    /// Folder that listing images are uploaded into.
    pub folder: String,
}

impl ImageKitConfig {
    pub fn from_env() -> Self {
        Self {
            public_key: env::var("IMAGEKIT_PUBLIC_KEY").unwrap_or_default(),
            private_key: env::var("IMAGEKIT_PRIVATE_KEY").unwrap_or_default(),
            url_endpoint: env::var("IMAGEKIT_URL_ENDPOINT").unwrap_or_default(),
            upload_url: env::var("IMAGEKIT_UPLOAD_URL")
                .unwrap_or_else(|_| "https://upload.imagekit.io/api/v1/files/upload".to_string()),
            api_url: env::var("IMAGEKIT_API_URL")
                .unwrap_or_else(|_| "https://api.imagekit.io/v1".to_string()),
            folder: env::var("IMAGEKIT_FOLDER").unwrap_or_else(|_| "properties".to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.private_key.is_empty()
    }
}

impl fmt::Debug for ImageKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageKitConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"[redacted]")
            .field("url_endpoint", &self.url_endpoint)
            .field("upload_url", &self.upload_url)
            .field("api_url", &self.api_url)
            .field("folder", &self.folder)
            .finish()
    }
}
