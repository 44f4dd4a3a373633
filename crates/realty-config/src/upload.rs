use crate::parse_env;

/// Limits applied while reading multipart listing submissions.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Maximum size of a single uploaded file in bytes.
    pub max_file_size: usize,
    /// Maximum number of files accepted in the `images` field.
    pub max_images: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024, // 5MB
            max_images: 10,
        }
    }
}

impl UploadConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_file_size: parse_env("UPLOAD_MAX_FILE_BYTES", defaults.max_file_size),
            max_images: parse_env("UPLOAD_MAX_IMAGES", defaults.max_images),
        }
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.max_file_size / (1024 * 1024)
    }

    /// Body limit for listing submissions: every image plus a virtual tour,
    /// with 1MB left for the text fields.
    pub fn max_body_size(&self) -> usize {
        self.max_file_size
            .saturating_mul(self.max_images + 1)
            .saturating_add(1024 * 1024)
    }
}
