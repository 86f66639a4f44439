use crate::{env_or_default, ConfigError, FromEnv};

pub const DEFAULT_MEDIA_URL: &str = "/media/";
pub const DEFAULT_EMPTY_IMAGE_PATH: &str = "product_images/empty.jpg";

/// Where stored product images are served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaConfig {
    /// Prefix joined with a stored image path to form its URL
    pub media_url: String,
    /// Placeholder returned when nothing better exists. Returned verbatim.
    pub empty_image_path: String,
}

impl MediaConfig {
    pub fn new(media_url: impl Into<String>, empty_image_path: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
            empty_image_path: empty_image_path.into(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_URL, DEFAULT_EMPTY_IMAGE_PATH)
    }
}

impl FromEnv for MediaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut media_url = env_or_default("MEDIA_URL", DEFAULT_MEDIA_URL);
        if !media_url.ends_with('/') {
            media_url.push('/');
        }

        let empty_image_path = env_or_default("EMPTY_IMAGE_PATH", DEFAULT_EMPTY_IMAGE_PATH);
        if empty_image_path.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "EMPTY_IMAGE_PATH".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            media_url,
            empty_image_path,
        })
    }
}
