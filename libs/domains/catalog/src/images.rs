//! Display image selection with placeholder fallback.

use core_config::media::MediaConfig;

use crate::models::{Product, Unit, UnitImage};

/// Turns stored image paths into URLs and picks representative images.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    media_url: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(media: &MediaConfig) -> Self {
        Self {
            media_url: media.media_url.clone(),
            placeholder: media.empty_image_path.clone(),
        }
    }

    /// Returned verbatim, without the media prefix.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_placeholder(&self, url: &str) -> bool {
        url == self.placeholder
    }

    pub fn url_for(&self, image: &UnitImage) -> String {
        format!("{}{}", self.media_url, image.path.trim_start_matches('/'))
    }

    /// Every image of `unit` in repository order, or `[placeholder]` when it has none.
    pub fn images_for_unit(&self, unit: &Unit) -> Vec<String> {
        if unit.images.is_empty() {
            return vec![self.placeholder.clone()];
        }

        unit.images.iter().map(|image| self.url_for(image)).collect()
    }

    /// The representative image of `product`.
    ///
    /// Takes the first unit that has any image; within it the first main
    /// image wins, otherwise its first image. Products without images
    /// resolve to the placeholder.
    pub fn image_for_product(&self, product: &Product) -> String {
        product
            .units
            .iter()
            .find(|unit| !unit.images.is_empty())
            .and_then(|unit| {
                unit.images
                    .iter()
                    .find(|image| image.is_main)
                    .or_else(|| unit.images.first())
            })
            .map(|image| self.url_for(image))
            .unwrap_or_else(|| self.placeholder.clone())
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(&MediaConfig::default())
    }
}
