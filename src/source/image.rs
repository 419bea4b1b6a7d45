//! Image references.
//!
//! Only the URL is produced and cached; image bytes are loaded by the
//! consumer.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Serialize;
use url::Url;

use super::SourceAdapter;
use crate::error::FetchError;

const IMAGE_SIZE: &str = "512x384/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub theme: String,
    pub url: String,
}

/// Picks a random theme and builds an image URL for it.
#[derive(Debug, Clone)]
pub struct ImageAdapter {
    endpoint: Url,
    themes: Vec<String>,
}

impl ImageAdapter {
    pub fn new(endpoint: Url, themes: Vec<String>) -> Self {
        Self { endpoint, themes }
    }

    fn build(&self, theme: &str) -> Result<ImageRef, FetchError> {
        let mut url = self
            .endpoint
            .join(IMAGE_SIZE)
            .map_err(|e| FetchError::malformed(format!("image endpoint: {}", e)))?;
        url.set_query(Some(theme));

        Ok(ImageRef {
            theme: theme.to_string(),
            url: url.into(),
        })
    }
}

#[async_trait]
impl SourceAdapter for ImageAdapter {
    type Output = ImageRef;

    async fn fetch(&self) -> Result<ImageRef, FetchError> {
        let theme = self
            .themes
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| FetchError::malformed("no image themes configured"))?;
        self.build(theme)
    }
}
