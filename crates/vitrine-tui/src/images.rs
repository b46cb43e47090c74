//! In-memory cache of downloaded card images
//!
//! Downloads run on background tasks; results come back over the binary's
//! event channel and land here. Widgets render whatever is loaded and fall
//! back to their text label otherwise.

use std::collections::HashMap;

use image::DynamicImage;

/// Result of one background image download
#[derive(Debug)]
pub enum ImageLoadResult {
    Success { url: String, image: DynamicImage },
    Failure { url: String, error: String },
}

enum ImageState {
    Loading,
    Loaded(DynamicImage),
    Failed,
}

#[derive(Default)]
pub struct ImageCache {
    states: HashMap<String, ImageState>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a URL as in flight so it is not requested twice
    pub fn start_loading(&mut self, url: String) {
        self.states.entry(url).or_insert(ImageState::Loading);
    }

    pub fn set_loaded(&mut self, url: String, image: DynamicImage) {
        self.states.insert(url, ImageState::Loaded(image));
    }

    /// A failed download is remembered; the widget keeps its text label and
    /// the URL is not retried
    pub fn set_failed(&mut self, url: String) {
        self.states.insert(url, ImageState::Failed);
    }

    pub fn get(&self, url: &str) -> Option<&DynamicImage> {
        match self.states.get(url) {
            Some(ImageState::Loaded(image)) => Some(image),
            _ => None,
        }
    }

    /// Whether the URL is loading, loaded, or known-failed
    pub fn is_known(&self, url: &str) -> bool {
        self.states.contains_key(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_then_loaded() {
        let mut cache = ImageCache::new();
        let url = "https://backend.example.com/uploads/a.png".to_string();

        cache.start_loading(url.clone());
        assert!(cache.is_known(&url));
        assert!(cache.get(&url).is_none());

        cache.set_loaded(url.clone(), DynamicImage::new_rgb8(2, 2));
        assert!(cache.get(&url).is_some());
    }

    #[test]
    fn test_failed_url_stays_known_but_unrenderable() {
        let mut cache = ImageCache::new();
        let url = "https://backend.example.com/uploads/b.png".to_string();

        cache.start_loading(url.clone());
        cache.set_failed(url.clone());

        assert!(cache.is_known(&url));
        assert!(cache.get(&url).is_none());
    }

    #[test]
    fn test_start_loading_does_not_clobber_loaded() {
        let mut cache = ImageCache::new();
        let url = "https://backend.example.com/uploads/c.png".to_string();

        cache.set_loaded(url.clone(), DynamicImage::new_rgb8(1, 1));
        cache.start_loading(url.clone());
        assert!(cache.get(&url).is_some());
    }
}
