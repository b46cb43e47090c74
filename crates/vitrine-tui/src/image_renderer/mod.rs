//! Terminal image rendering with backend detection
//!
//! Priority: Kitty graphics protocol > Unicode halfblocks. Halfblocks work
//! in any truecolor terminal, so there is always an image path; disabling
//! images in the config drops the widgets back to their text labels.

mod kitty;

pub(crate) mod halfblocks;

pub use kitty::KittyRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBackend {
    /// Kitty Graphics Protocol
    Kitty,
    /// Unicode halfblocks (universal fallback)
    Halfblocks,
    /// Images turned off in the config
    Disabled,
}

impl std::fmt::Display for RenderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderBackend::Kitty => write!(f, "Kitty"),
            RenderBackend::Halfblocks => write!(f, "Halfblocks"),
            RenderBackend::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Image renderer with automatic backend detection
pub struct ImageRenderer {
    backend: RenderBackend,
    kitty: Option<KittyRenderer>,
}

impl ImageRenderer {
    pub fn new(enabled: bool) -> Self {
        let backend = if enabled {
            Self::detect_backend()
        } else {
            RenderBackend::Disabled
        };

        let kitty = if backend == RenderBackend::Kitty {
            Some(KittyRenderer::new())
        } else {
            None
        };

        tracing::info!("Image renderer using backend: {}", backend);

        Self { backend, kitty }
    }

    fn detect_backend() -> RenderBackend {
        if std::env::var("KITTY_WINDOW_ID").is_ok() {
            tracing::debug!("Detected Kitty terminal");
            return RenderBackend::Kitty;
        }
        tracing::debug!("Using halfblock fallback");
        RenderBackend::Halfblocks
    }

    pub fn backend(&self) -> RenderBackend {
        self.backend
    }

    pub fn is_active(&self) -> bool {
        self.backend != RenderBackend::Disabled
    }

    pub fn kitty(&mut self) -> Option<&mut KittyRenderer> {
        self.kitty.as_mut()
    }

    /// Drop kitty images that were not displayed this frame
    pub fn finish_frame(&mut self, active_keys: &[String]) {
        if let Some(kitty) = self.kitty.as_mut() {
            if let Err(e) = kitty.end_frame(active_keys) {
                tracing::error!("Failed to prune stale images: {}", e);
            }
        }
    }

    pub fn clear_all(&mut self) {
        if let Some(kitty) = self.kitty.as_mut() {
            if let Err(e) = kitty.clear_all() {
                tracing::error!("Failed to clear images: {}", e);
            }
        }
    }
}

impl Drop for ImageRenderer {
    fn drop(&mut self) {
        self.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_renderer_is_inactive() {
        let renderer = ImageRenderer::new(false);
        assert_eq!(renderer.backend(), RenderBackend::Disabled);
        assert!(!renderer.is_active());
    }
}
