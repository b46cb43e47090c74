use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            marquee: MarqueeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the content backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upload directory prefix for certificate images served by the backend
    #[serde(default = "default_uploads_path")]
    pub uploads_path: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Certificate poll interval in seconds (0 disables background refresh)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            uploads_path: default_uploads_path(),
            request_timeout_secs: default_timeout(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Animation tick in milliseconds (one marquee step per tick)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Typewriter banner reveal interval in milliseconds per character
    #[serde(default = "default_typing_interval")]
    pub typing_interval_ms: u64,
    /// Banner tagline revealed by the typewriter effect
    #[serde(default = "default_tagline")]
    pub tagline: String,
    /// Terminal width at which the placement board scrolls vertically
    #[serde(default = "default_wide_cutoff")]
    pub wide_cutoff_cols: u16,
    /// Render certificate and placement images (text-only when false)
    #[serde(default = "default_show_images")]
    pub show_images: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            typing_interval_ms: default_typing_interval(),
            tagline: default_tagline(),
            wide_cutoff_cols: default_wide_cutoff(),
            show_images: default_show_images(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Certificate wall speed in columns per tick
    #[serde(default = "default_cert_speed")]
    pub certificates: f64,
    /// Training strip speed in columns per tick
    #[serde(default = "default_training_speed")]
    pub trainings: f64,
    /// Placement board speed in rows (or columns) per tick
    #[serde(default = "default_placement_speed")]
    pub placements: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            certificates: default_cert_speed(),
            trainings: default_training_speed(),
            placements: default_placement_speed(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://mentoresolutions-devops-backend.vercel.app".to_string()
}

fn default_uploads_path() -> String {
    "/uploads".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_refresh_interval() -> u64 {
    10
}

fn default_tick_rate() -> u64 {
    33 // ~30 fps
}

fn default_typing_interval() -> u64 {
    50
}

fn default_tagline() -> String {
    "Learn. Build. Get Placed.".to_string()
}

fn default_wide_cutoff() -> u16 {
    100
}

fn default_show_images() -> bool {
    true
}

fn default_cert_speed() -> f64 {
    1.0
}

fn default_training_speed() -> f64 {
    1.5
}

fn default_placement_speed() -> f64 {
    1.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vitrine/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vitrine")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.refresh_interval_secs, 10);
        assert_eq!(config.api.uploads_path, "/uploads");
        assert_eq!(config.ui.tick_rate_ms, 33);
        assert_eq!(config.ui.typing_interval_ms, 50);
        assert!(config.ui.show_images);
        assert!(config.marquee.trainings > config.marquee.certificates);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:3000"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.wide_cutoff_cols, 100);
    }
}
