//! Engine configuration loaded from review_engine.toml and environment variables

use serde::{Deserialize, Serialize};

/// Tunable knobs for the response engine.
///
/// The SEO density thresholds mirror the values the marketing side has been
/// using, but nobody has calibrated them against real engagement data, so
/// they stay configurable rather than baked in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub seo: SeoConfig,
    /// Character window (each side of a keyword hit) used to resolve
    /// topic-level sentiment.
    #[serde(default = "default_topic_window")]
    pub topic_window: usize,
    #[serde(default = "default_reviewer_name")]
    pub default_reviewer_name: String,
    #[serde(default = "default_service_name")]
    pub default_service_name: String,
}

/// Keyword-density scoring thresholds, expressed as fractions of total words
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeoConfig {
    /// Below this density the response scores as fully compliant
    #[serde(default = "default_partial_density")]
    pub partial_density: f32,
    /// At or above this density the response is treated as keyword-stuffed
    #[serde(default = "default_stuffed_density")]
    pub stuffed_density: f32,
}

fn default_partial_density() -> f32 {
    0.10
}

fn default_stuffed_density() -> f32 {
    0.15
}

fn default_topic_window() -> usize {
    30
}

fn default_reviewer_name() -> String {
    "Valued Customer".to_string()
}

fn default_service_name() -> String {
    "our services".to_string()
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            partial_density: default_partial_density(),
            stuffed_density: default_stuffed_density(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seo: SeoConfig::default(),
            topic_window: default_topic_window(),
            default_reviewer_name: default_reviewer_name(),
            default_service_name: default_service_name(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `review_engine.toml` (if present) with
    /// `REVIEW_ENGINE_*` environment overrides applied on top.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::fs::read_to_string("review_engine.toml") {
            Ok(raw) => toml::from_str(&raw)?,
            Err(_) => Self::default(),
        };

        if let Ok(v) = std::env::var("REVIEW_ENGINE_SEO_PARTIAL") {
            config.seo.partial_density = v.parse()?;
        }
        if let Ok(v) = std::env::var("REVIEW_ENGINE_SEO_STUFFED") {
            config.seo.stuffed_density = v.parse()?;
        }
        if let Ok(v) = std::env::var("REVIEW_ENGINE_TOPIC_WINDOW") {
            config.topic_window = v.parse()?;
        }

        Ok(config)
    }
}
