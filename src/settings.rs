//! Page settings
//!
//! Read once at startup from an inline JSON block on the page
//! (`<script id="ambient-settings" type="application/json">`). Never written
//! back.

use serde::{Deserialize, Serialize};

use crate::ambient::effects::scaled_count;
use crate::ambient::{EffectConfig, EffectKind};
use crate::consts::GALLERY_BURST_COUNT;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium", alias = "med")]
    Medium,
    #[default]
    #[serde(alias = "high")]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Fraction of each effect's preset particle count
    pub fn density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.3,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle density preset
    pub quality: QualityPreset,
    /// RNG seed; random per page load when absent
    pub seed: Option<u64>,
    /// Effects to skip even when their container exists
    pub disabled_effects: Vec<EffectKind>,
    /// Hero parallax on scroll
    pub parallax: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            seed: None,
            disabled_effects: Vec::new(),
            parallax: true,
        }
    }
}

impl Settings {
    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        !self.disabled_effects.contains(&kind)
    }

    /// Preset config for `kind` with the density applied, or `None` if disabled
    pub fn effect_config(&self, kind: EffectKind) -> Option<EffectConfig> {
        self.is_enabled(kind)
            .then(|| kind.config().with_density(self.quality.density()))
    }

    /// Gallery petals added per burst, scaled like every other population
    pub fn gallery_burst_count(&self) -> usize {
        scaled_count(GALLERY_BURST_COUNT, self.quality.density())
    }

    /// Parse page JSON; falls back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    /// Element id of the inline settings block
    const ELEMENT_ID: &'static str = "ambient-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => {
                log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No page on native, #{} not read", Self::ELEMENT_ID);
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_preset_counts() {
        let settings = Settings::default();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(
            settings.effect_config(EffectKind::Rain).map(|c| c.count),
            Some(50)
        );
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"quality":"Low","disabled_effects":["rain"]}"#);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.parallax);
        assert!(settings.effect_config(EffectKind::Rain).is_none());
        assert_eq!(
            settings.effect_config(EffectKind::Sakura).map(|c| c.count),
            Some(9)
        );
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
        assert_eq!(Settings::from_json(r#"{"quality":"Ultra"}"#), Settings::default());
    }

    #[test]
    fn test_seed_roundtrip() {
        let settings = Settings::from_json(r#"{"seed":42}"#);
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_lowercase_quality_keeps_rest_of_block() {
        let settings =
            Settings::from_json(r#"{"quality":"low","seed":7,"disabled_effects":["rain"]}"#);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.is_enabled(EffectKind::Rain));

        let med = Settings::from_json(r#"{"quality":"med"}"#);
        assert_eq!(med.quality, QualityPreset::Medium);
        assert_eq!(Settings::from_json(r#"{"quality":"high"}"#).quality, QualityPreset::High);
    }

    #[test]
    fn test_gallery_burst_follows_density() {
        let low = Settings::from_json(r#"{"quality":"low"}"#);
        assert_eq!(low.gallery_burst_count(), 5);
        let medium = Settings::from_json(r#"{"quality":"Medium"}"#);
        assert_eq!(medium.gallery_burst_count(), 9);
        assert_eq!(Settings::default().gallery_burst_count(), 15);
    }
}
