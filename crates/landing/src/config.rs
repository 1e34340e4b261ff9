use std::collections::BTreeMap;

use carousel::{CarouselConfig, CarouselError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Height of the fixed navbar; scroll targets land this far below it.
    pub navbar_offset_px: f64,
    /// Extra distance for specific anchors, keyed by `href` (e.g. `#pricing`).
    pub section_extra_offsets: BTreeMap<String, f64>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        let mut section_extra_offsets = BTreeMap::new();
        section_extra_offsets.insert("#pricing".to_string(), 150.0);
        Self {
            navbar_offset_px: 80.0,
            section_extra_offsets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    /// Scroll offset above which the navbar turns solid.
    pub solid_threshold_px: f64,
    pub solid_background: String,
    pub solid_shadow: String,
    pub translucent_background: String,
    pub translucent_shadow: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar".to_string(),
            solid_threshold_px: 100.0,
            solid_background: "rgba(10, 14, 39, 0.95)".to_string(),
            solid_shadow: "0 4px 20px rgba(0, 0, 0, 0.3)".to_string(),
            translucent_background: "rgba(10, 14, 39, 0.8)".to_string(),
            translucent_shadow: "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub duration_ms: u64,
    pub class_name: String,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 600,
            class_name: "ripple".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    /// IntersectionObserver threshold, in `[0, 1]`.
    pub threshold: f64,
    pub root_margin: String,
    pub hidden_opacity: String,
    pub animation: String,
    pub lazy_images: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".feature-card, .testimonial-card, .pricing-card".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            hidden_opacity: "0".to_string(),
            animation: "fadeInUp 0.6s ease-out forwards".to_string(),
            lazy_images: true,
        }
    }
}

/// Whole-page configuration. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub navbar: NavbarConfig,
    pub ripple: RippleConfig,
    pub reveal: RevealConfig,
    /// `tracing` filter directive, e.g. `info` or `carousel=debug`.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            scroll: ScrollConfig::default(),
            navbar: NavbarConfig::default(),
            ripple: RippleConfig::default(),
            reveal: RevealConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PageConfig = if raw.trim().is_empty() {
            PageConfig::default()
        } else {
            serde_json::from_str(raw)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.carousel.validate()?;
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if !self.scroll.navbar_offset_px.is_finite() {
            return Err(ConfigError::Invalid(
                "scroll.navbar_offset_px must be finite".to_string(),
            ));
        }
        if self.ripple.duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "ripple.duration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_and_empty_object_are_defaults() {
        assert_eq!(PageConfig::from_json("").unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn nested_overrides_merge_with_defaults() {
        let cfg = PageConfig::from_json(
            r##"{"carousel":{"auto_advance":{"enabled":true}},"scroll":{"navbar_offset_px":64}}"##,
        )
        .unwrap();
        assert!(cfg.carousel.auto_advance.enabled);
        assert_eq!(cfg.carousel.resize_debounce_ms, 250);
        assert_eq!(cfg.scroll.navbar_offset_px, 64.0);
        // Overriding a struct replaces only the fields given.
        assert_eq!(cfg.scroll.section_extra_offsets.get("#pricing"), Some(&150.0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            PageConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = PageConfig::from_json(r#"{"reveal":{"threshold":1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn carousel_errors_pass_through() {
        let err = PageConfig::from_json(r#"{"carousel":{"resize_debounce_ms":0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Carousel(CarouselError::InvalidConfig(_))
        ));
    }
}
