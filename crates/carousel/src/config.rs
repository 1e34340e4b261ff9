use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAdvanceConfig {
    pub enabled: bool,
    pub interval_ms: u64,
}

impl Default for AutoAdvanceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: DEFAULT_AUTO_ADVANCE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Quiet window after the last resize event before re-rendering.
    pub resize_debounce_ms: u64,
    pub auto_advance: AutoAdvanceConfig,
    /// CSS opacity for a navigation control that cannot move further.
    pub disabled_opacity: String,
    pub enabled_opacity: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            auto_advance: AutoAdvanceConfig::default(),
            disabled_opacity: "0.5".to_string(),
            enabled_opacity: "1".to_string(),
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.resize_debounce_ms == 0 {
            return Err(CarouselError::InvalidConfig(
                "resize_debounce_ms must be positive",
            ));
        }
        if self.auto_advance.interval_ms == 0 {
            return Err(CarouselError::InvalidConfig(
                "auto_advance.interval_ms must be positive",
            ));
        }
        Ok(())
    }

    pub fn control_opacity(&self, disabled: bool) -> &str {
        if disabled {
            &self.disabled_opacity
        } else {
            &self.enabled_opacity
        }
    }
}
