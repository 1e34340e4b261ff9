use crate::config::ScrollConfig;

/// Section id to scroll to when a call-to-action button is pressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    ScrollToPricing,
    ScrollToFeatures,
}

impl ButtonAction {
    /// Picks the action from the button's visible label.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains("Satın Al") || label.contains("Hemen Başla") {
            Some(ButtonAction::ScrollToPricing)
        } else if label.contains("Paketi İncele") {
            Some(ButtonAction::ScrollToFeatures)
        } else {
            None
        }
    }

    pub fn section_id(self) -> &'static str {
        match self {
            ButtonAction::ScrollToPricing => "pricing",
            ButtonAction::ScrollToFeatures => "features",
        }
    }
}

/// Returns the selector an in-page link points at, or `None` for a bare `#`
/// and for links that leave the page.
pub fn anchor_selector(href: &str) -> Option<&str> {
    if href == "#" || !href.starts_with('#') {
        None
    } else {
        Some(href)
    }
}

/// Scroll position for an anchor whose target sits at `element_top`.
pub fn anchor_scroll_top(href: &str, element_top: f64, cfg: &ScrollConfig) -> f64 {
    let extra = cfg
        .section_extra_offsets
        .get(href)
        .copied()
        .unwrap_or(0.0);
    element_top - cfg.navbar_offset_px + extra
}

/// Scroll position for a section reached through a button. Button targets
/// never get the per-anchor extra offset.
pub fn section_scroll_top(element_top: f64, cfg: &ScrollConfig) -> f64 {
    element_top - cfg.navbar_offset_px
}
