use crate::config::NavbarConfig;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavbarMode {
    Translucent,
    Solid,
}

impl NavbarMode {
    pub fn for_scroll(scroll_y: f64, cfg: &NavbarConfig) -> Self {
        if scroll_y > cfg.solid_threshold_px {
            NavbarMode::Solid
        } else {
            NavbarMode::Translucent
        }
    }

    pub fn style(self, cfg: &NavbarConfig) -> NavbarStyle<'_> {
        match self {
            NavbarMode::Solid => NavbarStyle {
                background: &cfg.solid_background,
                box_shadow: &cfg.solid_shadow,
            },
            NavbarMode::Translucent => NavbarStyle {
                background: &cfg.translucent_background,
                box_shadow: &cfg.translucent_shadow,
            },
        }
    }
}

/// Inline style values for the navbar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavbarStyle<'a> {
    pub background: &'a str,
    pub box_shadow: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let cfg = NavbarConfig::default();
        assert_eq!(NavbarMode::for_scroll(0.0, &cfg), NavbarMode::Translucent);
        assert_eq!(NavbarMode::for_scroll(100.0, &cfg), NavbarMode::Translucent);
        assert_eq!(NavbarMode::for_scroll(100.5, &cfg), NavbarMode::Solid);
    }

    #[test]
    fn styles_come_from_config() {
        let cfg = NavbarConfig::default();
        let solid = NavbarMode::Solid.style(&cfg);
        assert_eq!(solid.background, "rgba(10, 14, 39, 0.95)");
        assert_eq!(solid.box_shadow, "0 4px 20px rgba(0, 0, 0, 0.3)");
        assert_eq!(NavbarMode::Translucent.style(&cfg).box_shadow, "none");
    }
}
