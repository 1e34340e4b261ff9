use crate::config::RevealConfig;

/// Inline style a revealed element receives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RevealStyle<'a> {
    pub opacity: &'a str,
    pub animation: &'a str,
}

pub fn reveal_style(cfg: &RevealConfig) -> RevealStyle<'_> {
    RevealStyle {
        opacity: "1",
        animation: &cfg.animation,
    }
}

/// Outcome of an intersection notification for a reveal target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RevealAction {
    /// Apply the reveal style and stop observing the element.
    Reveal,
    Ignore,
}

impl RevealAction {
    pub fn for_entry(is_intersecting: bool) -> Self {
        if is_intersecting {
            RevealAction::Reveal
        } else {
            RevealAction::Ignore
        }
    }
}

/// Source to swap in for a lazy image, taken from its `data-src`.
///
/// Empty values are treated as missing so the image keeps being observed.
pub fn lazy_source(is_intersecting: bool, data_src: Option<&str>) -> Option<&str> {
    if !is_intersecting {
        return None;
    }
    data_src.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_intersecting_entries_reveal() {
        assert_eq!(RevealAction::for_entry(true), RevealAction::Reveal);
        assert_eq!(RevealAction::for_entry(false), RevealAction::Ignore);
        let cfg = RevealConfig::default();
        assert_eq!(
            reveal_style(&cfg),
            RevealStyle {
                opacity: "1",
                animation: "fadeInUp 0.6s ease-out forwards",
            }
        );
    }

    #[test]
    fn lazy_source_needs_intersection_and_value() {
        assert_eq!(lazy_source(true, Some("a.webp")), Some("a.webp"));
        assert_eq!(lazy_source(false, Some("a.webp")), None);
        assert_eq!(lazy_source(true, Some("")), None);
        assert_eq!(lazy_source(true, None), None);
    }
}
