/// Everything the page needs to show for one carousel state.
///
/// Computed purely from `(index, len, frame width)`, so rendering the same
/// state twice yields the same frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Horizontal track offset in CSS pixels (zero or negative).
    pub offset_px: f64,
    /// Indicator that should carry the active class, `None` when empty.
    pub active_indicator: Option<usize>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl RenderFrame {
    pub fn compute(index: usize, len: usize, frame_width: f64) -> Self {
        let width = if frame_width.is_finite() {
            frame_width.max(0.0)
        } else {
            0.0
        };
        Self {
            // `0.0 - x` rather than `-x` so slide 0 renders as `0px`, not `-0px`.
            offset_px: 0.0 - index as f64 * width,
            active_indicator: (index < len).then_some(index),
            previous_disabled: index == 0,
            next_disabled: len == 0 || index == len - 1,
        }
    }

    /// CSS `transform` value for the slide track.
    pub fn transform(&self) -> String {
        format!("translateX({}px)", self.offset_px)
    }

    pub fn is_indicator_active(&self, indicator: usize) -> bool {
        self.active_indicator == Some(indicator)
    }
}

/// Indicator handles tagged with the slide each one stands for.
///
/// A view may fail to create some indicators, so a handle's position in the
/// list is not its slide index.
#[derive(Debug)]
pub struct Indicators<E> {
    items: Vec<(usize, E)>,
}

impl<E> Default for Indicators<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E> Indicators<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slide: usize, handle: E) {
        self.items.push((slide, handle));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = &E> {
        self.items.iter().map(|(_, handle)| handle)
    }

    /// Each handle paired with whether `frame` marks its slide active.
    pub fn states(&self, frame: &RenderFrame) -> impl Iterator<Item = (&E, bool)> {
        let active = frame.active_indicator;
        self.items
            .iter()
            .map(move |(slide, handle)| (handle, active == Some(*slide)))
    }
}

/// Rendering seam between the controller and the page.
pub trait CarouselView {
    /// Number of slides present when the carousel was wired. Read once.
    fn slide_count(&self) -> usize;

    /// Current width of the frame that clips the track.
    fn frame_width(&self) -> f64;

    /// Creates `count` indicator controls, in slide order.
    fn build_indicators(&mut self, count: usize);

    fn apply(&mut self, frame: &RenderFrame);
}

#[cfg(test)]
mod tests {
    use super::{Indicators, RenderFrame};
    use pretty_assertions::assert_eq;

    #[test]
    fn first_slide_has_no_offset() {
        let f = RenderFrame::compute(0, 3, 400.0);
        assert_eq!(f.transform(), "translateX(0px)");
        assert!(f.previous_disabled);
        assert!(!f.next_disabled);
    }

    #[test]
    fn offset_scales_with_measured_width() {
        let f = RenderFrame::compute(2, 3, 320.5);
        assert_eq!(f.offset_px, -641.0);
        assert_eq!(f.transform(), "translateX(-641px)");
        assert!(f.next_disabled);
        assert!(f.is_indicator_active(2));
        assert!(!f.is_indicator_active(1));
    }

    #[test]
    fn empty_carousel_disables_both_controls() {
        let f = RenderFrame::compute(0, 0, 400.0);
        assert_eq!(
            f,
            RenderFrame {
                offset_px: 0.0,
                active_indicator: None,
                previous_disabled: true,
                next_disabled: true,
            }
        );
    }

    #[test]
    fn garbage_width_renders_flat() {
        let f = RenderFrame::compute(1, 3, f64::NAN);
        assert_eq!(f.offset_px, 0.0);
    }

    #[test]
    fn indicator_state_follows_slide_not_position() {
        let mut dots = Indicators::new();
        // Slide 1 failed to build.
        dots.push(0, "dot-0");
        dots.push(2, "dot-2");

        let frame = RenderFrame::compute(2, 3, 400.0);
        let states: Vec<_> = dots.states(&frame).map(|(d, on)| (*d, on)).collect();
        assert_eq!(states, vec![("dot-0", false), ("dot-2", true)]);

        let frame = RenderFrame::compute(1, 3, 400.0);
        assert!(dots.states(&frame).all(|(_, on)| !on));
    }
}
