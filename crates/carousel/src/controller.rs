use foundation::time::Millis;
use runtime::{Debouncer, Fired, Metrics, TimerId, TimerQueue};
use tracing::debug;

use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::input::NavKey;
use crate::view::{CarouselView, RenderFrame};

pub const METRIC_RENDERS: &str = "carousel.renders";
pub const METRIC_NAVIGATIONS: &str = "carousel.navigations";
pub const METRIC_RESIZE_RENDERS: &str = "carousel.resize_renders";
pub const METRIC_AUTO_ADVANCE_TICKS: &str = "carousel.auto_advance_ticks";

/// Timer payloads the carousel schedules on the shared queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarouselTimer {
    ResizeSettled,
    AutoAdvance,
}

/// Slide index state plus the timers that drive it.
///
/// `index` is always `< len` when `len > 0` and `0` otherwise. Navigation
/// past either end is a no-op; only auto-advance wraps.
#[derive(Debug)]
pub struct Carousel<V: CarouselView> {
    view: V,
    config: CarouselConfig,
    len: usize,
    index: usize,
    initialized: bool,
    resize: Debouncer,
    auto_advance: Option<TimerId>,
    metrics: Metrics,
}

impl<V: CarouselView> Carousel<V> {
    pub fn new(view: V, config: CarouselConfig) -> Self {
        let len = view.slide_count();
        let resize = Debouncer::new(Millis(config.resize_debounce_ms));
        Self {
            view,
            config,
            len,
            index: 0,
            initialized: false,
            resize,
            auto_advance: None,
            metrics: Metrics::new(),
        }
    }

    /// Builds indicators, arms auto-advance if configured and performs the
    /// initial render. Calling it again is a no-op.
    pub fn initialize(&mut self, now: Millis, timers: &mut TimerQueue<CarouselTimer>) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.view.build_indicators(self.len);
        if self.config.auto_advance.enabled {
            self.start_auto_advance(now, timers);
        }
        debug!(slides = self.len, "carousel initialized");
        self.render();
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn auto_advance_active(&self) -> bool {
        self.auto_advance.is_some()
    }

    /// Moves one slide back. Returns `false` at the first slide.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.navigated();
        true
    }

    /// Moves one slide forward. Returns `false` at the last slide.
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.len {
            return false;
        }
        self.index += 1;
        self.navigated();
        true
    }

    /// Jumps to `target`. Out-of-range targets leave the state untouched.
    pub fn go_to(&mut self, target: usize) -> Result<(), CarouselError> {
        if target >= self.len {
            return Err(CarouselError::OutOfRange {
                index: target,
                len: self.len,
            });
        }
        self.index = target;
        self.navigated();
        Ok(())
    }

    /// Handles a global `keydown`. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match NavKey::from_key(key) {
            Some(NavKey::Left) => {
                self.previous();
                true
            }
            Some(NavKey::Right) => {
                self.next();
                true
            }
            None => false,
        }
    }

    /// Records a viewport resize; the render happens once the burst settles.
    pub fn on_resize(&mut self, now: Millis, timers: &mut TimerQueue<CarouselTimer>) {
        self.resize.trigger(timers, now, CarouselTimer::ResizeSettled);
    }

    /// Dispatches a fired carousel timer. Stale timers are ignored.
    pub fn on_timer(&mut self, fired: &Fired<CarouselTimer>) {
        match fired.payload {
            CarouselTimer::ResizeSettled => {
                if self.resize.settle(fired.id) {
                    self.metrics.inc(METRIC_RESIZE_RENDERS);
                    self.render();
                }
            }
            CarouselTimer::AutoAdvance => {
                if self.auto_advance == Some(fired.id) {
                    self.metrics.inc(METRIC_AUTO_ADVANCE_TICKS);
                    self.advance_wrapping();
                }
            }
        }
    }

    /// Turns auto-advance on or off at runtime.
    pub fn set_auto_advance(
        &mut self,
        enabled: bool,
        now: Millis,
        timers: &mut TimerQueue<CarouselTimer>,
    ) {
        self.config.auto_advance.enabled = enabled;
        if enabled {
            self.start_auto_advance(now, timers);
        } else {
            self.stop_auto_advance(timers);
        }
    }

    /// Cancels every pending carousel timer.
    pub fn teardown(&mut self, timers: &mut TimerQueue<CarouselTimer>) {
        self.stop_auto_advance(timers);
        self.resize.cancel(timers);
        debug!("carousel torn down");
    }

    /// Recomputes the frame from the current state and hands it to the view.
    pub fn render(&mut self) -> RenderFrame {
        let frame = RenderFrame::compute(self.index, self.len, self.view.frame_width());
        self.view.apply(&frame);
        self.metrics.inc(METRIC_RENDERS);
        frame
    }

    fn navigated(&mut self) {
        self.metrics.inc(METRIC_NAVIGATIONS);
        debug!(index = self.index, len = self.len, "carousel navigated");
        self.render();
    }

    fn advance_wrapping(&mut self) {
        if self.is_empty() {
            return;
        }
        if !self.next() {
            self.index = 0;
            self.navigated();
        }
    }

    fn start_auto_advance(&mut self, now: Millis, timers: &mut TimerQueue<CarouselTimer>) {
        if self.auto_advance.is_some() || self.is_empty() {
            return;
        }
        let period = Millis(self.config.auto_advance.interval_ms);
        let id = timers.schedule_repeating(now, period, CarouselTimer::AutoAdvance);
        self.auto_advance = Some(id);
    }

    fn stop_auto_advance(&mut self, timers: &mut TimerQueue<CarouselTimer>) {
        if let Some(id) = self.auto_advance.take() {
            timers.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AutoAdvanceConfig;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct RecordingView {
        slides: usize,
        width: f64,
        indicators: Option<usize>,
        frames: Vec<RenderFrame>,
    }

    impl RecordingView {
        fn new(slides: usize, width: f64) -> Self {
            Self {
                slides,
                width,
                ..Self::default()
            }
        }
    }

    impl CarouselView for RecordingView {
        fn slide_count(&self) -> usize {
            self.slides
        }

        fn frame_width(&self) -> f64 {
            self.width
        }

        fn build_indicators(&mut self, count: usize) {
            self.indicators = Some(count);
        }

        fn apply(&mut self, frame: &RenderFrame) {
            self.frames.push(frame.clone());
        }
    }

    fn carousel(slides: usize) -> (Carousel<RecordingView>, TimerQueue<CarouselTimer>) {
        carousel_with(slides, CarouselConfig::default())
    }

    fn carousel_with(
        slides: usize,
        config: CarouselConfig,
    ) -> (Carousel<RecordingView>, TimerQueue<CarouselTimer>) {
        let mut timers = TimerQueue::new();
        let mut c = Carousel::new(RecordingView::new(slides, 400.0), config);
        c.initialize(Millis(0), &mut timers);
        (c, timers)
    }

    fn last_frame(c: &Carousel<RecordingView>) -> &RenderFrame {
        c.view().frames.last().unwrap()
    }

    fn pump(c: &mut Carousel<RecordingView>, timers: &mut TimerQueue<CarouselTimer>, now: u64) {
        for fired in timers.pop_due(Millis(now)) {
            c.on_timer(&fired);
        }
    }

    #[test]
    fn initialize_builds_indicators_and_renders_once() {
        let (c, _) = carousel(4);
        assert_eq!(c.view().indicators, Some(4));
        assert_eq!(c.view().frames.len(), 1);
        assert_eq!(last_frame(&c).active_indicator, Some(0));
        assert!(last_frame(&c).previous_disabled);
    }

    #[test]
    fn initialize_is_idempotent() {
        let (mut c, mut timers) = carousel(2);
        c.initialize(Millis(10), &mut timers);
        assert_eq!(c.view().frames.len(), 1);
    }

    #[test]
    fn three_slide_walkthrough() {
        let (mut c, _) = carousel(3);

        assert!(c.next());
        assert_eq!(c.index(), 1);
        let f = last_frame(&c);
        assert_eq!(f.active_indicator, Some(1));
        assert!(!f.previous_disabled && !f.next_disabled);
        assert_eq!(f.transform(), "translateX(-400px)");

        assert!(c.next());
        assert_eq!(c.index(), 2);
        assert_eq!(last_frame(&c).active_indicator, Some(2));
        assert!(last_frame(&c).next_disabled);

        assert!(c.previous());
        assert_eq!(c.index(), 1);

        c.go_to(0).unwrap();
        assert_eq!(c.index(), 0);
        assert!(last_frame(&c).previous_disabled);
        assert!(!last_frame(&c).next_disabled);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let (mut c, _) = carousel(2);
        let renders = c.metrics().counter(METRIC_RENDERS);
        assert!(!c.previous());
        assert_eq!(c.index(), 0);
        assert!(c.next());
        assert!(!c.next());
        assert_eq!(c.index(), 1);
        // Only the successful move rendered.
        assert_eq!(c.metrics().counter(METRIC_RENDERS), renders + 1);
    }

    #[test]
    fn out_of_range_jump_is_rejected() {
        let (mut c, _) = carousel(3);
        c.go_to(1).unwrap();
        assert_eq!(
            c.go_to(3),
            Err(CarouselError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let (mut c, mut timers) = carousel(0);
        assert_eq!(c.view().indicators, Some(0));
        let f = last_frame(&c);
        assert!(f.previous_disabled && f.next_disabled);
        assert_eq!(f.active_indicator, None);

        assert!(!c.next());
        assert!(!c.previous());
        assert!(c.go_to(0).is_err());
        assert_eq!(c.index(), 0);

        c.set_auto_advance(true, Millis(0), &mut timers);
        assert!(!c.auto_advance_active());
        assert!(timers.is_empty());
    }

    #[test]
    fn index_never_leaves_bounds() {
        for slides in 1..=6usize {
            let (mut c, _) = carousel(slides);
            // Small LCG so the walk is deterministic but irregular.
            let mut seed: u32 = 0x2545_f491 ^ slides as u32;
            for _ in 0..200 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                if seed & 0x100 == 0 {
                    c.previous();
                } else {
                    c.next();
                }
                assert!(c.index() < slides);
                let f = last_frame(&c);
                assert_eq!(f.previous_disabled, c.index() == 0);
                assert_eq!(f.next_disabled, c.index() == slides - 1);
            }
        }
    }

    #[test]
    fn jump_marks_exactly_one_indicator() {
        let (mut c, _) = carousel(5);
        c.go_to(3).unwrap();
        let f = last_frame(&c).clone();
        let active: Vec<usize> = (0..5).filter(|i| f.is_indicator_active(*i)).collect();
        assert_eq!(active, vec![3]);
    }

    #[test]
    fn render_is_idempotent() {
        let (mut c, _) = carousel(3);
        c.next();
        let a = c.render();
        let b = c.render();
        assert_eq!(a, b);
    }

    #[test]
    fn keyboard_arrows_navigate() {
        let (mut c, _) = carousel(3);
        assert!(c.handle_key("ArrowRight"));
        assert_eq!(c.index(), 1);
        assert!(c.handle_key("ArrowLeft"));
        assert_eq!(c.index(), 0);
        assert!(!c.handle_key("Enter"));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn resize_burst_renders_once_after_quiet_window() {
        let (mut c, mut timers) = carousel(3);
        let before = c.metrics().counter(METRIC_RENDERS);

        for t in (0..100).step_by(10) {
            c.on_resize(Millis(t), &mut timers);
        }
        pump(&mut c, &mut timers, 300);
        assert_eq!(c.metrics().counter(METRIC_RENDERS), before);

        pump(&mut c, &mut timers, 340);
        assert_eq!(c.metrics().counter(METRIC_RENDERS), before + 1);
        assert_eq!(c.metrics().counter(METRIC_RESIZE_RENDERS), 1);
        assert!(timers.is_empty());
    }

    #[test]
    fn resize_render_uses_new_width() {
        let (mut c, mut timers) = carousel(3);
        c.next();
        c.view.width = 250.0;
        c.on_resize(Millis(0), &mut timers);
        pump(&mut c, &mut timers, 250);
        assert_eq!(last_frame(&c).offset_px, -250.0);
    }

    #[test]
    fn auto_advance_wraps_to_first_slide() {
        let config = CarouselConfig {
            auto_advance: AutoAdvanceConfig {
                enabled: true,
                interval_ms: 1_000,
            },
            ..CarouselConfig::default()
        };
        let (mut c, mut timers) = carousel_with(3, config);
        assert!(c.auto_advance_active());

        let mut seen = Vec::new();
        for tick in 1..=4 {
            pump(&mut c, &mut timers, tick * 1_000);
            seen.push(c.index());
        }
        assert_eq!(seen, vec![1, 2, 0, 1]);
        assert_eq!(c.metrics().counter(METRIC_AUTO_ADVANCE_TICKS), 4);
    }

    #[test]
    fn late_pump_advances_a_single_slide() {
        let config = CarouselConfig {
            auto_advance: AutoAdvanceConfig {
                enabled: true,
                interval_ms: 5_000,
            },
            ..CarouselConfig::default()
        };
        let (mut c, mut timers) = carousel_with(3, config);
        let renders_before = c.metrics().counter(METRIC_RENDERS);

        pump(&mut c, &mut timers, 600_000);

        assert_eq!(c.index(), 1);
        assert_eq!(c.metrics().counter(METRIC_AUTO_ADVANCE_TICKS), 1);
        assert_eq!(c.metrics().counter(METRIC_RENDERS), renders_before + 1);
        assert_eq!(timers.next_deadline(), Some(Millis(605_000)));
    }

    #[test]
    fn auto_advance_is_off_by_default() {
        let (mut c, mut timers) = carousel(3);
        assert!(!c.auto_advance_active());
        pump(&mut c, &mut timers, 60_000);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn teardown_cancels_all_timers() {
        let (mut c, mut timers) = carousel(3);
        c.set_auto_advance(true, Millis(0), &mut timers);
        c.on_resize(Millis(0), &mut timers);
        assert_eq!(timers.len(), 2);

        c.teardown(&mut timers);
        assert!(timers.is_empty());
        assert!(!c.auto_advance_active());
        pump(&mut c, &mut timers, 60_000);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn stale_auto_advance_tick_is_ignored() {
        let (mut c, mut timers) = carousel(3);
        c.set_auto_advance(true, Millis(0), &mut timers);
        let fired = timers.pop_due(Millis(5_000));
        c.set_auto_advance(false, Millis(5_000), &mut timers);
        for f in &fired {
            c.on_timer(f);
        }
        assert_eq!(c.index(), 0);
    }
}
