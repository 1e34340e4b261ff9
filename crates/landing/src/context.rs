use foundation::bounds::{Point, Rect};
use foundation::time::Millis;
use runtime::{Fired, Metrics, TimerQueue};
use tracing::debug;

use crate::config::PageConfig;
use crate::navbar::{NavbarMode, NavbarStyle};
use crate::ripple::{RippleGeometry, RippleId};
use crate::styles::RIPPLE_CSS;

pub const METRIC_RIPPLES: &str = "page.ripples";
pub const METRIC_SCROLL_EVENTS: &str = "page.scroll_events";
pub const METRIC_NAVBAR_CHANGES: &str = "page.navbar_changes";

/// Page-lifetime state shared by the glue handlers.
///
/// One instance lives for the page; tests build fresh ones or call
/// [`PageContext::reset`].
#[derive(Debug)]
pub struct PageContext {
    config: PageConfig,
    last_scroll_y: f64,
    navbar_mode: Option<NavbarMode>,
    styles_injected: bool,
    next_ripple: u64,
    ripples: TimerQueue<RippleId>,
    metrics: Metrics,
}

/// A ripple to insert now and remove once its timer fires.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RippleSpawn {
    pub id: RippleId,
    pub geometry: RippleGeometry,
}

impl PageContext {
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            last_scroll_y: 0.0,
            navbar_mode: None,
            styles_injected: false,
            next_ripple: 0,
            ripples: TimerQueue::new(),
            metrics: Metrics::new(),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    /// Drops all page state but keeps the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Returns the stylesheet the first time it is called, `None` afterwards.
    pub fn take_style_injection(&mut self) -> Option<&'static str> {
        if self.styles_injected {
            return None;
        }
        self.styles_injected = true;
        Some(RIPPLE_CSS)
    }

    /// Records a scroll position and returns the navbar style to apply, or
    /// `None` if the navbar already looks right.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<NavbarStyle<'_>> {
        self.metrics.inc(METRIC_SCROLL_EVENTS);
        self.last_scroll_y = scroll_y;
        let mode = NavbarMode::for_scroll(scroll_y, &self.config.navbar);
        if self.navbar_mode == Some(mode) {
            return None;
        }
        self.navbar_mode = Some(mode);
        self.metrics.inc(METRIC_NAVBAR_CHANGES);
        debug!(?mode, scroll_y, "navbar mode changed");
        Some(mode.style(&self.config.navbar))
    }

    /// Computes a ripple for a click and schedules its removal.
    pub fn spawn_ripple(&mut self, button: Rect, click: Point, now: Millis) -> RippleSpawn {
        let id = RippleId(self.next_ripple);
        self.next_ripple = self.next_ripple.wrapping_add(1);
        let lifetime = Millis(self.config.ripple.duration_ms);
        self.ripples.schedule_once(now, lifetime, id);
        self.metrics.inc(METRIC_RIPPLES);
        RippleSpawn {
            id,
            geometry: RippleGeometry::from_click(button, click),
        }
    }

    pub fn next_ripple_deadline(&self) -> Option<Millis> {
        self.ripples.next_deadline()
    }

    /// Ripples whose lifetime ended at or before `now`.
    pub fn expired_ripples(&mut self, now: Millis) -> Vec<RippleId> {
        self.ripples
            .pop_due(now)
            .into_iter()
            .map(|Fired { payload, .. }| payload)
            .collect()
    }

    pub fn pending_ripples(&self) -> usize {
        self.ripples.len()
    }
}
