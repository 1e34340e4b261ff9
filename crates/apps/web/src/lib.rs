use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use carousel::{Carousel, CarouselTimer};
use console_error_panic_hook::set_once;
use foundation::time::Millis;
use landing::{PageConfig, PageContext, RippleId};
use runtime::TimerQueue;
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

mod dom;
mod glue;
mod logging;
mod pump;

use dom::DomCarouselView;
use glue::{Listener, Observer};
use pump::{TimerPump, now};

// Guard against double start (can happen when the module is instantiated twice).
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Id of an optional `<script type="application/json">` holding a `PageConfig`.
const CONFIG_ELEMENT_ID: &str = "landing-config";

pub(crate) struct PageState {
    pub window: Window,
    pub document: Document,
    pub context: PageContext,
    pub carousel: Option<Carousel<DomCarouselView>>,
    pub carousel_timers: TimerQueue<CarouselTimer>,
    pub ripples: BTreeMap<RippleId, Element>,
    pub navbar: Option<HtmlElement>,
    pump: TimerPump,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
}

impl PageState {
    fn next_deadline(&self) -> Option<Millis> {
        [
            self.carousel_timers.next_deadline(),
            self.context.next_ripple_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Re-arms the browser timeout after anything that may have scheduled.
    pub fn rearm(&mut self) {
        let deadline = self.next_deadline();
        self.pump.arm(&self.window, deadline, now());
    }

    fn teardown(&mut self) {
        if let Some(c) = self.carousel.as_mut() {
            c.teardown(&mut self.carousel_timers);
        }
        self.carousel = None;
        self.pump.disarm(&self.window);
        self.listeners.clear();
        self.observers.clear();
        for ripple in self.ripples.values() {
            ripple.remove();
        }
        self.ripples.clear();
    }
}

thread_local! {
    static STATE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

/// Runs `f` against the booted page. Returns `R::default()` before boot, after
/// teardown, or if the state is already borrowed further up the stack.
pub(crate) fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&mut PageState) -> R,
    R: Default,
{
    STATE
        .try_with(|cell| match cell.try_borrow_mut() {
            Ok(mut guard) => guard.as_mut().map(f).unwrap_or_default(),
            Err(_) => R::default(),
        })
        .unwrap_or_default()
}

/// Delivers every due timer and re-arms the pump.
pub(crate) fn fire_timers() {
    with_state(|s| {
        s.pump.fired();
        let now = now();
        let fired = s.carousel_timers.pop_due(now);
        if let Some(c) = s.carousel.as_mut() {
            for timer in &fired {
                c.on_timer(timer);
            }
        }
        for id in s.context.expired_ripples(now) {
            if let Some(ripple) = s.ripples.remove(&id) {
                ripple.remove();
            }
        }
        s.rearm();
    });
}

pub(crate) fn go_to_slide(index: usize) {
    with_state(|s| {
        if let Some(c) = s.carousel.as_mut()
            && let Err(err) = c.go_to(index)
        {
            warn!("{err}");
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(err) = boot_from_page() {
                web_sys::console::error_1(&err);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        Ok(())
    } else {
        boot_from_page()
    }
}

/// Tears down any running page state and boots again with `json` as config.
///
/// `log_level` only takes effect on the first boot of the module; the global
/// subscriber cannot be replaced afterwards.
#[wasm_bindgen]
pub fn boot_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    boot(config)
}

fn boot_from_page() -> Result<(), JsValue> {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    let config = PageConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    boot(config)
}

fn boot(config: PageConfig) -> Result<(), JsValue> {
    logging::init(&config.log_level);
    teardown();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut context = PageContext::new(config);
    if let Some(css) = context.take_style_injection() {
        glue::inject_styles(&document, css);
    }

    let navbar = document
        .query_selector(&context.config().navbar.selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let observers = glue::install_observers(&window, &document, &context.config().reveal);

    let carousel_config = context.config().carousel.clone();
    let carousel = match DomCarouselView::from_document(&document, &carousel_config) {
        Ok(view) => Some(Carousel::new(view, carousel_config)),
        Err(err) => {
            warn!("carousel disabled: {err}");
            None
        }
    };

    let listeners = glue::install_bindings(&window, &document);

    STATE.with(|cell| {
        *cell.borrow_mut() = Some(PageState {
            window,
            document,
            context,
            carousel,
            carousel_timers: TimerQueue::new(),
            ripples: BTreeMap::new(),
            navbar,
            pump: TimerPump::new(),
            listeners,
            observers,
        });
    });

    with_state(|s| {
        if let Some(c) = s.carousel.as_mut() {
            c.initialize(now(), &mut s.carousel_timers);
        }
        s.rearm();
        info!(
            slides = s.carousel.as_ref().map(|c| c.len()).unwrap_or(0),
            listeners = s.listeners.len(),
            observers = s.observers.len(),
            "landing page ready"
        );
    });
    Ok(())
}

/// Removes every listener, observer and timer installed by the last boot.
#[wasm_bindgen]
pub fn teardown() {
    let previous = STATE
        .try_with(|cell| cell.try_borrow_mut().ok().and_then(|mut s| s.take()))
        .ok()
        .flatten();
    if let Some(mut state) = previous {
        state.teardown();
    }
}

#[wasm_bindgen]
pub fn carousel_next() -> bool {
    with_state(|s| s.carousel.as_mut().is_some_and(|c| c.next()))
}

#[wasm_bindgen]
pub fn carousel_previous() -> bool {
    with_state(|s| s.carousel.as_mut().is_some_and(|c| c.previous()))
}

#[wasm_bindgen]
pub fn carousel_go_to(index: usize) -> Result<(), JsValue> {
    match with_state(|s| s.carousel.as_mut().map(|c| c.go_to(index))) {
        Some(result) => result.map_err(|e| JsValue::from_str(&e.to_string())),
        None => Err(JsValue::from_str("carousel not initialized")),
    }
}

/// Current slide index, or `undefined` when no carousel is wired.
#[wasm_bindgen]
pub fn carousel_index() -> Option<u32> {
    with_state(|s| s.carousel.as_ref().map(|c| c.index() as u32))
}

#[wasm_bindgen]
pub fn carousel_set_auto_advance(enabled: bool) {
    with_state(|s| {
        if let Some(c) = s.carousel.as_mut() {
            c.set_auto_advance(enabled, now(), &mut s.carousel_timers);
        }
        s.rearm();
    });
}
