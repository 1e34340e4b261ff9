//! Browser side of the page bindings: resolves each [`Binding`] to DOM
//! targets, installs listeners, and applies the decisions made in `landing`.

use foundation::bounds::{Point, Rect};
use landing::{
    Binding, ButtonAction, Handler, RevealAction, RevealConfig, STYLE_MARKER_ATTR, Target,
    anchor_scroll_top, anchor_selector, lazy_source, page_bindings, reveal_style,
    section_scroll_top,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::pump::now;
use crate::with_state;

/// An installed event listener, removed again on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// An IntersectionObserver plus its callback, disconnected on drop.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn install_bindings(window: &Window, document: &Document) -> Vec<Listener> {
    let mut listeners = Vec::new();
    for binding in page_bindings() {
        for target in resolve_targets(window, document, &binding) {
            match listen(target, binding.event.as_str(), binding.handler) {
                Ok(listener) => listeners.push(listener),
                Err(err) => warn!(?binding, "failed to add listener: {:?}", err),
            }
        }
    }
    debug!(count = listeners.len(), "listeners installed");
    listeners
}

fn resolve_targets(window: &Window, document: &Document, binding: &Binding) -> Vec<EventTarget> {
    match binding.target {
        Target::Window => vec![window.clone().into()],
        Target::Document => vec![document.clone().into()],
        Target::Selector(selector) => select_all(document, selector)
            .into_iter()
            .map(Into::into)
            .collect(),
    }
}

fn listen(
    target: EventTarget,
    event: &'static str,
    handler: Handler,
) -> Result<Listener, JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| dispatch(handler, &event));
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    Ok(Listener {
        target,
        event,
        callback,
    })
}

pub fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            warn!(selector, "invalid selector: {:?}", err);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn dispatch(handler: Handler, event: &Event) {
    match handler {
        Handler::AnchorScroll => on_anchor_click(event),
        Handler::ButtonFeedback => on_button_click(event),
        Handler::NavbarScroll => on_scroll(),
        Handler::CarouselPrevious => with_state(|s| {
            if let Some(c) = s.carousel.as_mut() {
                c.previous();
            }
        }),
        Handler::CarouselNext => with_state(|s| {
            if let Some(c) = s.carousel.as_mut() {
                c.next();
            }
        }),
        Handler::CarouselKeys => {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                with_state(|s| {
                    if let Some(c) = s.carousel.as_mut() {
                        c.handle_key(&key);
                    }
                });
            }
        }
        Handler::CarouselResize => with_state(|s| {
            if let Some(c) = s.carousel.as_mut() {
                c.on_resize(now(), &mut s.carousel_timers);
            }
            s.rearm();
        }),
    }
}

fn current_element(event: &Event) -> Option<Element> {
    event.current_target()?.dyn_into::<Element>().ok()
}

fn offset_top(el: &Element) -> Option<f64> {
    el.dyn_ref::<HtmlElement>()
        .map(|html| f64::from(html.offset_top()))
}

fn scroll_smooth(top: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

fn on_anchor_click(event: &Event) {
    event.prevent_default();
    let Some(href) = current_element(event).and_then(|a| a.get_attribute("href")) else {
        return;
    };
    let Some(selector) = anchor_selector(&href) else {
        return;
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let target = match document.query_selector(selector) {
        Ok(Some(el)) => el,
        Ok(None) => return,
        Err(err) => {
            debug!(selector, "anchor is not a valid selector: {:?}", err);
            return;
        }
    };
    let Some(element_top) = offset_top(&target) else {
        return;
    };
    let top = with_state(|s| {
        Some(anchor_scroll_top(
            &href,
            element_top,
            &s.context.config().scroll,
        ))
    });
    if let Some(top) = top {
        scroll_smooth(top);
    }
}

fn on_button_click(event: &Event) {
    let Some(button) = current_element(event) else {
        return;
    };
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        let r = button.get_bounding_client_rect();
        let rect = Rect::new(r.left(), r.top(), r.width(), r.height());
        let click = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        spawn_ripple(&button, rect, click);
    }

    let Some(action) = button.text_content().as_deref().and_then(ButtonAction::from_label) else {
        return;
    };
    let Some(section) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(action.section_id()))
    else {
        return;
    };
    let Some(element_top) = offset_top(&section) else {
        return;
    };
    let top = with_state(|s| Some(section_scroll_top(element_top, &s.context.config().scroll)));
    if let Some(top) = top {
        scroll_smooth(top);
    }
}

fn spawn_ripple(button: &Element, rect: Rect, click: Point) {
    with_state(|s| {
        let spawn = s.context.spawn_ripple(rect, click, now());
        let span = match s.document.create_element("span") {
            Ok(span) => span,
            Err(err) => {
                warn!("failed to create ripple: {:?}", err);
                return;
            }
        };
        if let Some(html) = span.dyn_ref::<HtmlElement>() {
            let style = html.style();
            for (property, value) in spawn.geometry.style_properties() {
                let _ = style.set_property(property, &value);
            }
        }
        let _ = span.class_list().add_1(&s.context.config().ripple.class_name);
        if let Err(err) = button.append_child(&span) {
            warn!("failed to attach ripple: {:?}", err);
            return;
        }
        s.ripples.insert(spawn.id, span);
        s.rearm();
    });
}

fn on_scroll() {
    let Some(scroll_y) = web_sys::window().and_then(|w| w.scroll_y().ok()) else {
        return;
    };
    with_state(|s| {
        let Some(style) = s.context.on_scroll(scroll_y) else {
            return;
        };
        if let Some(navbar) = &s.navbar {
            let css = navbar.style();
            let _ = css.set_property("background", style.background);
            let _ = css.set_property("box-shadow", style.box_shadow);
        }
    });
}

/// Appends the stylesheet to `<head>` unless a previous boot already did.
pub fn inject_styles(document: &Document, css: &str) {
    let marker = format!("style[{STYLE_MARKER_ATTR}]");
    if matches!(document.query_selector(&marker), Ok(Some(_))) {
        return;
    }
    let Some(head) = document.head() else {
        warn!("document has no <head>; ripple styles not injected");
        return;
    };
    let result = document.create_element("style").and_then(|style| {
        style.set_attribute(STYLE_MARKER_ATTR, "")?;
        style.set_text_content(Some(css));
        head.append_child(&style)
    });
    if let Err(err) = result {
        warn!("failed to inject styles: {:?}", err);
    }
}

fn intersection_observer_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// Installs the reveal-on-scroll and lazy-image observers.
pub fn install_observers(
    window: &Window,
    document: &Document,
    cfg: &RevealConfig,
) -> Vec<Observer> {
    if !intersection_observer_supported(window) {
        debug!("IntersectionObserver unavailable; reveal and lazy images disabled");
        return Vec::new();
    }
    let mut observers = Vec::new();
    match reveal_observer(document, cfg) {
        Ok(observer) => observers.push(observer),
        Err(err) => warn!("reveal observer failed: {:?}", err),
    }
    if cfg.lazy_images {
        match lazy_image_observer(document) {
            Ok(observer) => observers.push(observer),
            Err(err) => warn!("lazy image observer failed: {:?}", err),
        }
    }
    observers
}

fn entries(list: &js_sys::Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    list.iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
}

fn reveal_observer(document: &Document, cfg: &RevealConfig) -> Result<Observer, JsValue> {
    let style = reveal_style(cfg);
    let opacity = style.opacity.to_string();
    let animation = style.animation.to_string();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |list: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries(&list) {
                if RevealAction::for_entry(entry.is_intersecting()) != RevealAction::Reveal {
                    continue;
                }
                let target = entry.target();
                if let Some(html) = target.dyn_ref::<HtmlElement>() {
                    let css = html.style();
                    let _ = css.set_property("opacity", &opacity);
                    let _ = css.set_property("animation", &animation);
                }
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(cfg.threshold));
    init.set_root_margin(&cfg.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    for el in select_all(document, &cfg.selector) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("opacity", &cfg.hidden_opacity);
        }
        observer.observe(&el);
    }
    Ok(Observer {
        observer,
        _callback: callback,
    })
}

fn lazy_image_observer(document: &Document) -> Result<Observer, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |list: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries(&list) {
                let target = entry.target();
                let Some(img) = target.dyn_ref::<HtmlImageElement>() else {
                    continue;
                };
                let data_src = img.get_attribute("data-src");
                if let Some(src) = lazy_source(entry.is_intersecting(), data_src.as_deref()) {
                    img.set_src(src);
                    let _ = img.remove_attribute("data-src");
                    observer.unobserve(&target);
                }
            }
        },
    );
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for img in select_all(document, "img[data-src]") {
        observer.observe(&img);
    }
    Ok(Observer {
        observer,
        _callback: callback,
    })
}
