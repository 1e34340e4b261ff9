use carousel::{CarouselConfig, CarouselError, CarouselView, Indicators, RenderFrame};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

pub const TRACK_ID: &str = "carouselTrack";
pub const PREV_ID: &str = "prevBtn";
pub const NEXT_ID: &str = "nextBtn";
pub const DOTS_ID: &str = "carouselDots";
pub const SLIDE_SELECTOR: &str = ".testimonial-card";
pub const DOT_CLASS: &str = "carousel-dot";
pub const ACTIVE_CLASS: &str = "active";

/// An indicator button and the click listener it carries.
struct Dot {
    element: Element,
    callback: Closure<dyn FnMut(Event)>,
}

/// Carousel view backed by the page's pre-rendered markup.
pub struct DomCarouselView {
    document: Document,
    track: HtmlElement,
    frame: HtmlElement,
    prev: HtmlElement,
    next: HtmlElement,
    dots_host: Element,
    slide_count: usize,
    dots: Indicators<Dot>,
    config: CarouselConfig,
}

impl std::fmt::Debug for DomCarouselView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomCarouselView")
            .field("slide_count", &self.slide_count)
            .field("dots", &self.dots.len())
            .finish()
    }
}

impl DomCarouselView {
    /// Looks up every anchor the carousel needs. Any missing one is fatal for
    /// the carousel; the rest of the page keeps working.
    pub fn from_document(
        document: &Document,
        cfg: &CarouselConfig,
    ) -> Result<Self, CarouselError> {
        let track = html_by_id(document, TRACK_ID)?;
        let frame = track
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
            .ok_or(CarouselError::MissingElement("carouselTrack parent"))?;
        let prev = html_by_id(document, PREV_ID)?;
        let next = html_by_id(document, NEXT_ID)?;
        let dots_host = document
            .get_element_by_id(DOTS_ID)
            .ok_or(CarouselError::MissingElement(DOTS_ID))?;
        let slide_count = track
            .query_selector_all(SLIDE_SELECTOR)
            .map(|list| list.length() as usize)
            .unwrap_or(0);

        Ok(Self {
            document: document.clone(),
            track,
            frame,
            prev,
            next,
            dots_host,
            slide_count,
            dots: Indicators::new(),
            config: cfg.clone(),
        })
    }

    fn create_dot(&self, index: usize) -> Result<Dot, JsValue> {
        let dot = self.document.create_element("button")?;
        dot.class_list().add_1(DOT_CLASS)?;
        if index == 0 {
            dot.class_list().add_1(ACTIVE_CLASS)?;
        }
        dot.set_attribute("aria-label", &format!("Go to slide {}", index + 1))?;
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            crate::go_to_slide(index);
        });
        dot.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        self.dots_host.append_child(&dot)?;
        Ok(Dot {
            element: dot,
            callback,
        })
    }

    fn set_opacity(el: &HtmlElement, value: &str) {
        if let Err(err) = el.style().set_property("opacity", value) {
            warn!("failed to set control opacity: {:?}", err);
        }
    }
}

impl CarouselView for DomCarouselView {
    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn frame_width(&self) -> f64 {
        f64::from(self.frame.offset_width())
    }

    fn build_indicators(&mut self, count: usize) {
        for index in 0..count {
            match self.create_dot(index) {
                Ok(dot) => self.dots.push(index, dot),
                Err(err) => warn!(index, "failed to create carousel dot: {:?}", err),
            }
        }
    }

    fn apply(&mut self, frame: &RenderFrame) {
        if let Err(err) = self.track.style().set_property("transform", &frame.transform()) {
            warn!("failed to move carousel track: {:?}", err);
        }
        for (dot, active) in self.dots.states(frame) {
            let _ = dot
                .element
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, active);
        }
        Self::set_opacity(&self.prev, self.config.control_opacity(frame.previous_disabled));
        Self::set_opacity(&self.next, self.config.control_opacity(frame.next_disabled));
    }
}

impl Drop for DomCarouselView {
    fn drop(&mut self) {
        for dot in self.dots.handles() {
            let _ = dot.element.remove_event_listener_with_callback(
                "click",
                dot.callback.as_ref().unchecked_ref(),
            );
            dot.element.remove();
        }
    }
}

fn html_by_id(document: &Document, id: &'static str) -> Result<HtmlElement, CarouselError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(CarouselError::MissingElement(id))
}
