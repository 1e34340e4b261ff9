/// Where a listener is attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    Window,
    Document,
    /// Every element matching the CSS selector at boot time.
    Selector(&'static str),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    Resize,
    Scroll,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Resize => "resize",
            EventKind::Scroll => "scroll",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Handler {
    AnchorScroll,
    ButtonFeedback,
    NavbarScroll,
    CarouselPrevious,
    CarouselNext,
    CarouselKeys,
    CarouselResize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Binding {
    pub target: Target,
    pub event: EventKind,
    pub handler: Handler,
}

impl Binding {
    pub const fn new(target: Target, event: EventKind, handler: Handler) -> Self {
        Self {
            target,
            event,
            handler,
        }
    }
}

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const BUTTON_SELECTOR: &str = ".btn-primary, .nav-cta";
pub const PREV_BUTTON_SELECTOR: &str = "#prevBtn";
pub const NEXT_BUTTON_SELECTOR: &str = "#nextBtn";

/// Every listener the page installs at boot, in installation order.
///
/// Indicator dots are created at runtime and wired by the carousel view, so
/// they do not appear here.
pub fn page_bindings() -> Vec<Binding> {
    vec![
        Binding::new(
            Target::Selector(ANCHOR_SELECTOR),
            EventKind::Click,
            Handler::AnchorScroll,
        ),
        Binding::new(Target::Window, EventKind::Scroll, Handler::NavbarScroll),
        Binding::new(
            Target::Selector(BUTTON_SELECTOR),
            EventKind::Click,
            Handler::ButtonFeedback,
        ),
        Binding::new(
            Target::Selector(PREV_BUTTON_SELECTOR),
            EventKind::Click,
            Handler::CarouselPrevious,
        ),
        Binding::new(
            Target::Selector(NEXT_BUTTON_SELECTOR),
            EventKind::Click,
            Handler::CarouselNext,
        ),
        Binding::new(Target::Document, EventKind::KeyDown, Handler::CarouselKeys),
        Binding::new(Target::Window, EventKind::Resize, Handler::CarouselResize),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_handler_is_bound_once() {
        let bindings = page_bindings();
        for handler in [
            Handler::AnchorScroll,
            Handler::ButtonFeedback,
            Handler::NavbarScroll,
            Handler::CarouselPrevious,
            Handler::CarouselNext,
            Handler::CarouselKeys,
            Handler::CarouselResize,
        ] {
            let n = bindings.iter().filter(|b| b.handler == handler).count();
            assert_eq!(n, 1, "{handler:?}");
        }
    }

    #[test]
    fn keyboard_is_global_and_resize_is_on_window() {
        let bindings = page_bindings();
        let keys = bindings
            .iter()
            .find(|b| b.handler == Handler::CarouselKeys)
            .unwrap();
        assert_eq!(keys.target, Target::Document);
        assert_eq!(keys.event.as_str(), "keydown");

        let resize = bindings
            .iter()
            .find(|b| b.handler == Handler::CarouselResize)
            .unwrap();
        assert_eq!(resize.target, Target::Window);
    }
}
