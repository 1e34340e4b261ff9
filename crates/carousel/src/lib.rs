//! Testimonial carousel: a bounded slide index with a DOM-independent
//! rendering seam.
//!
//! The controller owns all state and decides what the page should look like;
//! a [`CarouselView`] applies those decisions. Timers (resize debounce,
//! auto-advance) go through a [`runtime::TimerQueue`] owned by the caller so
//! the same code runs under browser timers and under a manual clock in tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod view;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use input::*;
pub use view::*;
