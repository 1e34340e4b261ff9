//! Landing page behaviour that is not the carousel: anchor scrolling, the
//! navbar scroll effect, button ripples, reveal-on-scroll and lazy images.
//!
//! Each feature is a pure decision function; the browser crate only measures
//! the DOM, calls in here, and applies the result.

pub mod bindings;
pub mod config;
pub mod context;
pub mod navbar;
pub mod reveal;
pub mod ripple;
pub mod scroll;
pub mod styles;

pub use bindings::*;
pub use config::*;
pub use context::*;
pub use navbar::*;
pub use reveal::*;
pub use ripple::*;
pub use scroll::*;
pub use styles::*;
