pub mod debounce;
pub mod metrics;
pub mod timer_queue;

pub use debounce::*;
pub use metrics::*;
pub use timer_queue::*;
