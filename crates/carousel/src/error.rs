use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// A required DOM anchor was not found while wiring the carousel.
    #[error("carousel element missing: {0}")]
    MissingElement(&'static str),

    #[error("slide index {index} out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid carousel configuration: {0}")]
    InvalidConfig(&'static str),
}
