/// Time primitives.
///
/// Browser timers and event timestamps are expressed in milliseconds, so the
/// whole workspace uses a millisecond timebase instead of seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Converts a fractional browser timestamp (e.g. `Date.now()`), flooring
    /// negative and non-finite values to zero.
    pub fn from_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Millis(ms as u64)
        } else {
            Millis::ZERO
        }
    }

    pub fn saturating_add(self, delta: Millis) -> Self {
        Millis(self.0.saturating_add(delta.0))
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Millis) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }

    pub fn as_i32_clamped(self) -> i32 {
        self.0.min(i32::MAX as u64) as i32
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        self.saturating_add(rhs)
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
