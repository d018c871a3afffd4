//! Time abstraction traits for platform-agnostic timing.
//!
//! The core never reads a clock on its own: the event loop asks its
//! [`TimeSource`] once per iteration and hands the instant down, so every
//! tick is a pure function of `now`.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Subtracts duration from instant, returns None on underflow.
    fn checked_sub(self, duration: Self::Duration) -> Option<Self>;

    /// Milliseconds elapsed since `earlier`.
    #[inline]
    fn millis_since(&self, earlier: Self) -> u64 {
        self.duration_since(earlier).as_millis()
    }

    /// Moves the instant back by `millis`, saturating at the instant itself
    /// when the clock cannot go that far back.
    #[inline]
    fn back_by_millis(self, millis: u64) -> Self {
        self.checked_sub(Self::Duration::from_millis(millis))
            .unwrap_or(self)
    }
}
