//! Environment abstraction for deterministic testing.
//!
//! Decouples lock screen logic from the wall clock. Enables deterministic
//! simulation with a virtual clock that only moves when told to, and
//! production use with `std::time::Instant`.

use std::{
    fmt::Debug,
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

/// Abstract environment providing time and the one suspension primitive.
///
/// # Invariants
///
/// - `now()` never goes backwards
/// - `sleep(d)` returns once `now()` has advanced by at least `d`
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use a virtual instant that only advances on `sleep`.
    type Instant: Copy
        + Ord
        + Debug
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver code awaits this. Lock screen logic never suspends.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}
