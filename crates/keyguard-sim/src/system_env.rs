//! Wall-clock environment.
//!
//! `SystemEnv` is the production implementation of the Environment trait
//! using real system time. Replaying under it paces `advance` steps in real
//! time instead of jumping the virtual clock.

use std::{future::Future, time::Duration};

use keyguard_core::env::Environment;

/// Environment using system time and tokio sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
