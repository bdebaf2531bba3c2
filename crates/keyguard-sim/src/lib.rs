//! Lock screen scenario replay.
//!
//! Library side of the `keyguard-sim` binary: configuration loading, the
//! wall-clock environment, and replaying scripts through the runtime.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod replay;
mod system_env;

pub use error::SimError;
pub use replay::{ReplayReport, load_config, read, replay};
pub use system_env::SystemEnv;
