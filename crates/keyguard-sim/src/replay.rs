//! Scenario replay.
//!
//! Parses a script, replays it through the [`Runtime`] against a fresh
//! [`SimDevice`], and reports what the lock screen ended up showing.

use std::{path::Path, sync::Arc};

use keyguard_app::{KeyguardAction, KeyguardConfig, Runtime};
use keyguard_core::{RingerMode, env::Environment};
use keyguard_harness::{DisplayModel, SimDevice, SimDriver, SimEnv, scenario};

use crate::{SimError, SystemEnv};

/// Outcome of a replay.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    /// Final display.
    pub display: DisplayModel,
    /// Host requests, in order.
    pub host_calls: Vec<KeyguardAction>,
    /// Ringer writes, in order.
    pub ringer_writes: Vec<RingerMode>,
}

impl ReplayReport {
    /// Log the final display and every host request.
    pub fn log(&self) {
        for (region, state) in self.display.regions() {
            tracing::info!(
                %region,
                visibility = ?state.visibility,
                text = %state.text,
                icon = ?state.icon,
                "region"
            );
        }
        for call in &self.host_calls {
            tracing::info!(?call, "host call");
        }
        for mode in &self.ringer_writes {
            tracing::info!(%mode, "ringer write");
        }
    }
}

/// Read a file, naming it in the error.
pub fn read(path: &Path) -> Result<String, SimError> {
    std::fs::read_to_string(path)
        .map_err(|source| SimError::Io { path: path.to_path_buf(), source })
}

/// Load the lock screen configuration. Missing fields take their defaults.
pub fn load_config(path: Option<&Path>) -> Result<KeyguardConfig, SimError> {
    match path {
        Some(path) => Ok(serde_json::from_str(&read(path)?)?),
        None => Ok(KeyguardConfig::default()),
    }
}

/// Replay `script` on a virtual clock, or on the wall clock if `realtime`.
pub async fn replay(
    script: &str,
    config: KeyguardConfig,
    realtime: bool,
) -> Result<ReplayReport, SimError> {
    if realtime {
        replay_in(SystemEnv::new(), script, config).await
    } else {
        replay_in(SimEnv::new(), script, config).await
    }
}

async fn replay_in<E: Environment>(
    env: E,
    script: &str,
    config: KeyguardConfig,
) -> Result<ReplayReport, SimError> {
    let steps = scenario::parse(script)?;
    tracing::debug!(steps = steps.len(), "scenario parsed");

    let device = SimDevice::new();
    let driver = SimDriver::new(env, device.clone(), steps);
    let observer = driver.observer();

    Runtime::new(driver, config, Arc::new(device.clone())).run().await?;

    Ok(ReplayReport {
        display: observer.display(),
        host_calls: observer.host_calls(),
        ringer_writes: device.ringer_writes(),
    })
}
