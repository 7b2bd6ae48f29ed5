// packages/engine/src/mode.rs
//! Mock/real mode resolution
//!
//! The raw flag is read in exactly one place. Every endpoint follows the
//! same rule: the engine runs in [`Mode::Mock`] unless the flag is an
//! explicit disable value. Unknown values keep the default and log a
//! warning. Resolution never fails.
//!
//! Adapters receive the resolved [`Mode`] by value at construction; the
//! memoized [`resolve_mode`] exists for the binary entry point.

use crate::utils::config::ModeConfig;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Values that switch mocking off
const DISABLE_VALUES: &[&str] = &["false", "0", "off", "no", "real"];

/// Values that explicitly keep mocking on
const ENABLE_VALUES: &[&str] = &["true", "1", "on", "yes", "mock"];

static PROCESS_MODE: OnceCell<Mode> = OnceCell::new();

/// Whether synthesized or real backend behavior is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Mock,
    Real,
}

impl Mode {
    /// Derive the mode from the raw configuration signal
    pub fn resolve(config: &ModeConfig) -> Self {
        let Some(raw) = config.use_mock.as_deref() else {
            return Mode::Mock;
        };

        let value = raw.trim().to_ascii_lowercase();
        if DISABLE_VALUES.contains(&value.as_str()) {
            Mode::Real
        } else {
            if !value.is_empty() && !ENABLE_VALUES.contains(&value.as_str()) {
                warn!("Unrecognised mock flag {:?}, staying in mock mode", raw);
            }
            Mode::Mock
        }
    }

    pub fn is_mock(self) -> bool {
        self == Mode::Mock
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Mock => write!(f, "mock"),
            Mode::Real => write!(f, "real"),
        }
    }
}

/// Resolve the process-wide mode once; later calls return the first answer
/// regardless of the configuration passed.
pub fn resolve_mode(config: &ModeConfig) -> Mode {
    *PROCESS_MODE.get_or_init(|| {
        let mode = Mode::resolve(config);
        info!("Resolved process mode: {}", mode);
        mode
    })
}
