//! Engine tuning knobs
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration.

use crate::constants::DEFAULT_DEDUP_WINDOW_MS;
use serde::{Deserialize, Serialize};

/// Behaviour switches shared by sessions and peers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A peer drops a resubmitted `(from, to)` within this many milliseconds
    /// of its own previous submission
    pub dedup_window_ms: u64,
    /// Accept Werera moves that leave the mover's own king attacked
    pub allow_self_check_in_werera: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dedup_window_ms: DEFAULT_DEDUP_WINDOW_MS,
            allow_self_check_in_werera: true,
        }
    }
}
