//! Engine configuration.
//!
//! The element width is a type parameter of the engine, so the only runtime
//! knob is how much undo history to keep. Hosts can build a config in code,
//! deserialize it from their own settings file, or read it from the
//! environment.

use std::env;

use serde::Deserialize;

use crate::error::EditError;

/// Undo entries kept when nothing else is configured.
pub const DEFAULT_EDIT_STACK_LIMIT: usize = 100;

/// Environment variable overriding `edit_stack_limit`.
pub const ENV_EDIT_STACK_LIMIT: &str = "PATCHWORK_EDIT_STACK_LIMIT";

/// Construction parameters for an `EditEngine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of undo entries retained; older ones are dropped.
    pub edit_stack_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        return EngineConfig {
            edit_stack_limit: DEFAULT_EDIT_STACK_LIMIT,
        };
    }
}

impl EngineConfig {
    pub fn with_edit_stack_limit(mut self, limit: usize) -> Self {
        self.edit_stack_limit = limit;
        return self;
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are
    /// rejected.
    pub fn from_env() -> Result<Self, EditError> {
        return Self::from_lookup(|key| env::var(key).ok());
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EditError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();
        if let Some(raw) = lookup(ENV_EDIT_STACK_LIMIT) {
            config.edit_stack_limit = raw.trim().parse().map_err(|_| {
                tracing::warn!(key = ENV_EDIT_STACK_LIMIT, value = %raw, "rejecting config override");
                EditError::InvalidConfig {
                    key: ENV_EDIT_STACK_LIMIT.to_string(),
                    value: raw.clone(),
                }
            })?;
        }
        return Ok(config);
    }
}
