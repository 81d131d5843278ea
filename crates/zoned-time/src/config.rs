//! Caller-level defaults: the timezone, working window and working days used
//! when a request does not name its own.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZonedTimeError};
use crate::registry::{self, DEFAULT_TIMEZONE};
use crate::working_hours::{WorkingDays, WorkingHours};

/// Defaults loaded from JSON. Every field is optional in the input.
///
/// ```json
/// {
///   "default_timezone": "America/New_York",
///   "working_hours": { "start": "08:00", "end": "16:00" },
///   "working_days": ["Mon", "Tue", "Wed", "Thu"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZonedTimeConfig {
    pub default_timezone: String,
    pub working_hours: WorkingHours,
    pub working_days: WorkingDays,
}

impl Default for ZonedTimeConfig {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            working_hours: WorkingHours::default(),
            working_days: WorkingDays::default(),
        }
    }
}

impl ZonedTimeConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::InvalidConfig`] for malformed JSON, unknown
    /// fields, invalid working hours/days, or an unsupported default timezone.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ZonedTimeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ZonedTimeError::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        registry::metadata_for(&self.default_timezone)
            .map_err(|e| ZonedTimeError::InvalidConfig(format!("default_timezone: {e}")))?;
        Ok(())
    }
}
