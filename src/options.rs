//! Session tunables.
//!
//! Defaults reproduce the stock dialog. Hosts may override them from a TOML
//! snippet:
//!
//! ```toml
//! hold_to_skip_ms = 3000
//! confirm_action = "a"
//! hotkey_fallback_action = "Select"
//! ```

use crate::action;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default hold duration that skips a skippable row.
pub const HOLD_TO_SKIP_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Holding an input this long on a skippable row leaves it unbound.
    pub hold_to_skip_ms: u32,
    /// Action whose existing binding starts capture on the cursor row.
    pub confirm_action: String,
    /// Action whose input the Menu button borrows when the user accepts the default.
    pub hotkey_fallback_action: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            hold_to_skip_ms: HOLD_TO_SKIP_MS,
            confirm_action: "a".to_string(),
            hotkey_fallback_action: "Select".to_string(),
        }
    }
}

impl SessionOptions {
    /// Parses and validates options; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let opts: Self = toml::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Rejects action names that are not in the action table.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.confirm_action, &self.hotkey_fallback_action] {
            if action::find(name).is_none() {
                return Err(Error::UnknownAction(name.clone()));
            }
        }
        Ok(())
    }
}
