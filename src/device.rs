//! Device identity and the polling trait.
//!
//! A [`DeviceId`] names one physical input source for the lifetime of a run:
//! the system keyboard, the HDMI-CEC remote, or a joystick slot. Binding sessions
//! are always scoped to exactly one `DeviceId`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the device an input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceId {
    /// The system keyboard.
    Keyboard,
    /// HDMI-CEC remote control.
    Cec,
    /// Joystick / gamepad by zero-based slot index.
    Joystick(u32),
}

impl DeviceId {
    /// Upper-case label shown under the dialog title (`GAMEPAD 1` for slot 0).
    pub fn label(&self) -> String {
        match self {
            DeviceId::Keyboard => "KEYBOARD".to_string(),
            DeviceId::Cec => "CEC".to_string(),
            DeviceId::Joystick(slot) => format!("GAMEPAD {}", slot + 1),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceId::Keyboard => f.write_str("keyboard"),
            DeviceId::Cec => f.write_str("cec"),
            DeviceId::Joystick(slot) => write!(f, "joystick:{slot}"),
        }
    }
}

/// A source of input events that can be polled once per frame.
pub trait Device {
    /// Drain events produced since the last poll.
    fn poll(&mut self) -> Vec<crate::InputEvent>;
    fn name(&self) -> &str;
    fn id(&self) -> DeviceId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamepad_label_is_one_based() {
        assert_eq!(DeviceId::Joystick(0).label(), "GAMEPAD 1");
        assert_eq!(DeviceId::Joystick(3).label(), "GAMEPAD 4");
        assert_eq!(DeviceId::Keyboard.label(), "KEYBOARD");
        assert_eq!(DeviceId::Cec.label(), "CEC");
    }
}
