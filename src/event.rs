//! Physical inputs and events.
//!
//! An [`Input`] describes one control on one device together with the value it
//! reported. The same type serves as a live event payload and as a stored binding.
//!
//! ## Value conventions
//! - **Axes:** normalized to `-1 | 0 | 1` by the host (deadzone already applied).
//! - **Buttons / keys / CEC buttons:** `1` = pressed, `0` = released.
//! - **Hats (POV/D-pad):** direction bitmask, [`HAT_UP`] `| HAT_RIGHT | HAT_DOWN | HAT_LEFT`,
//!   `0` = centered.
//!
//! A value of `0` is always a release edge.

use crate::device::DeviceId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HAT_UP: i32 = 0x01;
pub const HAT_RIGHT: i32 = 0x02;
pub const HAT_DOWN: i32 = 0x04;
pub const HAT_LEFT: i32 = 0x08;

/// Category of a physical control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Axis,
    Button,
    Hat,
    Key,
    CecButton,
}

/// One control on one device, with the value it reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    pub device: DeviceId,
    #[serde(rename = "type")]
    pub kind: InputType,
    /// Device-local control index (button/axis/hat number, or keycode).
    pub id: i32,
    pub value: i32,
    /// Set once the input has been committed to a mapping.
    ///
    /// Entries loaded without the key count as committed.
    #[serde(default = "stored_is_configured")]
    pub configured: bool,
}

fn stored_is_configured() -> bool {
    true
}

impl Input {
    pub fn new(device: DeviceId, kind: InputType, id: i32, value: i32) -> Self {
        Self {
            device,
            kind,
            id,
            value,
            configured: false,
        }
    }

    /// The placeholder stored for a deliberately disabled Menu button.
    ///
    /// Keyboard key `0` with value `1`; saved files keep this shape so older
    /// readers still see a bound entry.
    pub const fn disabled_hotkey() -> Self {
        Self {
            device: DeviceId::Keyboard,
            kind: InputType::Key,
            id: 0,
            value: 1,
            configured: true,
        }
    }

    /// True for press edges (any non-zero value).
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.value != 0
    }

    /// Same physical control: device, type and id. Value is ignored.
    #[inline]
    pub fn matches(&self, other: &Input) -> bool {
        self.device == other.device && self.kind == other.kind && self.id == other.id
    }

    /// Whether an incoming event triggers this stored binding.
    ///
    /// Hats match on any shared direction bit and axes on the same sign;
    /// release events (`value == 0`) match regardless of direction.
    pub fn triggered_by(&self, event: &Input) -> bool {
        if !self.configured || !self.matches(event) {
            return false;
        }
        match self.kind {
            InputType::Hat => event.value == 0 || (event.value & self.value) != 0,
            InputType::Axis => event.value == 0 || self.value == event.value,
            _ => true,
        }
    }

    /// Human-readable description, e.g. `Button 3`, `Axis 1+`, `Hat 0 up`, `Key Return`.
    pub fn description(&self) -> String {
        match self.kind {
            InputType::Button => format!("Button {}", self.id),
            InputType::Axis => {
                format!("Axis {}{}", self.id, if self.value > 0 { "+" } else { "-" })
            }
            InputType::Hat => format!("Hat {} {}", self.id, hat_direction(self.value)),
            InputType::Key => format!("Key {}", key_name(self.id)),
            InputType::CecButton => format!("CEC-Button {}", self.id),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Name of the first direction bit set in a hat value.
pub fn hat_direction(value: i32) -> &'static str {
    if value & HAT_UP != 0 {
        "up"
    } else if value & HAT_DOWN != 0 {
        "down"
    } else if value & HAT_LEFT != 0 {
        "left"
    } else if value & HAT_RIGHT != 0 {
        "right"
    } else {
        "neutral"
    }
}

/// Display name for an SDL keycode.
pub fn key_name(code: i32) -> String {
    // SDL scancode-derived keycodes carry bit 30.
    const SCANCODE_MASK: i32 = 1 << 30;
    let named = match code {
        0 => Some("Unknown"),
        8 => Some("Backspace"),
        9 => Some("Tab"),
        13 => Some("Return"),
        27 => Some("Escape"),
        32 => Some("Space"),
        127 => Some("Delete"),
        c if c == SCANCODE_MASK | 79 => Some("Right"),
        c if c == SCANCODE_MASK | 80 => Some("Left"),
        c if c == SCANCODE_MASK | 81 => Some("Down"),
        c if c == SCANCODE_MASK | 82 => Some("Up"),
        c if c == SCANCODE_MASK | 224 => Some("Left Ctrl"),
        c if c == SCANCODE_MASK | 225 => Some("Left Shift"),
        c if c == SCANCODE_MASK | 226 => Some("Left Alt"),
        c if c == SCANCODE_MASK | 228 => Some("Right Ctrl"),
        c if c == SCANCODE_MASK | 229 => Some("Right Shift"),
        c if c == SCANCODE_MASK | 230 => Some("Right Alt"),
        _ => None,
    };
    if let Some(name) = named {
        return name.to_string();
    }
    match u8::try_from(code) {
        Ok(b) if b.is_ascii_graphic() => char::from(b.to_ascii_uppercase()).to_string(),
        _ => format!("Keycode {code}"),
    }
}

/// An input reported by a device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Capture time (monotonic), when the source records one.
    pub at: Option<std::time::Instant>,
    pub input: Input,
}

impl InputEvent {
    pub fn new(input: Input) -> Self {
        Self { at: None, input }
    }

    /// Same event stamped with the current time.
    pub fn now(input: Input) -> Self {
        Self {
            at: Some(std::time::Instant::now()),
            input,
        }
    }

    #[inline]
    pub fn device(&self) -> DeviceId {
        self.input.device
    }
}
