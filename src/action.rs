//! The fixed list of logical actions a device can be configured for.
//!
//! Order matters: a configure-all session walks [`ACTIONS`] top to bottom.
//!
//! `MasterVolUp` and `MasterVolDown` are also recognised by hosts but are not
//! offered here; they can be added to a saved configuration by hand.

/// Static description of one bindable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDesc {
    /// Identifier used as the mapping key (compared case-insensitively).
    pub name: &'static str,
    /// Whether holding any input for the skip threshold leaves the action unbound.
    pub skippable: bool,
    /// Label shown on the row.
    pub label: &'static str,
    /// Icon resource for the row.
    pub icon: &'static str,
}

impl ActionDesc {
    const fn new(name: &'static str, skippable: bool, label: &'static str, icon: &'static str) -> Self {
        Self {
            name,
            skippable,
            label,
            icon,
        }
    }

    /// Whether this is the Menu/hotkey action.
    #[inline]
    pub fn is_hotkey(&self) -> bool {
        self.name.eq_ignore_ascii_case(HOTKEY_ACTION)
    }
}

/// Name of the Menu/hotkey action, the only one allowed to share an input.
pub const HOTKEY_ACTION: &str = "HotKeyEnable";

pub const ACTION_COUNT: usize = 25;

pub static ACTIONS: [ActionDesc; ACTION_COUNT] = [
    ActionDesc::new("Up", false, "D-Pad Up", ":/help/dpad_up.svg"),
    ActionDesc::new("Down", false, "D-Pad Down", ":/help/dpad_down.svg"),
    ActionDesc::new("Left", false, "D-Pad Left", ":/help/dpad_left.svg"),
    ActionDesc::new("Right", false, "D-Pad Right", ":/help/dpad_right.svg"),
    ActionDesc::new("Start", true, "Start", ":/help/button_start.svg"),
    ActionDesc::new("Select", true, "Select", ":/help/button_select.svg"),
    ActionDesc::new("A", false, "Button South", ":/help/buttons_south.png"),
    ActionDesc::new("B", true, "Button East", ":/help/buttons_east.png"),
    ActionDesc::new("X", true, "Button North", ":/help/buttons_north.png"),
    ActionDesc::new("Y", true, "Button West", ":/help/buttons_west.png"),
    ActionDesc::new("LeftShoulder", true, "Left Shoulder", ":/help/button_l.svg"),
    ActionDesc::new("RightShoulder", true, "Right Shoulder", ":/help/button_r.svg"),
    ActionDesc::new("LeftTrigger", true, "Left Trigger", ":/help/button_lt.svg"),
    ActionDesc::new("RightTrigger", true, "Right Trigger", ":/help/button_rt.svg"),
    ActionDesc::new("LeftThumb", true, "Left Thumb", ":/help/analog_thumb.svg"),
    ActionDesc::new("RightThumb", true, "Right Thumb", ":/help/analog_thumb.svg"),
    ActionDesc::new("LeftAnalogUp", true, "Left Analog Up", ":/help/analog_up.svg"),
    ActionDesc::new("LeftAnalogDown", true, "Left Analog Down", ":/help/analog_down.svg"),
    ActionDesc::new("LeftAnalogLeft", true, "Left Analog Left", ":/help/analog_left.svg"),
    ActionDesc::new("LeftAnalogRight", true, "Left Analog Right", ":/help/analog_right.svg"),
    ActionDesc::new("RightAnalogUp", true, "Right Analog Up", ":/help/analog_up.svg"),
    ActionDesc::new("RightAnalogDown", true, "Right Analog Down", ":/help/analog_down.svg"),
    ActionDesc::new("RightAnalogLeft", true, "Right Analog Left", ":/help/analog_left.svg"),
    ActionDesc::new("RightAnalogRight", true, "Right Analog Right", ":/help/analog_right.svg"),
    ActionDesc::new(HOTKEY_ACTION, true, "Menu Button", ":/help/button_hotkey.svg"),
];

/// Row index of an action by name (case-insensitive).
pub fn index_of(name: &str) -> Option<usize> {
    ACTIONS.iter().position(|a| a.name.eq_ignore_ascii_case(name))
}

/// Looks up an action by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static ActionDesc> {
    index_of(name).map(|i| &ACTIONS[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_shape() {
        assert_eq!(ACTIONS.len(), 25);
        assert_eq!(ACTIONS[0].name, "Up");
        assert!(ACTIONS[ACTION_COUNT - 1].is_hotkey());
        assert_eq!(ACTIONS.iter().filter(|a| a.is_hotkey()).count(), 1);
    }

    #[test]
    fn dpad_and_south_are_mandatory() {
        let mandatory: Vec<_> = ACTIONS.iter().filter(|a| !a.skippable).map(|a| a.name).collect();
        assert_eq!(mandatory, ["Up", "Down", "Left", "Right", "A"]);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(index_of("a"), Some(6));
        assert_eq!(find("hotkeyenable").map(|a| a.label), Some("Menu Button"));
        assert!(find("MasterVolUp").is_none());
    }
}
