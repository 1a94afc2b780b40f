//! Scripted in-memory device.
//!
//! [`VirtualDevice`] queues inputs fed by code and hands them out on the next
//! [`Device::poll`]. Useful for demos, tests, and driving a binding session
//! without hardware.

use crate::device::{Device, DeviceId};
use crate::event::{Input, InputEvent, InputType};

pub struct VirtualDevice {
    id: DeviceId,
    name: String,
    events: Vec<InputEvent>,
}

impl VirtualDevice {
    pub fn new(id: DeviceId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            events: Vec::new(),
        }
    }

    /// Inject a raw input; it is re-tagged with this device's id.
    pub fn feed(&mut self, input: Input) {
        self.events.push(InputEvent::now(Input {
            device: self.id,
            ..input
        }));
    }

    fn emit(&mut self, kind: InputType, id: i32, value: i32) {
        self.feed(Input::new(self.id, kind, id, value));
    }

    pub fn press_button(&mut self, button: i32) {
        self.emit(InputType::Button, button, 1);
    }

    pub fn release_button(&mut self, button: i32) {
        self.emit(InputType::Button, button, 0);
    }

    /// Press then release.
    pub fn tap_button(&mut self, button: i32) {
        self.press_button(button);
        self.release_button(button);
    }

    /// Set an axis to `-1`, `0` or `1`.
    pub fn set_axis(&mut self, axis: i32, value: i32) {
        self.emit(InputType::Axis, axis, value.signum());
    }

    /// Set a hat to a direction mask (`0` = centered).
    pub fn set_hat(&mut self, hat: i32, mask: i32) {
        self.emit(InputType::Hat, hat, mask);
    }

    pub fn press_key(&mut self, keycode: i32) {
        self.emit(InputType::Key, keycode, 1);
    }

    pub fn release_key(&mut self, keycode: i32) {
        self.emit(InputType::Key, keycode, 0);
    }
}

impl Device for VirtualDevice {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> DeviceId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_drains_queue() {
        let mut dev = VirtualDevice::new(DeviceId::Joystick(2), "Virtual Pad");
        dev.tap_button(4);
        dev.set_axis(1, -30);

        let events = dev.poll();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.device() == DeviceId::Joystick(2)));
        assert_eq!(events[2].input.value, -1);
        assert!(dev.poll().is_empty());
    }

    #[test]
    fn feed_retags_device() {
        let mut dev = VirtualDevice::new(DeviceId::Keyboard, "Virtual Keyboard");
        dev.feed(Input::new(DeviceId::Joystick(0), InputType::Key, 13, 1));
        assert_eq!(dev.poll()[0].input.device, DeviceId::Keyboard);
    }
}
