use pretty_assertions::assert_eq;
use std::time::Duration;
use stickbind::backends::VirtualDevice;
use stickbind::{
    BindingSession, ConfigStore, Confirmation, Device, DeviceConfig, DeviceId, FileStore, HotkeyChoice, Input,
    InputType, RowStatus, ACTIONS, HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP, HOTKEY_ACTION,
};

const FRAME: Duration = Duration::from_millis(16);

/// Polls the device into the session, then ticks once.
fn pump(dev: &mut VirtualDevice, session: &mut BindingSession) {
    for event in dev.poll() {
        session.handle_event(&event);
    }
    session.update(FRAME);
}

/// Holds a button until the session skips the row.
fn hold_to_skip(dev: &mut VirtualDevice, session: &mut BindingSession, button: i32) {
    let row = session.cursor();
    dev.press_button(button);
    pump(dev, session);
    while session.cursor() == row && !session.is_done() {
        session.update(FRAME);
    }
    dev.release_button(button);
    pump(dev, session);
}

#[test]
fn configure_all_then_reconfigure_one_row() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let pad = DeviceId::Joystick(0);
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("input.toml"));
    let mut dev = VirtualDevice::new(pad, "Virtual Pad");

    let mut session = BindingSession::new(DeviceConfig::new(pad, dev.name(), "virtual-0"), true);
    assert_eq!(session.subtitle(), "GAMEPAD 1");

    for mask in [HAT_UP, HAT_DOWN, HAT_LEFT, HAT_RIGHT] {
        dev.set_hat(0, mask);
        dev.set_hat(0, 0);
        pump(&mut dev, &mut session);
    }
    dev.tap_button(7); // Start
    pump(&mut dev, &mut session);
    hold_to_skip(&mut dev, &mut session, 6); // Select
    for button in 0..4 {
        dev.tap_button(button); // A B X Y
        pump(&mut dev, &mut session);
    }
    // re-using A's button on LeftShoulder is refused
    dev.tap_button(0);
    pump(&mut dev, &mut session);
    assert_eq!(session.row_status(session.cursor()), Some(&RowStatus::AlreadyTaken));

    while !session.is_done() {
        hold_to_skip(&mut dev, &mut session, 9);
    }
    assert!(!session.is_configuring_all());

    let cfg = session.config();
    assert_eq!(cfg.len(), 9);
    assert_eq!(cfg.input_for("Down").map(|i| i.value), Some(HAT_DOWN));
    assert!(!cfg.has_mapping("Select"));
    assert!(!cfg.has_mapping(HOTKEY_ACTION));

    let mut asked = false;
    let saved = session
        .confirm_with(&mut store, |_| {
            asked = true;
            HotkeyChoice::Disable
        })
        .unwrap();
    assert!(asked);
    assert_eq!(saved.input_for(HOTKEY_ACTION), Some(&Input::disabled_hotkey()));

    // Reopen from disk and rebind LeftShoulder via the confirm button.
    let loaded = store.load().unwrap().find("virtual-0", "Virtual Pad").cloned().unwrap();
    assert_eq!(loaded, saved);

    let mut session = BindingSession::new(loaded, false);
    let shoulder = ACTIONS.iter().position(|a| a.name == "LeftShoulder").unwrap();
    assert_eq!(session.row_status(shoulder), Some(&RowStatus::NotDefined));
    assert!(session.select_row(shoulder));
    dev.tap_button(0); // `a` starts capture
    pump(&mut dev, &mut session);
    assert!(session.is_capturing());
    dev.set_axis(2, 1);
    dev.set_axis(2, 0);
    pump(&mut dev, &mut session);
    assert_eq!(session.row_status(shoulder).unwrap().to_string(), "AXIS 2+");

    assert_eq!(session.confirm(), Confirmation::Ready);
    let saved = session.finish(&mut store).unwrap();
    let file = store.load().unwrap();
    assert_eq!(file.devices, vec![saved]);
}

#[test]
fn keyboard_session_ignores_gamepad_and_falls_back_to_select() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("input.json"));
    let mut keyboard = VirtualDevice::new(DeviceId::Keyboard, "Keyboard");
    let mut pad = VirtualDevice::new(DeviceId::Joystick(0), "Pad");

    let mut session = BindingSession::new(DeviceConfig::new(DeviceId::Keyboard, "Keyboard", "keyboard"), true);
    assert_eq!(session.subtitle(), "KEYBOARD");

    // gamepad noise never reaches the keyboard session
    pad.tap_button(1);
    for event in pad.poll() {
        assert!(!session.handle_event(&event));
    }

    for code in 1..=6 {
        keyboard.press_key(code * 10);
        keyboard.release_key(code * 10);
        pump(&mut keyboard, &mut session);
    }
    assert_eq!(session.config().input_for("Select").map(|i| i.id), Some(60));

    let completed = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = std::rc::Rc::clone(&completed);
    let mut session = session.on_complete(move |_| flag.set(true));
    while !session.is_done() {
        let row = session.cursor();
        if ACTIONS[row].skippable {
            keyboard.press_key(200);
            pump(&mut keyboard, &mut session);
            while session.cursor() == row && !session.is_done() {
                session.update(FRAME);
            }
            keyboard.release_key(200);
        } else {
            // only Button South is left unbound and mandatory here
            keyboard.press_key(300 + row as i32);
            keyboard.release_key(300 + row as i32);
        }
        pump(&mut keyboard, &mut session);
    }
    assert_eq!(session.config().input_for("A").map(|i| i.id), Some(306));

    let Confirmation::NeedsHotkey(prompt) = session.confirm() else {
        panic!("hotkey should be unbound");
    };
    assert_eq!((prompt.yes, prompt.no), ("YES", "NO"));
    session.resolve_hotkey(HotkeyChoice::UseFallback);
    let saved = session.finish(&mut store).unwrap();
    assert!(completed.get());

    let select = saved.input_for("Select").copied().unwrap();
    assert_eq!(saved.input_for(HOTKEY_ACTION), Some(&select));
    assert_eq!(
        (select.device, select.kind, select.id),
        (DeviceId::Keyboard, InputType::Key, 60)
    );

    let text = std::fs::read_to_string(store.path()).unwrap();
    assert!(text.trim_start().starts_with('{'));
}

#[test]
fn store_trait_object_is_accepted() {
    struct Failing;
    impl ConfigStore for Failing {
        fn write_device_config(&mut self, _: &DeviceConfig) -> stickbind::Result<()> {
            Err(stickbind::Error::Io {
                path: "nowhere".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    let mut session = BindingSession::new(DeviceConfig::new(DeviceId::Cec, "CEC", "cec"), false);
    session.resolve_hotkey(HotkeyChoice::Disable);
    let store: &mut dyn ConfigStore = &mut Failing;
    assert!(matches!(session.finish(store), Err(stickbind::Error::Io { .. })));
}

#[test]
fn hand_edited_entries_still_count_as_bindings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.toml");
    std::fs::write(
        &path,
        r#"
[[device]]
device_id = { joystick = 0 }
device_name = "Pad"
device_guid = "guid"

[device.inputs.a]
device = { joystick = 0 }
type = "button"
id = 0
value = 1

[device.inputs.up]
device = { joystick = 0 }
type = "button"
id = 5
value = 1
"#,
    )
    .unwrap();

    let store = FileStore::new(path);
    let loaded = store.load().unwrap().find("guid", "Pad").cloned().unwrap();
    assert!(loaded.input_for("a").unwrap().configured);

    let pad = DeviceId::Joystick(0);
    let mut session = BindingSession::new(loaded, false);
    let down = ACTIONS.iter().position(|a| a.name == "Down").unwrap();
    assert!(session.select_row(down));

    // the hand-written `a` starts capture
    assert!(session.handle_input(Input::new(pad, InputType::Button, 0, 1)));
    assert!(session.is_capturing());
    session.handle_input(Input::new(pad, InputType::Button, 0, 0));

    // Up's hand-written button cannot be reused for Down
    session.handle_input(Input::new(pad, InputType::Button, 5, 1));
    session.handle_input(Input::new(pad, InputType::Button, 5, 0));
    assert_eq!(session.row_status(down), Some(&RowStatus::AlreadyTaken));
    assert!(!session.config().has_mapping("Down"));
    assert_eq!(session.config().input_for("Up").map(|i| i.id), Some(5));
}
