//! Runs a full configure-all session against a scripted pad and saves it.
//!
//! `RUST_LOG=stickbind=debug cargo run --example configure_virtual -- out.toml`

use std::time::Duration;
use stickbind::backends::VirtualDevice;
use stickbind::{BindingSession, Device, DeviceConfig, DeviceId, FileStore, HotkeyChoice, ACTIONS, HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};
use tracing_subscriber::EnvFilter;

fn main() -> stickbind::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "stickbind_input.toml".to_string());
    let mut store = FileStore::new(path);

    let mut device = VirtualDevice::new(DeviceId::Joystick(0), "Virtual Pad");
    let config = DeviceConfig::new(device.id(), device.name(), "virtual-pad-0");
    let mut session = BindingSession::new(config, true)
        .on_complete(|cfg| println!("Saved {} binding(s) for {}", cfg.len(), cfg.device_name));

    println!("{} {}", session.title(), session.subtitle());

    // D-pad on the hat, everything else on buttons; the last two rows are held to skip.
    let mut next_button = 0;
    while !session.is_done() {
        let row = session.cursor();
        match row {
            0..=3 => {
                let mask = [HAT_UP, HAT_DOWN, HAT_LEFT, HAT_RIGHT][row];
                device.set_hat(0, mask);
                device.set_hat(0, 0);
            }
            _ if row + 2 >= ACTIONS.len() => {
                device.press_button(99);
                for event in device.poll() {
                    session.handle_event(&event);
                }
                while session.cursor() == row && !session.is_done() {
                    session.update(Duration::from_millis(100));
                }
                device.release_button(99);
            }
            _ => {
                device.tap_button(next_button);
                next_button += 1;
            }
        }
        for event in device.poll() {
            session.handle_event(&event);
        }
        session.update(Duration::from_millis(16));
    }

    for (action, status) in session.rows() {
        println!("{:<20} {}", action.label, status);
    }

    session.confirm_with(&mut store, |prompt| {
        println!("{} [{}]", prompt.message, prompt.yes);
        HotkeyChoice::UseFallback
    })?;
    Ok(())
}
