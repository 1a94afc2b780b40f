//! Input backends for `stickbind`.
//!
//! Implementations of [`Device`](crate::device::Device). Real hardware
//! enumeration belongs to the host application; this crate only ships a
//! scripted [`VirtualDevice`](virtual_input::VirtualDevice).

pub mod virtual_input;

pub use virtual_input::VirtualDevice;
