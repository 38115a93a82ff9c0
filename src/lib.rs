//! Polling based controller abstraction over Linux input devices.
//!
//! An [input::manager::Environment] discovers event and joystick device
//! nodes, enumerates their components and fuses the two nodes of one
//! physical joystick into a single [input::controller::Controller].

pub mod cli;
pub mod config;
pub mod input;
pub mod udev;
