pub mod calibration;
pub mod capability;
pub mod component;
pub mod controller;
pub mod event;
pub mod fusion;
pub mod identifier;
pub mod manager;
pub mod pov;
pub mod rumble;
pub mod source;
