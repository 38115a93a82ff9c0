pub mod evdev;
pub mod joystick;
pub mod pump;

use std::fmt::Debug;
use std::io;

use thiserror::Error;

use crate::input::{controller::PortType, rumble::EffectData};

/// Possible errors reported by a raw device backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("device closed")]
    Closed,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("operation not supported by the device")]
    Unsupported,
    #[error("device error: {0}")]
    DeviceError(String),
}

impl From<nix::Error> for BackendError {
    fn from(err: nix::Error) -> Self {
        BackendError::Io(io::Error::from(err))
    }
}

/// Category of a native input code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Key,
    Absolute,
    Relative,
}

/// A native code qualified by its category (e.g. EV_ABS/ABS_X)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeCode {
    pub kind: EventKind,
    pub code: u16,
}

impl NativeCode {
    pub fn new(kind: EventKind, code: u16) -> Self {
        Self { kind, code }
    }
}

/// Ephemeral event tuple produced by a raw backend and consumed immediately
/// by the owning controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub timestamp_nanos: u64,
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(timestamp_nanos: u64, kind: EventKind, code: u16, value: i32) -> Self {
        Self {
            timestamp_nanos,
            kind,
            code,
            value,
        }
    }

    /// Returns the native code this event was reported for
    pub fn native_code(&self) -> NativeCode {
        NativeCode::new(self.kind, self.code)
    }
}

/// Range information for one absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsAxisInfo {
    pub code: u16,
    pub minimum: i32,
    pub maximum: i32,
    pub flat: i32,
}

impl AbsAxisInfo {
    pub fn new(code: u16, minimum: i32, maximum: i32, flat: i32) -> Self {
        Self {
            code,
            minimum,
            maximum,
            flat,
        }
    }
}

/// Force feedback effect types a device can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Rumble,
    Constant,
}

/// Everything a backend reports about what the device can do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityTable {
    /// Supported key and button codes
    pub keys: Vec<u16>,
    /// Supported absolute axes with their ranges
    pub absolute: Vec<AbsAxisInfo>,
    /// Supported relative axis codes
    pub relative: Vec<u16>,
    /// Supported force feedback effects
    pub effects: Vec<EffectKind>,
}

impl CapabilityTable {
    /// Returns true if the backend reported no input capabilities at all
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.absolute.is_empty() && self.relative.is_empty()
    }
}

/// A [RawDeviceBackend] is the platform adapter for one native input device.
/// It supplies capability data and raw event tuples; everything else is done
/// by the controller that owns it.
pub trait RawDeviceBackend: Send + Debug {
    /// Display name of the device
    fn name(&self) -> String;

    /// Bus the device is attached through
    fn port_type(&self) -> PortType {
        PortType::Unknown
    }

    /// Returns the codes this device supports
    fn capabilities(&self) -> Result<CapabilityTable, BackendError>;

    /// Read all pending raw events without blocking. Having no data available
    /// is not an error and must return an empty list.
    fn poll(&mut self) -> Result<Vec<RawEvent>, BackendError>;

    /// Open a handle for force feedback. Returns `None` if the device has no
    /// force feedback support.
    fn open_force_feedback(&mut self) -> Result<Option<Box<dyn ForceFeedbackDevice>>, BackendError> {
        Ok(None)
    }

    /// Release the native handle. Must be idempotent; subsequent calls to
    /// [RawDeviceBackend::poll] fail with [BackendError::Closed].
    fn close(&mut self);
}

/// Native force feedback operations for one physical device. Implementations
/// are owned by a single dispatcher thread and are never shared.
pub trait ForceFeedbackDevice: Send {
    /// Upload the given effect. If `id` refers to an already uploaded effect
    /// it is updated in place. Returns the driver assigned effect id.
    fn upload(&mut self, effect: EffectData, id: Option<i16>) -> Result<i16, BackendError>;

    /// Start playing the effect with the given id
    fn start(&mut self, id: i16, iterations: i32) -> Result<(), BackendError>;

    /// Stop playing the effect with the given id
    fn stop(&mut self, id: i16) -> Result<(), BackendError>;
}
