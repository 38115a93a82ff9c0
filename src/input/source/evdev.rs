use std::{
    collections::HashMap,
    fmt::Debug,
    io,
    os::fd::AsRawFd,
    time::{SystemTime, UNIX_EPOCH},
};

use evdev::{
    Device, EventType, FFEffect, FFEffectCode, FFEffectData, FFEffectKind, FFEnvelope, FFReplay,
    FFTrigger, InputEvent,
};
use nix::fcntl::{FcntlArg, OFlag};

use crate::input::{controller::PortType, rumble::EffectData};

use super::{
    AbsAxisInfo, BackendError, CapabilityTable, EffectKind, EventKind, ForceFeedbackDevice,
    RawDeviceBackend, RawEvent,
};

/// Key events with this value are autorepeats of a held key
const KEY_REPEAT: i32 = 2;

/// [EventDevice] is a raw backend for a device using the input event
/// subsystem (/dev/input/event*)
pub struct EventDevice {
    path: String,
    name: String,
    port_type: PortType,
    device: Option<Device>,
}

impl EventDevice {
    /// Open the event device at the given path for non-blocking reads
    pub fn open(path: &str) -> Result<Self, BackendError> {
        log::debug!("Opening device at: {}", path);
        let device = Device::open(path)?;

        // Set the device to do non-blocking reads
        let raw_fd = device.as_raw_fd();
        nix::fcntl::fcntl(raw_fd, FcntlArg::F_SETFL(OFlag::O_NONBLOCK))?;

        let name = device.name().unwrap_or_default().trim().to_string();
        let port_type = PortType::from_bus_type(device.input_id().bus_type().0);

        Ok(Self {
            path: path.to_string(),
            name,
            port_type,
            device: Some(device),
        })
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    fn device(&self) -> Result<&Device, BackendError> {
        self.device.as_ref().ok_or(BackendError::Closed)
    }
}

impl RawDeviceBackend for EventDevice {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn port_type(&self) -> PortType {
        self.port_type
    }

    fn capabilities(&self) -> Result<CapabilityTable, BackendError> {
        let device = self.device()?;
        let mut capabilities = CapabilityTable::default();

        if let Some(keys) = device.supported_keys() {
            capabilities.keys = keys.iter().map(|key| key.0).collect();
        }
        if device.supported_absolute_axes().is_some() {
            for (axis, info) in device.get_absinfo()? {
                log::trace!("Found axis {:?}: {:?}", axis, info);
                capabilities.absolute.push(AbsAxisInfo::new(
                    axis.0,
                    info.minimum(),
                    info.maximum(),
                    info.flat(),
                ));
            }
        }
        if let Some(axes) = device.supported_relative_axes() {
            capabilities.relative = axes.iter().map(|axis| axis.0).collect();
        }
        if let Some(ff) = device.supported_ff() {
            if ff.contains(FFEffectCode::FF_RUMBLE) {
                capabilities.effects.push(EffectKind::Rumble);
            }
            if ff.contains(FFEffectCode::FF_CONSTANT) {
                capabilities.effects.push(EffectKind::Constant);
            }
        }

        Ok(capabilities)
    }

    fn poll(&mut self) -> Result<Vec<RawEvent>, BackendError> {
        let Some(device) = self.device.as_mut() else {
            return Err(BackendError::Closed);
        };
        let events = match device.fetch_events() {
            Ok(events) => events.filter_map(translate).collect(),
            // Do nothing if this would block
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => Vec::new(),
            Err(err) => {
                log::trace!("Failed to fetch events: {:?}", err);
                return Err(err.into());
            }
        };

        Ok(events)
    }

    fn open_force_feedback(&mut self) -> Result<Option<Box<dyn ForceFeedbackDevice>>, BackendError> {
        if self.device()?.supported_ff().is_none() {
            log::debug!("Device does not support FF effects");
            return Ok(None);
        }
        // Effects are driven from the dispatcher thread through its own
        // handle so reads and effect uploads never share a file descriptor
        let device = Device::open(self.path.as_str())?;
        Ok(Some(Box::new(EventDeviceEffects::new(device))))
    }

    fn close(&mut self) {
        if self.device.take().is_some() {
            log::debug!("Closed device at: {}", self.path);
        }
    }
}

impl Debug for EventDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDevice")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("port_type", &self.port_type)
            .field("open", &self.device.is_some())
            .finish()
    }
}

/// Translate the given evdev event into a raw event. Returns `None` for
/// event types that do not feed components.
fn translate(event: InputEvent) -> Option<RawEvent> {
    let kind = match event.event_type() {
        EventType::KEY => EventKind::Key,
        EventType::ABSOLUTE => EventKind::Absolute,
        EventType::RELATIVE => EventKind::Relative,
        _ => return None,
    };
    if kind == EventKind::Key && event.value() == KEY_REPEAT {
        return None;
    }
    let timestamp_nanos = event
        .timestamp()
        .duration_since(UNIX_EPOCH)
        .map(|time| time.as_nanos() as u64)
        .unwrap_or_else(|_| now_nanos());

    Some(RawEvent::new(timestamp_nanos, kind, event.code(), event.value()))
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|time| time.as_nanos() as u64)
        .unwrap_or_default()
}

/// Force feedback handle on an event device
pub struct EventDeviceEffects {
    device: Device,
    effects: HashMap<i16, FFEffect>,
}

impl EventDeviceEffects {
    pub fn new(device: Device) -> Self {
        Self {
            device,
            effects: HashMap::new(),
        }
    }

    fn effect(&mut self, id: i16) -> Result<&mut FFEffect, BackendError> {
        self.effects
            .get_mut(&id)
            .ok_or_else(|| BackendError::DeviceError(format!("no FF effect with id {id}")))
    }
}

impl ForceFeedbackDevice for EventDeviceEffects {
    fn upload(&mut self, effect: EffectData, id: Option<i16>) -> Result<i16, BackendError> {
        let effect_data = to_ff_effect_data(effect);
        if let Some(id) = id {
            if let Some(current) = self.effects.get_mut(&id) {
                log::trace!("Updating FF effect {id}");
                current.update(effect_data)?;
                return Ok(id);
            }
            log::warn!("Unable to find existing FF effect with id {id}, uploading a new one");
        }

        log::trace!("Uploading FF effect data");
        let effect = self.device.upload_ff_effect(effect_data)?;
        let id = effect.id() as i16;
        self.effects.insert(id, effect);
        Ok(id)
    }

    fn start(&mut self, id: i16, iterations: i32) -> Result<(), BackendError> {
        log::trace!("Playing FF effect {id}");
        self.effect(id)?.play(iterations)?;
        Ok(())
    }

    fn stop(&mut self, id: i16) -> Result<(), BackendError> {
        log::trace!("Stopping FF effect {id}");
        self.effect(id)?.stop()?;
        Ok(())
    }
}

/// Build the evdev effect for the given effect data. A replay length of zero
/// plays the effect until it is stopped.
fn to_ff_effect_data(effect: EffectData) -> FFEffectData {
    let kind = match effect {
        EffectData::Rumble {
            strong_magnitude,
            weak_magnitude,
        } => FFEffectKind::Rumble {
            strong_magnitude,
            weak_magnitude,
        },
        EffectData::Constant { level } => FFEffectKind::Constant {
            level,
            envelope: FFEnvelope {
                attack_length: 0,
                attack_level: 0,
                fade_length: 0,
                fade_level: 0,
            },
        },
    };

    FFEffectData {
        direction: 0,
        trigger: FFTrigger {
            button: 0,
            interval: 0,
        },
        replay: FFReplay {
            length: 0,
            delay: 0,
        },
        kind,
    }
}

#[cfg(test)]
mod tests {
    use evdev::{AbsoluteAxisCode, EventType, InputEvent, KeyCode};

    use crate::input::{rumble::EffectData, source::EventKind};

    use super::{to_ff_effect_data, translate, KEY_REPEAT};

    #[test]
    fn test_translate() {
        let event = InputEvent::new(EventType::ABSOLUTE.0, AbsoluteAxisCode::ABS_X.0, -12);
        let raw = translate(event).expect("absolute events should translate");
        assert_eq!(raw.kind, EventKind::Absolute);
        assert_eq!(raw.code, AbsoluteAxisCode::ABS_X.0);
        assert_eq!(raw.value, -12);

        let event = InputEvent::new(EventType::KEY.0, KeyCode::BTN_SOUTH.0, 1);
        assert_eq!(translate(event).map(|e| e.kind), Some(EventKind::Key));

        let repeat = InputEvent::new(EventType::KEY.0, KeyCode::BTN_SOUTH.0, KEY_REPEAT);
        assert!(translate(repeat).is_none(), "autorepeat should be dropped");

        let event = InputEvent::new(EventType::SYNCHRONIZATION.0, 0, 0);
        assert!(translate(event).is_none(), "sync events should be dropped");
    }

    #[test]
    fn test_effect_data_plays_until_stopped() {
        let data = to_ff_effect_data(EffectData::Constant { level: 100 });
        assert_eq!(data.replay.length, 0);
        assert_eq!(data.replay.delay, 0);
    }
}
