use std::{
    fs::File,
    io::{self, Read},
    os::fd::AsRawFd,
};

use nix::fcntl::{FcntlArg, OFlag};

use crate::input::controller::PortType;

use super::{AbsAxisInfo, BackendError, CapabilityTable, EventKind, RawDeviceBackend, RawEvent};

// Legacy joystick API ioctls from linux/joystick.h
nix::ioctl_read!(js_axes, b'j', 0x11, u8);
nix::ioctl_read!(js_buttons, b'j', 0x12, u8);
nix::ioctl_read_buf!(js_name, b'j', 0x13, u8);
nix::ioctl_read_buf!(js_axis_map, b'j', 0x32, u8);
nix::ioctl_read_buf!(js_button_map, b'j', 0x34, u16);

const JS_EVENT_BUTTON: u8 = 0x01;
const JS_EVENT_AXIS: u8 = 0x02;
/// Set on the synthetic events reporting the initial state
const JS_EVENT_INIT: u8 = 0x80;
/// Size of a `struct js_event`
const JS_EVENT_SIZE: usize = 8;
/// Axis values reported by the joystick API are always in this range
pub const JS_AXIS_MAX: i32 = 32767;

/// ABS_CNT
const AXIS_MAP_SIZE: usize = 0x40;
/// KEY_MAX - BTN_MISC + 1
const BUTTON_MAP_SIZE: usize = 0x200;
const NAME_SIZE: usize = 128;
/// Number of records read per syscall
const READ_BATCH: usize = 64;

/// One decoded `struct js_event`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsEvent {
    /// Event timestamp in milliseconds
    pub time: u32,
    pub value: i16,
    pub kind: u8,
    pub number: u8,
}

impl JsEvent {
    /// Decode a native endian `struct js_event` record
    pub fn parse(record: &[u8]) -> Option<Self> {
        let record: &[u8; JS_EVENT_SIZE] = record.try_into().ok()?;
        Some(Self {
            time: u32::from_ne_bytes([record[0], record[1], record[2], record[3]]),
            value: i16::from_ne_bytes([record[4], record[5]]),
            kind: record[6],
            number: record[7],
        })
    }

    /// Returns true if this event reports initial state rather than a change
    pub fn is_init(&self) -> bool {
        self.kind & JS_EVENT_INIT != 0
    }
}

/// Mapping from joystick API axis and button numbers back to the input
/// event codes they were created from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoystickMap {
    pub axes: Vec<u16>,
    pub buttons: Vec<u16>,
}

impl JoystickMap {
    pub fn new(axes: Vec<u16>, buttons: Vec<u16>) -> Self {
        Self { axes, buttons }
    }

    /// Translate a joystick API event into a raw event keyed by native code
    pub fn translate(&self, event: &JsEvent) -> Option<RawEvent> {
        let timestamp_nanos = event.time as u64 * 1_000_000;
        let number = event.number as usize;
        match event.kind & !JS_EVENT_INIT {
            JS_EVENT_AXIS => {
                let code = *self.axes.get(number)?;
                Some(RawEvent::new(
                    timestamp_nanos,
                    EventKind::Absolute,
                    code,
                    event.value as i32,
                ))
            }
            JS_EVENT_BUTTON => {
                let code = *self.buttons.get(number)?;
                Some(RawEvent::new(timestamp_nanos, EventKind::Key, code, event.value as i32))
            }
            kind => {
                log::trace!("Ignoring joystick event of unknown type {kind:#x}");
                None
            }
        }
    }

    /// Capabilities as seen through the joystick API. Every axis reports
    /// the fixed joystick API range with no flat zone.
    pub fn capabilities(&self) -> CapabilityTable {
        CapabilityTable {
            keys: self.buttons.clone(),
            absolute: self
                .axes
                .iter()
                .map(|code| AbsAxisInfo::new(*code, -JS_AXIS_MAX, JS_AXIS_MAX, 0))
                .collect(),
            relative: Vec::new(),
            effects: Vec::new(),
        }
    }
}

/// [JoystickDevice] is a raw backend for a device using the legacy joystick
/// API (/dev/input/js*). It offers buffered events only and no force
/// feedback.
#[derive(Debug)]
pub struct JoystickDevice {
    path: String,
    name: String,
    port_type: PortType,
    map: JoystickMap,
    file: Option<File>,
}

impl JoystickDevice {
    /// Open the joystick device at the given path for non-blocking reads
    pub fn open(path: &str) -> Result<Self, BackendError> {
        log::debug!("Opening joystick at: {}", path);
        let file = File::open(path)?;
        let fd = file.as_raw_fd();
        nix::fcntl::fcntl(fd, FcntlArg::F_SETFL(OFlag::O_NONBLOCK))?;

        let mut axes: u8 = 0;
        let mut buttons: u8 = 0;
        let mut name = [0u8; NAME_SIZE];
        let mut axis_map = [0u8; AXIS_MAP_SIZE];
        let mut button_map = [0u16; BUTTON_MAP_SIZE];
        unsafe {
            js_axes(fd, &mut axes)?;
            js_buttons(fd, &mut buttons)?;
            js_name(fd, &mut name)?;
            js_axis_map(fd, &mut axis_map)?;
            js_button_map(fd, &mut button_map)?;
        }

        let name_len = name.iter().position(|b| *b == 0).unwrap_or(NAME_SIZE);
        let name = String::from_utf8_lossy(&name[..name_len]).trim().to_string();
        let axes = axis_map
            .iter()
            .take(axes as usize)
            .map(|code| *code as u16)
            .collect();
        let buttons = button_map.iter().take(buttons as usize).copied().collect();
        let map = JoystickMap::new(axes, buttons);
        log::trace!("Joystick map for '{name}': {:?}", map);

        Ok(Self {
            path: path.to_string(),
            name,
            port_type: PortType::Unknown,
            map,
            file: Some(file),
        })
    }

    /// The joystick API does not report the bus, so it is set from udev
    pub fn with_port_type(mut self, port_type: PortType) -> Self {
        self.port_type = port_type;
        self
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub fn map(&self) -> &JoystickMap {
        &self.map
    }
}

impl RawDeviceBackend for JoystickDevice {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn port_type(&self) -> PortType {
        self.port_type
    }

    fn capabilities(&self) -> Result<CapabilityTable, BackendError> {
        if self.file.is_none() {
            return Err(BackendError::Closed);
        }
        Ok(self.map.capabilities())
    }

    fn poll(&mut self) -> Result<Vec<RawEvent>, BackendError> {
        let Some(file) = self.file.as_mut() else {
            return Err(BackendError::Closed);
        };

        let mut events = Vec::new();
        let mut buffer = [0u8; JS_EVENT_SIZE * READ_BATCH];
        loop {
            let read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                // Do nothing if this would block
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            for record in buffer[..read].chunks_exact(JS_EVENT_SIZE) {
                let Some(event) = JsEvent::parse(record) else {
                    continue;
                };
                if event.is_init() {
                    log::trace!("Initial joystick state: {:?}", event);
                }
                events.extend(self.map.translate(&event));
            }
            if read < buffer.len() {
                break;
            }
        }

        Ok(events)
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            log::debug!("Closed joystick at: {}", self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use evdev::{AbsoluteAxisCode, KeyCode};

    use crate::input::source::EventKind;

    use super::{JoystickMap, JsEvent, JS_AXIS_MAX, JS_EVENT_AXIS, JS_EVENT_BUTTON, JS_EVENT_INIT};

    fn record(time: u32, value: i16, kind: u8, number: u8) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(time.to_ne_bytes());
        bytes.extend(value.to_ne_bytes());
        bytes.push(kind);
        bytes.push(number);
        bytes
    }

    #[test]
    fn test_parse_event() {
        let event = JsEvent::parse(&record(1500, -32767, JS_EVENT_AXIS, 1)).expect("should parse");
        assert_eq!(event.time, 1500);
        assert_eq!(event.value, -32767);
        assert_eq!(event.kind, JS_EVENT_AXIS);
        assert_eq!(event.number, 1);
        assert!(!event.is_init());

        assert!(JsEvent::parse(&[0u8; 7]).is_none());
    }

    #[test]
    fn test_translate_through_maps() {
        let map = JoystickMap::new(
            vec![AbsoluteAxisCode::ABS_X.0, AbsoluteAxisCode::ABS_Y.0],
            vec![KeyCode::BTN_TRIGGER.0, KeyCode::BTN_THUMB.0],
        );

        let event = JsEvent::parse(&record(2, 100, JS_EVENT_AXIS, 1)).expect("should parse");
        let raw = map.translate(&event).expect("axis 1 is mapped");
        assert_eq!(raw.kind, EventKind::Absolute);
        assert_eq!(raw.code, AbsoluteAxisCode::ABS_Y.0);
        assert_eq!(raw.value, 100);
        assert_eq!(raw.timestamp_nanos, 2_000_000);

        let kind = JS_EVENT_BUTTON | JS_EVENT_INIT;
        let event = JsEvent::parse(&record(0, 1, kind, 0)).expect("should parse");
        assert!(event.is_init());
        let raw = map.translate(&event).expect("button 0 is mapped");
        assert_eq!(raw.kind, EventKind::Key);
        assert_eq!(raw.code, KeyCode::BTN_TRIGGER.0);

        let event = JsEvent::parse(&record(0, 1, JS_EVENT_BUTTON, 9)).expect("should parse");
        assert!(map.translate(&event).is_none(), "unmapped numbers are ignored");
    }

    #[test]
    fn test_capabilities() {
        let map = JoystickMap::new(vec![AbsoluteAxisCode::ABS_X.0], vec![KeyCode::BTN_TRIGGER.0]);
        let caps = map.capabilities();
        assert_eq!(caps.keys, vec![KeyCode::BTN_TRIGGER.0]);
        assert_eq!(caps.absolute.len(), 1);
        assert_eq!(caps.absolute[0].minimum, -JS_AXIS_MAX);
        assert_eq!(caps.absolute[0].maximum, JS_AXIS_MAX);
        assert!(caps.effects.is_empty());
    }
}
