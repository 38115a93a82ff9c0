use std::{collections::HashMap, fmt};

use evdev::BusType;
use thiserror::Error;

use crate::input::{
    capability::{enumerate_components, inference::infer_controller_type, CodeTable},
    component::{descriptor_bindings, Component, Role},
    event::{
        queue::{EventQueue, DEFAULT_QUEUE_SIZE},
        Event,
    },
    fusion::DeviceDescriptor,
    identifier::Identifier,
    rumble::{client::EffectClient, dispatcher, Rumbler},
    source::{BackendError, EffectKind, NativeCode, RawDeviceBackend, RawEvent},
};

/// Possible errors returned when polling a controller
#[derive(Error, Debug)]
pub enum PollError {
    #[error("controller is closed")]
    Closed,
    #[error("controller failed and is no longer usable")]
    Unusable,
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Logical type of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerType {
    Mouse,
    Keyboard,
    Gamepad,
    Stick,
    Wheel,
    #[default]
    Unknown,
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerType::Mouse => "Mouse",
            ControllerType::Keyboard => "Keyboard",
            ControllerType::Gamepad => "Gamepad",
            ControllerType::Stick => "Stick",
            ControllerType::Wheel => "Wheel",
            ControllerType::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// Bus a controller is attached through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PortType {
    Usb,
    Bluetooth,
    I8042,
    Serial,
    Virtual,
    #[default]
    Unknown,
}

impl PortType {
    /// Port type from a Linux input bus type
    pub fn from_bus_type(bus_type: u16) -> Self {
        match BusType(bus_type) {
            BusType::BUS_USB => PortType::Usb,
            BusType::BUS_BLUETOOTH => PortType::Bluetooth,
            BusType::BUS_I8042 => PortType::I8042,
            BusType::BUS_RS232 => PortType::Serial,
            BusType::BUS_VIRTUAL => PortType::Virtual,
            _ => PortType::Unknown,
        }
    }

    /// Port type from a udev ID_BUS property
    pub fn from_bus_name(bus: &str) -> Self {
        match bus.to_lowercase().as_str() {
            "usb" => PortType::Usb,
            "bluetooth" => PortType::Bluetooth,
            "i8042" => PortType::I8042,
            "serial" | "rs232" => PortType::Serial,
            "virtual" => PortType::Virtual,
            _ => PortType::Unknown,
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PortType::Usb => "USB",
            PortType::Bluetooth => "Bluetooth",
            PortType::I8042 => "i8042",
            PortType::Serial => "Serial",
            PortType::Virtual => "Virtual",
            PortType::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// Options used when building a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub event_queue_size: usize,
    pub rumble: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            event_queue_size: DEFAULT_QUEUE_SIZE,
            rumble: true,
        }
    }
}

/// Lifecycle state of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Open,
    Failed,
    Closed,
}

/// A raw backend together with the mapping from its native codes to the
/// components they feed. The native handle is released when the source is
/// dropped.
#[derive(Debug)]
struct Source {
    backend: Box<dyn RawDeviceBackend>,
    bindings: HashMap<NativeCode, (usize, Role)>,
}

impl Source {
    fn new(backend: Box<dyn RawDeviceBackend>, bindings: HashMap<NativeCode, (usize, Role)>) -> Self {
        Self { backend, bindings }
    }

    /// Feed raw events into the given components, calling `emit` with the
    /// normalized event of every mapped raw event
    fn apply(&self, components: &mut [Component], events: Vec<RawEvent>, mut emit: impl FnMut(Event)) {
        for event in events {
            let Some((index, role)) = self.bindings.get(&event.native_code()) else {
                log::trace!("Ignoring unmapped event: {:?}", event);
                continue;
            };
            let Some(component) = components.get_mut(*index) else {
                continue;
            };
            let value = component.process(*role, event.value);
            emit(Event::new(*index, component.identifier(), value, event.timestamp_nanos));
        }
    }
}

impl Drop for Source {
    fn drop(&mut self) {
        self.backend.close();
    }
}

/// Event source of a fused controller, with its own components so raw
/// values are calibrated against the legacy device's ranges
#[derive(Debug)]
struct FusedEvents {
    source: Source,
    components: Vec<Component>,
}

/// A named, typed collection of components representing one logical input
/// device. Call [Controller::poll] once per frame, then drain events with
/// [Controller::next_event] until it returns `None`.
#[derive(Debug)]
pub struct Controller {
    name: String,
    controller_type: ControllerType,
    port_type: PortType,
    components: Vec<Component>,
    children: Vec<Controller>,
    rumblers: Vec<Rumbler>,
    effects: Option<EffectClient>,
    source: Source,
    fused: Option<FusedEvents>,
    queue: EventQueue,
    state: ControllerState,
}

impl Controller {
    /// Build a controller from the given backend. The component list is
    /// fixed after construction. Force feedback failures are logged and
    /// leave the controller without rumblers.
    pub fn new(
        mut backend: Box<dyn RawDeviceBackend>,
        table: &CodeTable,
        options: &ControllerOptions,
    ) -> Result<Self, BackendError> {
        let name = backend.name();
        let capabilities = backend.capabilities()?;
        let descriptors = enumerate_components(&capabilities, table);
        let controller_type = infer_controller_type(&name, &descriptors, table);
        let components: Vec<Component> = descriptors.iter().map(Component::from_descriptor).collect();

        let mut bindings = HashMap::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            for (code, role) in descriptor_bindings(descriptor) {
                bindings.insert(code, (index, role));
            }
        }

        let (effects, rumblers) = if options.rumble {
            open_rumblers(&name, backend.as_mut(), &capabilities.effects)
        } else {
            (None, Vec::new())
        };

        log::debug!(
            "Built {controller_type} controller '{name}' with {} components and {} rumblers",
            components.len(),
            rumblers.len()
        );

        Ok(Self {
            name,
            controller_type,
            port_type: backend.port_type(),
            components,
            children: Vec::new(),
            rumblers,
            effects,
            source: Source::new(backend, bindings),
            fused: None,
            queue: EventQueue::new(options.event_queue_size),
            state: ControllerState::Open,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn controller_type(&self) -> ControllerType {
        self.controller_type
    }

    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    pub fn components(&self) -> &[Component] {
        self.components.as_slice()
    }

    /// Returns the first component with the given identifier
    pub fn component(&self, identifier: Identifier) -> Option<&Component> {
        self.components.iter().find(|c| c.identifier() == identifier)
    }

    /// Returns true if the component with the given identifier is pressed
    pub fn is_pressed(&self, identifier: Identifier) -> bool {
        self.component(identifier).is_some_and(|c| c.is_pressed())
    }

    pub fn children(&self) -> &[Controller] {
        self.children.as_slice()
    }

    pub fn rumblers(&self) -> &[Rumbler] {
        self.rumblers.as_slice()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Returns true if events are sourced from a fused legacy device
    pub fn is_fused(&self) -> bool {
        self.fused.is_some()
    }

    /// Returns the key used to match this controller during fusion
    pub fn descriptor(&self) -> DeviceDescriptor {
        DeviceDescriptor::new(
            self.name.clone(),
            self.components.iter().map(|c| c.identifier()).collect(),
        )
    }

    /// Replace the event queue with one of the given capacity. Pending
    /// events are discarded.
    pub fn set_event_queue_size(&mut self, size: usize) {
        self.queue = EventQueue::new(size);
    }

    /// Read all pending native events, update component state and queue the
    /// normalized events. Having no data available is not an error. A hard
    /// backend failure is returned once and leaves the controller unusable.
    pub fn poll(&mut self) -> Result<(), PollError> {
        match self.state {
            ControllerState::Closed => return Err(PollError::Closed),
            ControllerState::Failed => return Err(PollError::Unusable),
            ControllerState::Open => (),
        }

        let Self {
            name,
            components,
            source,
            fused,
            queue,
            state,
            ..
        } = self;

        for component in components.iter_mut() {
            component.reset_relative();
        }

        let events = match source.backend.poll() {
            Ok(events) => events,
            Err(e) => {
                log::error!("Failed to poll '{name}': {e}");
                *state = ControllerState::Failed;
                return Err(e.into());
            }
        };
        // A fused controller keeps its state from the primary source but
        // takes its events from the legacy one
        let is_fused = fused.is_some();
        source.apply(components, events, |event| {
            if !is_fused {
                enqueue(queue, event);
            }
        });

        let Some(fused) = fused.as_mut() else {
            return Ok(());
        };
        let events = match fused.source.backend.poll() {
            Ok(events) => events,
            Err(e) => {
                log::error!("Failed to poll fused events of '{name}': {e}");
                *state = ControllerState::Failed;
                return Err(e.into());
            }
        };
        fused
            .source
            .apply(&mut fused.components, events, |event| enqueue(queue, event));

        Ok(())
    }

    /// Returns the oldest queued event, or `None` if the queue is empty
    pub fn next_event(&mut self) -> Option<Event> {
        self.queue.pop()
    }

    /// Release the native handles and stop the effect dispatcher. Calling
    /// close more than once has no effect.
    pub fn close(&mut self) {
        if self.state == ControllerState::Closed {
            return;
        }
        log::debug!("Closing controller '{}'", self.name);
        self.source.backend.close();
        if let Some(fused) = self.fused.as_mut() {
            fused.source.backend.close();
        }
        if let Some(effects) = self.effects.take() {
            if let Err(e) = effects.shutdown() {
                log::debug!("Unable to stop effect dispatcher of '{}': {e}", self.name);
            }
        }
        for child in self.children.iter_mut() {
            child.close();
        }
        self.state = ControllerState::Closed;
    }

    /// Merge a legacy controller describing the same physical device into
    /// this one. Components and polled state stay with this controller while
    /// events are taken from the legacy source.
    pub(crate) fn fuse(mut self, legacy: Controller) -> Controller {
        log::debug!("Fusing event source of '{}' into controller", legacy.name);
        let Controller {
            name: legacy_name,
            source,
            components,
            mut effects,
            ..
        } = legacy;
        if let Some(effects) = effects.take() {
            if let Err(e) = effects.shutdown() {
                log::debug!("Unable to stop effect dispatcher of '{legacy_name}': {e}");
            }
        }
        self.fused = Some(FusedEvents { source, components });
        self
    }
}

fn enqueue(queue: &mut EventQueue, event: Event) {
    if !queue.push(event) {
        log::trace!("Event queue full, dropping event: {:?}", event);
    }
}

/// Open force feedback on the backend and create one rumbler per supported
/// effect. All rumblers of a device share a single dispatcher.
fn open_rumblers(
    name: &str,
    backend: &mut dyn RawDeviceBackend,
    effects: &[EffectKind],
) -> (Option<EffectClient>, Vec<Rumbler>) {
    if effects.is_empty() {
        return (None, Vec::new());
    }
    let device = match backend.open_force_feedback() {
        Ok(Some(device)) => device,
        Ok(None) => return (None, Vec::new()),
        Err(e) => {
            log::warn!("Unable to open force feedback for '{name}': {e}");
            return (None, Vec::new());
        }
    };
    let client = match dispatcher::spawn(name, device) {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Unable to start effect dispatcher for '{name}': {e}");
            return (None, Vec::new());
        }
    };
    let rumblers = effects
        .iter()
        .map(|kind| Rumbler::new(*kind, client.clone()))
        .collect();

    (Some(client), rumblers)
}
