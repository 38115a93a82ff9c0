use crate::input::{
    calibration::{calibrate_button, hat_step, AxisCalibration},
    capability::{ComponentDescriptor, DescriptorKind},
    identifier::Identifier,
    pov::{PovComposer, PovDirection},
    source::{AbsAxisInfo, NativeCode},
};

/// How a component interprets its raw values
#[derive(Debug, Clone)]
pub enum ComponentKind {
    Axis(AxisCalibration),
    Pov {
        composer: PovComposer,
        x: AbsAxisInfo,
        y: AbsAxisInfo,
    },
    Button,
}

/// Which part of a component a native code feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Value,
    PovX,
    PovY,
}

/// A single scalar control (axis, hat or button) on a controller. Components
/// are owned by exactly one controller and only change while that
/// controller is polled.
#[derive(Debug, Clone)]
pub struct Component {
    identifier: Identifier,
    kind: ComponentKind,
    value: f32,
}

impl Component {
    pub fn new(identifier: Identifier, kind: ComponentKind) -> Self {
        Self {
            identifier,
            kind,
            value: 0.0,
        }
    }

    /// Build a component from an enumerated descriptor
    pub fn from_descriptor(descriptor: &ComponentDescriptor) -> Self {
        let kind = match descriptor.kind {
            DescriptorKind::Axis(info) => {
                ComponentKind::Axis(AxisCalibration::absolute(info.minimum, info.maximum, info.flat))
            }
            DescriptorKind::RelativeAxis { scale, .. } => {
                ComponentKind::Axis(AxisCalibration::relative(scale))
            }
            DescriptorKind::Pov { x, y } => ComponentKind::Pov {
                composer: PovComposer::new(),
                x,
                y,
            },
            DescriptorKind::Button { .. } => ComponentKind::Button,
        };
        Self::new(descriptor.identifier, kind)
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// Human readable name of the component
    pub fn name(&self) -> String {
        self.identifier.to_string()
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Returns true if the component reports a continuous range of values
    pub fn is_analog(&self) -> bool {
        matches!(self.kind, ComponentKind::Axis(_))
    }

    /// Returns true if the component reports deltas rather than positions
    pub fn is_relative(&self) -> bool {
        match &self.kind {
            ComponentKind::Axis(calibration) => calibration.is_relative(),
            _ => false,
        }
    }

    /// Returns the dead zone of the component. Values inside the dead zone
    /// are still reported; callers decide whether to suppress them.
    pub fn dead_zone(&self) -> f32 {
        match &self.kind {
            ComponentKind::Axis(calibration) => calibration.deadzone(),
            _ => 0.0,
        }
    }

    /// Returns the value of the component as of the last controller poll
    pub fn poll(&self) -> f32 {
        self.value
    }

    /// Returns the direction of a POV component
    pub fn pov_direction(&self) -> Option<PovDirection> {
        match &self.kind {
            ComponentKind::Pov { composer, .. } => Some(composer.direction()),
            _ => None,
        }
    }

    /// Returns true if a button is held, or an axis is outside of its dead
    /// zone
    pub fn is_pressed(&self) -> bool {
        match &self.kind {
            ComponentKind::Button => self.value != 0.0,
            ComponentKind::Pov { .. } => self.value != PovDirection::Off.value(),
            ComponentKind::Axis(_) => self.value.abs() > self.dead_zone(),
        }
    }

    /// Feed a raw value into the component. Returns the calibrated value that
    /// should be reported as an event.
    pub(crate) fn process(&mut self, role: Role, raw: i32) -> f32 {
        match (&mut self.kind, role) {
            (ComponentKind::Axis(calibration), _) => {
                let value = calibration.calibrate(raw);
                if calibration.is_relative() {
                    self.value += value;
                } else {
                    self.value = value;
                }
                value
            }
            (ComponentKind::Pov { composer, x, .. }, Role::PovX) => {
                let step = hat_step(raw, x.minimum, x.maximum);
                self.value = composer.update_x(step).value();
                self.value
            }
            (ComponentKind::Pov { composer, y, .. }, Role::PovY) => {
                let step = hat_step(raw, y.minimum, y.maximum);
                self.value = composer.update_y(step).value();
                self.value
            }
            (ComponentKind::Pov { composer, .. }, Role::Value) => {
                log::warn!("POV {} received a value without an axis role", self.identifier);
                composer.direction().value()
            }
            (ComponentKind::Button, _) => {
                self.value = calibrate_button(raw);
                self.value
            }
        }
    }

    /// Relative axes accumulate deltas per poll and start from zero again on
    /// the next one
    pub(crate) fn reset_relative(&mut self) {
        if self.is_relative() {
            self.value = 0.0;
        }
    }
}

/// Returns the native codes feeding the given descriptor with their role
pub(crate) fn descriptor_bindings(descriptor: &ComponentDescriptor) -> Vec<(NativeCode, Role)> {
    let codes = descriptor.native_codes();
    match descriptor.kind {
        DescriptorKind::Pov { .. } => codes
            .into_iter()
            .zip([Role::PovX, Role::PovY])
            .collect(),
        _ => codes.into_iter().map(|code| (code, Role::Value)).collect(),
    }
}
