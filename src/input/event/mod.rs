pub mod queue;

use crate::input::identifier::Identifier;

/// A normalized input event. Events are immutable once they are enqueued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Index of the component in its controller's component list
    component: usize,
    /// Identifier of the component that changed
    identifier: Identifier,
    /// Calibrated value of the component
    value: f32,
    /// Time the event was produced by the native device
    nanos: u64,
}

impl Event {
    pub fn new(component: usize, identifier: Identifier, value: f32, nanos: u64) -> Self {
        Self {
            component,
            identifier,
            value,
            nanos,
        }
    }

    /// Returns the index of the component this event was produced for. This
    /// indexes into [Controller::components].
    ///
    /// [Controller::components]: crate::input::controller::Controller::components
    pub fn component(&self) -> usize {
        self.component
    }

    /// Returns the identifier of the component this event was produced for
    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// Returns the calibrated value of the event
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Returns the timestamp of the event in nanoseconds
    pub fn nanos(&self) -> u64 {
        self.nanos
    }
}
