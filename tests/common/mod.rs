#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use inputfuse::input::{
    rumble::EffectData,
    source::{
        AbsAxisInfo, BackendError, CapabilityTable, EventKind, ForceFeedbackDevice,
        RawDeviceBackend, RawEvent,
    },
};

/// Shared handle used by a test to feed and observe a [ScriptedBackend]
#[derive(Debug, Clone, Default)]
pub struct Script {
    batches: Arc<Mutex<VecDeque<Result<Vec<RawEvent>, BackendError>>>>,
    closed: Arc<AtomicBool>,
    effect_calls: Arc<Mutex<Vec<String>>>,
}

impl Script {
    /// Queue a batch of events returned by the next poll
    pub fn push(&self, events: Vec<RawEvent>) {
        self.batches.lock().unwrap().push_back(Ok(events));
    }

    /// Make the next poll fail
    pub fn fail(&self, error: BackendError) {
        self.batches.lock().unwrap().push_back(Err(error));
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn effect_calls(&self) -> Vec<String> {
        self.effect_calls.lock().unwrap().clone()
    }
}

/// How a [ScriptedBackend] answers force feedback requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effects {
    None,
    Working,
    FailingUploads,
    FailingOpen,
}

/// In-memory raw backend replaying scripted event batches
#[derive(Debug)]
pub struct ScriptedBackend {
    name: String,
    capabilities: Result<CapabilityTable, String>,
    effects: Effects,
    script: Script,
}

impl ScriptedBackend {
    pub fn new(name: &str, capabilities: CapabilityTable) -> (Self, Script) {
        let script = Script::default();
        let backend = Self {
            name: name.to_string(),
            capabilities: Ok(capabilities),
            effects: Effects::None,
            script: script.clone(),
        };
        (backend, script)
    }

    /// A backend whose capability query fails
    pub fn broken(name: &str) -> (Self, Script) {
        let (mut backend, script) = Self::new(name, CapabilityTable::default());
        backend.capabilities = Err("permission denied".to_string());
        (backend, script)
    }

    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    pub fn boxed(self) -> Box<dyn RawDeviceBackend> {
        Box::new(self)
    }
}

impl RawDeviceBackend for ScriptedBackend {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn capabilities(&self) -> Result<CapabilityTable, BackendError> {
        self.capabilities
            .clone()
            .map_err(BackendError::DeviceError)
    }

    fn poll(&mut self) -> Result<Vec<RawEvent>, BackendError> {
        if self.script.is_closed() {
            return Err(BackendError::Closed);
        }
        let next = self.script.batches.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    fn open_force_feedback(&mut self) -> Result<Option<Box<dyn ForceFeedbackDevice>>, BackendError> {
        match self.effects {
            Effects::None => Ok(None),
            Effects::FailingOpen => Err(BackendError::Unsupported),
            Effects::Working | Effects::FailingUploads => Ok(Some(Box::new(RecordingEffects {
                calls: self.script.effect_calls.clone(),
                fail_uploads: self.effects == Effects::FailingUploads,
                next_id: 0,
            }))),
        }
    }

    fn close(&mut self) {
        self.script.closed.store(true, Ordering::SeqCst);
    }
}

/// Force feedback device recording every native call
struct RecordingEffects {
    calls: Arc<Mutex<Vec<String>>>,
    fail_uploads: bool,
    next_id: i16,
}

impl ForceFeedbackDevice for RecordingEffects {
    fn upload(&mut self, effect: EffectData, id: Option<i16>) -> Result<i16, BackendError> {
        self.calls.lock().unwrap().push(format!("upload {effect:?} {id:?}"));
        if self.fail_uploads {
            return Err(BackendError::DeviceError("effect memory full".to_string()));
        }
        let id = id.unwrap_or_else(|| {
            self.next_id += 1;
            self.next_id
        });
        Ok(id)
    }

    fn start(&mut self, id: i16, iterations: i32) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(format!("start {id} {iterations}"));
        Ok(())
    }

    fn stop(&mut self, id: i16) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(format!("stop {id}"));
        Ok(())
    }
}

pub fn key(code: u16, value: i32) -> RawEvent {
    RawEvent::new(0, EventKind::Key, code, value)
}

pub fn abs(code: u16, value: i32) -> RawEvent {
    RawEvent::new(0, EventKind::Absolute, code, value)
}

pub fn rel(code: u16, value: i32) -> RawEvent {
    RawEvent::new(0, EventKind::Relative, code, value)
}

pub fn axis(code: u16, minimum: i32, maximum: i32, flat: i32) -> AbsAxisInfo {
    AbsAxisInfo::new(code, minimum, maximum, flat)
}
