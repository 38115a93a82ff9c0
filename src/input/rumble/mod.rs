pub mod client;
pub mod command;
pub mod dispatcher;

use std::sync::{Mutex, MutexGuard};

use crate::input::source::EffectKind;

use self::client::EffectClient;

/// Repeat count used to play an effect until it is explicitly stopped
pub const INFINITE_ITERATIONS: i32 = i32::MAX;

/// Native parameters of a force feedback effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectData {
    Rumble {
        strong_magnitude: u16,
        weak_magnitude: u16,
    },
    Constant {
        level: i16,
    },
}

impl EffectData {
    /// Create effect parameters for the given kind scaled from an intensity
    /// between 0.0 and 1.0
    pub fn from_intensity(kind: EffectKind, intensity: f32) -> Self {
        let intensity = clamp_intensity(intensity);
        match kind {
            EffectKind::Rumble => {
                let magnitude = (intensity * u16::MAX as f32).round() as u16;
                EffectData::Rumble {
                    strong_magnitude: magnitude,
                    weak_magnitude: magnitude,
                }
            }
            EffectKind::Constant => EffectData::Constant {
                level: (intensity * i16::MAX as f32).round() as i16,
            },
        }
    }
}

/// Lifecycle of the effect behind one [Rumbler]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
    #[default]
    Unallocated,
    Uploaded(i16),
    Playing(i16),
    Stopped(i16),
}

impl EffectState {
    /// Returns the driver assigned effect id, if the effect was uploaded
    pub fn id(&self) -> Option<i16> {
        match self {
            EffectState::Unallocated => None,
            EffectState::Uploaded(id) | EffectState::Playing(id) | EffectState::Stopped(id) => {
                Some(*id)
            }
        }
    }
}

/// A force feedback output channel on a controller.
///
/// Native calls are dispatched to the effect dispatcher of the physical
/// device, so rumblers of one device never race on the driver. Force
/// feedback is best effort: failures are logged and never returned.
#[derive(Debug)]
pub struct Rumbler {
    kind: EffectKind,
    client: EffectClient,
    state: Mutex<EffectState>,
}

impl Rumbler {
    pub fn new(kind: EffectKind, client: EffectClient) -> Self {
        Self {
            kind,
            client,
            state: Mutex::new(EffectState::default()),
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Human readable name of the output
    pub fn name(&self) -> &'static str {
        match self.kind {
            EffectKind::Rumble => "Rumble",
            EffectKind::Constant => "Constant Force",
        }
    }

    /// Returns the current state of the effect
    pub fn state(&self) -> EffectState {
        *self.lock_state()
    }

    /// Rumble at the given intensity between 0.0 and 1.0. Any positive
    /// intensity uploads (or updates) the effect and plays it until stopped.
    /// An intensity of zero stops the effect but keeps it uploaded.
    pub fn rumble(&self, intensity: f32) {
        let intensity = clamp_intensity(intensity);
        let mut state = self.lock_state();

        if intensity == 0.0 {
            let Some(id) = state.id() else {
                log::debug!("{} effect was never uploaded, nothing to stop", self.name());
                return;
            };
            match self.client.stop(id) {
                Ok(_) => *state = EffectState::Stopped(id),
                Err(e) => log::error!("Failed to stop {} effect {id}: {e}", self.name()),
            }
            return;
        }

        let effect = EffectData::from_intensity(self.kind, intensity);
        let id = match self.client.upload(effect, state.id()) {
            Ok(id) => id,
            Err(e) => {
                log::error!("Failed to upload {} effect: {e}", self.name());
                return;
            }
        };
        *state = EffectState::Uploaded(id);
        log::trace!("Uploaded {} effect {id}: {:?}", self.name(), effect);

        match self.client.start(id, INFINITE_ITERATIONS) {
            Ok(_) => *state = EffectState::Playing(id),
            Err(e) => log::error!("Failed to start {} effect {id}: {e}", self.name()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, EffectState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

// NaN and negative intensities are treated as zero
fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        return 0.0;
    }
    intensity.clamp(0.0, 1.0)
}
