use std::sync::mpsc::Sender;

use crate::input::source::BackendError;

use super::EffectData;

/// An [EffectCommand] is a message that can be sent to an effect dispatcher
/// over a channel. Every command carries a channel to send the result of the
/// native call back to the waiting caller.
#[derive(Debug)]
pub enum EffectCommand {
    Upload(
        EffectData,
        Option<i16>,
        Sender<Result<i16, BackendError>>,
    ),
    Start(i16, i32, Sender<Result<(), BackendError>>),
    Stop(i16, Sender<Result<(), BackendError>>),
    Shutdown,
}
