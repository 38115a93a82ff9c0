use std::sync::mpsc::{channel, RecvError};

use thiserror::Error;
use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::input::source::BackendError;

use super::{command::EffectCommand, EffectData};

/// Possible errors for an effect client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to send command to the effect dispatcher")]
    TrySendError(TrySendError<EffectCommand>),
    #[error("device encountered an error processing the request: {0}")]
    ServiceError(BackendError),
    #[error("effect dispatcher no longer exists")]
    ChannelClosed,
}

impl From<TrySendError<EffectCommand>> for ClientError {
    fn from(err: TrySendError<EffectCommand>) -> Self {
        match err {
            TrySendError::Closed(_) => Self::ChannelClosed,
            err => Self::TrySendError(err),
        }
    }
}

/// A client for dispatching force feedback calls to the effect dispatcher of
/// one physical device. All calls block until the dispatcher has finished
/// the native operation, so the caller always sees the driver assigned id.
#[derive(Debug, Clone)]
pub struct EffectClient {
    tx: Sender<EffectCommand>,
}

impl From<Sender<EffectCommand>> for EffectClient {
    fn from(tx: Sender<EffectCommand>) -> Self {
        EffectClient::new(tx)
    }
}

impl EffectClient {
    pub fn new(tx: Sender<EffectCommand>) -> Self {
        Self { tx }
    }

    /// Upload the given effect to the device, updating the effect with the
    /// given id if one was already uploaded. Returns the driver assigned id.
    pub fn upload(&self, effect: EffectData, id: Option<i16>) -> Result<i16, ClientError> {
        let (tx, rx) = channel();
        self.tx.try_send(EffectCommand::Upload(effect, id, tx))?;
        rx.recv()?.map_err(ClientError::ServiceError)
    }

    /// Start playing the uploaded effect with the given id
    pub fn start(&self, id: i16, iterations: i32) -> Result<(), ClientError> {
        let (tx, rx) = channel();
        self.tx.try_send(EffectCommand::Start(id, iterations, tx))?;
        rx.recv()?.map_err(ClientError::ServiceError)
    }

    /// Stop playing the uploaded effect with the given id
    pub fn stop(&self, id: i16) -> Result<(), ClientError> {
        let (tx, rx) = channel();
        self.tx.try_send(EffectCommand::Stop(id, tx))?;
        rx.recv()?.map_err(ClientError::ServiceError)
    }

    /// Stop the dispatcher. Subsequent calls fail with
    /// [ClientError::ChannelClosed].
    pub fn shutdown(&self) -> Result<(), ClientError> {
        self.tx.try_send(EffectCommand::Shutdown)?;
        Ok(())
    }

    /// Returns true if the dispatcher has exited
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl From<RecvError> for ClientError {
    fn from(_: RecvError) -> Self {
        ClientError::ChannelClosed
    }
}
