use std::thread;

use tokio::sync::mpsc::{channel, Receiver};

use crate::input::source::{BackendError, ForceFeedbackDevice};

use super::{client::EffectClient, command::EffectCommand};

/// Maximum number of commands waiting for the dispatcher
const BUFFER_SIZE: usize = 64;

/// Spawn the dispatcher thread for one physical device. The thread owns the
/// force feedback handle and runs one native operation at a time until every
/// client has been dropped or [EffectClient::shutdown] is called.
pub fn spawn(
    name: &str,
    device: Box<dyn ForceFeedbackDevice>,
) -> Result<EffectClient, BackendError> {
    let (tx, rx) = channel(BUFFER_SIZE);
    let thread_name = format!("ff:{name}");
    thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || run(device, rx))?;
    log::debug!("Started effect dispatcher: {thread_name}");

    Ok(EffectClient::new(tx))
}

fn run(mut device: Box<dyn ForceFeedbackDevice>, mut rx: Receiver<EffectCommand>) {
    while let Some(command) = rx.blocking_recv() {
        log::trace!("Received effect command: {:?}", command);
        match command {
            EffectCommand::Upload(effect, id, reply) => {
                let result = device.upload(effect, id);
                if let Err(e) = reply.send(result) {
                    log::debug!("Caller stopped waiting for upload result: {e:?}");
                }
            }
            EffectCommand::Start(id, iterations, reply) => {
                let result = device.start(id, iterations);
                if let Err(e) = reply.send(result) {
                    log::debug!("Caller stopped waiting for start result: {e:?}");
                }
            }
            EffectCommand::Stop(id, reply) => {
                let result = device.stop(id);
                if let Err(e) = reply.send(result) {
                    log::debug!("Caller stopped waiting for stop result: {e:?}");
                }
            }
            EffectCommand::Shutdown => break,
        }
    }
    rx.close();
    log::debug!("Effect dispatcher stopped");
}
