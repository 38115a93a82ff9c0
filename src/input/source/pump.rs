use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use tokio::sync::mpsc::{
    channel,
    error::{TryRecvError, TrySendError},
    Receiver, Sender,
};

use crate::input::controller::PortType;

use super::{BackendError, CapabilityTable, ForceFeedbackDevice, RawDeviceBackend, RawEvent};

type Batch = Result<Vec<RawEvent>, BackendError>;

/// A [PumpedDevice] moves a raw backend onto a dedicated thread that polls
/// it on an interval and publishes raw event batches over a bounded channel.
/// Polling the pumped device drains the channel without blocking.
pub struct PumpedDevice {
    name: String,
    port_type: PortType,
    capabilities: CapabilityTable,
    force_feedback: Option<Box<dyn ForceFeedbackDevice>>,
    running: Arc<AtomicBool>,
    rx: Option<Receiver<Batch>>,
    handle: Option<JoinHandle<()>>,
}

impl PumpedDevice {
    /// Start pumping events from the given backend. Capabilities and force
    /// feedback are taken from the backend before it moves to the pump
    /// thread.
    pub fn spawn(
        mut backend: Box<dyn RawDeviceBackend>,
        interval: Duration,
        capacity: usize,
    ) -> Result<Self, BackendError> {
        let name = backend.name();
        let port_type = backend.port_type();
        let capabilities = backend.capabilities()?;
        let force_feedback = match backend.open_force_feedback() {
            Ok(device) => device,
            Err(e) => {
                log::warn!("Unable to open force feedback for '{name}': {e}");
                None
            }
        };

        let (tx, rx) = channel(capacity.max(1));
        let running = Arc::new(AtomicBool::new(true));
        let handle = {
            let running = running.clone();
            thread::Builder::new()
                .name(format!("pump:{name}"))
                .spawn(move || run(backend, tx, running, interval))?
        };
        log::debug!("Started event pump for '{name}' every {interval:?}");

        Ok(Self {
            name,
            port_type,
            capabilities,
            force_feedback,
            running,
            rx: Some(rx),
            handle: Some(handle),
        })
    }
}

fn run(
    mut backend: Box<dyn RawDeviceBackend>,
    tx: Sender<Batch>,
    running: Arc<AtomicBool>,
    interval: Duration,
) {
    let name = backend.name();
    while running.load(Ordering::Relaxed) {
        match backend.poll() {
            Ok(events) if events.is_empty() => (),
            Ok(events) => match tx.try_send(Ok(events)) {
                Ok(_) => (),
                Err(TrySendError::Full(_)) => {
                    log::warn!("Event pump for '{name}' is full, dropping batch");
                }
                Err(TrySendError::Closed(_)) => break,
            },
            Err(e) => {
                log::error!("Event pump for '{name}' failed: {e}");
                if tx.blocking_send(Err(e)).is_err() {
                    log::debug!("Event pump for '{name}' has no receiver left");
                }
                break;
            }
        }
        thread::sleep(interval);
    }
    backend.close();
    log::debug!("Event pump for '{name}' stopped");
}

impl RawDeviceBackend for PumpedDevice {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn port_type(&self) -> PortType {
        self.port_type
    }

    fn capabilities(&self) -> Result<CapabilityTable, BackendError> {
        Ok(self.capabilities.clone())
    }

    fn poll(&mut self) -> Result<Vec<RawEvent>, BackendError> {
        let Some(rx) = self.rx.as_mut() else {
            return Err(BackendError::Closed);
        };
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(Ok(batch)) => events.extend(batch),
                Ok(Err(e)) => return Err(e),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if events.is_empty() {
                        return Err(BackendError::Closed);
                    }
                    break;
                }
            }
        }

        Ok(events)
    }

    fn open_force_feedback(&mut self) -> Result<Option<Box<dyn ForceFeedbackDevice>>, BackendError> {
        Ok(self.force_feedback.take())
    }

    fn close(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        // Dropping the receiver also wakes a pump blocked on reporting an error
        self.rx.take();
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            log::error!("Event pump for '{}' panicked", self.name);
        }
    }
}

impl Drop for PumpedDevice {
    fn drop(&mut self) {
        self.close();
    }
}

impl Debug for PumpedDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PumpedDevice")
            .field("name", &self.name)
            .field("port_type", &self.port_type)
            .field("running", &self.running.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        thread,
        time::{Duration, Instant},
    };

    use crate::input::source::{
        BackendError, CapabilityTable, EventKind, RawDeviceBackend, RawEvent,
    };

    use super::PumpedDevice;

    #[derive(Debug)]
    struct Scripted {
        batches: VecDeque<Result<Vec<RawEvent>, BackendError>>,
        closed: Arc<Mutex<bool>>,
        polls: Arc<Mutex<usize>>,
    }

    impl RawDeviceBackend for Scripted {
        fn name(&self) -> String {
            "Scripted".to_string()
        }

        fn capabilities(&self) -> Result<CapabilityTable, BackendError> {
            Ok(CapabilityTable {
                keys: vec![0x120],
                ..Default::default()
            })
        }

        fn poll(&mut self) -> Result<Vec<RawEvent>, BackendError> {
            *self.polls.lock().unwrap() += 1;
            self.batches.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    fn poll_until<F>(device: &mut PumpedDevice, mut done: F) -> Vec<Result<Vec<RawEvent>, BackendError>>
    where
        F: FnMut(&[Result<Vec<RawEvent>, BackendError>]) -> bool,
    {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while Instant::now() < deadline {
            let result = device.poll();
            if !matches!(&result, Ok(events) if events.is_empty()) {
                results.push(result);
            }
            if done(&results) {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        results
    }

    #[test]
    fn test_pump_delivers_events_in_order() {
        let closed = Arc::new(Mutex::new(false));
        let backend = Scripted {
            batches: VecDeque::from(vec![
                Ok(vec![RawEvent::new(1, EventKind::Key, 0x120, 1)]),
                Ok(vec![RawEvent::new(2, EventKind::Key, 0x120, 0)]),
            ]),
            closed: closed.clone(),
            polls: Default::default(),
        };
        let mut device = PumpedDevice::spawn(Box::new(backend), Duration::from_millis(1), 8)
            .expect("should spawn pump");
        assert_eq!(device.capabilities().unwrap().keys, vec![0x120]);

        let results = poll_until(&mut device, |results| {
            results
                .iter()
                .flatten()
                .map(|batch| batch.len())
                .sum::<usize>()
                >= 2
        });
        let events: Vec<u64> = results
            .into_iter()
            .flatten()
            .flatten()
            .map(|event| event.timestamp_nanos)
            .collect();
        assert_eq!(events, vec![1, 2]);

        device.close();
        device.close();
        assert!(*closed.lock().unwrap(), "backend should be closed by the pump");
        assert!(matches!(device.poll(), Err(BackendError::Closed)));
    }

    #[test]
    fn test_pump_reports_failure() {
        let backend = Scripted {
            batches: VecDeque::from(vec![Err(BackendError::DeviceError("unplugged".into()))]),
            closed: Arc::new(Mutex::new(false)),
            polls: Default::default(),
        };
        let mut device = PumpedDevice::spawn(Box::new(backend), Duration::from_millis(1), 8)
            .expect("should spawn pump");

        let results = poll_until(&mut device, |results| !results.is_empty());
        assert!(matches!(
            results.first(),
            Some(Err(BackendError::DeviceError(_)))
        ));
    }

    #[test]
    fn test_full_channel_drops_newest_batches() {
        let polls = Arc::new(Mutex::new(0));
        let backend = Scripted {
            batches: (1..=5)
                .map(|n| Ok(vec![RawEvent::new(n, EventKind::Key, 0x120, 1)]))
                .collect(),
            closed: Arc::new(Mutex::new(false)),
            polls: polls.clone(),
        };
        let mut device = PumpedDevice::spawn(Box::new(backend), Duration::from_millis(1), 1)
            .expect("should spawn pump");

        // Wait until the pump has read every batch without anyone draining it
        let deadline = Instant::now() + Duration::from_secs(5);
        while *polls.lock().unwrap() <= 5 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(*polls.lock().unwrap() > 5, "pump should keep polling");

        let events: Vec<u64> = device
            .poll()
            .expect("pump should still be running")
            .into_iter()
            .map(|event| event.timestamp_nanos)
            .collect();
        assert_eq!(events, vec![1], "only the first batch fits the channel");
        assert_eq!(device.poll().expect("pump should still be running"), vec![]);

        device.close();
    }
}
