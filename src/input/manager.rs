use crate::{
    config::Config,
    input::{
        capability::CodeTable,
        controller::Controller,
        fusion::fuse_controllers,
        source::{
            evdev::EventDevice, joystick::JoystickDevice, pump::PumpedDevice, RawDeviceBackend,
        },
    },
    udev::{
        self,
        device::{NodeKind, UdevDevice},
    },
};

/// The [Environment] discovers input devices and builds [Controller]
/// instances for them. It owns the native code table used to enumerate the
/// components of every controller it builds.
#[derive(Debug)]
pub struct Environment {
    config: Config,
    table: CodeTable,
}

impl Environment {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: CodeTable::linux(),
        }
    }

    /// Create an environment with a custom code table
    pub fn with_code_table(config: Config, table: CodeTable) -> Self {
        Self { config, table }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Discover and open every input device on the system. Devices that
    /// fail to open are logged and skipped.
    pub fn enumerate(&self) -> Vec<Controller> {
        let mut primary: Vec<Box<dyn RawDeviceBackend>> = Vec::new();
        let mut legacy: Vec<Box<dyn RawDeviceBackend>> = Vec::new();

        for node in udev::discover_input_nodes() {
            match node.node_kind() {
                Some(NodeKind::Event) => {
                    if let Some(device) = open_event_device(&node) {
                        primary.push(device);
                    }
                }
                Some(NodeKind::Joystick) => {
                    if let Some(device) = open_joystick_device(&node) {
                        legacy.push(device);
                    }
                }
                None => (),
            }
        }
        log::debug!(
            "Opened {} event devices and {} joystick devices",
            primary.len(),
            legacy.len()
        );

        self.build_controllers(primary, legacy)
    }

    /// Build controllers from already opened backends. Backends from the
    /// legacy list are fused into matching primary controllers when fusion
    /// is enabled; otherwise they are returned as separate controllers.
    pub fn build_controllers(
        &self,
        primary: Vec<Box<dyn RawDeviceBackend>>,
        legacy: Vec<Box<dyn RawDeviceBackend>>,
    ) -> Vec<Controller> {
        let primary = self.build_all(primary);
        let legacy = self.build_all(legacy);
        if !self.config.fuse_joystick_devices() {
            return primary.into_iter().chain(legacy).collect();
        }

        fuse_controllers(primary, legacy)
    }

    fn build_all(&self, backends: Vec<Box<dyn RawDeviceBackend>>) -> Vec<Controller> {
        let options = self.config.controller_options();
        let mut controllers = Vec::with_capacity(backends.len());
        for mut backend in backends {
            let name = backend.name();
            if self.config.is_ignored(&name) {
                log::debug!("Ignoring device '{name}'");
                backend.close();
                continue;
            }

            let backend = match self.config.event_pump() {
                Some((interval, capacity)) => {
                    match PumpedDevice::spawn(backend, interval, capacity) {
                        Ok(pump) => Box::new(pump) as Box<dyn RawDeviceBackend>,
                        Err(e) => {
                            log::warn!("Unable to start event pump for '{name}', skipping: {e}");
                            continue;
                        }
                    }
                }
                None => backend,
            };

            match Controller::new(backend, &self.table, &options) {
                Ok(controller) => controllers.push(controller),
                Err(e) => log::warn!("Unable to build controller for '{name}', skipping: {e}"),
            }
        }

        controllers
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(Config::default())
    }
}

fn open_event_device(node: &UdevDevice) -> Option<Box<dyn RawDeviceBackend>> {
    let path = node.devnode();
    match EventDevice::open(path.as_str()) {
        Ok(device) => Some(Box::new(device)),
        Err(e) => {
            log::warn!("Unable to open event device {path}, skipping: {e}");
            None
        }
    }
}

fn open_joystick_device(node: &UdevDevice) -> Option<Box<dyn RawDeviceBackend>> {
    let path = node.devnode();
    match JoystickDevice::open(path.as_str()) {
        Ok(device) => Some(Box::new(device.with_port_type(node.port_type()))),
        Err(e) => {
            log::warn!("Unable to open joystick device {path}, skipping: {e}");
            None
        }
    }
}
