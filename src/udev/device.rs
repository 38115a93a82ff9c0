use std::path::Path;

use crate::input::controller::PortType;

/// Kind of input device node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// Input event subsystem node (e.g. /dev/input/event3)
    Event,
    /// Legacy joystick API node (e.g. /dev/input/js0)
    Joystick,
}

impl NodeKind {
    /// Returns the node kind for the given sysname
    pub fn from_sysname(sysname: &str) -> Option<Self> {
        if sysname.starts_with("event") {
            Some(NodeKind::Event)
        } else if sysname.starts_with("js") {
            Some(NodeKind::Joystick)
        } else {
            None
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            NodeKind::Event => "event",
            NodeKind::Joystick => "js",
        }
    }
}

/// An input device node discovered through udev or the /dev/input directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UdevDevice {
    devnode: String,
    subsystem: String,
    syspath: String,
    sysname: String,
    bus: Option<String>,
}

impl UdevDevice {
    /// Returns a UdevDevice object from the given base path and name.
    /// e.g. UdevDevice::from_devnode("/dev/input", "event3");
    pub fn from_devnode(base_path: &str, name: &str) -> Self {
        let devnode = format!("{base_path}/{name}");
        let subsystem = match base_path {
            "/dev/input" => "input",
            _ => "",
        }
        .to_string();

        Self {
            devnode,
            subsystem,
            syspath: "".to_string(),
            sysname: name.to_string(),
            bus: None,
        }
    }

    /// Returns a UdevDevice object from the given udev device, or `None` if
    /// it has no device node
    pub fn from_udev(device: &::udev::Device) -> Option<Self> {
        let devnode = device.devnode()?.to_string_lossy().to_string();
        let subsystem = device
            .subsystem()
            .map(|subsystem| subsystem.to_string_lossy().to_string())
            .unwrap_or_default();
        let bus = device
            .property_value("ID_BUS")
            .map(|bus| bus.to_string_lossy().to_string())
            .or_else(|| {
                let bus_type = get_attribute_from_tree(device, "id/bustype");
                (!bus_type.is_empty()).then_some(bus_type)
            });

        Some(Self {
            devnode,
            subsystem,
            syspath: device.syspath().to_string_lossy().to_string(),
            sysname: device.sysname().to_string_lossy().to_string(),
            bus,
        })
    }

    pub fn devnode(&self) -> String {
        self.devnode.clone()
    }

    pub fn subsystem(&self) -> String {
        self.subsystem.clone()
    }

    pub fn sysname(&self) -> String {
        self.sysname.clone()
    }

    pub fn syspath(&self) -> String {
        self.syspath.clone()
    }

    /// Returns the bus as reported by udev. This is either a bus name
    /// (ID_BUS) or a hexadecimal bus type (id/bustype).
    pub fn bus(&self) -> Option<&str> {
        self.bus.as_deref()
    }

    pub fn node_kind(&self) -> Option<NodeKind> {
        NodeKind::from_sysname(&self.sysname)
    }

    /// Returns the node number (e.g. 3 for "event3")
    pub fn node_number(&self) -> Option<u32> {
        let kind = self.node_kind()?;
        self.sysname.strip_prefix(kind.prefix())?.parse().ok()
    }

    /// Returns the port type derived from the bus of the device
    pub fn port_type(&self) -> PortType {
        let Some(bus) = self.bus.as_deref() else {
            return PortType::Unknown;
        };
        if let Some(hex) = bus.strip_prefix("0x") {
            return u16::from_str_radix(hex, 16)
                .map(PortType::from_bus_type)
                .unwrap_or_default();
        }
        PortType::from_bus_name(bus)
    }

    /// Returns true if the device node exists
    pub fn exists(&self) -> bool {
        Path::new(self.devnode.as_str()).exists()
    }
}

/// Gets an attribute from the first device in the device tree to match the attribute.
pub fn get_attribute_from_tree(device: &::udev::Device, attribute: &str) -> String {
    let attr = match device.attribute_value(attribute) {
        Some(attr) => attr,
        None => {
            if let Some(parent) = device.parent() {
                return get_attribute_from_tree(&parent, attribute);
            } else {
                return "".to_string();
            };
        }
    };
    attr.to_string_lossy().trim().to_string()
}
