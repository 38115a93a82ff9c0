#[cfg(test)]
pub mod device_test;

pub mod device;

use std::{error::Error, fs};

use udev::Enumerator;

use self::device::UdevDevice;

/// Directory scanned for input nodes when udev is unavailable
const INPUT_DEV_DIR: &str = "/dev/input";

/// Returns a list of devices in the given subsystem that have a devnode property.
pub fn discover_devices(subsystem: &str) -> Result<Vec<udev::Device>, Box<dyn Error>> {
    let mut enumerator = Enumerator::new()?;
    enumerator.match_subsystem(subsystem)?;

    log::debug!("Started udev {subsystem} enumerator.");

    Ok(enumerator
        .scan_devices()?
        .filter(|device| device.devnode().is_some())
        .collect())
}

/// Returns every event and joystick node in the input subsystem, sorted by
/// kind and node number. Falls back to scanning /dev/input if udev cannot be
/// queried.
pub fn discover_input_nodes() -> Vec<UdevDevice> {
    let nodes = match discover_devices("input") {
        Ok(devices) => devices.iter().filter_map(UdevDevice::from_udev).collect(),
        Err(e) => {
            log::warn!("Unable to enumerate udev devices, scanning {INPUT_DEV_DIR}: {e}");
            scan_input_dir()
        }
    };

    sort_nodes(nodes)
}

/// Returns every event and joystick node found in /dev/input
fn scan_input_dir() -> Vec<UdevDevice> {
    let entries = match fs::read_dir(INPUT_DEV_DIR) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Unable to read directory {INPUT_DEV_DIR}: {e}");
            return Vec::new();
        }
    };
    entries
        .filter_map(|entry| {
            let Ok(entry) = entry else { return None };
            let name = entry.file_name().to_string_lossy().to_string();
            Some(UdevDevice::from_devnode(INPUT_DEV_DIR, name.as_str()))
        })
        .collect()
}

/// Keep only event and joystick nodes, ordered by kind then node number
pub fn sort_nodes(nodes: Vec<UdevDevice>) -> Vec<UdevDevice> {
    let mut nodes: Vec<UdevDevice> = nodes
        .into_iter()
        .filter(|node| node.node_kind().is_some())
        .collect();
    nodes.sort_by_key(|node| (node.node_kind(), node.node_number(), node.sysname()));
    nodes
}
