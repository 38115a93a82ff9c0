use crate::{
    input::controller::PortType,
    udev::{
        device::{NodeKind, UdevDevice},
        sort_nodes,
    },
};

#[test]
fn test_from_devnode() {
    let device = UdevDevice::from_devnode("/dev/input", "event12");
    assert_eq!(device.devnode(), "/dev/input/event12");
    assert_eq!(device.subsystem(), "input");
    assert_eq!(device.node_kind(), Some(NodeKind::Event));
    assert_eq!(device.node_number(), Some(12));
    assert_eq!(device.port_type(), PortType::Unknown);

    let device = UdevDevice::from_devnode("/dev/input", "js0");
    assert_eq!(device.node_kind(), Some(NodeKind::Joystick));
    assert_eq!(device.node_number(), Some(0));

    let device = UdevDevice::from_devnode("/dev/input", "mice");
    assert_eq!(device.node_kind(), None);
    assert_eq!(device.node_number(), None);
}

#[test]
fn test_sort_nodes() {
    let nodes = ["js1", "event10", "mice", "event2", "js0", "by-id"]
        .iter()
        .map(|name| UdevDevice::from_devnode("/dev/input", name))
        .collect();
    let sorted: Vec<String> = sort_nodes(nodes).iter().map(|node| node.sysname()).collect();
    assert_eq!(sorted, vec!["event2", "event10", "js0", "js1"]);
}
