mod common;

use std::error::Error;

use common::{abs, axis, key, rel, Effects, ScriptedBackend};
use evdev::{AbsoluteAxisCode, BusType, KeyCode, RelativeAxisCode};
use inputfuse::input::{
    capability::CodeTable,
    controller::{
        Controller, ControllerOptions, ControllerState, ControllerType, PollError, PortType,
    },
    identifier::{Axis, Button, Identifier},
    pov::PovDirection,
    rumble::EffectState,
    source::{BackendError, CapabilityTable, EffectKind},
};

fn gamepad_caps() -> CapabilityTable {
    CapabilityTable {
        keys: vec![KeyCode::BTN_EAST.0, KeyCode::BTN_SOUTH.0],
        absolute: vec![
            axis(AbsoluteAxisCode::ABS_X.0, 0, 255, 15),
            axis(AbsoluteAxisCode::ABS_Y.0, 0, 255, 15),
            axis(AbsoluteAxisCode::ABS_HAT0X.0, -1, 1, 0),
            axis(AbsoluteAxisCode::ABS_HAT0Y.0, -1, 1, 0),
        ],
        relative: vec![],
        effects: vec![EffectKind::Rumble],
    }
}

fn mouse_caps() -> CapabilityTable {
    CapabilityTable {
        keys: vec![KeyCode::BTN_LEFT.0, KeyCode::BTN_RIGHT.0, KeyCode::BTN_MIDDLE.0],
        absolute: vec![],
        relative: vec![
            RelativeAxisCode::REL_X.0,
            RelativeAxisCode::REL_Y.0,
            RelativeAxisCode::REL_WHEEL.0,
        ],
        effects: vec![],
    }
}

#[test]
fn test_gamepad_enumeration() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, _) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;

    assert_eq!(controller.name(), "Generic Gamepad");
    assert_eq!(controller.controller_type(), ControllerType::Gamepad);
    assert!(controller.children().is_empty());
    assert!(controller.rumblers().is_empty(), "no force feedback handle was offered");

    let identifiers: Vec<Identifier> = controller.components().iter().map(|c| c.identifier()).collect();
    assert_eq!(
        identifiers,
        vec![
            Identifier::Axis(Axis::X),
            Identifier::Axis(Axis::Y),
            Identifier::Axis(Axis::Pov),
            Identifier::Button(Button::A),
            Identifier::Button(Button::B),
        ]
    );

    let x = controller
        .component(Identifier::Axis(Axis::X))
        .ok_or("missing X axis")?;
    assert!(x.is_analog());
    assert!(!x.is_relative());
    assert!((x.dead_zone() - 15.0 / 510.0).abs() < 1e-6);

    Ok(())
}

#[test]
fn test_poll_and_drain() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, script) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let mut controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;

    // No data available is not an error
    controller.poll()?;
    assert!(controller.next_event().is_none());

    script.push(vec![
        abs(AbsoluteAxisCode::ABS_X.0, 255),
        key(KeyCode::BTN_SOUTH.0, 1),
        abs(AbsoluteAxisCode::ABS_HAT0X.0, 1),
        abs(AbsoluteAxisCode::ABS_HAT0Y.0, -1),
        // Not part of the capabilities, ignored
        key(KeyCode::BTN_TRIGGER.0, 1),
    ]);
    controller.poll()?;

    let mut events = Vec::new();
    while let Some(event) = controller.next_event() {
        events.push((event.component(), event.identifier(), event.value()));
    }
    assert_eq!(
        events,
        vec![
            (0, Identifier::Axis(Axis::X), 1.0),
            (3, Identifier::Button(Button::A), 1.0),
            (2, Identifier::Axis(Axis::Pov), PovDirection::Right.value()),
            (2, Identifier::Axis(Axis::Pov), PovDirection::UpRight.value()),
        ]
    );

    let pov = controller
        .component(Identifier::Axis(Axis::Pov))
        .ok_or("missing POV")?;
    assert_eq!(pov.pov_direction(), Some(PovDirection::UpRight));
    assert!(controller.is_pressed(Identifier::Button(Button::A)));
    assert!(!controller.is_pressed(Identifier::Button(Button::B)));
    assert_eq!(
        controller.component(Identifier::Axis(Axis::X)).map(|c| c.poll()),
        Some(1.0)
    );

    Ok(())
}

#[test]
fn test_full_queue_drops_newest() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, script) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let mut controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;
    controller.set_event_queue_size(2);

    script.push(vec![
        key(KeyCode::BTN_SOUTH.0, 1),
        key(KeyCode::BTN_EAST.0, 1),
        key(KeyCode::BTN_SOUTH.0, 0),
    ]);
    controller.poll()?;

    let first = controller.next_event().ok_or("missing first event")?;
    let second = controller.next_event().ok_or("missing second event")?;
    assert_eq!(first.identifier(), Identifier::Button(Button::A));
    assert_eq!(first.value(), 1.0);
    assert_eq!(second.identifier(), Identifier::Button(Button::B));
    assert!(controller.next_event().is_none(), "newest event should be dropped");

    // State is still updated for dropped events
    assert!(!controller.is_pressed(Identifier::Button(Button::A)));

    Ok(())
}

#[test]
fn test_relative_axes_accumulate_per_poll() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, script) = ScriptedBackend::new("USB Mouse", mouse_caps());
    let mut controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;
    assert_eq!(controller.controller_type(), ControllerType::Mouse);

    script.push(vec![
        rel(RelativeAxisCode::REL_X.0, 3),
        rel(RelativeAxisCode::REL_X.0, 2),
    ]);
    controller.poll()?;
    let x = controller
        .component(Identifier::Axis(Axis::X))
        .ok_or("missing X axis")?;
    assert!(x.is_relative());
    assert_eq!(x.poll(), 5.0);

    let mut count = 0;
    while controller.next_event().is_some() {
        count += 1;
    }
    assert_eq!(count, 2, "every delta is its own event");

    controller.poll()?;
    assert_eq!(
        controller.component(Identifier::Axis(Axis::X)).map(|c| c.poll()),
        Some(0.0)
    );

    Ok(())
}

#[test]
fn test_failure_makes_controller_unusable() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, script) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let mut controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;

    script.fail(BackendError::DeviceError("unplugged".to_string()));
    assert!(matches!(controller.poll(), Err(PollError::Backend(_))));
    assert_eq!(controller.state(), ControllerState::Failed);
    assert!(matches!(controller.poll(), Err(PollError::Unusable)));

    controller.close();
    controller.close();
    assert!(script.is_closed());
    assert!(matches!(controller.poll(), Err(PollError::Closed)));

    Ok(())
}

#[test]
fn test_backend_closed_when_dropped() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, script) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;
    assert!(!script.is_closed());
    drop(controller);
    assert!(script.is_closed());

    Ok(())
}

#[test]
fn test_rumble_lifecycle() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, script) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let backend = backend.with_effects(Effects::Working);
    let mut controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;

    let rumbler = controller.rumblers().first().ok_or("missing rumbler")?;
    assert_eq!(rumbler.kind(), EffectKind::Rumble);
    assert_eq!(rumbler.state(), EffectState::Unallocated);

    rumbler.rumble(0.5);
    assert_eq!(rumbler.state(), EffectState::Playing(1));
    rumbler.rumble(0.0);
    assert_eq!(rumbler.state(), EffectState::Stopped(1));

    let calls = script.effect_calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("upload"));
    assert_eq!(calls[1], format!("start 1 {}", i32::MAX));
    assert_eq!(calls[2], "stop 1");

    controller.close();
    // Force feedback after close is dropped quietly
    controller.rumblers()[0].rumble(1.0);

    Ok(())
}

#[test]
fn test_rumble_never_raises() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();
    let (backend, _) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let backend = backend.with_effects(Effects::FailingUploads);
    let controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;

    let rumbler = controller.rumblers().first().ok_or("missing rumbler")?;
    rumbler.rumble(0.0);
    rumbler.rumble(1.0);
    rumbler.rumble(0.0);
    assert_eq!(rumbler.state(), EffectState::Unallocated);

    Ok(())
}

#[test]
fn test_rumble_options() -> Result<(), Box<dyn Error>> {
    let table = CodeTable::linux();

    let (backend, _) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let backend = backend.with_effects(Effects::FailingOpen);
    let controller = Controller::new(backend.boxed(), &table, &ControllerOptions::default())?;
    assert!(controller.rumblers().is_empty());
    assert_eq!(controller.components().len(), 5);

    let (backend, _) = ScriptedBackend::new("Generic Gamepad", gamepad_caps());
    let backend = backend.with_effects(Effects::Working);
    let options = ControllerOptions {
        rumble: false,
        ..Default::default()
    };
    let controller = Controller::new(backend.boxed(), &table, &options)?;
    assert!(controller.rumblers().is_empty());

    Ok(())
}

#[test]
fn test_port_type_from_bus() {
    assert_eq!(PortType::from_bus_type(BusType::BUS_USB.0), PortType::Usb);
    assert_eq!(PortType::from_bus_type(BusType::BUS_BLUETOOTH.0), PortType::Bluetooth);
    assert_eq!(PortType::from_bus_type(BusType::BUS_I8042.0), PortType::I8042);
    assert_eq!(PortType::from_bus_type(BusType::BUS_PCI.0), PortType::Unknown);
    assert_eq!(PortType::from_bus_name("USB"), PortType::Usb);
    assert_eq!(PortType::from_bus_name("rs232"), PortType::Serial);
}
