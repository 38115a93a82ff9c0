use crate::input::{
    controller::ControllerType,
    identifier::{Axis, Identifier},
};

use super::{ButtonTrait, CodeTable, ComponentDescriptor, DescriptorKind};

/// Weight of a device type hint found in the display name
const NAME_HINT_WEIGHT: u32 = 4;
/// Weight of each wheel specific axis (steering, gas, brake)
const WHEEL_AXIS_WEIGHT: u32 = 2;

/// Substrings of a lowercased display name that hint at a device type
const NAME_HINTS: &[(ControllerType, &[&str])] = &[
    (ControllerType::Mouse, &["mouse", "trackball", "trackpoint"]),
    (ControllerType::Keyboard, &["keyboard", "keypad"]),
    (
        ControllerType::Stick,
        &["joystick", "flight", "hotas", "throttle", "stick"],
    ),
    (
        ControllerType::Gamepad,
        &["gamepad", "game pad", "controller", "xbox", "dualshock", "dualsense"],
    ),
    (ControllerType::Wheel, &["wheel", "racing", "driving"]),
];

/// Votes per candidate device type. Field order is the tie break priority.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TypeVotes {
    pub mouse: u32,
    pub keyboard: u32,
    pub stick: u32,
    pub gamepad: u32,
    pub wheel: u32,
}

impl TypeVotes {
    fn add(&mut self, controller_type: ControllerType, weight: u32) {
        match controller_type {
            ControllerType::Mouse => self.mouse += weight,
            ControllerType::Keyboard => self.keyboard += weight,
            ControllerType::Stick => self.stick += weight,
            ControllerType::Gamepad => self.gamepad += weight,
            ControllerType::Wheel => self.wheel += weight,
            ControllerType::Unknown => (),
        }
    }

    /// Returns the type with the most votes. Ties go to the type that comes
    /// first in priority order: mouse, keyboard, stick, gamepad, wheel.
    pub fn winner(&self) -> ControllerType {
        let candidates = [
            (ControllerType::Mouse, self.mouse),
            (ControllerType::Keyboard, self.keyboard),
            (ControllerType::Stick, self.stick),
            (ControllerType::Gamepad, self.gamepad),
            (ControllerType::Wheel, self.wheel),
        ];
        let mut winner = (ControllerType::Unknown, 0);
        for (controller_type, votes) in candidates {
            if votes > winner.1 {
                winner = (controller_type, votes);
            }
        }
        winner.0
    }
}

/// Tally the type votes for a device with the given name and components
pub fn tally_votes(name: &str, components: &[ComponentDescriptor], table: &CodeTable) -> TypeVotes {
    let mut votes = TypeVotes::default();

    let name = name.to_lowercase();
    for (controller_type, hints) in NAME_HINTS {
        if hints.iter().any(|hint| name.contains(hint)) {
            votes.add(*controller_type, NAME_HINT_WEIGHT);
        }
    }

    for component in components {
        match component.kind {
            DescriptorKind::RelativeAxis { .. } => votes.mouse += 1,
            DescriptorKind::Axis(_) => match component.identifier {
                Identifier::Axis(Axis::Wheel | Axis::Gas | Axis::Brake) => {
                    votes.wheel += WHEEL_AXIS_WEIGHT
                }
                _ => {
                    votes.stick += 1;
                    votes.gamepad += 1;
                }
            },
            DescriptorKind::Pov { .. } => {
                votes.stick += 1;
                votes.gamepad += 1;
            }
            DescriptorKind::Button { code } => match table.button_trait(code) {
                ButtonTrait::Mouse => votes.mouse += 1,
                ButtonTrait::Keyboard => votes.keyboard += 1,
                ButtonTrait::Joystick => votes.stick += 1,
                ButtonTrait::Gamepad => votes.gamepad += 1,
                ButtonTrait::Wheel => votes.wheel += 1,
                ButtonTrait::None => (),
            },
        }
    }

    votes
}

/// Infer the logical type of a device from its display name and enumerated
/// components. A device without components, or one that earned no votes at
/// all, is [ControllerType::Unknown].
pub fn infer_controller_type(
    name: &str,
    components: &[ComponentDescriptor],
    table: &CodeTable,
) -> ControllerType {
    if components.is_empty() {
        return ControllerType::Unknown;
    }
    let votes = tally_votes(name, components, table);
    log::trace!("Type votes for '{name}': {votes:?}");
    votes.winner()
}
