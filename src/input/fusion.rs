use crate::input::{controller::Controller, identifier::Identifier};

/// The key two enumerations of one physical device are matched on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: String,
    pub identifiers: Vec<Identifier>,
}

impl DeviceDescriptor {
    pub fn new(name: String, identifiers: Vec<Identifier>) -> Self {
        Self { name, identifiers }
    }

    /// Returns true if both descriptors have the same name and the same
    /// identifiers in the same order
    pub fn matches(&self, other: &DeviceDescriptor) -> bool {
        self.name == other.name && self.identifiers == other.identifiers
    }
}

/// Match primary descriptors against legacy descriptors. Returns pairs of
/// (primary index, legacy index).
///
/// Each primary is compared with the first remaining legacy entry of the
/// same name only. If that entry has a different identifier sequence the
/// primary stays unfused, even if a later legacy entry would have matched.
pub fn match_pairs(primary: &[DeviceDescriptor], legacy: &[DeviceDescriptor]) -> Vec<(usize, usize)> {
    let mut taken = vec![false; legacy.len()];
    let mut pairs = Vec::new();

    for (p, descriptor) in primary.iter().enumerate() {
        let candidate = legacy
            .iter()
            .enumerate()
            .find(|(l, other)| !taken[*l] && other.name == descriptor.name);
        let Some((l, other)) = candidate else {
            continue;
        };
        if !descriptor.matches(other) {
            log::debug!(
                "Device '{}' has a different component layout on its legacy node, not fusing",
                descriptor.name
            );
            continue;
        }
        taken[l] = true;
        pairs.push((p, l));
    }

    pairs
}

/// Fuse controllers built from the primary enumeration with those built from
/// the legacy enumeration. Matched pairs become one controller; unmatched
/// controllers from both lists are passed through unchanged.
pub fn fuse_controllers(primary: Vec<Controller>, legacy: Vec<Controller>) -> Vec<Controller> {
    let primary_keys: Vec<DeviceDescriptor> = primary.iter().map(|c| c.descriptor()).collect();
    let legacy_keys: Vec<DeviceDescriptor> = legacy.iter().map(|c| c.descriptor()).collect();
    let pairs = match_pairs(&primary_keys, &legacy_keys);

    let mut legacy: Vec<Option<Controller>> = legacy.into_iter().map(Some).collect();
    let mut controllers = Vec::with_capacity(primary.len() + legacy.len());
    for (p, controller) in primary.into_iter().enumerate() {
        let partner = pairs
            .iter()
            .find(|(matched, _)| *matched == p)
            .and_then(|(_, l)| legacy.get_mut(*l))
            .and_then(Option::take);
        match partner {
            Some(partner) => controllers.push(controller.fuse(partner)),
            None => controllers.push(controller),
        }
    }
    controllers.extend(legacy.into_iter().flatten());

    controllers
}

#[cfg(test)]
mod tests {
    use crate::input::identifier::{Axis, Button, Identifier};

    use super::{match_pairs, DeviceDescriptor};

    fn stick(name: &str, identifiers: &[Identifier]) -> DeviceDescriptor {
        DeviceDescriptor::new(name.to_string(), identifiers.to_vec())
    }

    const LAYOUT: [Identifier; 4] = [
        Identifier::Axis(Axis::X),
        Identifier::Axis(Axis::Y),
        Identifier::Button(Button::Trigger),
        Identifier::Button(Button::Thumb),
    ];

    #[test]
    fn test_equal_devices_match() {
        let primary = [stick("Joystick", &LAYOUT)];
        let legacy = [stick("Joystick", &LAYOUT)];
        assert_eq!(match_pairs(&primary, &legacy), vec![(0, 0)]);
    }

    #[test]
    fn test_different_layout_does_not_match() {
        let mut other = LAYOUT;
        other[3] = Identifier::Button(Button::Top);
        let primary = [stick("Joystick", &LAYOUT)];
        let legacy = [stick("Joystick", &other)];
        assert!(match_pairs(&primary, &legacy).is_empty());

        let legacy = [stick("Joystick", &LAYOUT[..3])];
        assert!(match_pairs(&primary, &legacy).is_empty());
    }

    #[test]
    fn test_different_name_does_not_match() {
        let primary = [stick("Joystick", &LAYOUT)];
        let legacy = [stick("Gamepad", &LAYOUT)];
        assert!(match_pairs(&primary, &legacy).is_empty());
    }

    #[test]
    fn test_pairs_are_one_to_one() {
        let primary = [stick("Pad", &LAYOUT), stick("Pad", &LAYOUT)];
        let legacy = [stick("Pad", &LAYOUT), stick("Pad", &LAYOUT)];
        assert_eq!(match_pairs(&primary, &legacy), vec![(0, 0), (1, 1)]);
    }

    // Known limitation: matching stops at the first legacy entry with the
    // same name, so a later compatible entry is never tried.
    #[test]
    fn test_first_name_match_wins_without_backtracking() {
        let mut other = LAYOUT;
        other[0] = Identifier::Axis(Axis::Z);
        let primary = [stick("Pad", &LAYOUT)];
        let legacy = [stick("Pad", &other), stick("Pad", &LAYOUT)];
        assert!(match_pairs(&primary, &legacy).is_empty());
    }
}
