pub mod inference;
pub mod linux;


use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::input::{
    identifier::{Axis, Button, Identifier, Key},
    source::{AbsAxisInfo, CapabilityTable, EventKind, NativeCode},
};

/// Classification of a button code by the kind of device it usually
/// appears on. Used to vote on the type of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonTrait {
    Mouse,
    Keyboard,
    Joystick,
    Gamepad,
    Wheel,
    None,
}

/// Two absolute axis codes that together form one physical hat switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatPair {
    pub x: u16,
    pub y: u16,
}

/// Immutable mapping from native codes to [Identifier]s. A table is built
/// once (see [CodeTable::linux]) and passed to the enumerator.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    keys: HashMap<u16, (Identifier, ButtonTrait)>,
    absolute: HashMap<u16, Identifier>,
    relative: HashMap<u16, (Identifier, f32)>,
    relative_fallbacks: HashMap<u16, u16>,
    hats: Vec<HatPair>,
    button_ranges: Vec<(RangeInclusive<u16>, ButtonTrait)>,
}

impl CodeTable {
    /// Create an empty table. Every code resolves to a fallback identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a key or button code
    pub fn insert_key(&mut self, code: u16, identifier: Identifier, button_trait: ButtonTrait) {
        self.keys.insert(code, (identifier, button_trait));
    }

    /// Map an absolute axis code
    pub fn insert_absolute(&mut self, code: u16, axis: Axis) {
        self.absolute.insert(code, Identifier::Axis(axis));
    }

    /// Map a relative axis code. Raw deltas of this axis are divided by the
    /// given scale.
    pub fn insert_relative(&mut self, code: u16, axis: Axis, scale: f32) {
        self.relative.insert(code, (Identifier::Axis(axis), scale));
    }

    /// Register a relative code that reports the same motion as `preferred`.
    /// The code is only enumerated when `preferred` is not supported.
    pub fn insert_relative_fallback(&mut self, code: u16, preferred: u16) {
        self.relative_fallbacks.insert(code, preferred);
    }

    /// Register two absolute codes as the members of one hat switch
    pub fn insert_hat(&mut self, x: u16, y: u16) {
        self.hats.push(HatPair { x, y });
    }

    /// Register a range of key codes that are buttons rather than keyboard
    /// keys. Unmapped codes inside the range fall back to [Button::Unknown]
    /// and take the given trait.
    pub fn insert_button_range(&mut self, range: RangeInclusive<u16>, button_trait: ButtonTrait) {
        self.button_ranges.push((range, button_trait));
    }

    /// Returns the identifier for the given key code
    pub fn key_identifier(&self, code: u16) -> Identifier {
        if let Some((identifier, _)) = self.keys.get(&code) {
            return *identifier;
        }
        if self.button_range(code).is_some() {
            Identifier::Button(Button::Unknown)
        } else {
            Identifier::Key(Key::Unknown)
        }
    }

    /// Returns the trait of the given key code
    pub fn button_trait(&self, code: u16) -> ButtonTrait {
        if let Some((_, button_trait)) = self.keys.get(&code) {
            return *button_trait;
        }
        match self.button_range(code) {
            Some(button_trait) => button_trait,
            None => ButtonTrait::Keyboard,
        }
    }

    /// Returns the identifier for the given absolute axis code
    pub fn absolute_identifier(&self, code: u16) -> Identifier {
        self.absolute
            .get(&code)
            .copied()
            .unwrap_or(Identifier::Axis(Axis::Slider))
    }

    /// Returns the identifier for the given relative axis code
    pub fn relative_identifier(&self, code: u16) -> Identifier {
        self.relative
            .get(&code)
            .map(|(identifier, _)| *identifier)
            .unwrap_or(Identifier::Axis(Axis::Unknown))
    }

    /// Returns the scale correction for the given relative axis code
    pub fn relative_scale(&self, code: u16) -> f32 {
        self.relative
            .get(&code)
            .map(|(_, scale)| *scale)
            .unwrap_or(1.0)
    }

    /// Returns the code that supersedes the given relative code, if any
    pub fn relative_preferred(&self, code: u16) -> Option<u16> {
        self.relative_fallbacks.get(&code).copied()
    }

    /// Returns all known hat pairs
    pub fn hats(&self) -> &[HatPair] {
        &self.hats
    }

    fn button_range(&self, code: u16) -> Option<ButtonTrait> {
        self.button_ranges
            .iter()
            .find(|(range, _)| range.contains(&code))
            .map(|(_, button_trait)| *button_trait)
    }
}

/// How a [ComponentDescriptor] reads its native data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DescriptorKind {
    /// Absolute axis with its native range
    Axis(AbsAxisInfo),
    /// Relative axis with its scale correction
    RelativeAxis { code: u16, scale: f32 },
    /// Composite hat built from two absolute axes
    Pov { x: AbsAxisInfo, y: AbsAxisInfo },
    /// Key or button
    Button { code: u16 },
}

/// One enumerated component, ready to be turned into a [Component].
///
/// [Component]: crate::input::component::Component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentDescriptor {
    pub identifier: Identifier,
    pub kind: DescriptorKind,
}

impl ComponentDescriptor {
    pub fn is_relative(&self) -> bool {
        matches!(self.kind, DescriptorKind::RelativeAxis { .. })
    }

    /// Returns the native code of the component. For POVs this is the code
    /// of the horizontal hat axis.
    pub fn native_code(&self) -> NativeCode {
        match self.kind {
            DescriptorKind::Axis(info) => NativeCode::new(EventKind::Absolute, info.code),
            DescriptorKind::RelativeAxis { code, .. } => NativeCode::new(EventKind::Relative, code),
            DescriptorKind::Pov { x, .. } => NativeCode::new(EventKind::Absolute, x.code),
            DescriptorKind::Button { code } => NativeCode::new(EventKind::Key, code),
        }
    }

    /// Returns every native code that feeds this component
    pub fn native_codes(&self) -> Vec<NativeCode> {
        match self.kind {
            DescriptorKind::Pov { x, y } => vec![
                NativeCode::new(EventKind::Absolute, x.code),
                NativeCode::new(EventKind::Absolute, y.code),
            ],
            _ => vec![self.native_code()],
        }
    }

    /// Returns the native (minimum, maximum, flat) of an absolute axis
    pub fn range(&self) -> Option<(i32, i32, i32)> {
        match self.kind {
            DescriptorKind::Axis(info) => Some((info.minimum, info.maximum, info.flat)),
            DescriptorKind::Pov { x, .. } => Some((x.minimum, x.maximum, x.flat)),
            _ => None,
        }
    }
}

/// Enumerate the components described by the given capability table.
///
/// Components are ordered absolute axes, relative axes, POVs, then buttons,
/// each by ascending native code. Hat axis pairs are replaced by a single
/// POV once both members are present. Relative codes superseded by another
/// supported code are skipped. Unknown codes map to fallback
/// identifiers and never fail enumeration.
pub fn enumerate_components(caps: &CapabilityTable, table: &CodeTable) -> Vec<ComponentDescriptor> {
    let mut absolute = caps.absolute.clone();
    absolute.sort_by_key(|info| info.code);
    absolute.dedup_by_key(|info| info.code);

    // Pull complete hat pairs out of the flat axis list
    let mut povs = Vec::new();
    for pair in table.hats() {
        let x = absolute.iter().position(|info| info.code == pair.x);
        let y = absolute.iter().position(|info| info.code == pair.y);
        let (Some(x), Some(y)) = (x, y) else {
            continue;
        };
        let (x, y) = (absolute[x], absolute[y]);
        log::trace!("Found hat pair: {:?} {:?}", x, y);
        absolute.retain(|info| info.code != x.code && info.code != y.code);
        povs.push(ComponentDescriptor {
            identifier: Identifier::Axis(Axis::Pov),
            kind: DescriptorKind::Pov { x, y },
        });
    }

    let mut descriptors = Vec::with_capacity(absolute.len() + povs.len() + caps.keys.len());
    for info in absolute {
        descriptors.push(ComponentDescriptor {
            identifier: table.absolute_identifier(info.code),
            kind: DescriptorKind::Axis(info),
        });
    }

    let mut relative = caps.relative.clone();
    relative.sort_unstable();
    relative.dedup();
    let superseded: Vec<u16> = relative
        .iter()
        .copied()
        .filter(|code| {
            table
                .relative_preferred(*code)
                .is_some_and(|preferred| relative.contains(&preferred))
        })
        .collect();
    relative.retain(|code| !superseded.contains(code));
    for code in relative {
        descriptors.push(ComponentDescriptor {
            identifier: table.relative_identifier(code),
            kind: DescriptorKind::RelativeAxis {
                code,
                scale: table.relative_scale(code),
            },
        });
    }

    descriptors.extend(povs);

    let mut keys = caps.keys.clone();
    keys.sort_unstable();
    keys.dedup();
    for code in keys {
        descriptors.push(ComponentDescriptor {
            identifier: table.key_identifier(code),
            kind: DescriptorKind::Button { code },
        });
    }

    descriptors
}
