use std::fmt;

/// Direction reported by a POV hat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PovDirection {
    #[default]
    Off,
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
}

impl PovDirection {
    /// All directions in the order of their polled value
    pub const ALL: [PovDirection; 9] = [
        PovDirection::Off,
        PovDirection::UpLeft,
        PovDirection::Up,
        PovDirection::UpRight,
        PovDirection::Right,
        PovDirection::DownRight,
        PovDirection::Down,
        PovDirection::DownLeft,
        PovDirection::Left,
    ];

    /// Look up the direction for the given hat steps, where negative x is
    /// left and negative y is up. Returns `None` for steps outside of
    /// {-1, 0, 1}.
    pub fn from_steps(x: i32, y: i32) -> Option<Self> {
        let direction = match (x, y) {
            (0, 0) => PovDirection::Off,
            (0, -1) => PovDirection::Up,
            (1, -1) => PovDirection::UpRight,
            (1, 0) => PovDirection::Right,
            (1, 1) => PovDirection::DownRight,
            (0, 1) => PovDirection::Down,
            (-1, 1) => PovDirection::DownLeft,
            (-1, 0) => PovDirection::Left,
            (-1, -1) => PovDirection::UpLeft,
            _ => return None,
        };
        Some(direction)
    }

    /// Returns the polled value of this direction
    pub fn value(&self) -> f32 {
        match self {
            PovDirection::Off => 0.0,
            PovDirection::UpLeft => 0.125,
            PovDirection::Up => 0.25,
            PovDirection::UpRight => 0.375,
            PovDirection::Right => 0.5,
            PovDirection::DownRight => 0.625,
            PovDirection::Down => 0.75,
            PovDirection::DownLeft => 0.875,
            PovDirection::Left => 1.0,
        }
    }

    /// Returns the direction for the given polled value, if it is one
    pub fn from_value(value: f32) -> Option<Self> {
        PovDirection::ALL
            .into_iter()
            .find(|direction| direction.value() == value)
    }
}

impl fmt::Display for PovDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PovDirection::Off => "Off",
            PovDirection::UpLeft => "Up-Left",
            PovDirection::Up => "Up",
            PovDirection::UpRight => "Up-Right",
            PovDirection::Right => "Right",
            PovDirection::DownRight => "Down-Right",
            PovDirection::Down => "Down",
            PovDirection::DownLeft => "Down-Left",
            PovDirection::Left => "Left",
        };
        f.write_str(name)
    }
}

/// Combines two orthogonal hat axes into a single POV direction. Each axis
/// is updated independently as its events arrive and the direction is
/// recomputed on every update.
#[derive(Debug, Clone, Default)]
pub struct PovComposer {
    last_x: i32,
    last_y: i32,
    direction: PovDirection,
}

impl PovComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the horizontal hat axis and return the new direction
    pub fn update_x(&mut self, x: i32) -> PovDirection {
        self.last_x = x;
        self.compose()
    }

    /// Update the vertical hat axis and return the new direction
    pub fn update_y(&mut self, y: i32) -> PovDirection {
        self.last_y = y;
        self.compose()
    }

    /// Returns the current direction
    pub fn direction(&self) -> PovDirection {
        self.direction
    }

    fn compose(&mut self) -> PovDirection {
        self.direction = match PovDirection::from_steps(self.last_x, self.last_y) {
            Some(direction) => direction,
            None => {
                log::warn!(
                    "Unknown hat combination x={} y={}, reporting POV as off",
                    self.last_x,
                    self.last_y
                );
                PovDirection::Off
            }
        };
        self.direction
    }
}
