use std::fmt;

/// An [Identifier] classifies the kind of control a [Component] represents.
/// Identifiers carry no state and are only ever compared by equality.
///
/// [Component]: crate::input::component::Component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    Axis(Axis),
    Button(Button),
    Key(Key),
}

impl Identifier {
    /// Returns true if this identifier names an axis
    pub fn is_axis(&self) -> bool {
        matches!(self, Identifier::Axis(_))
    }

    /// Returns true if this identifier names a button or a key
    pub fn is_button(&self) -> bool {
        matches!(self, Identifier::Button(_) | Identifier::Key(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Axis(axis) => write!(f, "{axis}"),
            Identifier::Button(button) => write!(f, "{button}"),
            Identifier::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<Axis> for Identifier {
    fn from(value: Axis) -> Self {
        Identifier::Axis(value)
    }
}

impl From<Button> for Identifier {
    fn from(value: Button) -> Self {
        Identifier::Button(value)
    }
}

impl From<Key> for Identifier {
    fn from(value: Key) -> Self {
        Identifier::Key(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    RX,
    RY,
    RZ,
    Slider,
    Throttle,
    Rudder,
    Wheel,
    Gas,
    Brake,
    Dial,
    /// Composite hat switch built from two raw hat axes
    Pov,
    Unknown,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::RX => "rx",
            Axis::RY => "ry",
            Axis::RZ => "rz",
            Axis::Slider => "Slider",
            Axis::Throttle => "Throttle",
            Axis::Rudder => "Rudder",
            Axis::Wheel => "Wheel",
            Axis::Gas => "Gas",
            Axis::Brake => "Brake",
            Axis::Dial => "Dial",
            Axis::Pov => "pov",
            Axis::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Generic misc buttons (BTN_0 - BTN_9)
    Numbered(u8),
    // Joystick
    Trigger,
    Thumb,
    Thumb2,
    Top,
    Top2,
    Pinkie,
    Base,
    Base2,
    Base3,
    Base4,
    Base5,
    Base6,
    Dead,
    // Gamepad
    A,
    B,
    C,
    X,
    Y,
    Z,
    LeftThumb,
    RightThumb,
    LeftThumb2,
    RightThumb2,
    Select,
    Start,
    Mode,
    LeftThumb3,
    RightThumb3,
    // Mouse
    Left,
    Right,
    Middle,
    Side,
    Extra,
    Forward,
    Back,
    // Wheel
    GearDown,
    GearUp,
    Unknown,
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Button::Numbered(n) => return write!(f, "{n}"),
            Button::Trigger => "Trigger",
            Button::Thumb => "Thumb",
            Button::Thumb2 => "Thumb 2",
            Button::Top => "Top",
            Button::Top2 => "Top 2",
            Button::Pinkie => "Pinkie",
            Button::Base => "Base",
            Button::Base2 => "Base 2",
            Button::Base3 => "Base 3",
            Button::Base4 => "Base 4",
            Button::Base5 => "Base 5",
            Button::Base6 => "Base 6",
            Button::Dead => "Dead",
            Button::A => "A",
            Button::B => "B",
            Button::C => "C",
            Button::X => "X",
            Button::Y => "Y",
            Button::Z => "Z",
            Button::LeftThumb => "Left Thumb",
            Button::RightThumb => "Right Thumb",
            Button::LeftThumb2 => "Left Thumb 2",
            Button::RightThumb2 => "Right Thumb 2",
            Button::Select => "Select",
            Button::Start => "Start",
            Button::Mode => "Mode",
            Button::LeftThumb3 => "Left Thumb 3",
            Button::RightThumb3 => "Right Thumb 3",
            Button::Left => "Left",
            Button::Right => "Right",
            Button::Middle => "Middle",
            Button::Side => "Side",
            Button::Extra => "Extra",
            Button::Forward => "Forward",
            Button::Back => "Back",
            Button::GearDown => "Gear Down",
            Button::GearUp => "Gear Up",
            Button::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,
    Minus,
    Equals,
    Back,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LBracket,
    RBracket,
    Return,
    LControl,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Apostrophe,
    Grave,
    LShift,
    Backslash,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    RShift,
    Multiply,
    LAlt,
    Space,
    Capital,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    NumLock,
    ScrollLock,
    Numpad7,
    Numpad8,
    Numpad9,
    Subtract,
    Numpad4,
    Numpad5,
    Numpad6,
    Add,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad0,
    Decimal,
    F11,
    F12,
    NumpadEnter,
    RControl,
    Divide,
    SysRq,
    RAlt,
    Home,
    Up,
    PageUp,
    Left,
    Right,
    End,
    Down,
    PageDown,
    Insert,
    Delete,
    Pause,
    LWin,
    RWin,
    Apps,
    Unknown,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Escape => "Escape",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num6 => "6",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Num9 => "9",
            Key::Num0 => "0",
            Key::Minus => "-",
            Key::Equals => "=",
            Key::Back => "Back",
            Key::Tab => "Tab",
            Key::Q => "Q",
            Key::W => "W",
            Key::E => "E",
            Key::R => "R",
            Key::T => "T",
            Key::Y => "Y",
            Key::U => "U",
            Key::I => "I",
            Key::O => "O",
            Key::P => "P",
            Key::LBracket => "[",
            Key::RBracket => "]",
            Key::Return => "Return",
            Key::LControl => "Left Control",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::Semicolon => ";",
            Key::Apostrophe => "'",
            Key::Grave => "~",
            Key::LShift => "Left Shift",
            Key::Backslash => "\\",
            Key::Z => "Z",
            Key::X => "X",
            Key::C => "C",
            Key::V => "V",
            Key::B => "B",
            Key::N => "N",
            Key::M => "M",
            Key::Comma => ",",
            Key::Period => ".",
            Key::Slash => "/",
            Key::RShift => "Right Shift",
            Key::Multiply => "Multiply",
            Key::LAlt => "Left Alt",
            Key::Space => " ",
            Key::Capital => "Caps Lock",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::NumLock => "Num Lock",
            Key::ScrollLock => "Scroll Lock",
            Key::Numpad7 => "Num 7",
            Key::Numpad8 => "Num 8",
            Key::Numpad9 => "Num 9",
            Key::Subtract => "Num -",
            Key::Numpad4 => "Num 4",
            Key::Numpad5 => "Num 5",
            Key::Numpad6 => "Num 6",
            Key::Add => "Num +",
            Key::Numpad1 => "Num 1",
            Key::Numpad2 => "Num 2",
            Key::Numpad3 => "Num 3",
            Key::Numpad0 => "Num 0",
            Key::Decimal => "Num .",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::NumpadEnter => "Num Enter",
            Key::RControl => "Right Control",
            Key::Divide => "Num /",
            Key::SysRq => "SysRq",
            Key::RAlt => "Right Alt",
            Key::Home => "Home",
            Key::Up => "Up",
            Key::PageUp => "Page Up",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::End => "End",
            Key::Down => "Down",
            Key::PageDown => "Page Down",
            Key::Insert => "Insert",
            Key::Delete => "Delete",
            Key::Pause => "Pause",
            Key::LWin => "Left Windows",
            Key::RWin => "Right Windows",
            Key::Apps => "Apps",
            Key::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
