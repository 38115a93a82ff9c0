//! Native code table for the Linux input event interface

use evdev::{AbsoluteAxisCode, KeyCode, RelativeAxisCode};

use crate::input::identifier::{Axis, Button, Identifier, Key};

use super::{ButtonTrait, CodeTable};

/// Number of high resolution wheel units per wheel notch
const WHEEL_HI_RES_SCALE: f32 = 120.0;

impl CodeTable {
    /// Build the code table for Linux input devices
    pub fn linux() -> Self {
        let mut table = CodeTable::new();

        // Absolute axes
        let absolute = [
            (AbsoluteAxisCode::ABS_X, Axis::X),
            (AbsoluteAxisCode::ABS_Y, Axis::Y),
            (AbsoluteAxisCode::ABS_Z, Axis::Z),
            (AbsoluteAxisCode::ABS_RX, Axis::RX),
            (AbsoluteAxisCode::ABS_RY, Axis::RY),
            (AbsoluteAxisCode::ABS_RZ, Axis::RZ),
            (AbsoluteAxisCode::ABS_THROTTLE, Axis::Throttle),
            (AbsoluteAxisCode::ABS_RUDDER, Axis::Rudder),
            (AbsoluteAxisCode::ABS_WHEEL, Axis::Wheel),
            (AbsoluteAxisCode::ABS_GAS, Axis::Gas),
            (AbsoluteAxisCode::ABS_BRAKE, Axis::Brake),
            (AbsoluteAxisCode::ABS_MISC, Axis::Slider),
        ];
        for (code, axis) in absolute {
            table.insert_absolute(code.0, axis);
        }
        for (x, y) in [
            (AbsoluteAxisCode::ABS_HAT0X, AbsoluteAxisCode::ABS_HAT0Y),
            (AbsoluteAxisCode::ABS_HAT1X, AbsoluteAxisCode::ABS_HAT1Y),
            (AbsoluteAxisCode::ABS_HAT2X, AbsoluteAxisCode::ABS_HAT2Y),
            (AbsoluteAxisCode::ABS_HAT3X, AbsoluteAxisCode::ABS_HAT3Y),
        ] {
            table.insert_hat(x.0, y.0);
        }

        // Relative axes
        let relative = [
            (RelativeAxisCode::REL_X, Axis::X, 1.0),
            (RelativeAxisCode::REL_Y, Axis::Y, 1.0),
            (RelativeAxisCode::REL_Z, Axis::Z, 1.0),
            (RelativeAxisCode::REL_RX, Axis::RX, 1.0),
            (RelativeAxisCode::REL_RY, Axis::RY, 1.0),
            (RelativeAxisCode::REL_RZ, Axis::RZ, 1.0),
            (RelativeAxisCode::REL_HWHEEL, Axis::Slider, 1.0),
            (RelativeAxisCode::REL_DIAL, Axis::Dial, 1.0),
            (RelativeAxisCode::REL_WHEEL, Axis::Wheel, 1.0),
            (RelativeAxisCode::REL_WHEEL_HI_RES, Axis::Wheel, WHEEL_HI_RES_SCALE),
            (RelativeAxisCode::REL_HWHEEL_HI_RES, Axis::Slider, WHEEL_HI_RES_SCALE),
        ];
        for (code, axis, scale) in relative {
            table.insert_relative(code.0, axis, scale);
        }
        // Kernels report both resolutions for the same wheel
        table.insert_relative_fallback(
            RelativeAxisCode::REL_WHEEL_HI_RES.0,
            RelativeAxisCode::REL_WHEEL.0,
        );
        table.insert_relative_fallback(
            RelativeAxisCode::REL_HWHEEL_HI_RES.0,
            RelativeAxisCode::REL_HWHEEL.0,
        );

        // Button ranges for codes without a dedicated identifier
        let ranges = [
            (KeyCode::BTN_0, KeyCode::BTN_LEFT, ButtonTrait::None),
            (KeyCode::BTN_LEFT, KeyCode::BTN_TRIGGER, ButtonTrait::Mouse),
            (KeyCode::BTN_TRIGGER, KeyCode::BTN_SOUTH, ButtonTrait::Joystick),
            (KeyCode::BTN_SOUTH, KeyCode::BTN_TOOL_PEN, ButtonTrait::Gamepad),
            (KeyCode::BTN_TOOL_PEN, KeyCode::BTN_GEAR_DOWN, ButtonTrait::None),
            (KeyCode::BTN_GEAR_DOWN, KeyCode::KEY_OK, ButtonTrait::Wheel),
        ];
        for (first, next, button_trait) in ranges {
            table.insert_button_range(first.0..=next.0 - 1, button_trait);
        }
        table.insert_button_range(
            KeyCode::BTN_DPAD_UP.0..=KeyCode::BTN_DPAD_RIGHT.0,
            ButtonTrait::Gamepad,
        );
        table.insert_button_range(
            KeyCode::BTN_TRIGGER_HAPPY1.0..=KeyCode::BTN_TRIGGER_HAPPY40.0,
            ButtonTrait::None,
        );

        // Misc buttons
        for (n, code) in (KeyCode::BTN_0.0..=KeyCode::BTN_9.0).enumerate() {
            table.insert_key(code, Button::Numbered(n as u8).into(), ButtonTrait::None);
        }

        let buttons = [
            (KeyCode::BTN_LEFT, Button::Left, ButtonTrait::Mouse),
            (KeyCode::BTN_RIGHT, Button::Right, ButtonTrait::Mouse),
            (KeyCode::BTN_MIDDLE, Button::Middle, ButtonTrait::Mouse),
            (KeyCode::BTN_SIDE, Button::Side, ButtonTrait::Mouse),
            (KeyCode::BTN_EXTRA, Button::Extra, ButtonTrait::Mouse),
            (KeyCode::BTN_FORWARD, Button::Forward, ButtonTrait::Mouse),
            (KeyCode::BTN_BACK, Button::Back, ButtonTrait::Mouse),
            (KeyCode::BTN_TASK, Button::Unknown, ButtonTrait::Mouse),
            (KeyCode::BTN_TRIGGER, Button::Trigger, ButtonTrait::Joystick),
            (KeyCode::BTN_THUMB, Button::Thumb, ButtonTrait::Joystick),
            (KeyCode::BTN_THUMB2, Button::Thumb2, ButtonTrait::Joystick),
            (KeyCode::BTN_TOP, Button::Top, ButtonTrait::Joystick),
            (KeyCode::BTN_TOP2, Button::Top2, ButtonTrait::Joystick),
            (KeyCode::BTN_PINKIE, Button::Pinkie, ButtonTrait::Joystick),
            (KeyCode::BTN_BASE, Button::Base, ButtonTrait::Joystick),
            (KeyCode::BTN_BASE2, Button::Base2, ButtonTrait::Joystick),
            (KeyCode::BTN_BASE3, Button::Base3, ButtonTrait::Joystick),
            (KeyCode::BTN_BASE4, Button::Base4, ButtonTrait::Joystick),
            (KeyCode::BTN_BASE5, Button::Base5, ButtonTrait::Joystick),
            (KeyCode::BTN_BASE6, Button::Base6, ButtonTrait::Joystick),
            (KeyCode::BTN_DEAD, Button::Dead, ButtonTrait::Joystick),
            (KeyCode::BTN_SOUTH, Button::A, ButtonTrait::Gamepad),
            (KeyCode::BTN_EAST, Button::B, ButtonTrait::Gamepad),
            (KeyCode::BTN_C, Button::C, ButtonTrait::Gamepad),
            (KeyCode::BTN_NORTH, Button::X, ButtonTrait::Gamepad),
            (KeyCode::BTN_WEST, Button::Y, ButtonTrait::Gamepad),
            (KeyCode::BTN_Z, Button::Z, ButtonTrait::Gamepad),
            (KeyCode::BTN_TL, Button::LeftThumb, ButtonTrait::Gamepad),
            (KeyCode::BTN_TR, Button::RightThumb, ButtonTrait::Gamepad),
            (KeyCode::BTN_TL2, Button::LeftThumb2, ButtonTrait::Gamepad),
            (KeyCode::BTN_TR2, Button::RightThumb2, ButtonTrait::Gamepad),
            (KeyCode::BTN_SELECT, Button::Select, ButtonTrait::Gamepad),
            (KeyCode::BTN_START, Button::Start, ButtonTrait::Gamepad),
            (KeyCode::BTN_MODE, Button::Mode, ButtonTrait::Gamepad),
            (KeyCode::BTN_THUMBL, Button::LeftThumb3, ButtonTrait::Gamepad),
            (KeyCode::BTN_THUMBR, Button::RightThumb3, ButtonTrait::Gamepad),
            (KeyCode::BTN_GEAR_DOWN, Button::GearDown, ButtonTrait::Wheel),
            (KeyCode::BTN_GEAR_UP, Button::GearUp, ButtonTrait::Wheel),
        ];
        for (code, button, button_trait) in buttons {
            table.insert_key(code.0, Identifier::Button(button), button_trait);
        }

        let keys = [
            (KeyCode::KEY_ESC, Key::Escape),
            (KeyCode::KEY_1, Key::Num1),
            (KeyCode::KEY_2, Key::Num2),
            (KeyCode::KEY_3, Key::Num3),
            (KeyCode::KEY_4, Key::Num4),
            (KeyCode::KEY_5, Key::Num5),
            (KeyCode::KEY_6, Key::Num6),
            (KeyCode::KEY_7, Key::Num7),
            (KeyCode::KEY_8, Key::Num8),
            (KeyCode::KEY_9, Key::Num9),
            (KeyCode::KEY_0, Key::Num0),
            (KeyCode::KEY_MINUS, Key::Minus),
            (KeyCode::KEY_EQUAL, Key::Equals),
            (KeyCode::KEY_BACKSPACE, Key::Back),
            (KeyCode::KEY_TAB, Key::Tab),
            (KeyCode::KEY_Q, Key::Q),
            (KeyCode::KEY_W, Key::W),
            (KeyCode::KEY_E, Key::E),
            (KeyCode::KEY_R, Key::R),
            (KeyCode::KEY_T, Key::T),
            (KeyCode::KEY_Y, Key::Y),
            (KeyCode::KEY_U, Key::U),
            (KeyCode::KEY_I, Key::I),
            (KeyCode::KEY_O, Key::O),
            (KeyCode::KEY_P, Key::P),
            (KeyCode::KEY_LEFTBRACE, Key::LBracket),
            (KeyCode::KEY_RIGHTBRACE, Key::RBracket),
            (KeyCode::KEY_ENTER, Key::Return),
            (KeyCode::KEY_LEFTCTRL, Key::LControl),
            (KeyCode::KEY_A, Key::A),
            (KeyCode::KEY_S, Key::S),
            (KeyCode::KEY_D, Key::D),
            (KeyCode::KEY_F, Key::F),
            (KeyCode::KEY_G, Key::G),
            (KeyCode::KEY_H, Key::H),
            (KeyCode::KEY_J, Key::J),
            (KeyCode::KEY_K, Key::K),
            (KeyCode::KEY_L, Key::L),
            (KeyCode::KEY_SEMICOLON, Key::Semicolon),
            (KeyCode::KEY_APOSTROPHE, Key::Apostrophe),
            (KeyCode::KEY_GRAVE, Key::Grave),
            (KeyCode::KEY_LEFTSHIFT, Key::LShift),
            (KeyCode::KEY_BACKSLASH, Key::Backslash),
            (KeyCode::KEY_Z, Key::Z),
            (KeyCode::KEY_X, Key::X),
            (KeyCode::KEY_C, Key::C),
            (KeyCode::KEY_V, Key::V),
            (KeyCode::KEY_B, Key::B),
            (KeyCode::KEY_N, Key::N),
            (KeyCode::KEY_M, Key::M),
            (KeyCode::KEY_COMMA, Key::Comma),
            (KeyCode::KEY_DOT, Key::Period),
            (KeyCode::KEY_SLASH, Key::Slash),
            (KeyCode::KEY_RIGHTSHIFT, Key::RShift),
            (KeyCode::KEY_KPASTERISK, Key::Multiply),
            (KeyCode::KEY_LEFTALT, Key::LAlt),
            (KeyCode::KEY_SPACE, Key::Space),
            (KeyCode::KEY_CAPSLOCK, Key::Capital),
            (KeyCode::KEY_F1, Key::F1),
            (KeyCode::KEY_F2, Key::F2),
            (KeyCode::KEY_F3, Key::F3),
            (KeyCode::KEY_F4, Key::F4),
            (KeyCode::KEY_F5, Key::F5),
            (KeyCode::KEY_F6, Key::F6),
            (KeyCode::KEY_F7, Key::F7),
            (KeyCode::KEY_F8, Key::F8),
            (KeyCode::KEY_F9, Key::F9),
            (KeyCode::KEY_F10, Key::F10),
            (KeyCode::KEY_NUMLOCK, Key::NumLock),
            (KeyCode::KEY_SCROLLLOCK, Key::ScrollLock),
            (KeyCode::KEY_KP7, Key::Numpad7),
            (KeyCode::KEY_KP8, Key::Numpad8),
            (KeyCode::KEY_KP9, Key::Numpad9),
            (KeyCode::KEY_KPMINUS, Key::Subtract),
            (KeyCode::KEY_KP4, Key::Numpad4),
            (KeyCode::KEY_KP5, Key::Numpad5),
            (KeyCode::KEY_KP6, Key::Numpad6),
            (KeyCode::KEY_KPPLUS, Key::Add),
            (KeyCode::KEY_KP1, Key::Numpad1),
            (KeyCode::KEY_KP2, Key::Numpad2),
            (KeyCode::KEY_KP3, Key::Numpad3),
            (KeyCode::KEY_KP0, Key::Numpad0),
            (KeyCode::KEY_KPDOT, Key::Decimal),
            (KeyCode::KEY_F11, Key::F11),
            (KeyCode::KEY_F12, Key::F12),
            (KeyCode::KEY_KPENTER, Key::NumpadEnter),
            (KeyCode::KEY_RIGHTCTRL, Key::RControl),
            (KeyCode::KEY_KPSLASH, Key::Divide),
            (KeyCode::KEY_SYSRQ, Key::SysRq),
            (KeyCode::KEY_RIGHTALT, Key::RAlt),
            (KeyCode::KEY_HOME, Key::Home),
            (KeyCode::KEY_UP, Key::Up),
            (KeyCode::KEY_PAGEUP, Key::PageUp),
            (KeyCode::KEY_LEFT, Key::Left),
            (KeyCode::KEY_RIGHT, Key::Right),
            (KeyCode::KEY_END, Key::End),
            (KeyCode::KEY_DOWN, Key::Down),
            (KeyCode::KEY_PAGEDOWN, Key::PageDown),
            (KeyCode::KEY_INSERT, Key::Insert),
            (KeyCode::KEY_DELETE, Key::Delete),
            (KeyCode::KEY_PAUSE, Key::Pause),
            (KeyCode::KEY_LEFTMETA, Key::LWin),
            (KeyCode::KEY_RIGHTMETA, Key::RWin),
            (KeyCode::KEY_COMPOSE, Key::Apps),
        ];
        for (code, key) in keys {
            table.insert_key(code.0, Identifier::Key(key), ButtonTrait::Keyboard);
        }

        table
    }
}
