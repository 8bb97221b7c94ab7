//! Input domain: per-device sampling of the jump button and heading.

use bevy::prelude::*;

use crate::content::InputConfig;

/// What one device reports this tick. Devices never decide the final
/// heading; `fuse` does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceSample {
    pub activation: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DeviceSample {
    pub const IDLE: DeviceSample = DeviceSample {
        activation: false,
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Sample from a stick deflection (y up). An axis counts only when it
    /// is strictly beyond the threshold.
    pub fn from_stick(stick: Vec2, threshold: f32) -> Self {
        Self {
            activation: false,
            up: stick.y > threshold,
            down: stick.y < -threshold,
            left: stick.x < -threshold,
            right: stick.x > threshold,
        }
    }

    pub fn with_activation(mut self, activation: bool) -> Self {
        self.activation = activation;
        self
    }
}

/// A physical input source that can be reduced to a `DeviceSample`.
pub trait InputDevice {
    fn sample(&self, config: &InputConfig) -> DeviceSample;
}

/// Arrow keys for heading, Space or K for the jump button.
pub struct ArrowKeys<'a>(pub &'a ButtonInput<KeyCode>);

impl InputDevice for ArrowKeys<'_> {
    fn sample(&self, _config: &InputConfig) -> DeviceSample {
        let keys = self.0;
        DeviceSample {
            activation: keys.pressed(KeyCode::Space) || keys.pressed(KeyCode::KeyK),
            up: keys.pressed(KeyCode::ArrowUp),
            down: keys.pressed(KeyCode::ArrowDown),
            left: keys.pressed(KeyCode::ArrowLeft),
            right: keys.pressed(KeyCode::ArrowRight),
        }
    }
}

/// WASD heading. Contributes nothing when disabled.
pub struct WasdKeys<'a>(pub &'a ButtonInput<KeyCode>);

impl InputDevice for WasdKeys<'_> {
    fn sample(&self, config: &InputConfig) -> DeviceSample {
        if !config.enable_wasd {
            return DeviceSample::IDLE;
        }
        let keys = self.0;
        DeviceSample {
            activation: false,
            up: keys.pressed(KeyCode::KeyW),
            down: keys.pressed(KeyCode::KeyS),
            left: keys.pressed(KeyCode::KeyA),
            right: keys.pressed(KeyCode::KeyD),
        }
    }
}

/// A connected gamepad: stick clicks charge, the left stick aims.
pub struct PadDevice<'a>(pub &'a Gamepad);

impl InputDevice for PadDevice<'_> {
    fn sample(&self, config: &InputConfig) -> DeviceSample {
        if !config.enable_gamepad {
            return DeviceSample::IDLE;
        }
        let pad = self.0;
        // Some controller mappings report the left stick click as R3.
        let clicked =
            pad.pressed(GamepadButton::LeftThumb) || pad.pressed(GamepadButton::RightThumb);
        DeviceSample::from_stick(pad.left_stick(), config.stick_threshold).with_activation(clicked)
    }
}
