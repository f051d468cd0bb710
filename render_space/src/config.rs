// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Gesture switches and tuning constants for one [`crate::Viewport`].
///
/// All fields may be changed at any time through
/// [`crate::Viewport::config_mut`]; the next event or damping tick picks up
/// the new values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Base of the wheel zoom exponent, in `(1, ∞)`.
    ///
    /// A wheel event with vertical delta `dy` zooms by
    /// `scroll_sensitivity.powf(-dy)`.
    pub scroll_sensitivity: f64,
    /// Radians of rotation per pixel of horizontal secondary-button drag,
    /// in `(0, ∞)`.
    pub rotation_sensitivity: f64,
    /// Time constant, in seconds, of the easing from current toward target,
    /// in `[0, ∞)`. Zero snaps immediately.
    pub damping_strength: f64,
    /// Enables drag and two-finger panning.
    pub panning: bool,
    /// Enables wheel and pinch zooming.
    pub zooming: bool,
    /// Enables secondary-button drag and two-finger rotation.
    pub rotating: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scroll_sensitivity: 1.01,
            rotation_sensitivity: 0.01,
            damping_strength: 0.0,
            panning: true,
            zooming: true,
            rotating: true,
        }
    }
}

impl ViewportConfig {
    /// Returns the configuration with damping set to `strength`.
    #[must_use]
    pub fn with_damping_strength(mut self, strength: f64) -> Self {
        self.damping_strength = strength;
        self
    }

    /// Returns the configuration with a new wheel sensitivity.
    #[must_use]
    pub fn with_scroll_sensitivity(mut self, sensitivity: f64) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }

    /// Returns the configuration with a new drag rotation sensitivity.
    #[must_use]
    pub fn with_rotation_sensitivity(mut self, sensitivity: f64) -> Self {
        self.rotation_sensitivity = sensitivity;
        self
    }

    /// Returns the configuration with the three gesture switches replaced.
    #[must_use]
    pub fn with_gestures(mut self, panning: bool, zooming: bool, rotating: bool) -> Self {
        self.panning = panning;
        self.zooming = zooming;
        self.rotating = rotating;
        self
    }

    /// Returns `true` if the damping step eases rather than snaps.
    #[must_use]
    pub fn is_damped(&self) -> bool {
        self.damping_strength > 0.0
    }

    /// Checks every tuning constant against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scroll_sensitivity.is_finite() && self.scroll_sensitivity > 1.0) {
            return Err(ConfigError {
                field: ConfigField::ScrollSensitivity,
                value: self.scroll_sensitivity,
            });
        }
        if !(self.rotation_sensitivity.is_finite() && self.rotation_sensitivity > 0.0) {
            return Err(ConfigError {
                field: ConfigField::RotationSensitivity,
                value: self.rotation_sensitivity,
            });
        }
        if !(self.damping_strength.is_finite() && self.damping_strength >= 0.0) {
            return Err(ConfigError {
                field: ConfigField::DampingStrength,
                value: self.damping_strength,
            });
        }
        Ok(())
    }
}

/// Tuning constant named by a [`ConfigError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// [`ViewportConfig::scroll_sensitivity`], expected in `(1, ∞)`.
    ScrollSensitivity,
    /// [`ViewportConfig::rotation_sensitivity`], expected in `(0, ∞)`.
    RotationSensitivity,
    /// [`ViewportConfig::damping_strength`], expected in `[0, ∞)`.
    DampingStrength,
}

impl ConfigField {
    fn name(self) -> &'static str {
        match self {
            Self::ScrollSensitivity => "scroll_sensitivity",
            Self::RotationSensitivity => "rotation_sensitivity",
            Self::DampingStrength => "damping_strength",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Self::ScrollSensitivity => "a finite value greater than 1",
            Self::RotationSensitivity => "a finite value greater than 0",
            Self::DampingStrength => "a finite value of at least 0",
        }
    }
}

/// Error returned when a [`ViewportConfig`] constant is out of range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigError {
    /// The offending field.
    pub field: ConfigField,
    /// The value it held.
    pub value: f64,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {}, expected {}",
            self.field.name(),
            self.value,
            self.field.expected()
        )
    }
}

impl core::error::Error for ConfigError {}
