
/// Calibration parameters for one axis component. Absolute axes are
/// normalized from their native range into -1.0 - 1.0, relative axes pass
/// their deltas through with an optional backend scale correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCalibration {
    relative: bool,
    minimum: i32,
    maximum: i32,
    flat: i32,
    scale: f32,
}

impl AxisCalibration {
    /// Create a calibration for an absolute axis with the given native range
    pub fn absolute(minimum: i32, maximum: i32, flat: i32) -> Self {
        Self {
            relative: false,
            minimum,
            maximum,
            flat,
            scale: 1.0,
        }
    }

    /// Create a calibration for a relative axis. Every raw delta is divided
    /// by the given scale.
    pub fn relative(scale: f32) -> Self {
        Self {
            relative: true,
            minimum: 0,
            maximum: 0,
            flat: 0,
            scale,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn flat(&self) -> i32 {
        self.flat
    }

    /// Returns the calibrated value for the given raw value
    pub fn calibrate(&self, raw: i32) -> f32 {
        if self.relative {
            return scale_relative_value(raw, self.scale);
        }
        normalize_signed_value(raw, self.minimum, self.maximum)
    }

    /// Returns the dead zone of the axis in calibrated units. This is only
    /// metadata; calibrated values are never suppressed.
    pub fn deadzone(&self) -> f32 {
        if self.relative || self.minimum == self.maximum {
            return 0.0;
        }
        let range = self.maximum as f64 - self.minimum as f64;
        (self.flat as f64 / (2.0 * range)).abs() as f32
    }
}

/// Returns a value between -1.0 and 1.0 for the given raw value and its
/// range. Values outside of the range are clamped first and an empty range
/// always yields 0.0.
pub fn normalize_signed_value(raw: i32, minimum: i32, maximum: i32) -> f32 {
    if minimum == maximum {
        return 0.0;
    }
    let (minimum, maximum) = if minimum > maximum {
        (maximum, minimum)
    } else {
        (minimum, maximum)
    };

    let raw = raw.clamp(minimum, maximum) as f64;
    let minimum = minimum as f64;
    let maximum = maximum as f64;

    let value = 2.0 * (raw - minimum) / (maximum - minimum) - 1.0;
    value as f32
}

/// Backend scale correction for relative axes (e.g. high resolution wheel
/// deltas reported in fractions of a notch).
pub fn scale_relative_value(raw: i32, scale: f32) -> f32 {
    if scale == 0.0 {
        return raw as f32;
    }
    raw as f32 / scale
}

/// Buttons are pressed for any non-zero raw value
pub fn calibrate_button(raw: i32) -> f32 {
    if raw != 0 {
        1.0
    } else {
        0.0
    }
}

/// Reduce a raw hat axis value to a step in {-1, 0, 1}. Hats that already
/// report in that range pass through untouched so out of range values can be
/// detected by the POV composer. Wider ranges are reduced by sign with a
/// half-range threshold.
pub fn hat_step(raw: i32, minimum: i32, maximum: i32) -> i32 {
    if minimum >= -1 && maximum <= 1 {
        return raw;
    }
    let value = normalize_signed_value(raw, minimum, maximum);
    if value <= -0.5 {
        -1
    } else if value >= 0.5 {
        1
    } else {
        0
    }
}
