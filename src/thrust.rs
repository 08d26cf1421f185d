use crate::{constrain_float, Config};

/// Converts a raw thrust command to the throttle range of the attitude controller.
///
/// The raw command is divided by the vehicle's current maximum lift, so that the same command
/// gives the same thrust as the battery sags, then held inside `min..=max`.
///
/// ```
/// use embedded_offboard::ThrustScaler;
///
/// let scaler = ThrustScaler::new(0.01, 0.85);
/// assert!((scaler.scale(0.4, 0.8) - 0.5).abs() < 1e-6);
/// assert_eq!(scaler.scale(1.0, 0.8), 0.85);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrustScaler {
    pub min: f32,
    pub max: f32,
}

impl ThrustScaler {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thrust_min, config.thrust_max)
    }

    /// Scale `thrust` by the inverse of `max_lift` and clamp it to the configured range.
    pub fn scale(&self, thrust: f32, max_lift: f32) -> f32 {
        constrain_float(thrust * compensation_gain(max_lift), self.min, self.max)
    }
}

fn compensation_gain(max_lift: f32) -> f32 {
    // avoid divide by zero
    if !(max_lift > 0.) || !max_lift.is_finite() {
        return 1.;
    }

    1. / max_lift
}
