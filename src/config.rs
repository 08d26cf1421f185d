use crate::Error;

/// Tuning for the offboard command mode.
///
/// ```
/// use embedded_offboard::Config;
///
/// let config = Config::default()
///     .with_command_timeout_ms(250)
///     .with_thrust_range(0.05, 0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Age (in milliseconds) after which a command is treated as lost.
    pub command_timeout_ms: u32,

    /// Lowest scaled thrust sent to the throttle output (0 ~ 1).
    pub thrust_min: f32,

    /// Highest scaled thrust sent to the throttle output (0 ~ 1).
    pub thrust_max: f32,

    /// Raw thrust seeded at mode entry, before any command arrives.
    pub hover_thrust: f32,

    /// Cutoff (in hz) of the throttle output filter, 0 disables it.
    ///
    /// Defaults to 0 like ArduPilot's `PILOT_THR_FILT`, so the offboard thrust reaches the
    /// motors unfiltered unless a cutoff is configured.
    pub throttle_filter_hz: f32,

    /// Externally reported faults raise an alert once every this many calls.
    pub alert_interval: u32,
}

impl Default for Config {
    fn default() -> Self {
        const COMMAND_TIMEOUT_MS: u32 = 500;
        const THRUST_MIN: f32 = 0.01;
        const THRUST_MAX: f32 = 0.85;
        const HOVER_THRUST: f32 = 0.35;
        const THROTTLE_FILTER_HZ: f32 = 0.;
        const ALERT_INTERVAL: u32 = 50;

        Self {
            command_timeout_ms: COMMAND_TIMEOUT_MS,
            thrust_min: THRUST_MIN,
            thrust_max: THRUST_MAX,
            hover_thrust: HOVER_THRUST,
            throttle_filter_hz: THROTTLE_FILTER_HZ,
            alert_interval: ALERT_INTERVAL,
        }
    }
}

impl Config {
    /// Builder method to set `command_timeout_ms` and return `self`
    pub fn with_command_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.command_timeout_ms = timeout_ms;
        self
    }

    /// Builder method to set `thrust_min` and `thrust_max` and return `self`
    pub fn with_thrust_range(mut self, min: f32, max: f32) -> Self {
        self.thrust_min = min;
        self.thrust_max = max;
        self
    }

    /// Builder method to set `hover_thrust` and return `self`
    pub fn with_hover_thrust(mut self, thrust: f32) -> Self {
        self.hover_thrust = thrust;
        self
    }

    /// Builder method to set `throttle_filter_hz` and return `self`
    pub fn with_throttle_filter_hz(mut self, hz: f32) -> Self {
        self.throttle_filter_hz = hz;
        self
    }

    /// Builder method to set `alert_interval` and return `self`
    pub fn with_alert_interval(mut self, calls: u32) -> Self {
        self.alert_interval = calls;
        self
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.command_timeout_ms == 0 {
            return Err(Error::InvalidConfig("command timeout must be positive"));
        }

        // Negated comparisons so NaN fails too
        if !(self.thrust_min >= 0. && self.thrust_min < self.thrust_max && self.thrust_max <= 1.) {
            return Err(Error::InvalidConfig("thrust range must satisfy 0 <= min < max <= 1"));
        }
        if !(self.hover_thrust > 0. && self.hover_thrust <= 1.) {
            return Err(Error::InvalidConfig("hover thrust must be in (0, 1]"));
        }
        if !(self.throttle_filter_hz >= 0.) {
            return Err(Error::InvalidConfig("throttle filter cutoff must not be negative"));
        }
        if self.alert_interval == 0 {
            return Err(Error::InvalidConfig("alert interval must be positive"));
        }

        Ok(())
    }
}
