//! Command timeout.
//!
//! The age of the latest command is recomputed from the clock every tick. Nothing is latched,
//! so the first fresh command after a dropout is flown on the very next tick.

use crate::{
    hal::{AttitudeControl, DesiredSpoolState, Motors, PositionControl, Vehicle, YawCommand},
    time, CommandState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StalenessMonitor {
    pub timeout_ms: u32,
}

impl StalenessMonitor {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    /// Age (in milliseconds) of `command` at `now_ms`.
    pub fn age_ms(&self, now_ms: u32, command: &CommandState) -> u32 {
        time::elapsed_ms(now_ms, command.timestamp_ms)
    }

    /// Returns the command's age if it is older than the timeout.
    pub fn expired(&self, now_ms: u32, command: &CommandState) -> Option<u32> {
        let age_ms = self.age_ms(now_ms, command);
        if age_ms > self.timeout_ms {
            Some(age_ms)
        } else {
            None
        }
    }
}

/// Level the vehicle with zero yaw rate and let the altitude controller hold a zero climb rate.
pub fn hold_level<A, P, M, S>(vehicle: &mut Vehicle<A, P, M, S>)
where
    A: AttitudeControl,
    P: PositionControl,
    M: Motors,
{
    vehicle
        .motors
        .set_desired_spool_state(DesiredSpoolState::ThrottleUnlimited);

    vehicle.attitude.input_angle(0., 0., YawCommand::Rate(0.));

    vehicle.position.set_climb_rate_feedforward(0.);
    vehicle.position.update();
}
