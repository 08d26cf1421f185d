//! Final attitude, throttle and spool commands for an active tick.

use crate::hal::{AttitudeControl, DesiredSpoolState, Motors, Vehicle, YawCommand};

/// Commands produced by an active tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Output {
    /// Roll (in centidegrees), inside the lean cone.
    pub roll_cd: f32,

    /// Pitch (in centidegrees), inside the lean cone.
    pub pitch_cd: f32,

    pub yaw: YawCommand,

    /// Scaled throttle (0 ~ 1).
    pub throttle: f32,
}

/// Send `output` to the vehicle.
///
/// The spool state is requested on every call since the safety gate may have
/// lowered it on an earlier tick.
pub fn dispatch<A, P, M, S>(vehicle: &mut Vehicle<A, P, M, S>, output: &Output, filter_hz: f32)
where
    A: AttitudeControl,
    M: Motors,
{
    vehicle
        .motors
        .set_desired_spool_state(DesiredSpoolState::ThrottleUnlimited);

    vehicle
        .attitude
        .input_angle(output.roll_cd, output.pitch_cd, output.yaw);

    // Do not compensate for tilt, the offboard computer commands thrust directly
    vehicle
        .attitude
        .set_throttle_out(output.throttle, false, filter_hz);
}
