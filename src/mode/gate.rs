//! Safety gate, evaluated first on every tick.

use crate::hal::{
    AttitudeControl, DesiredSpoolState, FrameCapabilities, Motors, PositionControl, Vehicle,
    VehicleStatus,
};

/// Why the vehicle is held on the ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateReason {
    Disarmed,
    NotAutoArmed,
    InterlockDisengaged,
    Landed,
}

impl GateReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateReason::Disarmed => "disarmed",
            GateReason::NotAutoArmed => "not auto armed",
            GateReason::InterlockDisengaged => "motor interlock disengaged",
            GateReason::Landed => "landed",
        }
    }
}

/// Returns the first reason the vehicle may not fly, or `None` if it may.
pub fn check<M, S>(motors: &M, status: &S) -> Option<GateReason>
where
    M: Motors,
    S: VehicleStatus,
{
    if !motors.armed() {
        Some(GateReason::Disarmed)
    } else if !status.auto_armed() {
        Some(GateReason::NotAutoArmed)
    } else if !motors.interlock_engaged() {
        Some(GateReason::InterlockDisengaged)
    } else if status.landed() {
        Some(GateReason::Landed)
    } else {
        None
    }
}

/// Hold the vehicle on the ground: zero throttle, relaxed attitude and altitude controllers.
pub fn hold_on_ground<A, P, M, S, F>(vehicle: &mut Vehicle<A, P, M, S>, frame: &F, filter_hz: f32)
where
    A: AttitudeControl,
    P: PositionControl,
    M: Motors,
    F: FrameCapabilities,
{
    if frame.resets_yaw_target_on_disengage() {
        vehicle.attitude.reset_yaw_target_to_current_heading();
    }

    let spool = if vehicle.motors.armed() {
        DesiredSpoolState::GroundIdle
    } else {
        DesiredSpoolState::ShutDown
    };
    vehicle.motors.set_desired_spool_state(spool);

    vehicle.attitude.relax_to_current_heading();
    vehicle.attitude.set_throttle_out(0., false, filter_hz);
    vehicle.position.relax_integrators(0.);
}
