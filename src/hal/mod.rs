//! Interfaces to the surrounding flight stack.
//!
//! The offboard mode does not stabilize the vehicle itself. It hands its roll, pitch, yaw and
//! throttle commands to an [`AttitudeControl`], leans on a [`PositionControl`] to hold altitude
//! when commands go stale, and reads arming and landing state from [`Motors`] and
//! [`VehicleStatus`].

use nalgebra::Vector3;

mod frame;
pub use frame::{FrameCapabilities, FrameClass};

/// Yaw input for the attitude controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum YawCommand {
    /// Absolute heading in centidegrees.
    /// `slew` asks the controller to limit the rate it turns towards the heading.
    Angle { yaw_cd: f32, slew: bool },

    /// Yaw rate in centidegrees/second.
    Rate(f32),
}

/// Spool state requested from the motors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DesiredSpoolState {
    /// Motors stopped.
    ShutDown,
    /// Motors spinning at idle, no thrust authority.
    GroundIdle,
    /// Full throttle range available.
    ThrottleUnlimited,
}

/// Severity of an operator alert, in MAVLink order (most severe first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

/// Attitude controller and its throttle output.
pub trait AttitudeControl {
    /// Command euler roll and pitch (in centidegrees) with a yaw heading or rate.
    fn input_angle(&mut self, roll_cd: f32, pitch_cd: f32, yaw: YawCommand);

    /// Maximum lean angle (in centidegrees).
    fn lean_angle_max(&self) -> f32;

    /// Relax the controller so its targets follow the current attitude.
    fn relax_to_current_heading(&mut self);

    /// Set the yaw target to the current heading.
    fn reset_yaw_target_to_current_heading(&mut self);

    /// Output a throttle (0 ~ 1) with optional tilt compensation, filtered at `filter_hz`.
    fn set_throttle_out(&mut self, throttle: f32, compensate_tilt: bool, filter_hz: f32);
}

/// Altitude and position controller.
pub trait PositionControl {
    /// Set the climb rate feed forward (in centimeters/second).
    fn set_climb_rate_feedforward(&mut self, climb_rate_cms: f32);

    /// Run the altitude controller.
    fn update(&mut self);

    /// Reset the altitude controller integrators so its output starts at `throttle`.
    fn relax_integrators(&mut self, throttle: f32);
}

/// Motor subsystem.
pub trait Motors {
    /// Returns true if the motors are armed.
    fn armed(&self) -> bool;

    /// Returns true if the motor interlock allows thrust.
    fn interlock_engaged(&self) -> bool;

    /// Maximum lift ratio (0 ~ 1) for the current battery and load.
    fn max_lift(&self) -> f32;

    fn set_desired_spool_state(&mut self, state: DesiredSpoolState);
}

/// Vehicle state maintained by the rest of the flight stack.
pub trait VehicleStatus {
    /// Returns true once the vehicle has been armed with a non-zero throttle.
    fn auto_armed(&self) -> bool;

    /// Returns true if the land detector reports the vehicle on the ground.
    fn landed(&self) -> bool;

    /// Current roll, pitch and yaw (in centidegrees).
    fn current_attitude(&self) -> Vector3<f32>;
}

/// Operator notifications.
pub trait Notify {
    /// Send a text alert to the operator.
    fn alert(&mut self, severity: Severity, text: &str);

    /// Play an audible warning.
    fn play_tone(&mut self) {}
}

impl<T> Notify for &mut T
where
    T: Notify + ?Sized,
{
    fn alert(&mut self, severity: Severity, text: &str) {
        (&mut **self).alert(severity, text)
    }

    fn play_tone(&mut self) {
        (&mut **self).play_tone()
    }
}

/// The flight stack collaborators of a vehicle.
pub struct Vehicle<A, P, M, S> {
    pub attitude: A,
    pub position: P,
    pub motors: M,
    pub status: S,
}

impl<A, P, M, S> Vehicle<A, P, M, S>
where
    A: AttitudeControl,
    P: PositionControl,
    M: Motors,
    S: VehicleStatus,
{
    pub fn new(attitude: A, position: P, motors: M, status: S) -> Self {
        Self {
            attitude,
            position,
            motors,
            status,
        }
    }
}
