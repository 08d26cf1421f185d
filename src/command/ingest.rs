use super::{CommandSlot, CommandState, YawMode};
use crate::{
    angle::radians_to_cd,
    hal::{Notify, Severity},
    time, Config, Error,
};
use embedded_time::Clock;
use nalgebra::{Quaternion, UnitQuaternion};

/// Quaternions with a norm at or below this are rejected.
const MIN_QUATERNION_NORM: f32 = 1e-6;

/// Yaw part of an [`AttitudeTarget`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum YawSetpoint {
    /// Absolute heading in radians.
    Angle(f32),
    /// Yaw rate in radians/second.
    Rate(f32),
}

/// An attitude target sent by the offboard computer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttitudeTarget {
    /// Desired orientation (w, x, y, z), expected to be a unit quaternion.
    pub orientation: Quaternion<f32>,

    /// Desired collective thrust, nominally 0 ~ 1.
    pub thrust: f32,

    pub yaw: YawSetpoint,

    /// Set when the offboard computer reports a fault of its own.
    pub fault_reported: bool,
}

impl AttitudeTarget {
    /// Create a target from the fields of an attitude target message,
    /// reading `yaw_rads` as a yaw rate if `use_yaw_rate` is set and as a heading otherwise.
    pub fn new(orientation: Quaternion<f32>, thrust: f32, use_yaw_rate: bool, yaw_rads: f32) -> Self {
        let yaw = if use_yaw_rate {
            YawSetpoint::Rate(yaw_rads)
        } else {
            YawSetpoint::Angle(yaw_rads)
        };

        Self {
            orientation,
            thrust,
            yaw,
            fault_reported: false,
        }
    }

    /// Builder method to set `fault_reported` and return `self`
    pub fn with_fault_reported(mut self, fault_reported: bool) -> Self {
        self.fault_reported = fault_reported;
        self
    }
}

/// Outcome of [`CommandIngestion::set_targets`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ingested {
    /// Every field of the target was used.
    Accepted,
    /// Some fields were unusable and the previous values were kept in their place.
    Sanitized,
}

/// Entry point for the command link.
///
/// Converts [`AttitudeTarget`]s into [`CommandState`]s and publishes them into a
/// [`CommandSlot`]. Each call does a fixed amount of work and never waits on the control loop.
pub struct CommandIngestion<'a, C> {
    slot: &'a CommandSlot,
    clock: C,
    alert_interval: u32,
}

impl<'a, C> CommandIngestion<'a, C>
where
    C: Clock<T = u32>,
{
    pub fn new(slot: &'a CommandSlot, clock: C, config: &Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            slot,
            clock,
            alert_interval: config.alert_interval,
        })
    }

    /// Publish a new attitude target.
    pub fn set_targets<N>(&self, target: &AttitudeTarget, mut notify: N) -> Result<Ingested, Error>
    where
        N: Notify,
    {
        if target.fault_reported {
            self.report_fault(&mut notify);
        }

        let now_ms = time::millis(&self.clock)?;
        let previous = self.slot.snapshot();
        let (command, ingested) = command_from_target(target, &previous, now_ms);
        self.slot.publish(command);

        Ok(ingested)
    }

    fn report_fault<N: Notify>(&self, notify: &mut N) {
        let reports = self.slot.count_fault_report();
        if reports % self.alert_interval == 0 {
            log_warn!("offboard computer reported a fault ({} reports)", reports + 1);
            notify.alert(Severity::Critical, "Offboard: computer reported a fault");
            notify.play_tone();
        }
    }
}

/// Build the command for `target`, falling back to `previous` for unusable fields.
fn command_from_target(
    target: &AttitudeTarget,
    previous: &CommandState,
    now_ms: u32,
) -> (CommandState, Ingested) {
    let mut ingested = Ingested::Accepted;

    let (roll_cmd, pitch_cmd, heading_cmd) = match euler_cd(target.orientation) {
        Some(euler) => euler,
        None => {
            log_warn!("degenerate orientation, holding the last attitude command");
            ingested = Ingested::Sanitized;
            (previous.roll_cmd, previous.pitch_cmd, previous.yaw_cmd)
        }
    };

    let thrust_cmd = if target.thrust.is_finite() {
        target.thrust
    } else {
        log_warn!("non-finite thrust, holding the last thrust command");
        ingested = Ingested::Sanitized;
        previous.thrust_cmd
    };

    let (yaw_mode, yaw_cmd, yaw_rate_cmd) = match target.yaw {
        YawSetpoint::Rate(rate) if rate.is_finite() => (YawMode::Rate, heading_cmd, radians_to_cd(rate)),
        YawSetpoint::Rate(_) => {
            log_warn!("non-finite yaw rate, commanding zero yaw rate");
            ingested = Ingested::Sanitized;
            (YawMode::Rate, heading_cmd, 0.)
        }
        YawSetpoint::Angle(yaw) if yaw.is_finite() => (YawMode::Angle, radians_to_cd(yaw), 0.),
        YawSetpoint::Angle(_) => {
            log_warn!("non-finite heading, holding the last heading command");
            ingested = Ingested::Sanitized;
            (YawMode::Angle, previous.yaw_cmd, 0.)
        }
    };

    let command = CommandState {
        timestamp_ms: now_ms,
        roll_cmd,
        pitch_cmd,
        yaw_cmd,
        yaw_rate_cmd,
        thrust_cmd,
        yaw_mode,
    };

    (command, ingested)
}

/// Convert an orientation to roll, pitch and yaw (in centidegrees).
/// Returns `None` if the quaternion is not finite or too close to zero to normalize.
fn euler_cd(orientation: Quaternion<f32>) -> Option<(f32, f32, f32)> {
    if !orientation.coords.iter().all(|n| n.is_finite()) {
        return None;
    }

    let unit = UnitQuaternion::try_new(orientation, MIN_QUATERNION_NORM)?;
    let (roll, pitch, yaw) = unit.euler_angles();

    Some((radians_to_cd(roll), radians_to_cd(pitch), radians_to_cd(yaw)))
}
