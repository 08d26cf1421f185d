//! Angle wrapping, lean angle limiting and yaw mode selection.
//!
//! All angles are in centidegrees.

use crate::{hal::YawCommand, CommandState, YawMode};
use nalgebra::Vector2;
use num_traits::Float;

/// Wrap an angle (in centidegrees) to `0..36000`.
pub fn wrap_360_cd(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.;
    }

    let mut res = angle % 36000.;
    if res < 0. {
        res += 36000.;
    }

    // A tiny negative remainder rounds up to a full turn
    if res >= 36000. {
        0.
    } else {
        res
    }
}

/// Wrap an angle (in centidegrees) to `-18000..=18000`, excluding `-18000`.
pub fn wrap_180_cd(angle: f32) -> f32 {
    let res = wrap_360_cd(angle);
    if res > 18000. {
        res - 36000.
    } else {
        res
    }
}

/// Limit the combined roll and pitch lean to `angle_max`, keeping the lean direction.
///
/// A non-positive `angle_max` is treated as no lean allowed.
pub fn clamp_lean_angle(roll_cd: f32, pitch_cd: f32, angle_max: f32) -> (f32, f32) {
    if !(angle_max > 0.) {
        return (0., 0.);
    }

    let lean = Vector2::new(roll_cd, pitch_cd);
    let total = lean.norm();
    if total > angle_max {
        let clamped = lean * (angle_max / total);
        (clamped.x, clamped.y)
    } else {
        (roll_cd, pitch_cd)
    }
}

/// Select the yaw input for this tick from the command's yaw mode.
pub fn yaw_command(command: &CommandState) -> YawCommand {
    match command.yaw_mode {
        YawMode::Rate => YawCommand::Rate(wrap_180_cd(command.yaw_rate_cmd)),
        YawMode::Angle => YawCommand::Angle {
            yaw_cd: wrap_180_cd(command.yaw_cmd),
            slew: true,
        },
    }
}

/// Convert radians to centidegrees.
pub fn radians_to_cd(radians: f32) -> f32 {
    Float::to_degrees(radians) * 100.
}
