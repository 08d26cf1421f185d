//! # embedded-offboard
//! A `#![no_std]` offboard attitude command mode for embedded flight software.
//!
//! An external computer streams attitude targets (orientation, thrust and a yaw setpoint)
//! at whatever rate its link allows. [`CommandIngestion`] turns each target into a
//! [`CommandState`] and publishes it into a shared [`CommandSlot`]. Once per control tick
//! [`ComputerMode`] reads the latest command and runs it through the pipeline:
//!
//! 1. [`safety gate`](mode::gate) - disarmed, interlocked or landed vehicles get a neutral output
//! 2. [`staleness`](mode::staleness) - commands older than the timeout degrade to a level hover
//! 3. [`lean angle clamp`](angle::clamp_lean_angle) - roll/pitch are limited to the lean cone
//! 4. [`yaw selection`](angle::yaw_command) - absolute heading or yaw rate
//! 5. [`thrust scaling`](ThrustScaler) - normalised by the vehicle's lift and clamped
//! 6. [`output`](mode::output) - attitude, throttle and spool commands to the flight stack
//!
//! The flight stack itself (attitude and position controllers, motors, vehicle status and
//! notifications) is reached through the traits in [`hal`].
//!
//! ```ignore
//! use embedded_offboard::{CommandIngestion, CommandSlot, ComputerMode, Config, FrameClass};
//!
//! static SLOT: CommandSlot = CommandSlot::new();
//!
//! // Command link context
//! let ingestion = CommandIngestion::new(&SLOT, clock, &Config::default())?;
//! ingestion.set_targets(&target, &mut notify)?;
//!
//! // Control loop context (400hz)
//! let mut mode = ComputerMode::new(Config::default(), clock, FrameClass::MultiCopter)?;
//! mode.init(&SLOT, &mut vehicle)?;
//! loop {
//!     mode.run(&SLOT, &mut vehicle)?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod angle;

pub mod command;
pub use command::{
    AttitudeTarget, CommandIngestion, CommandSlot, CommandState, Ingested, YawMode, YawSetpoint,
};

mod config;
pub use config::Config;

mod error;
pub use error::Error;

pub mod hal;
pub use hal::{FrameCapabilities, FrameClass, Vehicle};

pub mod mode;
pub use mode::{ComputerMode, TickState};

mod thrust;
pub use thrust::ThrustScaler;

pub mod time;

/// Constrain `amt` to `low..=high`.
/// A NaN input yields the middle of the range.
pub fn constrain_float(amt: f32, low: f32, high: f32) -> f32 {
    if amt.is_nan() {
        return (low + high) / 2.0;
    }

    if amt < low {
        return low;
    }

    if amt > high {
        return high;
    }

    amt
}
