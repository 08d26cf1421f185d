//! The latest offboard command and the slot it is shared through.
//!
//! The command link writes into a [`CommandSlot`] whenever a target arrives and the control
//! loop takes a [`snapshot`](CommandSlot::snapshot) once per tick. Both sides copy the whole
//! [`CommandState`] inside a critical section, so a reader never sees half of an update and
//! the writer is never blocked for longer than the copy.

use core::cell::Cell;
use critical_section::Mutex;

mod ingest;
pub use ingest::{AttitudeTarget, CommandIngestion, Ingested, YawSetpoint};

/// Which yaw field of a [`CommandState`] the attitude controller follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum YawMode {
    /// Hold the absolute heading in `yaw_cmd`.
    #[default]
    Angle,
    /// Turn at the rate in `yaw_rate_cmd`.
    Rate,
}

/// The most recent offboard command.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CommandState {
    /// Time (in milliseconds) the command was accepted.
    pub timestamp_ms: u32,

    /// Desired roll (in centidegrees).
    pub roll_cmd: f32,

    /// Desired pitch (in centidegrees).
    pub pitch_cmd: f32,

    /// Desired heading (in centidegrees).
    pub yaw_cmd: f32,

    /// Desired yaw rate (in centidegrees/second).
    pub yaw_rate_cmd: f32,

    /// Desired collective thrust, nominally 0 ~ 1.
    pub thrust_cmd: f32,

    pub yaw_mode: YawMode,
}

impl CommandState {
    /// A zeroed command in yaw angle mode.
    pub const ZERO: Self = Self {
        timestamp_ms: 0,
        roll_cmd: 0.,
        pitch_cmd: 0.,
        yaw_cmd: 0.,
        yaw_rate_cmd: 0.,
        thrust_cmd: 0.,
        yaw_mode: YawMode::Angle,
    };
}

/// Shared storage for the latest [`CommandState`].
///
/// Last writer wins: there is no queue and publishing never waits on the reader.
///
/// ```
/// use embedded_offboard::{CommandSlot, CommandState};
///
/// static SLOT: CommandSlot = CommandSlot::new();
///
/// SLOT.publish(CommandState { timestamp_ms: 10, thrust_cmd: 0.4, ..CommandState::ZERO });
/// assert_eq!(SLOT.snapshot().thrust_cmd, 0.4);
/// ```
pub struct CommandSlot {
    command: Mutex<Cell<CommandState>>,
    fault_reports: Mutex<Cell<u32>>,
}

impl Default for CommandSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSlot {
    /// Create an empty slot (const constructor for static initialization)
    pub const fn new() -> Self {
        Self {
            command: Mutex::new(Cell::new(CommandState::ZERO)),
            fault_reports: Mutex::new(Cell::new(0)),
        }
    }

    /// Copy out the latest command.
    pub fn snapshot(&self) -> CommandState {
        critical_section::with(|cs| self.command.borrow(cs).get())
    }

    /// Replace the latest command, timestamp included.
    pub fn publish(&self, command: CommandState) {
        critical_section::with(|cs| self.command.borrow(cs).set(command));
    }

    /// Replace the latest command and clear the fault report counter.
    pub(crate) fn reseed(&self, command: CommandState) {
        critical_section::with(|cs| {
            self.command.borrow(cs).set(command);
            self.fault_reports.borrow(cs).set(0);
        });
    }

    /// Count a reported fault, returning how many were reported before it.
    pub(crate) fn count_fault_report(&self) -> u32 {
        critical_section::with(|cs| {
            let cell = self.fault_reports.borrow(cs);
            let count = cell.get();
            cell.set(count.wrapping_add(1));
            count
        })
    }
}
