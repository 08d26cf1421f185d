//! Offboard ("computer") flight mode.
//!
//! The mode is re-evaluated from scratch every tick:
//!
//! ```text
//!            unsafe to fly          command older than timeout
//! tick ──> [gate] ──────> GATED    [staleness] ───────────> STALE
//!            │ safe                    │ fresh
//!            └──────────────────────> └──> clamp ─> yaw ─> thrust ─> ACTIVE
//! ```
//!
//! There is no hysteresis, a single safe and fresh tick is enough to fly the command again.

use crate::{
    angle,
    hal::{
        AttitudeControl, FrameCapabilities, FrameClass, Motors, PositionControl, Vehicle,
        VehicleStatus,
    },
    time, CommandSlot, CommandState, Config, Error, ThrustScaler, YawMode,
};
use embedded_time::Clock;

pub mod gate;
pub use gate::GateReason;

pub mod output;
pub use output::Output;

pub mod staleness;
pub use staleness::StalenessMonitor;

/// Result of a control tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickState {
    /// Held on the ground by the safety gate.
    Gated,
    /// No recent command, holding a level hover.
    Stale,
    /// Flying the latest command.
    Active,
}

/// Flight mode that flies attitude targets from an offboard computer.
pub struct ComputerMode<C, F = FrameClass> {
    config: Config,
    clock: C,
    frame: F,
    thrust: ThrustScaler,
    staleness: StalenessMonitor,
    is_active: bool,
    last_tick: Option<TickState>,
}

impl<C, F> ComputerMode<C, F>
where
    C: Clock<T = u32>,
    F: FrameCapabilities,
{
    pub fn new(config: Config, clock: C, frame: F) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            thrust: ThrustScaler::from_config(&config),
            staleness: StalenessMonitor::new(config.command_timeout_ms),
            config,
            clock,
            frame,
            is_active: false,
            last_tick: None,
        })
    }

    /// Returns true between [`init`](Self::init) and [`exit`](Self::exit).
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Enter the mode.
    ///
    /// Seeds the command slot with the vehicle's current attitude, zero yaw rate and the hover
    /// thrust, stamped with the current time. Until the offboard computer sends its first
    /// target the vehicle holds that attitude, falling back to a level hover after the timeout.
    pub fn init<A, P, M, S>(
        &mut self,
        slot: &CommandSlot,
        vehicle: &Vehicle<A, P, M, S>,
    ) -> Result<(), Error>
    where
        S: VehicleStatus,
    {
        let now_ms = time::millis(&self.clock)?;
        let attitude = vehicle.status.current_attitude();

        slot.reseed(CommandState {
            timestamp_ms: now_ms,
            roll_cmd: attitude.x,
            pitch_cmd: attitude.y,
            yaw_cmd: attitude.z,
            yaw_rate_cmd: 0.,
            thrust_cmd: self.config.hover_thrust,
            yaw_mode: YawMode::Rate,
        });

        self.is_active = true;
        self.last_tick = None;

        log_info!("offboard mode entered at {} ms", now_ms);
        log_debug!(
            "seeded roll {} pitch {} yaw {} thrust {}",
            attitude.x,
            attitude.y,
            attitude.z,
            self.config.hover_thrust
        );

        Ok(())
    }

    /// Leave the mode. Whatever is left in the command slot is ignored from now on.
    pub fn exit(&mut self) {
        if self.is_active {
            log_info!("offboard mode exited");
        }
        self.is_active = false;
        self.last_tick = None;
    }

    /// Run one control tick.
    ///
    /// If the clock cannot be read the vehicle is levelled as for a stale command
    /// before the error is returned.
    pub fn run<A, P, M, S>(
        &mut self,
        slot: &CommandSlot,
        vehicle: &mut Vehicle<A, P, M, S>,
    ) -> Result<TickState, Error>
    where
        A: AttitudeControl,
        P: PositionControl,
        M: Motors,
        S: VehicleStatus,
    {
        if !self.is_active {
            return Err(Error::ModeInactive);
        }

        if let Some(reason) = gate::check(&vehicle.motors, &vehicle.status) {
            gate::hold_on_ground(vehicle, &self.frame, self.config.throttle_filter_hz);

            if self.last_tick != Some(TickState::Gated) {
                log_info!("offboard held on ground: {}", reason.as_str());
            }
            return Ok(self.record(TickState::Gated));
        }

        let command = slot.snapshot();
        let now_ms = match time::millis(&self.clock) {
            Ok(now_ms) => now_ms,
            Err(error) => {
                staleness::hold_level(vehicle);
                self.record(TickState::Stale);
                return Err(error);
            }
        };

        if let Some(age_ms) = self.staleness.expired(now_ms, &command) {
            staleness::hold_level(vehicle);

            if self.last_tick != Some(TickState::Stale) {
                log_warn!("offboard command lost, last received {} ms ago", age_ms);
            }
            return Ok(self.record(TickState::Stale));
        }

        let (roll_cd, pitch_cd) = angle::clamp_lean_angle(
            command.roll_cmd,
            command.pitch_cmd,
            vehicle.attitude.lean_angle_max(),
        );
        let output = Output {
            roll_cd,
            pitch_cd,
            yaw: angle::yaw_command(&command),
            throttle: self.thrust.scale(command.thrust_cmd, vehicle.motors.max_lift()),
        };
        output::dispatch(vehicle, &output, self.config.throttle_filter_hz);

        if self.last_tick != Some(TickState::Active) {
            log_info!("offboard flying commands");
        }
        Ok(self.record(TickState::Active))
    }

    fn record(&mut self, tick: TickState) -> TickState {
        self.last_tick = Some(tick);
        tick
    }
}
