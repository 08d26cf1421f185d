#![allow(dead_code)]

use embedded_offboard::{
    hal::{
        AttitudeControl, DesiredSpoolState, Motors, Notify, PositionControl, Severity,
        VehicleStatus, YawCommand,
    },
    Vehicle,
};
use embedded_time::{clock, rate::Fraction, Clock, Instant};
use nalgebra::Vector3;
use std::{
    cell::RefCell,
    rc::Rc,
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc,
    },
};

/// Millisecond clock advanced by hand.
#[derive(Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU32>,
    failed: Arc<AtomicBool>,
}

impl ManualClock {
    pub fn at(now_ms: u32) -> Self {
        let clock = Self::default();
        clock.set(now_ms);
        clock
    }

    pub fn set(&self, now_ms: u32) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u32) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn fail(&self, failed: bool) {
        self.failed.store(failed, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        if self.failed.load(Ordering::SeqCst) {
            return Err(clock::Error::Unspecified);
        }
        Ok(Instant::new(self.now_ms.load(Ordering::SeqCst)))
    }
}

/// A call made by the mode into the flight stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Call {
    InputAngle {
        roll_cd: f32,
        pitch_cd: f32,
        yaw: YawCommand,
    },
    RelaxToCurrentHeading,
    ResetYawTarget,
    ThrottleOut {
        throttle: f32,
        compensate_tilt: bool,
        filter_hz: f32,
    },
    ClimbRateFeedforward(f32),
    PositionUpdate,
    RelaxIntegrators(f32),
    Spool(DesiredSpoolState),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct Attitude {
    log: CallLog,
    pub lean_angle_max: f32,
}

impl AttitudeControl for Attitude {
    fn input_angle(&mut self, roll_cd: f32, pitch_cd: f32, yaw: YawCommand) {
        self.log.borrow_mut().push(Call::InputAngle {
            roll_cd,
            pitch_cd,
            yaw,
        });
    }

    fn lean_angle_max(&self) -> f32 {
        self.lean_angle_max
    }

    fn relax_to_current_heading(&mut self) {
        self.log.borrow_mut().push(Call::RelaxToCurrentHeading);
    }

    fn reset_yaw_target_to_current_heading(&mut self) {
        self.log.borrow_mut().push(Call::ResetYawTarget);
    }

    fn set_throttle_out(&mut self, throttle: f32, compensate_tilt: bool, filter_hz: f32) {
        self.log.borrow_mut().push(Call::ThrottleOut {
            throttle,
            compensate_tilt,
            filter_hz,
        });
    }
}

pub struct Position {
    log: CallLog,
}

impl PositionControl for Position {
    fn set_climb_rate_feedforward(&mut self, climb_rate_cms: f32) {
        self.log
            .borrow_mut()
            .push(Call::ClimbRateFeedforward(climb_rate_cms));
    }

    fn update(&mut self) {
        self.log.borrow_mut().push(Call::PositionUpdate);
    }

    fn relax_integrators(&mut self, throttle: f32) {
        self.log.borrow_mut().push(Call::RelaxIntegrators(throttle));
    }
}

pub struct TestMotors {
    log: CallLog,
    pub armed: bool,
    pub interlock: bool,
    pub max_lift: f32,
}

impl Motors for TestMotors {
    fn armed(&self) -> bool {
        self.armed
    }

    fn interlock_engaged(&self) -> bool {
        self.interlock
    }

    fn max_lift(&self) -> f32 {
        self.max_lift
    }

    fn set_desired_spool_state(&mut self, state: DesiredSpoolState) {
        self.log.borrow_mut().push(Call::Spool(state));
    }
}

pub struct Status {
    pub auto_armed: bool,
    pub landed: bool,
    pub attitude: Vector3<f32>,
}

impl VehicleStatus for Status {
    fn auto_armed(&self) -> bool {
        self.auto_armed
    }

    fn landed(&self) -> bool {
        self.landed
    }

    fn current_attitude(&self) -> Vector3<f32> {
        self.attitude
    }
}

pub type TestVehicle = Vehicle<Attitude, Position, TestMotors, Status>;

/// An armed, airborne vehicle with a 45 degree lean limit and full lift.
pub fn flying_vehicle() -> (TestVehicle, CallLog) {
    let log = CallLog::default();

    let vehicle = Vehicle::new(
        Attitude {
            log: log.clone(),
            lean_angle_max: 4500.,
        },
        Position { log: log.clone() },
        TestMotors {
            log: log.clone(),
            armed: true,
            interlock: true,
            max_lift: 1.,
        },
        Status {
            auto_armed: true,
            landed: false,
            attitude: Vector3::zeros(),
        },
    );

    (vehicle, log)
}

/// Take every call recorded so far.
pub fn drain(log: &CallLog) -> Vec<Call> {
    log.borrow_mut().drain(..).collect()
}

#[derive(Default)]
pub struct Alerts {
    pub alerts: Vec<(Severity, String)>,
    pub tones: usize,
}

impl Notify for Alerts {
    fn alert(&mut self, severity: Severity, text: &str) {
        self.alerts.push((severity, text.to_owned()));
    }

    fn play_tone(&mut self) {
        self.tones += 1;
    }
}
