//! Simulated offboard flight.
//!
//! A command link task streams attitude targets at 50hz for one second and then goes quiet,
//! while the control loop runs the offboard mode at 400hz. The printed tick state goes from
//! `Active` to `Stale` once the link has been silent for longer than the command timeout.

use embedded_offboard::{
    hal::{
        AttitudeControl, DesiredSpoolState, Motors, Notify, PositionControl, Severity,
        VehicleStatus, YawCommand,
    },
    AttitudeTarget, CommandIngestion, CommandSlot, ComputerMode, Config, FrameClass, TickState,
    Vehicle,
};
use embedded_time::{rate::Fraction, Clock, Instant};
use nalgebra::{UnitQuaternion, Vector3};
use std::time::{Duration, Instant as StdInstant};

static SLOT: CommandSlot = CommandSlot::new();

#[derive(Clone, Copy)]
struct StdClock {
    start: StdInstant,
}

impl Clock for StdClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, embedded_time::clock::Error> {
        Ok(Instant::new(self.start.elapsed().as_millis() as u32))
    }
}

#[derive(Default)]
struct SimAttitude {
    roll_cd: f32,
    pitch_cd: f32,
    yaw: Option<YawCommand>,
    throttle: f32,
}

impl AttitudeControl for SimAttitude {
    fn input_angle(&mut self, roll_cd: f32, pitch_cd: f32, yaw: YawCommand) {
        self.roll_cd = roll_cd;
        self.pitch_cd = pitch_cd;
        self.yaw = Some(yaw);
    }

    fn lean_angle_max(&self) -> f32 {
        3000.
    }

    fn relax_to_current_heading(&mut self) {}

    fn reset_yaw_target_to_current_heading(&mut self) {}

    fn set_throttle_out(&mut self, throttle: f32, _compensate_tilt: bool, _filter_hz: f32) {
        self.throttle = throttle;
    }
}

struct SimPosition;

impl PositionControl for SimPosition {
    fn set_climb_rate_feedforward(&mut self, _climb_rate_cms: f32) {}

    fn update(&mut self) {}

    fn relax_integrators(&mut self, _throttle: f32) {}
}

struct SimMotors {
    spool: DesiredSpoolState,
}

impl Motors for SimMotors {
    fn armed(&self) -> bool {
        true
    }

    fn interlock_engaged(&self) -> bool {
        true
    }

    fn max_lift(&self) -> f32 {
        0.9
    }

    fn set_desired_spool_state(&mut self, state: DesiredSpoolState) {
        self.spool = state;
    }
}

struct SimStatus;

impl VehicleStatus for SimStatus {
    fn auto_armed(&self) -> bool {
        true
    }

    fn landed(&self) -> bool {
        false
    }

    fn current_attitude(&self) -> Vector3<f32> {
        Vector3::zeros()
    }
}

struct Console;

impl Notify for Console {
    fn alert(&mut self, severity: Severity, text: &str) {
        println!("{:?}: {}", severity, text);
    }
}

#[tokio::main]
async fn main() -> Result<(), embedded_offboard::Error> {
    let clock = StdClock {
        start: StdInstant::now(),
    };
    let config = Config::default().with_command_timeout_ms(250);

    let ingestion = CommandIngestion::new(&SLOT, clock, &config)?;
    let link = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(20));
        for n in 0..50 {
            interval.tick().await;

            // Sweep the roll back and forth, asking for more lean than the vehicle allows
            let roll = (n as f32 * 0.2).sin() * 0.7;
            let orientation = UnitQuaternion::from_euler_angles(roll, 0.1, 0.).into_inner();
            let target = AttitudeTarget::new(orientation, 0.45, true, 0.2)
                .with_fault_reported(n == 40);

            ingestion.set_targets(&target, Console)?;
        }
        Ok::<_, embedded_offboard::Error>(())
    });

    let mut vehicle = Vehicle::new(
        SimAttitude::default(),
        SimPosition,
        SimMotors {
            spool: DesiredSpoolState::ShutDown,
        },
        SimStatus,
    );
    let mut mode = ComputerMode::new(config, clock, FrameClass::MultiCopter)?;
    mode.init(&SLOT, &vehicle)?;

    let mut interval = tokio::time::interval(Duration::from_micros(2_500));
    let mut last = None;
    for tick in 0..800 {
        interval.tick().await;
        let state = mode.run(&SLOT, &mut vehicle)?;

        if last != Some(state) || tick % 40 == 0 {
            let attitude = &vehicle.attitude;
            println!(
                "{:>4} {:?} roll {:>7.1} pitch {:>7.1} yaw {:?} throttle {:.3} spool {:?}",
                tick,
                state,
                attitude.roll_cd,
                attitude.pitch_cd,
                attitude.yaw,
                attitude.throttle,
                vehicle.motors.spool,
            );
        }
        last = Some(state);
    }
    mode.exit();

    if let Ok(Err(error)) = link.await {
        return Err(error);
    }
    assert_eq!(last, Some(TickState::Stale));

    Ok(())
}
