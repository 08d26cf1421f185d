mod common;

use common::{flying_vehicle, Alerts, ManualClock};
use embedded_offboard::{
    AttitudeTarget, CommandIngestion, CommandSlot, CommandState, ComputerMode, Config,
    FrameClass, TickState, YawMode,
};
use nalgebra::Quaternion;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

const WRITES: u32 = 20_000;

fn numbered(n: u32) -> CommandState {
    let n_f = n as f32;
    CommandState {
        timestamp_ms: n,
        roll_cmd: n_f,
        pitch_cmd: -n_f,
        yaw_cmd: 2. * n_f,
        yaw_rate_cmd: 3. * n_f,
        thrust_cmd: n_f / WRITES as f32,
        yaw_mode: if n % 2 == 0 {
            YawMode::Angle
        } else {
            YawMode::Rate
        },
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn snapshots_are_never_torn() {
    let slot = Arc::new(CommandSlot::new());
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let slot = slot.clone();
        let done = done.clone();
        tokio::spawn(async move {
            for n in 1..=WRITES {
                slot.publish(numbered(n));
                if n % 256 == 0 {
                    tokio::task::yield_now().await;
                }
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let reader = {
        let slot = slot.clone();
        tokio::spawn(async move {
            let mut last = 0;
            let mut reads = 0u32;
            loop {
                let finished = done.load(Ordering::SeqCst);

                let command = slot.snapshot();
                assert_eq!(command, numbered(command.timestamp_ms));
                assert!(command.timestamp_ms >= last);
                last = command.timestamp_ms;

                reads += 1;
                if reads % 256 == 0 {
                    tokio::task::yield_now().await;
                }
                if finished {
                    break last;
                }
            }
        })
    };

    writer.await.unwrap();
    assert_eq!(reader.await.unwrap(), WRITES);
    assert_eq!(slot.snapshot(), numbered(WRITES));
}

static SLOT: CommandSlot = CommandSlot::new();

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn control_loop_flies_while_targets_stream_in() {
    let clock = ManualClock::at(1_000);
    let config = Config::default();

    let mut mode = ComputerMode::new(config, clock.clone(), FrameClass::MultiCopter).unwrap();
    let (mut vehicle, log) = flying_vehicle();
    mode.init(&SLOT, &vehicle).unwrap();

    let ingestion = CommandIngestion::new(&SLOT, clock.clone(), &config).unwrap();
    let link = tokio::spawn(async move {
        for n in 0..1_000 {
            let thrust = 0.2 + (n % 10) as f32 * 0.05;
            let target = AttitudeTarget::new(Quaternion::identity(), thrust, true, 0.1);
            ingestion.set_targets(&target, Alerts::default()).unwrap();
            tokio::task::yield_now().await;
        }
    });

    for _ in 0..1_000 {
        assert_eq!(mode.run(&SLOT, &mut vehicle).unwrap(), TickState::Active);
        log.borrow_mut().clear();
        tokio::task::yield_now().await;
    }
    link.await.unwrap();

    let command = SLOT.snapshot();
    assert_eq!(command.yaw_mode, YawMode::Rate);
    assert!((0.2..=0.65).contains(&command.thrust_cmd));
}
