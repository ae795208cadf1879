//! Mugic motion demo
//!
//! Drives the library with a synthetic two-device feed in place of real
//! hardware: device 1's orientation is projected as a wireframe cube, both
//! devices drive pong paddles. Deterministic given the fixed seed.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use mugic_motion::{
    Bounds, ControlAxis, DeviceId, MapperConfig, OrientationSample, OrientationTracker,
    PaddleState, Projection, Quaternion, WireframeModel, project, update_paddle,
};

/// Fixed demo timestep (matches the device's ~120 Hz stream rate)
const TICK_DT: f32 = 1.0 / 120.0;
/// Demo length in ticks (5 seconds)
const TICKS: u32 = 600;
/// Print a summary every N ticks
const REPORT_INTERVAL: u32 = 60;

/// Scripted wobble standing in for a real device, plus seeded sensor noise
fn synthetic_orientation(t: f32, phase: f32, rng: &mut Pcg32) -> Quaternion {
    let pitch = 0.4 * (t * 0.9 + phase).sin();
    let roll = 0.7 * (t * 0.6 + phase).sin();
    let yaw = 0.2 * (t * 0.3 + phase).cos();
    let pose = Quaternion::from_euler(pitch, roll, yaw);

    // Small random jitter around the pose, like real sensor noise
    let axis = Vec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
    );
    let jitter = rng.random_range(-0.01..0.01);
    match Quaternion::from_axis_angle(axis, jitter) {
        Ok(noise) => noise * pose,
        Err(_) => pose,
    }
}

fn main() {
    env_logger::init();
    log::info!("Mugic motion demo starting");

    let device_1 = DeviceId(1);
    let device_2 = DeviceId(2);

    let mut tracker = OrientationTracker::new();
    let mut rng = Pcg32::seed_from_u64(0xC0FFEE);

    let cube = WireframeModel::cube(1.0);
    let projection = Projection::perspective(4.0);

    let bounds = Bounds::new(0.0, 600.0);
    let config_1 = MapperConfig::default();
    let config_2 = MapperConfig {
        axis: ControlAxis::Pitch,
        ..MapperConfig::default()
    };
    let mut paddle_1 = PaddleState::centered(bounds);
    let mut paddle_2 = PaddleState::centered(bounds);

    for tick in 0..TICKS {
        let t = tick as f32 * TICK_DT;
        let timestamp = t as f64;

        for (device, phase) in [(device_1, 0.0), (device_2, 1.7)] {
            let quat = synthetic_orientation(t, phase, &mut rng);
            if let Err(e) = tracker.ingest(OrientationSample::new(device, quat, timestamp)) {
                log::warn!("skipping sample: {e}");
            }
        }

        // Re-home device 2 partway through, like a player pressing "zero"
        if tick == 240 {
            if let Err(e) = tracker.set_zero(device_2) {
                log::warn!("calibration failed: {e}");
            }
        }

        match tracker.current_tilt(device_1) {
            Ok(tilt) => paddle_1 = update_paddle(paddle_1, tilt, &config_1, bounds, TICK_DT),
            Err(e) => log::debug!("paddle 1 holding: {e}"),
        }
        match tracker.current_tilt(device_2) {
            Ok(tilt) => paddle_2 = update_paddle(paddle_2, tilt, &config_2, bounds, TICK_DT),
            Err(e) => log::debug!("paddle 2 holding: {e}"),
        }

        if tick % REPORT_INTERVAL == 0 {
            report(&tracker, device_1, &cube, &projection, paddle_1, paddle_2, t);
        }
    }

    // Final snapshot, handy for eyeballing determinism across runs
    let snapshot = serde_json::json!({
        "paddle_1": paddle_1,
        "paddle_2": paddle_2,
        "device_1_tilt": tracker.current_tilt(device_1).ok(),
        "device_2_tilt": tracker.current_tilt(device_2).ok(),
    });
    println!("{snapshot}");

    log::info!("Mugic motion demo finished");
}

fn report(
    tracker: &OrientationTracker,
    device: DeviceId,
    cube: &WireframeModel,
    projection: &Projection,
    paddle_1: PaddleState,
    paddle_2: PaddleState,
    t: f32,
) {
    let Ok(orientation) = tracker.smoothed_orientation(device) else {
        return;
    };
    let euler = orientation.to_euler();
    let frame = project(cube, orientation, projection);
    let corner = frame.points[0];

    println!(
        "t={t:4.2}s  tilt=({:6.1}°, {:6.1}°, {:6.1}°)  cube[0]=({:6.3}, {:6.3})  p1={:5.1}  p2={:5.1}",
        euler.pitch.to_degrees(),
        euler.roll.to_degrees(),
        euler.yaw.to_degrees(),
        corner.x,
        corner.y,
        paddle_1.pos,
        paddle_2.pos,
    );
}
