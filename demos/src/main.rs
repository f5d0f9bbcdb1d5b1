//! Scripted two-entity engagement: a scenario runner over `Battlefield`,
//! useful as a worked example and a manual sanity check of the guidance
//! loop. Not part of the simulation core itself (SPEC_FULL.md S6.1).

use aerocombat_core::enums::Team;
use aerocombat_core::types::{GeodeticPose, ReferencePoint, Vec3};
use aerocombat_sim::Battlefield;

const TICK_SECS: f64 = 0.02;
const MAX_TICKS: u32 = 5_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let reference = ReferencePoint::new(126.0, 30.0, 0.0);
    let mut battlefield = Battlefield::new_battlefield(reference);

    battlefield
        .spawn_aircraft(
            1,
            "bandit",
            Team::Red,
            GeodeticPose { lon_deg: 126.3, lat_deg: 30.1, alt_m: 8_000.0, yaw_deg: 180.0, ..Default::default() },
            Vec3::new(-220.0, 0.0, 0.0),
        )
        .expect("spawning the target aircraft should not fail in a fresh battlefield");

    battlefield
        .launch_missile(
            "fox-3",
            Team::Blue,
            /* parent_id */ 0,
            /* target_index */ 0,
            GeodeticPose { lon_deg: 126.0, lat_deg: 30.0, alt_m: 8_000.0, ..Default::default() },
            Vec3::new(400.0, 0.0, 0.0),
            None,
            None,
        )
        .expect("launching a missile into a fresh battlefield should not fail");

    for tick in 0..MAX_TICKS {
        if let Err(error) = battlefield.tick(TICK_SECS) {
            tracing::error!(%error, tick, "battlefield tick failed");
            break;
        }

        if tick % 50 == 0 {
            let snapshot = battlefield.snapshot();
            tracing::info!(
                elapsed_secs = snapshot.elapsed_secs,
                aircraft = snapshot.aircraft.len(),
                missiles = snapshot.missiles.len(),
                "tick"
            );
        }

        if battlefield.missiles().iter().all(|m| m.status.is_terminal()) {
            break;
        }
    }

    let snapshot = battlefield.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot).expect("Observation always serializes"));
}
