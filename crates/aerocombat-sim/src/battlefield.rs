//! Tick orchestration: a plain-ownership battlefield holding bounded vectors
//! of aircraft and missiles, advanced one fixed step at a time.
//!
//! Grounded on the source's `CombatSimulation_C::Run` (iterate all aircraft,
//! then all missiles, advance the clock) but replaces its fixed-size static
//! arrays and virtual-dispatch unit list with plain `Vec`s and typed structs;
//! there is no entity-component framework here (SPEC_FULL.md S5).

use aerocombat_core::constants::{DEFAULT_DESTROY_RADIUS, DEFAULT_MAX_RANGE, MAX_AIRCRAFT, MAX_MISSILES, MISSILE_ID_BASE};
use aerocombat_core::enums::{MissileStatus, Team};
use aerocombat_core::errors::SimError;
use aerocombat_core::state::{AircraftView, MissileView, Observation};
use aerocombat_core::types::{ActuatorCommand, GeodeticPose, ReferencePoint, SimTime, Vec3};

use crate::aircraft::Aircraft;
use crate::missile::Missile;

#[derive(Debug, Clone)]
pub struct Battlefield {
    pub reference: ReferencePoint,
    pub clock: SimTime,
    aircraft: Vec<Aircraft>,
    missiles: Vec<Missile>,
    next_missile_ordinal: i64,
}

impl Battlefield {
    pub fn new_battlefield(reference: ReferencePoint) -> Self {
        Self {
            reference,
            clock: SimTime::default(),
            aircraft: Vec::with_capacity(MAX_AIRCRAFT),
            missiles: Vec::with_capacity(MAX_MISSILES),
            next_missile_ordinal: 0,
        }
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn spawn_aircraft(
        &mut self,
        sim_id: i64,
        name: impl Into<String>,
        team: Team,
        pose: GeodeticPose,
        ned_velocity: Vec3,
    ) -> Result<(), SimError> {
        if self.aircraft.len() >= MAX_AIRCRAFT {
            return Err(SimError::Capacity { capacity: MAX_AIRCRAFT });
        }
        if self.aircraft.iter().any(|a| a.sim_id == sim_id) {
            return Err(SimError::DuplicateId { sim_id });
        }
        self.aircraft.push(Aircraft::new(sim_id, name, team, pose, ned_velocity, self.reference));
        Ok(())
    }

    /// Launch a missile from `parent_id`, homing on the aircraft currently at
    /// `target_index`. `target_index` is resolved fresh every tick, never
    /// cached as a position (SPEC_FULL.md S5). Returns the assigned sim_id.
    #[allow(clippy::too_many_arguments)]
    pub fn launch_missile(
        &mut self,
        name: impl Into<String>,
        team: Team,
        parent_id: i64,
        target_index: usize,
        pose: GeodeticPose,
        ned_velocity: Vec3,
        destroy_radius: Option<f64>,
        max_range: Option<f64>,
    ) -> Result<i64, SimError> {
        if self.missiles.len() >= MAX_MISSILES {
            return Err(SimError::Capacity { capacity: MAX_MISSILES });
        }
        let sim_id = MISSILE_ID_BASE + self.next_missile_ordinal;
        self.next_missile_ordinal += 1;

        self.missiles.push(Missile::launch(
            sim_id,
            name,
            team,
            parent_id,
            target_index,
            pose,
            ned_velocity,
            self.reference,
            destroy_radius.unwrap_or(DEFAULT_DESTROY_RADIUS),
            max_range.unwrap_or(DEFAULT_MAX_RANGE),
        ));
        Ok(sim_id)
    }

    /// Overwrite the actuator command an aircraft will fly next tick. A
    /// no-op if `sim_id` does not name a live aircraft (consistent with this
    /// crate's general not-found-is-a-no-op stance, see `AdvanceOutcome`).
    pub fn set_command(&mut self, sim_id: i64, cmd: ActuatorCommand) {
        if let Some(a) = self.aircraft.iter_mut().find(|a| a.sim_id == sim_id) {
            a.command = cmd;
        }
    }

    /// Advance every live aircraft, then every still-flying missile, by `dt`
    /// seconds, then advance the clock. Aircraft always advance first so
    /// that missiles guide on this tick's fresh target positions rather than
    /// last tick's. A missile that scores a hit this tick kills its target
    /// in the same tick (SPEC_FULL.md S4.5 step 2).
    pub fn tick(&mut self, dt: f64) -> Result<(), SimError> {
        for aircraft in self.aircraft.iter_mut() {
            aircraft.advance(dt, self.reference)?;
        }

        let mut newly_hit_targets = Vec::new();
        {
            let aircraft = &self.aircraft;
            for missile in self.missiles.iter_mut() {
                if !missile.live || missile.status.is_terminal() {
                    continue;
                }
                match aircraft.get(missile.target_index).filter(|a| a.live) {
                    Some(target) => {
                        missile.advance(dt, target.body.position, target.body.velocity, self.reference)?;
                        if missile.status == MissileStatus::Hit {
                            newly_hit_targets.push(missile.target_index);
                        }
                    }
                    None => {
                        missile.status = MissileStatus::OutOfRange;
                        missile.live = false;
                    }
                }
            }
        }
        for idx in newly_hit_targets {
            if let Some(a) = self.aircraft.get_mut(idx) {
                a.live = false;
            }
        }

        self.clock.advance(dt);
        Ok(())
    }

    pub fn snapshot(&self) -> Observation {
        let aircraft = self
            .aircraft
            .iter()
            .map(|a| AircraftView {
                sim_id: a.sim_id,
                live: a.live,
                name: a.name.clone(),
                team: a.team,
                lon_deg: a.pose.lon_deg,
                lat_deg: a.pose.lat_deg,
                alt_m: a.pose.alt_m,
                roll_deg: a.pose.roll_deg,
                pitch_deg: a.pose.pitch_deg,
                yaw_deg: a.pose.yaw_deg,
            })
            .collect();

        let missiles = self
            .missiles
            .iter()
            .map(|m| MissileView {
                sim_id: m.sim_id,
                live: m.live,
                name: m.name.clone(),
                team: m.team,
                lon_deg: m.pose.lon_deg,
                lat_deg: m.pose.lat_deg,
                alt_m: m.pose.alt_m,
                roll_deg: m.pose.roll_deg,
                pitch_deg: m.pose.pitch_deg,
                yaw_deg: m.pose.yaw_deg,
                parent_id: m.parent_id,
                target_id: self.aircraft.get(m.target_index).map(|a| a.sim_id).unwrap_or(-1),
                status: m.status,
            })
            .collect();

        Observation { elapsed_secs: self.clock.elapsed_secs, aircraft, missiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferencePoint {
        ReferencePoint::new(126.0, 30.0, 0.0)
    }

    fn pose_at(lon_deg: f64, lat_deg: f64, alt_m: f64) -> GeodeticPose {
        GeodeticPose { lon_deg, lat_deg, alt_m, ..Default::default() }
    }

    #[test]
    fn spawn_aircraft_rejects_duplicate_ids() {
        let mut b = Battlefield::new_battlefield(reference());
        b.spawn_aircraft(1, "bandit", Team::Red, pose_at(126.0, 30.0, 5_000.0), Vec3::ZERO).unwrap();
        let err = b
            .spawn_aircraft(1, "bandit-2", Team::Red, pose_at(126.0, 30.0, 5_000.0), Vec3::ZERO)
            .unwrap_err();
        assert_eq!(err, SimError::DuplicateId { sim_id: 1 });
    }

    #[test]
    fn spawn_aircraft_enforces_capacity() {
        let mut b = Battlefield::new_battlefield(reference());
        for i in 0..MAX_AIRCRAFT as i64 {
            b.spawn_aircraft(i, format!("a{i}"), Team::Blue, pose_at(126.0, 30.0, 1_000.0), Vec3::ZERO)
                .unwrap();
        }
        let err = b
            .spawn_aircraft(999, "overflow", Team::Blue, pose_at(126.0, 30.0, 1_000.0), Vec3::ZERO)
            .unwrap_err();
        assert_eq!(err, SimError::Capacity { capacity: MAX_AIRCRAFT });
    }

    #[test]
    fn missile_loses_target_goes_out_of_range_when_target_vanishes() {
        let mut b = Battlefield::new_battlefield(reference());
        b.launch_missile(
            "fox3",
            Team::Blue,
            2,
            0, // no aircraft ever spawned at index 0
            pose_at(126.0, 30.0, 5_000.0),
            Vec3::new(300.0, 0.0, 0.0),
            None,
            None,
        )
        .unwrap();
        b.tick(0.1).unwrap();
        assert_eq!(b.missiles()[0].status, MissileStatus::OutOfRange);
        assert!(!b.missiles()[0].live);
    }

    #[test]
    fn set_command_on_unknown_id_is_a_no_op() {
        let mut b = Battlefield::new_battlefield(reference());
        b.spawn_aircraft(1, "f16", Team::Blue, pose_at(126.0, 30.0, 5_000.0), Vec3::ZERO).unwrap();
        b.set_command(999, ActuatorCommand::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(b.aircraft()[0].command, ActuatorCommand::ZERO);
    }

    #[test]
    fn snapshot_reports_elapsed_time_and_entity_counts() {
        let mut b = Battlefield::new_battlefield(reference());
        b.spawn_aircraft(1, "f16", Team::Blue, pose_at(126.0, 30.0, 5_000.0), Vec3::ZERO).unwrap();
        b.tick(0.5).unwrap();
        let snap = b.snapshot();
        assert_eq!(snap.elapsed_secs, 0.5);
        assert_eq!(snap.aircraft.len(), 1);
        assert_eq!(snap.missiles.len(), 0);
    }

}
