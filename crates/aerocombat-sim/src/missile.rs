//! Missile entity: lead-point guidance, cascaded PID autopilot, hit/range
//! checks, and advance.
//!
//! Grounded on `UnitDefine.cpp`'s `Missile_Object_C::Run` (lead-point gain,
//! the two-regime far/near-field switch, `HitCheck`'s distance comparison)
//! and `missile.cpp`'s `missile_Flight_find_point` (the guidance loop itself,
//! confirmed to have no 10-degree branch: the azimuth error drives the roll
//! PID directly, never summed with the levelling term the aircraft
//! point-chaser uses).

use aerocombat_core::constants::*;
use aerocombat_core::enums::{AdvanceOutcome, AirframeKind, MissileStatus, Team};
use aerocombat_core::errors::SimError;
use aerocombat_core::frames::{euler_to_quaternion, navigation_to_earth, quaternion_to_dcm, quaternion_to_euler};
use aerocombat_core::types::{ActuatorCommand, BodyState, GeodeticPose, ReferencePoint, Vec3};

use crate::autopilot::apply_roll_anti_windup;
use crate::dynamics::{body_state_is_finite, derivative, rk4};
use crate::pid::PidController;

pub const MISSILE_TYPE_STRING: &str = "Air+Missile";

#[derive(Debug, Clone)]
pub struct Missile {
    pub sim_id: i64,
    pub name: String,
    pub type_string: &'static str,
    pub team: Team,
    pub live: bool,
    pub status: MissileStatus,
    pub pose: GeodeticPose,
    pub body: BodyState,
    pub command: ActuatorCommand,
    /// `sim_id` of the aircraft that launched this missile.
    pub parent_id: i64,
    /// Index into the battlefield's aircraft vector; not a stored position
    /// or velocity, so the target's current state is looked up fresh every
    /// tick instead of tracking a stale copy (SPEC_FULL.md S5).
    pub target_index: usize,
    pub destroy_radius: f64,
    pub max_range: f64,
    pub travel_sum: f64,
    previous_position: Vec3,
    err_azimuth_sum: f64,
    err_elevation_sum: f64,
    err_azimuth_last: f64,
    err_elevation_last: f64,
}

impl Missile {
    #[allow(clippy::too_many_arguments)]
    pub fn launch(
        sim_id: i64,
        name: impl Into<String>,
        team: Team,
        parent_id: i64,
        target_index: usize,
        pose: GeodeticPose,
        ned_velocity: Vec3,
        reference: ReferencePoint,
        destroy_radius: f64,
        max_range: f64,
    ) -> Self {
        let name = name.into();
        let position = aerocombat_core::frames::earth_to_navigation(
            pose.lon_deg,
            pose.lat_deg,
            pose.alt_m,
            reference.lon_deg,
            reference.lat_deg,
            reference.alt_m,
        );
        let attitude = euler_to_quaternion(pose.roll_deg, pose.pitch_deg, pose.yaw_deg);
        Self {
            sim_id,
            name,
            type_string: MISSILE_TYPE_STRING,
            team,
            live: true,
            status: MissileStatus::Flying,
            pose,
            body: BodyState::new(position, ned_velocity, attitude),
            command: ActuatorCommand::ZERO,
            parent_id,
            target_index,
            destroy_radius,
            max_range,
            travel_sum: 0.0,
            previous_position: position,
            err_azimuth_sum: 0.0,
            err_elevation_sum: 0.0,
            err_azimuth_last: 0.0,
            err_elevation_last: 0.0,
        }
    }

    /// The lead point this missile is currently steering toward, given the
    /// target's present NED position and velocity.
    ///
    /// Beyond `TERMINAL_HOMING_RANGE_FACTOR * destroy_radius` the gain is the
    /// far-field pure-pursuit-like estimate; inside it, the near-field
    /// terminal-homing gain with the unexplained constant 195 (preserved
    /// verbatim, see SPEC_FULL.md S9) takes over.
    fn lead_point(&self, target_position: Vec3, target_velocity: Vec3) -> Vec3 {
        let distance = self.body.position.range_to(&target_position);
        let gain = if distance > TERMINAL_HOMING_RANGE_FACTOR * self.destroy_radius {
            target_velocity.norm() / (LEAD_POINT_FAR_FIELD_SCALE * distance)
        } else {
            MISSILE_TERMINAL_GAIN * target_velocity.norm() / self.body.velocity.norm().max(1e-6)
        };
        target_position + target_velocity.normalized_or_zero().scale(gain)
    }

    /// Run one step of the three-axis cascaded PID guidance loop and return
    /// the resulting actuator command. Updates the PID accumulators.
    fn guide(&mut self, target_position: Vec3, target_velocity: Vec3) -> ActuatorCommand {
        let target_point = self.lead_point(target_position, target_velocity);

        let r_bn = quaternion_to_dcm(&self.body.attitude);
        let r_nb = r_bn.transpose();

        let vector_to_target = r_nb.mul_vec(target_point - self.body.position);
        let azimuth_t = vector_to_target.y.atan2(vector_to_target.x);
        let elevation_t = (-vector_to_target.z)
            .atan2((vector_to_target.x.powi(2) + vector_to_target.y.powi(2)).sqrt());

        let velocity_body = r_nb.mul_vec(self.body.velocity);
        let azimuth_v = velocity_body.y.atan2(velocity_body.x);
        let elevation_v = (-velocity_body.z)
            .atan2((velocity_body.x.powi(2) + velocity_body.y.powi(2)).sqrt());

        let err_azimuth = azimuth_t - azimuth_v;
        let err_elevation = elevation_t - elevation_v;

        self.err_azimuth_sum += err_azimuth;
        self.err_elevation_sum += err_elevation;

        let euler = quaternion_to_euler(&self.body.attitude);
        if let Some(warning) = euler.warning {
            tracing::warn!(sim_id = self.sim_id, %warning, "missile euler extraction at singularity");
        }
        let (roll_deg, _pitch_deg, _yaw_deg) = euler.value;

        // No ten-degree branch here: unlike the aircraft point-chaser, the
        // azimuth error drives roll directly, unconditionally.
        let d_roll = PidController::roll().output(
            err_azimuth,
            self.err_azimuth_sum,
            err_azimuth - self.err_azimuth_last,
        );
        let d_roll = apply_roll_anti_windup(d_roll, roll_deg);
        let d_pitch = PidController::pitch().output(
            err_elevation,
            self.err_elevation_sum,
            err_elevation - self.err_elevation_last,
        );
        let d_yaw = PidController::yaw().output(
            err_azimuth,
            self.err_azimuth_sum,
            err_azimuth - self.err_azimuth_last,
        );

        self.err_azimuth_last = err_azimuth;
        self.err_elevation_last = err_elevation;

        ActuatorCommand::new(d_roll, d_pitch, d_yaw, MISSILE_CRUISE_THRUST)
    }

    /// Advance this missile by `dt` seconds, guiding toward `target_position`
    /// / `target_velocity` (the current state of whatever entity
    /// `target_index` resolves to). A no-op once the missile is no longer
    /// live or has reached a terminal status.
    ///
    /// Order matches `UnitDefine.cpp`'s `Run`: range and hit check happen
    /// first, against the position the missile is already at, before any
    /// guidance or integration runs this tick; only a miss falls through to
    /// lead-point computation and the RK4 advance.
    pub fn advance(
        &mut self,
        dt: f64,
        target_position: Vec3,
        target_velocity: Vec3,
        reference: ReferencePoint,
    ) -> Result<AdvanceOutcome, SimError> {
        if !self.live || self.status.is_terminal() {
            return Ok(AdvanceOutcome::NotLive);
        }

        // Correct distance formula: target minus missile, not a copy-pasted
        // target-minus-target (SPEC_FULL.md S9).
        let distance_to_target = self.body.position.range_to(&target_position);
        if distance_to_target <= self.destroy_radius {
            self.status = MissileStatus::Hit;
            self.live = false;
            return Ok(AdvanceOutcome::Advanced);
        }

        self.travel_sum += self.previous_position.range_to(&self.body.position);
        self.previous_position = self.body.position;
        if self.travel_sum >= self.max_range {
            self.status = MissileStatus::OutOfRange;
            self.live = false;
            return Ok(AdvanceOutcome::Advanced);
        }

        self.command = self.guide(target_position, target_velocity);
        let omega = Vec3::new(self.command.p, self.command.q, self.command.r);

        let next = rk4(&self.body, dt, |s| {
            derivative(s, self.command, omega, AirframeKind::Missile)
        });

        if !body_state_is_finite(&next) {
            self.live = false;
            return Err(SimError::NanInput { sim_id: self.sim_id });
        }

        self.body = next;
        self.project_to_geodetic(reference);
        Ok(AdvanceOutcome::Advanced)
    }

    fn project_to_geodetic(&mut self, reference: ReferencePoint) {
        let geo = navigation_to_earth(
            self.body.position,
            reference.lon_deg,
            reference.lat_deg,
            reference.alt_m,
        );
        if let Some(warning) = geo.warning {
            tracing::warn!(sim_id = self.sim_id, %warning, "geodetic projection degraded");
        }
        let (lon_deg, lat_deg, alt_m) = geo.value;

        let euler = quaternion_to_euler(&self.body.attitude);
        if let Some(warning) = euler.warning {
            tracing::warn!(sim_id = self.sim_id, %warning, "euler extraction at singularity");
        }
        let (roll_deg, pitch_deg, yaw_deg) = euler.value;

        self.pose = GeodeticPose { lon_deg, lat_deg, alt_m, roll_deg, pitch_deg, yaw_deg };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerocombat_core::types::Quaternion;

    fn reference() -> ReferencePoint {
        ReferencePoint::new(126.0, 30.0, 1000.0)
    }

    fn launched() -> Missile {
        Missile::launch(
            MISSILE_ID_BASE,
            "AIM-120",
            Team::Blue,
            1,
            0,
            GeodeticPose { lon_deg: 126.0, lat_deg: 30.0, alt_m: 5_000.0, ..Default::default() },
            Vec3::new(300.0, 0.0, 0.0),
            reference(),
            DEFAULT_DESTROY_RADIUS,
            DEFAULT_MAX_RANGE,
        )
    }

    #[test]
    fn terminal_gain_is_used_inside_homing_range() {
        let m = launched();
        let close_target = m.body.position + Vec3::new(1.0, 0.0, 0.0);
        let far_target = m.body.position + Vec3::new(10_000.0, 0.0, 0.0);
        let target_velocity = Vec3::new(250.0, 0.0, 0.0);

        let close_lead = m.lead_point(close_target, target_velocity);
        let far_lead = m.lead_point(far_target, target_velocity);

        // Near-field gain (195x) dwarfs the far-field gain for comparable
        // target speeds, so the near lead point should be displaced much
        // further from the target than the far one, relative to distance.
        let close_offset = (close_lead - close_target).norm();
        let far_offset = (far_lead - far_target).norm();
        assert!(close_offset > far_offset);
    }

    #[test]
    fn hit_check_uses_target_minus_missile_distance() {
        let mut m = launched();
        let target_position = m.body.position + Vec3::new(10.0, 0.0, 0.0);
        let outcome = m
            .advance(0.01, target_position, Vec3::ZERO, reference())
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::Advanced);
        assert_eq!(m.status, MissileStatus::Hit);
        assert!(!m.live);
    }

    #[test]
    fn out_of_range_when_travel_budget_exhausted() {
        let mut m = launched();
        m.max_range = 50.0;
        let far_target = m.body.position + Vec3::new(50_000.0, 0.0, 0.0);
        for _ in 0..50 {
            if m.status.is_terminal() {
                break;
            }
            m.advance(0.1, far_target, Vec3::ZERO, reference()).unwrap();
        }
        assert_eq!(m.status, MissileStatus::OutOfRange);
    }

    #[test]
    fn terminal_missile_advance_is_a_no_op() {
        let mut m = launched();
        m.status = MissileStatus::Hit;
        m.live = false;
        let before = m.body;
        let outcome = m
            .advance(0.1, Vec3::ZERO, Vec3::ZERO, reference())
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::NotLive);
        assert_eq!(m.body, before);
    }

    #[test]
    fn type_string_is_air_missile() {
        let m = launched();
        assert_eq!(m.type_string, "Air+Missile");
    }

    #[test]
    fn launch_quaternion_matches_euler_to_quaternion() {
        let m = launched();
        assert_eq!(m.body.attitude, Quaternion::IDENTITY);
    }
}
