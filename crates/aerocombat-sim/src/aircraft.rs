//! Aircraft entity and advance.
//!
//! Grounded on `Aircraft_Object_C::Init`/`Run` (geodetic pose in, BodyState
//! out, projected back to geodetic) and `aircraft.cpp`'s `Flight` (actuator
//! saturation wrapping the RK4 advance).

use aerocombat_core::enums::{AdvanceOutcome, AirframeKind, Team};
use aerocombat_core::errors::SimError;
use aerocombat_core::frames::{euler_to_quaternion, navigation_to_earth, quaternion_to_euler};
use aerocombat_core::constants;
use aerocombat_core::types::{ActuatorCommand, BodyState, GeodeticPose, ReferencePoint, Vec3};

use crate::dynamics::{body_state_is_finite, derivative, rk4};

pub const AIRCRAFT_TYPE_STRING: &str = "Air+FixedWing";

#[derive(Debug, Clone)]
pub struct Aircraft {
    pub sim_id: i64,
    pub name: String,
    pub type_string: &'static str,
    pub team: Team,
    pub live: bool,
    pub pose: GeodeticPose,
    pub body: BodyState,
    pub command: ActuatorCommand,
}

impl Aircraft {
    pub fn new(
        sim_id: i64,
        name: impl Into<String>,
        team: Team,
        pose: GeodeticPose,
        ned_velocity: Vec3,
        reference: ReferencePoint,
    ) -> Self {
        let name = truncate_to_max_len(name.into());
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
            type_string: AIRCRAFT_TYPE_STRING,
            team,
            live: true,
            pose,
            body: BodyState::new(position, ned_velocity, attitude),
            command: ActuatorCommand::ZERO,
        }
    }

    /// Saturate the roll/pitch/yaw rates of `cmd` per SPEC_FULL.md S4.4.
    pub fn saturate_command(cmd: ActuatorCommand) -> ActuatorCommand {
        ActuatorCommand::new(
            cmd.p.clamp(-constants::RATE_LIMIT_ROLL_PITCH, constants::RATE_LIMIT_ROLL_PITCH),
            cmd.q.clamp(-constants::RATE_LIMIT_ROLL_PITCH, constants::RATE_LIMIT_ROLL_PITCH),
            cmd.r.clamp(-constants::RATE_LIMIT_YAW, constants::RATE_LIMIT_YAW),
            cmd.thrust,
        )
    }

    /// Advance this aircraft by `dt` seconds using its current actuator
    /// command. A no-op (`AdvanceOutcome::NotLive`) if `live` is false.
    pub fn advance(
        &mut self,
        dt: f64,
        reference: ReferencePoint,
    ) -> Result<AdvanceOutcome, SimError> {
        if !self.live {
            return Ok(AdvanceOutcome::NotLive);
        }

        let saturated = Self::saturate_command(self.command);
        let omega = Vec3::new(saturated.p, saturated.q, saturated.r);

        let next = rk4(&self.body, dt, |s| {
            derivative(s, saturated, omega, AirframeKind::Aircraft)
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

fn truncate_to_max_len(s: String) -> String {
    if s.len() <= constants::MAX_STRING_LEN {
        s
    } else {
        s.chars().take(constants::MAX_STRING_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferencePoint {
        ReferencePoint::new(126.0, 30.0, 1000.0)
    }

    fn spawn(pose: GeodeticPose, vel: Vec3) -> Aircraft {
        Aircraft::new(1, "F-16", Team::Blue, pose, vel, reference())
    }

    #[test]
    fn not_live_advance_is_a_no_op() {
        let mut a = spawn(
            GeodeticPose { lon_deg: 127.0, lat_deg: 30.0, alt_m: 20_000.0, ..Default::default() },
            Vec3::ZERO,
        );
        a.live = false;
        let before = a.body;
        let outcome = a.advance(0.1, reference()).unwrap();
        assert_eq!(outcome, AdvanceOutcome::NotLive);
        assert_eq!(a.body, before);
    }

    #[test]
    fn saturation_clamps_match_spec_property_8() {
        let extreme = ActuatorCommand::new(10.0, 10.0, 10.0, 0.0);
        let saturated = Aircraft::saturate_command(extreme);
        let clamp_limit = ActuatorCommand::new(
            std::f64::consts::FRAC_PI_2,
            std::f64::consts::FRAC_PI_2,
            std::f64::consts::PI / 12.0,
            0.0,
        );
        assert_eq!(saturated, clamp_limit);
    }

    #[test]
    fn s2_stationary_aircraft_loses_altitude_under_gravity() {
        let mut a = spawn(
            GeodeticPose {
                lon_deg: 127.0,
                lat_deg: 30.0,
                alt_m: 20_000.0,
                roll_deg: 0.0,
                pitch_deg: 0.0,
                yaw_deg: 0.0,
            },
            Vec3::ZERO,
        );
        a.command = ActuatorCommand::ZERO;
        let start_alt = a.pose.alt_m;
        for _ in 0..10 {
            a.advance(0.1, reference()).unwrap();
        }
        let delta = a.pose.alt_m - start_alt;
        assert!((delta - (-4.9)).abs() < 0.2, "delta={delta}");
    }

    #[test]
    fn type_string_is_air_fixed_wing() {
        let a = spawn(GeodeticPose::default(), Vec3::ZERO);
        assert_eq!(a.type_string, "Air+FixedWing");
    }
}
