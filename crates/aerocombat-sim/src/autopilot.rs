//! Aircraft waypoint autopilot ("point-chaser"): a fixed-waypoint sibling of
//! the missile guidance loop, sharing the same cascaded PID machinery.
//!
//! Grounded on `aircraft.cpp`'s `Flight_find_point`: the 10-degree
//! azimuth-error branch, the |roll| > 90 degree levelling-only override, and
//! the roll anti-windup unwind are all taken from there. Not part of the
//! tick-critical core (SPEC_FULL.md S4.5.1) — a host calls this directly to
//! compute the next actuator command for a scripted/AI-flown aircraft, then
//! passes it through the normal `set_command` contract.

use aerocombat_core::constants::*;
use aerocombat_core::frames::quaternion_to_dcm;
use aerocombat_core::types::{ActuatorCommand, BodyState, Vec3};

use crate::pid::PidController;

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Per-aircraft accumulators the point-chaser needs between ticks. Kept as
/// an explicit struct field on the caller's entity, never translation-unit
/// static state (SPEC_FULL.md S9).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointChaserErrorState {
    pub err_azimuth_sum: f64,
    pub err_elevation_sum: f64,
    pub err_azimuth_last: f64,
    pub err_elevation_last: f64,
    pub err_roll_last: f64,
}

/// Compute the next actuator command steering `body` toward the fixed NED
/// waypoint `target_point`, holding thrust at `cruise_thrust`.
pub fn fly_to_point(
    body: &BodyState,
    target_point: Vec3,
    cruise_thrust: f64,
    state: &mut PointChaserErrorState,
) -> ActuatorCommand {
    let r_bn = quaternion_to_dcm(&body.attitude);
    let r_nb = r_bn.transpose();
    let distance = (target_point - body.position).norm();

    let euler = aerocombat_core::frames::quaternion_to_euler(&body.attitude);
    if let Some(warning) = euler.warning {
        tracing::warn!(%warning, "point-chaser euler extraction at singularity");
    }
    let (roll_deg, _pitch_deg, _yaw_deg) = euler.value;

    if distance <= POINT_CHASER_ARRIVAL_RADIUS {
        state.err_azimuth_last = 0.0;
        state.err_elevation_last = 0.0;
        state.err_roll_last = 0.0;
        return ActuatorCommand::new(0.0, 0.0, 0.0, cruise_thrust);
    }

    let vector_to_target = r_nb.mul_vec(target_point - body.position);
    let azimuth_t = vector_to_target.y.atan2(vector_to_target.x);
    let elevation_t = (-vector_to_target.z)
        .atan2((vector_to_target.x.powi(2) + vector_to_target.y.powi(2)).sqrt());

    let velocity_body = r_nb.mul_vec(body.velocity);
    let azimuth_v = velocity_body.y.atan2(velocity_body.x);
    let elevation_v =
        (-velocity_body.z).atan2((velocity_body.x.powi(2) + velocity_body.y.powi(2)).sqrt());

    let err_azimuth = azimuth_t - azimuth_v;
    let err_elevation = elevation_t - elevation_v;
    let err_roll = sign(err_azimuth) * LEVELLING_GAIN * roll_deg.to_radians();

    state.err_azimuth_sum += err_azimuth;
    state.err_elevation_sum += err_elevation;

    let d_roll = if err_azimuth.abs() > POINT_CHASER_AZIMUTH_THRESHOLD {
        if roll_deg.abs() <= 90.0 {
            PidController::roll().output(
                err_azimuth + err_roll,
                state.err_azimuth_sum,
                (err_azimuth - state.err_azimuth_last) + (err_roll - state.err_roll_last),
            )
        } else {
            // Beyond +-90 degrees of roll, chasing azimuth risks flipping
            // the aircraft; fall back to levelling alone.
            PidController::roll().output(err_roll, 0.0, 0.0)
        }
    } else {
        apply_roll_anti_windup(
            PidController::roll().output(err_roll, 0.0, err_roll - state.err_roll_last),
            roll_deg,
        )
    };

    let d_pitch = PidController::pitch().output(
        err_elevation,
        state.err_elevation_sum,
        err_elevation - state.err_elevation_last,
    );
    let d_yaw = PidController::yaw().output(
        err_azimuth,
        state.err_azimuth_sum,
        err_azimuth - state.err_azimuth_last,
    );

    state.err_azimuth_last = err_azimuth;
    state.err_elevation_last = err_elevation;
    state.err_roll_last = err_roll;

    ActuatorCommand::new(d_roll, d_pitch, d_yaw, cruise_thrust)
}

/// Force a constant unwind rate once roll exceeds the anti-windup threshold
/// in either direction (SPEC_FULL.md S4.5 step 4).
pub(crate) fn apply_roll_anti_windup(d_roll: f64, roll_deg: f64) -> f64 {
    if roll_deg >= ROLL_ANTI_WINDUP_THRESHOLD_DEG {
        -ROLL_ANTI_WINDUP_RATE
    } else if roll_deg <= -ROLL_ANTI_WINDUP_THRESHOLD_DEG {
        ROLL_ANTI_WINDUP_RATE
    } else {
        d_roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerocombat_core::types::Quaternion;

    #[test]
    fn arrival_radius_zeroes_rates_and_keeps_thrust() {
        let body = BodyState::new(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO, Quaternion::IDENTITY);
        let mut state = PointChaserErrorState::default();
        let cmd = fly_to_point(&body, Vec3::new(10.0, 0.0, 0.0), 40.0, &mut state);
        assert_eq!(cmd, ActuatorCommand::new(0.0, 0.0, 0.0, 40.0));
    }

    #[test]
    fn far_target_produces_nonzero_roll_or_yaw_command() {
        let body = BodyState::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Quaternion::IDENTITY);
        let mut state = PointChaserErrorState::default();
        let cmd = fly_to_point(&body, Vec3::new(0.0, 5000.0, 0.0), 40.0, &mut state);
        assert!(cmd.r.abs() > 1e-6 || cmd.p.abs() > 1e-6, "expected a turning command, got {cmd:?}");
    }

    #[test]
    fn anti_windup_overrides_roll_near_inversion() {
        assert_eq!(apply_roll_anti_windup(0.5, 175.0), -ROLL_ANTI_WINDUP_RATE);
        assert_eq!(apply_roll_anti_windup(0.5, -175.0), ROLL_ANTI_WINDUP_RATE);
        assert_eq!(apply_roll_anti_windup(0.5, 0.0), 0.5);
    }
}
