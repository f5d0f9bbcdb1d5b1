//! Rigid-body state derivative and the RK4 integrator.
//!
//! Grounded on the source's `__f`/`runge4` (aircraft) and `__missile_f`/
//! `__missile_runge4` (missile): identical structure, differing only in the
//! axial drag coefficient and the presence of the lift term.

use aerocombat_core::constants::*;
use aerocombat_core::enums::AirframeKind;
use aerocombat_core::frames::{normalize_quaternion, quaternion_to_dcm};
use aerocombat_core::types::{ActuatorCommand, BodyState, Vec3};

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// State derivative dS/dt for one rigid body.
///
/// `omega` is the already-saturated body-axis angular rate commanded this
/// step; `cmd.thrust` is the commanded forward-axis thrust.
pub fn derivative(state: &BodyState, cmd: ActuatorCommand, omega: Vec3, kind: AirframeKind) -> BodyState {
    let d_position = state.velocity;

    let r_bn = quaternion_to_dcm(&state.attitude);
    let r_nb = r_bn.transpose();
    let v_body = r_nb.mul_vec(state.velocity);
    let (u, v, w) = (v_body.x, v_body.y, v_body.z);

    let k_ax = match kind {
        AirframeKind::Aircraft => DRAG_AXIAL_AIRCRAFT,
        AirframeKind::Missile => DRAG_AXIAL_MISSILE,
    };
    let ax = -sign(u) * k_ax * u.powi(4);
    let ay = -sign(v) * DRAG_LATERAL * v.powi(4);
    let az = -sign(w) * DRAG_VERTICAL * w.powi(4);

    // zn = state.position.z is NED-down; zn > 0 means below the reference
    // altitude. The guard below activates only there, which *amplifies*
    // lift rather than attenuating it -- preserved verbatim, see
    // SPEC_FULL.md S9.
    let a_lift = match kind {
        AirframeKind::Aircraft => {
            let mut lift = -sign(u) * LIFT_COEFFICIENT * u * u;
            if state.position.z > 0.0 {
                lift *= (state.position.z / LIFT_ALTITUDE_SCALE).exp();
            }
            lift
        }
        AirframeKind::Missile => 0.0,
    };

    let thrust = if state.position.z < THRUST_CUTOFF_DOWN_M { 0.0 } else { cmd.thrust };

    let a_body = match kind {
        AirframeKind::Aircraft => Vec3::new(thrust + ax, ay, a_lift + az),
        AirframeKind::Missile => Vec3::new(thrust + ax, ay, az),
    };

    let mut a_nav = r_bn.mul_vec(a_body);
    a_nav.z += SIMPLE_GRAVITY;

    let mut d_velocity = a_nav;
    clamp_terminal_velocity(&mut d_velocity.x, state.velocity.x);
    clamp_terminal_velocity(&mut d_velocity.y, state.velocity.y);
    clamp_terminal_velocity(&mut d_velocity.z, state.velocity.z);

    let d_attitude =
        aerocombat_core::frames::angular_velocity_to_quaternion_derivative(omega, &state.attitude);

    BodyState::new(d_position, d_velocity, d_attitude)
}

/// If the axis speed already exceeds the terminal-velocity threshold and the
/// derivative would reverse its sign, clamp the derivative to exactly cancel
/// the current velocity instead (SPEC_FULL.md S4.2 step 6).
fn clamp_terminal_velocity(d_v: &mut f64, v: f64) {
    if v.abs() > TERMINAL_VELOCITY_CLAMP_THRESHOLD && d_v.abs() > v.abs() && *d_v * v < 0.0 {
        *d_v = -v;
    }
}

/// True if every scalar in `state` is finite (not NaN or infinite).
pub fn body_state_is_finite(state: &BodyState) -> bool {
    let p = state.position;
    let v = state.velocity;
    let q = state.attitude;
    [p.x, p.y, p.z, v.x, v.y, v.z, q.q0, q.q1, q.q2, q.q3]
        .iter()
        .all(|x| x.is_finite())
}

/// Classical fourth-order Runge-Kutta advance of `state` by `dt`, using the
/// derivative closure `f`. Renormalizes the resulting quaternion.
pub fn rk4(state: &BodyState, dt: f64, f: impl Fn(&BodyState) -> BodyState) -> BodyState {
    let k1 = f(state);
    let k2 = f(&(*state + k1 * (0.5 * dt)));
    let k3 = f(&(*state + k2 * (0.5 * dt)));
    let k4 = f(&(*state + k3 * dt));

    let sum = k1 + k2 * 2.0 + k3 * 2.0 + k4;
    let mut next = *state + sum * (dt / 6.0);
    next.attitude = normalize_quaternion(next.attitude);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerocombat_core::types::Quaternion;

    fn level_state(alt_down_m: f64, forward_speed: f64) -> BodyState {
        BodyState::new(
            Vec3::new(0.0, 0.0, alt_down_m),
            Vec3::new(forward_speed, 0.0, 0.0),
            Quaternion::IDENTITY,
        )
    }

    #[test]
    fn quaternion_stays_unit_norm_after_one_rk4_step() {
        let state = level_state(-20_000.0, 200.0);
        let next = rk4(&state, 0.1, |s| {
            derivative(s, ActuatorCommand::ZERO, Vec3::new(0.01, -0.01, 0.0), AirframeKind::Aircraft)
        });
        assert!((next.attitude.norm() - 1.0).abs() < 1e-9, "norm={}", next.attitude.norm());
    }

    #[test]
    fn s2_stationary_body_loses_altitude_under_gravity() {
        // Spawn at rest; ten ticks of 0.1s should lose ~0.5*g*1^2 = 4.9m.
        let mut state =
            BodyState::new(Vec3::new(0.0, 0.0, -20_000.0), Vec3::ZERO, Quaternion::IDENTITY);
        for _ in 0..10 {
            state = rk4(&state, 0.1, |s| {
                derivative(s, ActuatorCommand::ZERO, Vec3::ZERO, AirframeKind::Aircraft)
            });
        }
        let delta_alt = -(state.position.z - (-20_000.0));
        assert!((delta_alt - (-4.9)).abs() < 0.2, "delta_alt={delta_alt}");
    }

    #[test]
    fn terminal_velocity_clamp_prevents_sign_reversal() {
        let mut d_v = -400.0;
        clamp_terminal_velocity(&mut d_v, 350.0);
        assert_eq!(d_v, -350.0);

        let mut d_v_small = -5.0;
        clamp_terminal_velocity(&mut d_v_small, 350.0);
        assert_eq!(d_v_small, -5.0, "below threshold magnitude, no clamp expected");
    }

    #[test]
    fn missile_derivative_has_no_lift_term() {
        let state = level_state(-1000.0, 300.0);
        let aircraft_d =
            derivative(&state, ActuatorCommand::new(0.0, 0.0, 0.0, 0.0), Vec3::ZERO, AirframeKind::Aircraft);
        let missile_d =
            derivative(&state, ActuatorCommand::new(0.0, 0.0, 0.0, 0.0), Vec3::ZERO, AirframeKind::Missile);
        // The aircraft picks up a lift contribution on the down axis that the
        // missile (no lift) does not.
        assert!((aircraft_d.velocity.z - missile_d.velocity.z).abs() > 1e-9);
    }

    #[test]
    fn thrust_cuts_off_above_33km() {
        let high_state = level_state(-33_001.0, 200.0);
        let low_state = level_state(-32_000.0, 200.0);
        let cmd = ActuatorCommand::new(0.0, 0.0, 0.0, 50.0);
        let d_high = derivative(&high_state, cmd, Vec3::ZERO, AirframeKind::Aircraft);
        let d_low = derivative(&low_state, cmd, Vec3::ZERO, AirframeKind::Aircraft);
        assert!(d_high.velocity.x < d_low.velocity.x, "thrust should be cut above 33km");
    }
}
