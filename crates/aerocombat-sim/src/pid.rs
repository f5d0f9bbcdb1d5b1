//! Fixed-gain PID controller, the shared machinery behind the missile
//! guidance loop (`missile.rs`) and the aircraft waypoint autopilot
//! (`autopilot.rs`).
//!
//! Grounded on the source's `PID_Roll`/`PID_Pitch`/`PID_Yaw`: three
//! independent fixed-gain controllers, each fed an externally-accumulated
//! integral and an externally-differenced derivative rather than owning
//! their own history. `PidController` keeps that same shape — the caller
//! (the guidance step) is responsible for updating the accumulator and the
//! last-error value each tick, since those are per-missile/per-aircraft
//! state, not per-controller state.

use aerocombat_core::constants::{PID_PITCH_GAINS, PID_ROLL_GAINS, PID_YAW_GAINS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidController {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidController {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    pub fn roll() -> Self {
        let (kp, ki, kd) = PID_ROLL_GAINS;
        Self::new(kp, ki, kd)
    }

    pub fn pitch() -> Self {
        let (kp, ki, kd) = PID_PITCH_GAINS;
        Self::new(kp, ki, kd)
    }

    pub fn yaw() -> Self {
        let (kp, ki, kd) = PID_YAW_GAINS;
        Self::new(kp, ki, kd)
    }

    /// `error` is the current setpoint error, `integral` the accumulated
    /// error including this tick, `derivative` the error delta since the
    /// previous tick.
    pub fn output(&self, error: f64, integral: f64, derivative: f64) -> f64 {
        self.kp * error + self.ki * integral + self.kd * derivative
    }
}
