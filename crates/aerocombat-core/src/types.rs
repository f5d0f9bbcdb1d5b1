//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// A plain 3-vector, used for both NED position and NED velocity.
/// No unit is baked into the type; callers track metres vs. metres/second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn range_to(&self, other: &Vec3) -> f64 {
        (*other - *self).norm()
    }

    pub fn scale(&self, k: f64) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    /// Unit vector along `self`, or `Vec3::ZERO` if the norm is too small to divide by.
    pub fn normalized_or_zero(&self) -> Vec3 {
        let n = self.norm();
        if n < 1e-12 {
            Vec3::ZERO
        } else {
            self.scale(1.0 / n)
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Unit quaternion, scalar-first, rotating body-frame vectors into the
/// navigation frame (body -> nav).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub q0: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { q0: 1.0, q1: 0.0, q2: 0.0, q3: 0.0 };

    pub fn new(q0: f64, q1: f64, q2: f64, q3: f64) -> Self {
        Self { q0, q1, q2, q3 }
    }

    pub fn norm(&self) -> f64 {
        (self.q0 * self.q0 + self.q1 * self.q1 + self.q2 * self.q2 + self.q3 * self.q3).sqrt()
    }

    pub fn scale(&self, k: f64) -> Quaternion {
        Quaternion::new(self.q0 * k, self.q1 * k, self.q2 * k, self.q3 * k)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl std::ops::Add for Quaternion {
    type Output = Quaternion;
    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(self.q0 + rhs.q0, self.q1 + rhs.q1, self.q2 + rhs.q2, self.q3 + rhs.q3)
    }
}

/// The dynamic state of one rigid body: position and velocity in NED, plus
/// body-to-navigation attitude. Corresponds to the first three rows of the
/// source's 4x4 state block; the always-zero fourth row carries no
/// information and is not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// NED position (north, east, down) in metres; down is positive.
    pub position: Vec3,
    /// NED velocity (north, east, down) in m/s.
    pub velocity: Vec3,
    /// Body -> navigation attitude quaternion, unit norm.
    pub attitude: Quaternion,
}

impl BodyState {
    pub fn new(position: Vec3, velocity: Vec3, attitude: Quaternion) -> Self {
        Self { position, velocity, attitude }
    }
}

impl std::ops::Add for BodyState {
    type Output = BodyState;
    fn add(self, rhs: BodyState) -> BodyState {
        BodyState::new(
            self.position + rhs.position,
            self.velocity + rhs.velocity,
            self.attitude + rhs.attitude,
        )
    }
}

impl std::ops::Mul<f64> for BodyState {
    type Output = BodyState;
    fn mul(self, k: f64) -> BodyState {
        BodyState::new(self.position.scale(k), self.velocity.scale(k), self.attitude.scale(k))
    }
}

/// Actuator command: body-axis rates (pre-saturation) plus commanded thrust.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Roll rate, rad/s.
    pub p: f64,
    /// Pitch rate, rad/s.
    pub q: f64,
    /// Yaw rate, rad/s.
    pub r: f64,
    /// Forward-axis thrust acceleration, m/s^2.
    pub thrust: f64,
}

impl ActuatorCommand {
    pub fn new(p: f64, q: f64, r: f64, thrust: f64) -> Self {
        Self { p, q, r, thrust }
    }

    pub const ZERO: ActuatorCommand = ActuatorCommand { p: 0.0, q: 0.0, r: 0.0, thrust: 0.0 };
}

/// Geodetic pose: angles in degrees, altitude in metres, matching the
/// user-facing convention of the rest of the crate (deg/rad mixing happens
/// only at the frame-transform boundary, see `frames`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPose {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
}

/// Origin of a battlefield's local NED navigation frame. Immutable once a
/// scenario starts; handed to entities by value, never by shared ownership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
}

impl ReferencePoint {
    pub fn new(lon_deg: f64, lat_deg: f64, alt_m: f64) -> Self {
        Self { lon_deg, lat_deg, alt_m }
    }
}

/// Simulation clock: elapsed seconds since scenario start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    pub elapsed_secs: f64,
}

impl SimTime {
    pub fn advance(&mut self, dt: f64) {
        self.elapsed_secs += dt;
    }
}
