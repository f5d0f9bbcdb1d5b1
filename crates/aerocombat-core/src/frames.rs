//! Geodetic / ECEF / NED frame transforms and Euler / DCM / quaternion
//! conversions.
//!
//! Grounded on the WGS-84 coordinate layer of the source repo's tools module:
//! the curvature-radius formula, the fixed-point ECEF->geodetic iteration,
//! the up-east-north-then-permute construction of the ECEF->NED rotation,
//! and the Shepperd DCM->quaternion algorithm are all taken from there.
//!
//! Convention: `R_nb` rotates a vector from the navigation frame into the
//! body frame; `R_bn = R_nb^T` is its inverse and is also the matrix whose
//! action matches the attitude quaternion (body -> nav). Euler extraction and
//! the Shepperd algorithm both operate on `R_bn`.

use crate::constants::*;
use crate::errors::{SimError, WithWarning};
use crate::types::{Quaternion, Vec3};
use crate::util::{deg_to_rad, rad_to_deg};

/// A plain 3x3 matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub rows: [[f64; 3]; 3],
}

impl Mat3 {
    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn transpose(&self) -> Mat3 {
        let r = self.rows;
        Mat3::new([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    pub fn trace(&self) -> f64 {
        self.rows[0][0] + self.rows[1][1] + self.rows[2][2]
    }
}

/// Meridian (`R_M`) and prime-vertical (`R_N`) radii of curvature at a given
/// geodetic latitude.
pub fn earth_curvature_radii(lat_deg: f64) -> Result<(f64, f64), SimError> {
    if lat_deg.is_nan() {
        return Err(SimError::Singular);
    }
    let l = deg_to_rad(lat_deg);
    let sin_l2 = l.sin() * l.sin();
    let r_m = EARTH_A * (1.0 - 2.0 * EARTH_F + 3.0 * EARTH_F * sin_l2);
    let r_n = EARTH_A * (1.0 + EARTH_F * sin_l2);
    Ok((r_m, r_n))
}

/// Geodetic (lon, lat, alt; degrees/degrees/metres) -> ECEF (x, y, z; metres).
pub fn geodetic_to_ecef(lon_deg: f64, lat_deg: f64, alt_m: f64) -> Vec3 {
    let (_, r_n) = earth_curvature_radii(lat_deg).unwrap_or((0.0, EARTH_A));
    let lon = deg_to_rad(lon_deg);
    let lat = deg_to_rad(lat_deg);
    let x = (alt_m + r_n) * lat.cos() * lon.cos();
    let y = (alt_m + r_n) * lat.cos() * lon.sin();
    let z = (r_n * (1.0 - EARTH_F).powi(2) + alt_m) * lat.sin();
    Vec3::new(x, y, z)
}

/// ECEF (x, y, z; metres) -> geodetic (lon, lat, alt; degrees/degrees/metres).
///
/// Fixed-point iteration on latitude, seeded from a spherical estimate.
/// Terminates when successive latitude estimates differ by less than
/// [`GEODETIC_ITER_TOLERANCE`] radians, or after [`GEODETIC_ITER_MAX`]
/// iterations, whichever comes first; the latter case carries an
/// `IterDidNotConverge` warning but still returns the last estimate.
pub fn ecef_to_geodetic(x: f64, y: f64, z: f64) -> WithWarning<(f64, f64, f64)> {
    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    let mut lat = (z / ((1.0 - EARTH_F).powi(2) * p)).atan();
    let mut r_n = EARTH_A;
    let mut h_plus_rn = p / lat.cos();
    let mut converged = false;

    for _ in 0..GEODETIC_ITER_MAX {
        h_plus_rn = x / (lat.cos() * lon.cos());
        r_n = EARTH_A / (1.0 - EARTH_E2 * lat.sin() * lat.sin()).sqrt();
        let next_lat = (h_plus_rn * z / ((h_plus_rn - r_n * EARTH_E2) * p)).atan();
        let delta = (next_lat - lat).abs();
        lat = next_lat;
        if delta < GEODETIC_ITER_TOLERANCE {
            converged = true;
            break;
        }
    }

    let alt = h_plus_rn - r_n;
    let result = (rad_to_deg(lon), rad_to_deg(lat), alt);
    if converged {
        WithWarning::ok(result)
    } else {
        WithWarning::warned(result, SimError::IterDidNotConverge { iterations: GEODETIC_ITER_MAX })
    }
}

/// ECEF -> NED rotation anchored at `(lon0_deg, lat0_deg)`: the up-east-north
/// frame at the reference point, permuted to (north, east, down).
pub fn r_en(lon0_deg: f64, lat0_deg: f64) -> Mat3 {
    let lon0 = deg_to_rad(lon0_deg);
    let lat0 = deg_to_rad(lat0_deg);
    let (sl, cl) = (lat0.sin(), lat0.cos());
    let (so, co) = (lon0.sin(), lon0.cos());
    Mat3::new([
        [-sl * co, -sl * so, cl],
        [-so, co, 0.0],
        [-cl * co, -cl * so, -sl],
    ])
}

/// ECEF -> NED rotation for an entity's own geodetic latitude, inverse of
/// [`r_en`]: kept separate so callers don't have to transpose by hand.
pub fn r_ne(lon0_deg: f64, lat0_deg: f64) -> Mat3 {
    r_en(lon0_deg, lat0_deg).transpose()
}

/// Convert a geodetic position to NED relative to `reference`.
pub fn earth_to_navigation(
    lon_deg: f64,
    lat_deg: f64,
    alt_m: f64,
    reference_lon_deg: f64,
    reference_lat_deg: f64,
    reference_alt_m: f64,
) -> Vec3 {
    let p = geodetic_to_ecef(lon_deg, lat_deg, alt_m);
    let p0 = geodetic_to_ecef(reference_lon_deg, reference_lat_deg, reference_alt_m);
    r_en(reference_lon_deg, reference_lat_deg).mul_vec(p - p0)
}

/// Convert a NED position relative to `reference` back to geodetic.
///
/// Round-trips `earth_to_navigation` to within 1e-6 deg / 1e-3 m for points
/// within 1e6 m of the reference (SPEC_FULL.md S4.1, property 2).
pub fn navigation_to_earth(
    ned: Vec3,
    reference_lon_deg: f64,
    reference_lat_deg: f64,
    reference_alt_m: f64,
) -> WithWarning<(f64, f64, f64)> {
    let p0 = geodetic_to_ecef(reference_lon_deg, reference_lat_deg, reference_alt_m);
    let delta = r_ne(reference_lon_deg, reference_lat_deg).mul_vec(ned);
    let p = p0 + delta;
    ecef_to_geodetic(p.x, p.y, p.z)
}

/// Build `R_nb` (navigation -> body) from Euler angles in degrees, 3-2-1
/// (yaw-pitch-roll) convention: `R_nb = Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn euler_to_dcm_nb(roll_deg: f64, pitch_deg: f64, yaw_deg: f64) -> Mat3 {
    let (sr, cr) = deg_to_rad(roll_deg).sin_cos();
    let (sp, cp) = deg_to_rad(pitch_deg).sin_cos();
    let (sy, cy) = deg_to_rad(yaw_deg).sin_cos();

    Mat3::new([
        [cp * cy, cp * sy, -sp],
        [sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, sr * cp],
        [cr * sp * cy + sr * sy, cr * sp * sy - sr * cy, cr * cp],
    ])
}

/// Extract Euler angles (degrees) from `R_bn` (body -> navigation).
///
/// Well-defined away from `pitch = +-90 deg`; at that singularity the
/// best-effort angles are returned with a `Singular` warning and no
/// gimbal-lock repair is attempted (SPEC_FULL.md S4.1).
pub fn dcm_bn_to_euler(r_bn: &Mat3) -> WithWarning<(f64, f64, f64)> {
    let r = &r_bn.rows;
    let r20 = r[2][0];
    let roll = r[2][1].atan2(r[2][2]);
    let cos_pitch_sq = 1.0 - r20 * r20;
    let yaw = r[1][0].atan2(r[0][0]);

    if cos_pitch_sq < 1e-9 {
        let pitch = if r20 < 0.0 { std::f64::consts::FRAC_PI_2 } else { -std::f64::consts::FRAC_PI_2 };
        return WithWarning::warned(
            (rad_to_deg(roll), rad_to_deg(pitch), rad_to_deg(yaw)),
            SimError::Singular,
        );
    }

    let pitch = (-r20 / cos_pitch_sq.sqrt()).atan();
    WithWarning::ok((rad_to_deg(roll), rad_to_deg(pitch), rad_to_deg(yaw)))
}

/// DCM -> quaternion (Shepperd's algorithm). `r` is `R_bn` (body -> nav), so
/// the resulting quaternion matches the body->nav convention used
/// throughout this crate.
pub fn dcm_to_quaternion(r: &Mat3) -> Quaternion {
    let m = &r.rows;
    let trace = r.trace();
    let q0 = 0.5 * (1.0 + trace).max(0.0).sqrt();

    let q = if q0.abs() > SHEPPERD_Q0_EPSILON {
        let q1 = (m[2][1] - m[1][2]) / (4.0 * q0);
        let q2 = (m[0][2] - m[2][0]) / (4.0 * q0);
        let q3 = (m[1][0] - m[0][1]) / (4.0 * q0);
        Quaternion::new(q0, q1, q2, q3)
    } else if m[0][0] >= m[1][1] && m[0][0] >= m[2][2] {
        let t = (1.0 + m[0][0] - m[1][1] - m[2][2]).max(0.0).sqrt();
        let q1 = 0.5 * t;
        let inv = 0.5 / t;
        Quaternion::new((m[2][1] - m[1][2]) * inv, q1, (m[0][1] + m[1][0]) * inv, (m[0][2] + m[2][0]) * inv)
    } else if m[1][1] >= m[2][2] {
        let t = (1.0 - m[0][0] + m[1][1] - m[2][2]).max(0.0).sqrt();
        let q2 = 0.5 * t;
        let inv = 0.5 / t;
        Quaternion::new((m[0][2] - m[2][0]) * inv, (m[0][1] + m[1][0]) * inv, q2, (m[1][2] + m[2][1]) * inv)
    } else {
        let t = (1.0 - m[0][0] - m[1][1] + m[2][2]).max(0.0).sqrt();
        let q3 = 0.5 * t;
        let inv = 0.5 / t;
        Quaternion::new((m[1][0] - m[0][1]) * inv, (m[0][2] + m[2][0]) * inv, (m[1][2] + m[2][1]) * inv, q3)
    };

    normalize_quaternion(q)
}

/// Quaternion (body -> nav) -> `R_bn`.
pub fn quaternion_to_dcm(q: &Quaternion) -> Mat3 {
    let (q0, q1, q2, q3) = (q.q0, q.q1, q.q2, q.q3);
    Mat3::new([
        [q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3, 2.0 * (q1 * q2 - q0 * q3), 2.0 * (q1 * q3 + q0 * q2)],
        [2.0 * (q1 * q2 + q0 * q3), q0 * q0 - q1 * q1 + q2 * q2 - q3 * q3, 2.0 * (q2 * q3 - q0 * q1)],
        [2.0 * (q1 * q3 - q0 * q2), 2.0 * (q2 * q3 + q0 * q1), q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3],
    ])
}

/// dq/dt = 1/2 * Omega(omega) * q, the skew-symmetric quaternion kinematic
/// equation.
pub fn angular_velocity_to_quaternion_derivative(omega: Vec3, q: &Quaternion) -> Quaternion {
    let (wx, wy, wz) = (omega.x, omega.y, omega.z);
    Quaternion::new(
        -0.5 * (wx * q.q1 + wy * q.q2 + wz * q.q3),
        0.5 * (wx * q.q0 + wz * q.q2 - wy * q.q3),
        0.5 * (wy * q.q0 - wz * q.q1 + wx * q.q3),
        0.5 * (wz * q.q0 + wy * q.q1 - wx * q.q2),
    )
}

/// Normalize a quaternion; returns the identity quaternion if the input norm
/// is below [`QUATERNION_NORM_EPSILON`] rather than dividing by (near) zero.
/// Never fails otherwise.
pub fn normalize_quaternion(q: Quaternion) -> Quaternion {
    let n = q.norm();
    if n < QUATERNION_NORM_EPSILON {
        Quaternion::IDENTITY
    } else {
        q.scale(1.0 / n)
    }
}

/// Euler angles (degrees) -> body->nav quaternion: composes `euler_to_dcm_nb`
/// and transposes to `R_bn` before applying Shepperd's algorithm.
pub fn euler_to_quaternion(roll_deg: f64, pitch_deg: f64, yaw_deg: f64) -> Quaternion {
    let r_bn = euler_to_dcm_nb(roll_deg, pitch_deg, yaw_deg).transpose();
    dcm_to_quaternion(&r_bn)
}

/// Body->nav quaternion -> Euler angles (degrees).
pub fn quaternion_to_euler(q: &Quaternion) -> WithWarning<(f64, f64, f64)> {
    let r_bn = quaternion_to_dcm(q);
    dcm_bn_to_euler(&r_bn)
}
