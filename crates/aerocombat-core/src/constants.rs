//! Simulation constants and tuning parameters.

// --- Capacity ---

/// Maximum number of live aircraft a battlefield can hold.
pub const MAX_AIRCRAFT: usize = 16;

/// Maximum number of live missiles a battlefield can hold.
pub const MAX_MISSILES: usize = 16;

/// Simulation ids for missiles are assigned starting here, so they never
/// collide with aircraft ids assigned by the host.
pub const MISSILE_ID_BASE: i64 = 20_000_000;

/// Maximum length, in bytes, of a name or type string.
pub const MAX_STRING_LEN: usize = 1024;

// --- WGS-84 ellipsoid ---

/// Earth equatorial radius, metres.
pub const EARTH_A: f64 = 6_378_137.0;

/// Earth polar radius, metres.
pub const EARTH_B: f64 = 6_356_752.3142;

/// Flattening, f = (a - b) / a.
pub const EARTH_F: f64 = 0.003352810664;

/// First eccentricity squared, e^2 = 1 - (b/a)^2.
pub const EARTH_E2: f64 = 1.0 - (EARTH_B * EARTH_B) / (EARTH_A * EARTH_A);

/// Convergence tolerance for the ECEF -> geodetic fixed-point iteration, radians.
pub const GEODETIC_ITER_TOLERANCE: f64 = 1e-6;

/// Iteration cap for the ECEF -> geodetic fixed-point loop.
pub const GEODETIC_ITER_MAX: u32 = 1000;

/// Minimum quaternion norm below which `normalize_quaternion` returns identity
/// instead of dividing.
pub const QUATERNION_NORM_EPSILON: f64 = 1e-12;

/// Below this magnitude, `|q0|` is treated as too small for the direct
/// Shepperd-algorithm formula and the dominant-diagonal branch is used instead.
pub const SHEPPERD_Q0_EPSILON: f64 = 1e-4;

// --- Gravity ---

/// Simple gravity constant, m/s^2, acting along NED +z (downward).
pub const SIMPLE_GRAVITY: f64 = 9.8015;

// --- Aerodynamics ---

/// Axial (body-x) drag coefficient for aircraft.
pub const DRAG_AXIAL_AIRCRAFT: f64 = 1e-9;

/// Axial (body-x) drag coefficient for missiles.
pub const DRAG_AXIAL_MISSILE: f64 = 8e-10;

/// Lateral (body-y) drag coefficient, shared by aircraft and missiles.
pub const DRAG_LATERAL: f64 = 1e-8;

/// Vertical (body-z) drag coefficient, shared by aircraft and missiles.
pub const DRAG_VERTICAL: f64 = 1e-6;

/// Lift coefficient, aircraft only.
pub const LIFT_COEFFICIENT: f64 = 5e-5;

/// Altitude lapse scale for the lift attenuation term, metres.
///
/// The guarded multiplier `exp(zn / LIFT_ALTITUDE_SCALE)` only engages when
/// `zn > 0` (below the reference altitude, since NED-down is positive), which
/// *amplifies* lift there rather than attenuating it. This is the literal
/// source formula; see SPEC_FULL.md S9 for the open-question writeup. Preserved
/// verbatim, not "fixed".
pub const LIFT_ALTITUDE_SCALE: f64 = 5000.0;

/// NED-down altitude (in metres, positive = below reference) above which
/// thrust is cut to zero, i.e. altitude above roughly 33 km.
pub const THRUST_CUTOFF_DOWN_M: f64 = -33_000.0;

/// Speed, in m/s, above which the terminal-velocity soft clamp can engage.
pub const TERMINAL_VELOCITY_CLAMP_THRESHOLD: f64 = 340.0;

// --- Actuator saturation ---

/// Roll/pitch rate saturation limit, rad/s.
pub const RATE_LIMIT_ROLL_PITCH: f64 = std::f64::consts::FRAC_PI_2;

/// Yaw rate saturation limit, rad/s.
pub const RATE_LIMIT_YAW: f64 = std::f64::consts::PI / 12.0;

// --- Missile guidance ---

/// Default destroy radius, metres: a hit is declared when the missile closes
/// to within this distance of its target.
pub const DEFAULT_DESTROY_RADIUS: f64 = 250.0;

/// Default maximum travel budget, metres, before a missile self-destructs as
/// out of range.
pub const DEFAULT_MAX_RANGE: f64 = 30_000.0;

/// Beyond this multiple of the destroy radius the lead-point gain uses the
/// far-field (pure-pursuit-like) formula; within it, the near-field
/// terminal-homing formula applies.
pub const TERMINAL_HOMING_RANGE_FACTOR: f64 = 1.5;

/// Far-field lead-point gain denominator scale.
pub const LEAD_POINT_FAR_FIELD_SCALE: f64 = 0.001;

/// Near-field (terminal-homing) lead-point gain constant. Unexplained in the
/// source; preserved verbatim per SPEC_FULL.md S9.
pub const MISSILE_TERMINAL_GAIN: f64 = 195.0;

/// Fixed cruise thrust for a missile's own autopilot, m/s^2.
pub const MISSILE_CRUISE_THRUST: f64 = 90.0;

/// Fixed cruise thrust used for the aircraft point-chaser baseline in demo
/// scenarios, m/s^2.
pub const AIRCRAFT_CRUISE_THRUST: f64 = 40.0;

/// Roll-angle anti-windup threshold, degrees: beyond this the roll PID output
/// is overridden with a constant unwind rate.
pub const ROLL_ANTI_WINDUP_THRESHOLD_DEG: f64 = 170.0;

/// Forced unwind rate applied once the anti-windup threshold is crossed, rad/s.
pub const ROLL_ANTI_WINDUP_RATE: f64 = 2.0;

/// Azimuth-error threshold, radians (10 degrees), above which the aircraft
/// point-chaser chases the lead point; below it, only the levelling term
/// drives the roll PID.
pub const POINT_CHASER_AZIMUTH_THRESHOLD: f64 = std::f64::consts::PI / 18.0;

/// Gain of the roll-levelling term in the aircraft point-chaser.
pub const LEVELLING_GAIN: f64 = 0.4;

/// Distance, metres, inside which the aircraft point-chaser considers itself
/// "arrived" and zeroes all commanded rates.
pub const POINT_CHASER_ARRIVAL_RADIUS: f64 = 30.0;

// --- PID gains ---

/// Roll-axis PID gains (Kp, Ki, Kd).
pub const PID_ROLL_GAINS: (f64, f64, f64) = (1.0, 0.5, 10.0);

/// Pitch-axis PID gains (Kp, Ki, Kd).
pub const PID_PITCH_GAINS: (f64, f64, f64) = (1.0, 0.0, 2.0);

/// Yaw-axis PID gains (Kp, Ki, Kd).
pub const PID_YAW_GAINS: (f64, f64, f64) = (1.0, 0.0, 20.0);
