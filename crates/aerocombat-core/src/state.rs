//! Read-side observation types produced by `Battlefield::snapshot()`.
//!
//! This is the only surface external telemetry, file recording, or tests
//! should consume (SPEC_FULL.md S4.6/S6-C4); it is a plain value, decoupled
//! from the battlefield's internal storage.

use serde::{Deserialize, Serialize};

use crate::enums::{MissileStatus, Team};

/// Observable state of one aircraft at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftView {
    pub sim_id: i64,
    pub live: bool,
    pub name: String,
    pub team: Team,
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
}

/// Observable state of one missile at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileView {
    pub sim_id: i64,
    pub live: bool,
    pub name: String,
    pub team: Team,
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub parent_id: i64,
    pub target_id: i64,
    pub status: MissileStatus,
}

/// A complete read-only snapshot of a battlefield at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub elapsed_secs: f64,
    pub aircraft: Vec<AircraftView>,
    pub missiles: Vec<MissileView>,
}
