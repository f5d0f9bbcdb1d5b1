//! The core's single error type.
//!
//! `NotLive` is deliberately absent here: advancing a dead entity is a no-op,
//! not a failure (SPEC_FULL.md S7), and is represented instead by
//! [`crate::enums::AdvanceOutcome::NotLive`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("battlefield is at capacity ({capacity} entities)")]
    Capacity { capacity: usize },

    #[error("sim_id {sim_id} is already in use")]
    DuplicateId { sim_id: i64 },

    #[error("ECEF->geodetic iteration did not converge after {iterations} iterations")]
    IterDidNotConverge { iterations: u32 },

    #[error("Euler extraction at the gimbal singularity (|pitch| ~= 90 degrees)")]
    Singular,

    #[error("NaN appeared in integrator state for sim_id {sim_id}")]
    NanInput { sim_id: i64 },
}

/// A successful result that may carry a non-fatal warning: the ECEF->geodetic
/// iteration hitting its cap, or Euler extraction at the gimbal singularity.
/// Both conditions still produce a usable best-effort value (SPEC_FULL.md S7),
/// so they are not `Err` — the caller decides whether to act on the warning.
#[derive(Debug, Clone, PartialEq)]
pub struct WithWarning<T> {
    pub value: T,
    pub warning: Option<SimError>,
}

impl<T> WithWarning<T> {
    pub fn ok(value: T) -> Self {
        Self { value, warning: None }
    }

    pub fn warned(value: T, warning: SimError) -> Self {
        Self { value, warning: Some(warning) }
    }
}
