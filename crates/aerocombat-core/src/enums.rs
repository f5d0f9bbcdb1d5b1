//! Status and classification enums.

use serde::{Deserialize, Serialize};

/// Side a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

/// Which derivative-function variant and PID heuristic applies to a body.
/// Replaces the source's virtual Unit/Aircraft/Missile dispatch: the tick
/// loop already knows which list it is advancing, so a plain tag suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirframeKind {
    Aircraft,
    Missile,
}

/// Missile lifecycle. Armed -> Flying on launch; Flying -> Hit or OutOfRange
/// are terminal, and subsequent ticks skip the missile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileStatus {
    /// Ready on the rail, not yet launched.
    Armed,
    Flying,
    Hit,
    OutOfRange,
}

impl MissileStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MissileStatus::Hit | MissileStatus::OutOfRange)
    }
}

/// Result of attempting to advance one entity for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced,
    /// The entity's live flag was 0; the tick was a no-op (per SPEC_FULL.md S7,
    /// this is not an error).
    NotLive,
}
