//! Simulation engine: rigid-body dynamics, PID guidance, and battlefield
//! tick orchestration for the aerocombat core types.

pub mod aircraft;
pub mod autopilot;
pub mod battlefield;
pub mod dynamics;
pub mod missile;
pub mod pid;

pub use aerocombat_core as core;
pub use aircraft::Aircraft;
pub use battlefield::Battlefield;
pub use missile::Missile;
