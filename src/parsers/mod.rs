//! Pure readers for probe output. Nothing here spawns processes.

pub mod battery;
pub mod jobs;

pub use battery::*;
pub use jobs::*;
