pub mod config;
pub mod error;
pub mod parsers;
pub mod platform;
pub mod powerline;
pub mod prompt;
pub mod runner;
pub mod segments;
pub mod style;
pub mod themes;
pub mod utils;

pub use config::*;
pub use error::*;
pub use parsers::{BatteryReading, JobCount, PidMatchMode};
pub use platform::*;
pub use powerline::*;
pub use runner::*;
pub use segments::*;
pub use style::*;
pub use themes::*;
