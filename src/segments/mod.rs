pub mod background;
pub mod battery;
pub mod jobs;

pub use background::*;
pub use battery::*;
pub use jobs::*;

/// Common surface of prompt segments.
pub trait Segment {
    /// Name used in config and debug output
    fn name(&self) -> &'static str;

    /// Check if segment should be displayed
    fn is_enabled(&self) -> bool {
        true
    }
}

/// A configured segment, in prompt order.
pub enum SegmentKind {
    /// Probed inline while composing.
    Battery(BatterySegment),
    /// Probed in the background and joined in order.
    Jobs(JobsSegment),
}

impl Segment for SegmentKind {
    fn name(&self) -> &'static str {
        match self {
            SegmentKind::Battery(segment) => segment.name(),
            SegmentKind::Jobs(segment) => segment.name(),
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            SegmentKind::Battery(segment) => segment.is_enabled(),
            SegmentKind::Jobs(segment) => segment.is_enabled(),
        }
    }
}
