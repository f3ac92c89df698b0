use crate::parsers::JobCount;
use crate::segments::{BackgroundHandle, Segment, SegmentKind};
use crate::style::RenderTriple;
use crate::utils::debug_with_context;

/// Powerline arrow drawn between fragments.
pub const SEPARATOR: &str = "\u{e0b0}";

/// Ordered fragments of one prompt render. Segments only ever append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Powerline {
    segments: Vec<RenderTriple>,
}

impl Powerline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, triple: RenderTriple) {
        self.segments.push(triple);
    }

    pub fn segments(&self) -> &[RenderTriple] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render with 256-color escapes, or plain text when `colorize` is false.
    pub fn draw(&self, colorize: bool) -> String {
        if !colorize {
            return self.segments.iter().map(|s| s.text.as_str()).collect();
        }

        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            out.push_str(&format!(
                "\x1b[38;5;{}m\x1b[48;5;{}m{}",
                segment.foreground, segment.background, segment.text
            ));
            match self.segments.get(i + 1) {
                Some(next) => out.push_str(&format!(
                    "\x1b[38;5;{}m\x1b[48;5;{}m{}",
                    segment.background, next.background, SEPARATOR
                )),
                None => out.push_str(&format!("\x1b[0m\x1b[38;5;{}m{}", segment.background, SEPARATOR)),
            }
        }
        if !out.is_empty() {
            out.push_str("\x1b[0m");
        }
        out
    }
}

/// Run one render pass over `segments`.
///
/// Background probes are all started before anything renders inline, then
/// each segment contributes in configured order regardless of which probe
/// finished first.
pub async fn compose(segments: &mut [SegmentKind]) -> Powerline {
    let handles: Vec<Option<BackgroundHandle<JobCount>>> = segments
        .iter()
        .map(|segment| match segment {
            SegmentKind::Jobs(jobs) if jobs.is_enabled() => Some(jobs.start()),
            _ => None,
        })
        .collect();

    let mut powerline = Powerline::new();
    for (segment, handle) in segments.iter_mut().zip(handles) {
        if !segment.is_enabled() {
            debug_with_context(segment.name(), "disabled");
            continue;
        }

        match segment {
            SegmentKind::Battery(battery) => battery.add_to_powerline(&mut powerline).await,
            SegmentKind::Jobs(jobs) => {
                if let Some(handle) = handle {
                    jobs.finish(handle.join().await);
                }
                jobs.add_to_powerline(&mut powerline);
            }
        }
    }

    powerline
}
