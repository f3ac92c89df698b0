use crate::style::{BatteryColors, ColorPair};

pub const THEME_NAMES: &[&str] = &["default", "basic"];

/// Colors handed to segments at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// `JOBS_FG` / `JOBS_BG`
    pub jobs: ColorPair,
    pub battery: BatteryColors,
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "default" => default_theme(),
        "basic" => basic_theme(),
        _ => default_theme(), // fallback
    }
}

fn default_theme() -> Theme {
    Theme {
        name: "default",
        jobs: ColorPair::new(39, 238),
        battery: BatteryColors::default(),
    }
}

// Sticks to the 16 base colors for terminals without 256-color support.
fn basic_theme() -> Theme {
    Theme {
        name: "basic",
        jobs: ColorPair::new(14, 8),
        battery: BatteryColors {
            low: ColorPair::new(15, 1),
            normal: ColorPair::new(0, 3),
            high: ColorPair::new(0, 2),
        },
    }
}
