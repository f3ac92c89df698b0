use crate::error::StyleError;
use crate::parsers::JobCount;

/// xterm-256 color index.
pub type Color = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

impl ColorPair {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self { foreground, background }
    }
}

/// One fragment of the powerline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTriple {
    pub text: String,
    pub foreground: Color,
    pub background: Color,
}

impl RenderTriple {
    pub fn new(text: impl Into<String>, colors: ColorPair) -> Self {
        Self {
            text: text.into(),
            foreground: colors.foreground,
            background: colors.background,
        }
    }

    pub fn colors(&self) -> ColorPair {
        ColorPair::new(self.foreground, self.background)
    }
}

/// `upper_bound: None` is the catch-all band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdBand {
    pub upper_bound: Option<u32>,
    pub colors: ColorPair,
}

impl ThresholdBand {
    pub const fn up_to(upper_bound: u32, colors: ColorPair) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            colors,
        }
    }

    pub const fn otherwise(colors: ColorPair) -> Self {
        Self {
            upper_bound: None,
            colors,
        }
    }
}

/// Ordered, exhaustive bands with closed upper bounds; the first band whose
/// bound is `>= value` wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTable {
    bounded: Vec<(u32, ColorPair)>,
    otherwise: ColorPair,
}

impl BandTable {
    pub fn new(bands: Vec<ThresholdBand>) -> Result<Self, StyleError> {
        let Some((last, rest)) = bands.split_last() else {
            return Err(StyleError::Empty);
        };
        let otherwise = match last.upper_bound {
            None => last.colors,
            Some(_) => return Err(StyleError::NotExhaustive),
        };

        let mut bounded: Vec<(u32, ColorPair)> = Vec::with_capacity(rest.len());
        for band in rest {
            let bound = band.upper_bound.ok_or(StyleError::UnboundedBeforeEnd)?;
            if let Some(&(previous, _)) = bounded.last() {
                if bound <= previous {
                    return Err(StyleError::NotAscending { previous, next: bound });
                }
            }
            bounded.push((bound, band.colors));
        }

        Ok(Self { bounded, otherwise })
    }

    pub fn classify(&self, value: u32) -> ColorPair {
        self.bounded
            .iter()
            .find(|(bound, _)| value <= *bound)
            .map(|(_, colors)| *colors)
            .unwrap_or(self.otherwise)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryColors {
    pub low: ColorPair,
    pub normal: ColorPair,
    pub high: ColorPair,
}

impl Default for BatteryColors {
    fn default() -> Self {
        Self {
            low: ColorPair::new(243, 124),
            normal: ColorPair::new(242, 172),
            high: ColorPair::new(235, 106),
        }
    }
}

pub const DEFAULT_LOW_THRESHOLD: u8 = 25;
pub const DEFAULT_HIGH_THRESHOLD: u8 = 75;
pub const DEFAULT_FULL_THRESHOLD: u8 = 90;
pub const DISCHARGING_ICON: &str = "⚡️";
pub const AC_POWER_ICON: &str = "🔌";

/// Everything the battery mapper needs besides the reading itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryStyle {
    /// At or above this level, a battery on AC is not worth showing.
    pub full_threshold: u8,
    pub discharging_icon: String,
    pub ac_power_icon: String,
    bands: BandTable,
}

impl BatteryStyle {
    pub fn new(colors: BatteryColors, low_threshold: u8, high_threshold: u8) -> Result<Self, StyleError> {
        let bands = BandTable::new(vec![
            ThresholdBand::up_to(u32::from(low_threshold), colors.low),
            ThresholdBand::up_to(u32::from(high_threshold), colors.normal),
            ThresholdBand::otherwise(colors.high),
        ])?;

        Ok(Self {
            full_threshold: DEFAULT_FULL_THRESHOLD,
            discharging_icon: DISCHARGING_ICON.to_string(),
            ac_power_icon: AC_POWER_ICON.to_string(),
            bands,
        })
    }

    pub fn with_full_threshold(mut self, full_threshold: u8) -> Self {
        self.full_threshold = full_threshold;
        self
    }

    pub fn with_icons(mut self, discharging: impl Into<String>, ac_power: impl Into<String>) -> Self {
        self.discharging_icon = discharging.into();
        self.ac_power_icon = ac_power.into();
        self
    }

    pub fn colors_for(&self, level: u8) -> ColorPair {
        self.bands.classify(u32::from(level))
    }

    /// Default thresholds and icons with the given band colors.
    pub fn from_colors(colors: BatteryColors) -> Self {
        Self {
            full_threshold: DEFAULT_FULL_THRESHOLD,
            discharging_icon: DISCHARGING_ICON.to_string(),
            ac_power_icon: AC_POWER_ICON.to_string(),
            bands: BandTable {
                bounded: vec![
                    (u32::from(DEFAULT_LOW_THRESHOLD), colors.low),
                    (u32::from(DEFAULT_HIGH_THRESHOLD), colors.normal),
                ],
                otherwise: colors.high,
            },
        }
    }
}

impl Default for BatteryStyle {
    fn default() -> Self {
        Self::from_colors(BatteryColors::default())
    }
}

/// Map a battery level to its fragment, or `None` when a charged battery is on AC.
pub fn battery_triple(level: u8, discharging: bool, style: &BatteryStyle) -> Option<RenderTriple> {
    if level >= style.full_threshold && !discharging {
        return None;
    }

    let icon = if discharging {
        &style.discharging_icon
    } else {
        &style.ac_power_icon
    };

    Some(RenderTriple::new(format!(" {}% {}", level, icon), style.colors_for(level)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobsStyle {
    pub colors: ColorPair,
    /// Render `" 3! "` rather than `" 3 "`.
    pub exclamation: bool,
}

impl JobsStyle {
    pub fn new(colors: ColorPair) -> Self {
        Self {
            colors,
            exclamation: true,
        }
    }

    pub fn plain(mut self) -> Self {
        self.exclamation = false;
        self
    }
}

pub fn jobs_triple(jobs: JobCount, style: &JobsStyle) -> Option<RenderTriple> {
    if jobs.is_zero() {
        return None;
    }

    let text = if style.exclamation {
        format!(" {}! ", jobs.count)
    } else {
        format!(" {} ", jobs.count)
    };

    Some(RenderTriple::new(text, style.colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_closed() {
        let style = BatteryStyle::default();
        let colors = BatteryColors::default();
        assert_eq!(style.colors_for(0), colors.low);
        assert_eq!(style.colors_for(25), colors.low);
        assert_eq!(style.colors_for(26), colors.normal);
        assert_eq!(style.colors_for(75), colors.normal);
        assert_eq!(style.colors_for(76), colors.high);
        assert_eq!(style.colors_for(100), colors.high);
    }

    #[test]
    fn test_default_matches_constructed_style() {
        let built = BatteryStyle::new(BatteryColors::default(), DEFAULT_LOW_THRESHOLD, DEFAULT_HIGH_THRESHOLD).unwrap();
        assert_eq!(built, BatteryStyle::default());
    }

    #[test]
    fn test_full_battery_on_ac_is_suppressed() {
        let style = BatteryStyle::default();
        for level in 90..=100 {
            assert_eq!(battery_triple(level, false, &style), None, "level {}", level);
        }
        assert!(battery_triple(89, false, &style).is_some());
    }

    #[test]
    fn test_full_battery_discharging_is_shown() {
        let triple = battery_triple(95, true, &BatteryStyle::default()).unwrap();
        assert_eq!(triple.text, " 95% ⚡️");
        assert_eq!(triple.colors(), BatteryColors::default().high);
    }

    #[test]
    fn test_battery_text_and_icon() {
        let style = BatteryStyle::default();
        for level in 0..=100u8 {
            for discharging in [false, true] {
                if let Some(triple) = battery_triple(level, discharging, &style) {
                    let icon = if discharging { DISCHARGING_ICON } else { AC_POWER_ICON };
                    assert_eq!(triple.text, format!(" {}% {}", level, icon));
                    assert_eq!(triple.colors(), style.colors_for(level));
                }
            }
        }
    }

    #[test]
    fn test_custom_icons_and_full_threshold() {
        let style = BatteryStyle::default().with_icons("BAT", "AC").with_full_threshold(101);
        assert_eq!(battery_triple(100, false, &style).unwrap().text, " 100% AC");
        assert_eq!(battery_triple(10, true, &style).unwrap().text, " 10% BAT");
    }

    #[test]
    fn test_band_table_validation() {
        let c = ColorPair::new(1, 2);
        assert_eq!(BandTable::new(vec![]), Err(StyleError::Empty));
        assert_eq!(
            BandTable::new(vec![ThresholdBand::up_to(10, c)]),
            Err(StyleError::NotExhaustive)
        );
        assert_eq!(
            BandTable::new(vec![ThresholdBand::otherwise(c), ThresholdBand::otherwise(c)]),
            Err(StyleError::UnboundedBeforeEnd)
        );
        assert_eq!(
            BandTable::new(vec![
                ThresholdBand::up_to(50, c),
                ThresholdBand::up_to(50, c),
                ThresholdBand::otherwise(c)
            ]),
            Err(StyleError::NotAscending { previous: 50, next: 50 })
        );
        assert!(BandTable::new(vec![ThresholdBand::otherwise(c)]).is_ok());
    }

    #[test]
    fn test_battery_style_rejects_inverted_thresholds() {
        assert!(BatteryStyle::new(BatteryColors::default(), 80, 20).is_err());
    }

    #[test]
    fn test_jobs_triple_variants() {
        let style = JobsStyle::new(ColorPair::new(39, 238));
        assert_eq!(jobs_triple(JobCount::zero(), &style), None);
        let triple = jobs_triple(JobCount::new(3), &style).unwrap();
        assert_eq!(triple.text, " 3! ");
        assert_eq!((triple.foreground, triple.background), (39, 238));
        assert_eq!(jobs_triple(JobCount::new(3), &style.plain()).unwrap().text, " 3 ");
    }
}
