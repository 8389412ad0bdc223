use super::animation::Easing;
use super::{
    DEFAULT_BAR_HEIGHT, DEFAULT_SLIDER_RADIUS, DEFAULT_SLOT_COUNT, DEFAULT_SLOT_RADIUS,
    MIN_SLOT_COUNT, SliderError,
};
use crate::gui::theme::{Color, SliderColors};
use derive_more::{Display, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// A proportion of the widget height, always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Into)]
pub struct Fraction(f64);

impl Fraction {
    pub fn new(name: &'static str, value: f64) -> Result<Self, SliderError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(SliderError::Fraction { name, value })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn of(self, length: f64) -> f64 {
        self.0 * length
    }
}

/// Custom spacing between consecutive slots, as fractions of the usable width.
///
/// Written as a comma separated list, e.g. `0.1,0.2,0.3`. Every entry must be
/// in `[0, 1]` and the entries must not add up to more than 1.
#[derive(Debug, Clone, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct Intervals(Vec<f64>);

impl Intervals {
    // tolerates float noise in lists like 0.1,0.2,0.3,0.4
    const SUM_EPSILON: f64 = 1e-9;

    pub fn new(values: Vec<f64>) -> Result<Self, SliderError> {
        if let Some(&bad) = values
            .iter()
            .find(|v| !v.is_finite() || !(0.0..=1.0).contains(*v))
        {
            return Err(SliderError::IntervalRange(bad));
        }
        let sum: f64 = values.iter().sum();
        if values.is_empty() || sum <= 0.0 || sum > 1.0 + Self::SUM_EPSILON {
            return Err(SliderError::IntervalSum(sum));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Custom intervals always imply one more slot than there are gaps.
    pub fn slot_count(&self) -> usize {
        self.0.len() + 1
    }
}

impl FromStr for Intervals {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .map(|entry| {
                entry
                    .parse::<f64>()
                    .map_err(|_| SliderError::IntervalParse(entry.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }
}

impl fmt::Display for Intervals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(f64::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

/// Validated slider configuration.
///
/// Every setter checks its input and leaves the configuration untouched on
/// error, so a `SliderConfig` is always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    slot_count: usize,
    intervals: Option<Intervals>,
    bar_height: Fraction,
    slot_radius: Fraction,
    slider_radius: Fraction,
    filled_color: Color,
    empty_color: Color,
    animate: bool,
    easing: Easing,
    density: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            intervals: None,
            bar_height: Fraction(DEFAULT_BAR_HEIGHT),
            slot_radius: Fraction(DEFAULT_SLOT_RADIUS),
            slider_radius: Fraction(DEFAULT_SLIDER_RADIUS),
            filled_color: Color::rgb(0xFF, 0xA5, 0x00),
            empty_color: Color::rgba(0xC3, 0xC3, 0xC3, 0xDD),
            animate: false,
            easing: Easing::default(),
            density: 1.0,
        }
    }
}

impl SliderConfig {
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn set_slot_count(&mut self, count: usize) -> Result<(), SliderError> {
        if count < MIN_SLOT_COUNT {
            return Err(SliderError::SlotCount(count));
        }
        if let Some(intervals) = &self.intervals
            && intervals.slot_count() != count
        {
            return Err(SliderError::IntervalMismatch {
                expected: intervals.slot_count(),
                slots: count,
            });
        }
        self.slot_count = count;
        Ok(())
    }

    pub fn intervals(&self) -> Option<&Intervals> {
        self.intervals.as_ref()
    }

    /// Installing intervals overrides the slot count with `intervals + 1`.
    pub fn set_intervals(&mut self, intervals: Option<Intervals>) {
        if let Some(intervals) = &intervals {
            self.slot_count = intervals.slot_count();
        }
        self.intervals = intervals;
    }

    pub fn set_intervals_str(&mut self, intervals: &str) -> Result<(), SliderError> {
        let intervals: Intervals = intervals.parse()?;
        self.set_intervals(Some(intervals));
        Ok(())
    }

    pub fn bar_height(&self) -> Fraction {
        self.bar_height
    }

    pub fn set_bar_height(&mut self, value: f64) -> Result<(), SliderError> {
        self.bar_height = Fraction::new("bar height", value)?;
        Ok(())
    }

    pub fn slot_radius(&self) -> Fraction {
        self.slot_radius
    }

    pub fn set_slot_radius(&mut self, value: f64) -> Result<(), SliderError> {
        self.slot_radius = Fraction::new("slot radius", value)?;
        Ok(())
    }

    pub fn slider_radius(&self) -> Fraction {
        self.slider_radius
    }

    pub fn set_slider_radius(&mut self, value: f64) -> Result<(), SliderError> {
        self.slider_radius = Fraction::new("slider radius", value)?;
        Ok(())
    }

    pub fn filled_color(&self) -> Color {
        self.filled_color
    }

    pub fn set_filled_color(&mut self, color: Color) {
        self.filled_color = color;
    }

    pub fn empty_color(&self) -> Color {
        self.empty_color
    }

    pub fn set_empty_color(&mut self, color: Color) {
        self.empty_color = color;
    }

    pub fn colors(&self) -> SliderColors {
        SliderColors::new(self.filled_color, self.empty_color)
    }

    pub fn animate(&self) -> bool {
        self.animate
    }

    pub fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// The easing to run on release, if releases are animated at all.
    pub fn release_easing(&self) -> Option<Easing> {
        self.animate.then_some(self.easing)
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn set_density(&mut self, density: f64) -> Result<(), SliderError> {
        if !(density.is_finite() && density > 0.0) {
            return Err(SliderError::Density(density));
        }
        self.density = density;
        Ok(())
    }
}
