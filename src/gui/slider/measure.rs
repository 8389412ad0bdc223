use super::config::SliderConfig;
use super::layout::{Padding, Size};
use super::{DEFAULT_HEIGHT, STROKE_WIDTH};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum MeasureMode {
    /// The host dictates the size.
    Exact,
    /// The host allows up to the given size.
    AtMost,
    /// The widget picks its own size.
    #[default]
    Unspecified,
}

/// One axis of the host's size constraint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: f64,
}

impl MeasureSpec {
    pub fn new(mode: MeasureMode, size: f64) -> Self {
        Self { mode, size }
    }

    pub fn exact(size: f64) -> Self {
        Self::new(MeasureMode::Exact, size)
    }

    pub fn at_most(size: f64) -> Self {
        Self::new(MeasureMode::AtMost, size)
    }

    pub fn unspecified() -> Self {
        Self::new(MeasureMode::Unspecified, 0.0)
    }

    fn resolve(self, preferred: f64) -> f64 {
        match self.mode {
            MeasureMode::Exact => self.size,
            MeasureMode::AtMost => preferred.min(self.size),
            MeasureMode::Unspecified => preferred,
        }
    }
}

pub fn measure_height(spec: MeasureSpec, padding: Padding, density: f64) -> f64 {
    spec.resolve(DEFAULT_HEIGHT * density + padding.vertical() + 2.0 * STROKE_WIDTH)
}

pub fn measure_width(spec: MeasureSpec, padding: Padding, slider_radius: f64) -> f64 {
    spec.resolve(spec.size + padding.horizontal() + 2.0 * STROKE_WIDTH + 2.0 * slider_radius)
}

/// Picks a concrete size for the widget under the host's constraints.
///
/// Height is settled first since the indicator radius, which the width
/// reserves room for, is a fraction of it.
pub fn measure(
    config: &SliderConfig,
    width: MeasureSpec,
    height: MeasureSpec,
    padding: Padding,
) -> Size {
    let h = measure_height(height, padding, config.density());
    let radius = config.slider_radius().of(h);
    Size::new(measure_width(width, padding, radius), h)
}
