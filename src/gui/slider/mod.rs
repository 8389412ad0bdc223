use std::time::Duration;
use thiserror::Error;

pub mod animation;
pub mod config;
pub mod gesture;
pub mod layout;
pub mod measure;
pub mod view;
pub mod widget;

pub use animation::{Easing, Transition};
pub use config::{Fraction, Intervals, SliderConfig};
pub use gesture::{Gesture, Phase, Response};
pub use layout::{Padding, Radii, Size, SlotLayout};
pub use measure::{MeasureMode, MeasureSpec};
pub use view::{Compositor, DrawStrategy, Frame};
pub use widget::{SavedState, Slider};

pub const MIN_SLOT_COUNT: usize = 2;
pub const DEFAULT_SLOT_COUNT: usize = 5;
pub const DEFAULT_BAR_HEIGHT: f64 = 0.10; // of widget height
pub const DEFAULT_SLOT_RADIUS: f64 = 0.125;
pub const DEFAULT_SLIDER_RADIUS: f64 = 0.25;
pub const DEFAULT_FILLED_COLOR: &str = "#FFA500FF";
pub const DEFAULT_EMPTY_COLOR: &str = "#C3C3C3DD";
pub const DEFAULT_HEIGHT: f64 = 50.0; // density independent units
pub const STROKE_WIDTH: f64 = 5.0;
pub const MILLIS_PER_UNIT: f64 = 3.0; // release animation speed
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SliderError {
    #[error("slot count must be at least 2, got {0}")]
    SlotCount(usize),
    #[error("{name} must be in (0, 1], got {value}")]
    Fraction { name: &'static str, value: f64 },
    #[error("density must be a positive number, got {0}")]
    Density(f64),
    #[error("interval {0:?} is not a number")]
    IntervalParse(String),
    #[error("interval {0} must be within [0, 1]")]
    IntervalRange(f64),
    #[error("intervals must add up to a value in (0, 1], got {0}")]
    IntervalSum(f64),
    #[error("custom intervals need {expected} slots, got {slots}")]
    IntervalMismatch { expected: usize, slots: usize },
    #[error("index {index} out of range [0, {count})")]
    Index { index: usize, count: usize },
}
