use super::MILLIS_PER_UNIT;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Easing {
    /// Slow start and end, fastest in the middle.
    #[default]
    AccelerateDecelerate,
    Linear,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps progress in `[0, 1]` onto eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::AccelerateDecelerate => 0.5 - (PI * t).cos() / 2.0,
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Eased movement of the indicator from a release point to its snapped slot.
///
/// The duration scales with the distance travelled, so every release settles
/// at the same speed. Time only moves forward through [`Transition::advance`],
/// which the host calls once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    easing: Easing,
    duration: Duration,
    elapsed: Duration,
}

impl Transition {
    pub fn new(from: f64, to: f64, easing: Easing) -> Self {
        // float to int casts saturate, NaN becomes 0
        let millis = ((to - from).abs() * MILLIS_PER_UNIT) as u64;
        Self {
            from,
            to,
            easing,
            duration: Duration::from_millis(millis),
            elapsed: Duration::ZERO,
        }
    }

    pub fn start(&self) -> f64 {
        self.from
    }

    pub fn end(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Moves the clock forward by `delta` and returns the new position.
    pub fn advance(&mut self, delta: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        self.value()
    }
}
