use super::config::SliderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The area left for content once `padding` is taken off.
    pub fn inset(&self, padding: Padding) -> Self {
        Self::new(
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Pixel sizes derived from the configured fractions and the widget height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Radii {
    pub bar_height: f64,
    pub slot: f64,
    pub slider: f64,
}

impl Radii {
    pub fn from_height(config: &SliderConfig, height: f64) -> Self {
        Self {
            bar_height: config.bar_height().of(height),
            slot: config.slot_radius().of(height),
            slider: config.slider_radius().of(height),
        }
    }
}

/// Horizontal slot centers plus the shared vertical center line.
///
/// Always holds `slot_count` positions in non-decreasing order. It is never
/// patched in place: any change to size or spacing builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    positions: Vec<f64>,
    y: f64,
}

impl SlotLayout {
    /// Lays out the slots inside `available`, the widget size minus padding.
    ///
    /// Without custom intervals every slot sits in the middle of an equal
    /// share of the width. With intervals the usable width shrinks by the
    /// indicator diameter so the outer circles stay visible, and the whole
    /// run of gaps is centered in what remains.
    pub fn compute(
        config: &SliderConfig,
        available: Size,
        padding: Padding,
        slider_radius: f64,
    ) -> Self {
        let count = config.slot_count();
        let y = padding.top + available.height / 2.0;

        let positions = match config.intervals() {
            None => {
                let spacing = available.width / count as f64;
                (0..count)
                    .map(|i| padding.left + spacing / 2.0 + i as f64 * spacing)
                    .collect()
            }
            Some(intervals) => {
                let usable = available.width - slider_radius * 2.0;
                let span = intervals.sum() * usable;
                let first = padding.left + (usable - span) / 2.0 + slider_radius;
                std::iter::once(0.0)
                    .chain(intervals.as_slice().iter().copied())
                    .scan(first, |x, gap| {
                        *x += gap * usable;
                        Some(*x)
                    })
                    .collect()
            }
        };

        log::debug!("Slot layout: {count} slots, y = {y}");
        Self { positions, y }
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn first(&self) -> f64 {
        self.positions.first().copied().unwrap_or_default()
    }

    pub fn last(&self) -> f64 {
        self.positions.last().copied().unwrap_or_default()
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.first()).min(self.last())
    }

    /// Index of the slot closest to `x`. Exact ties go to the lower index.
    pub fn nearest(&self, x: f64) -> usize {
        let mut best = 0;
        let mut min = f64::MAX;
        for (i, position) in self.positions.iter().enumerate() {
            let dx = (x - position).abs();
            if dx < min {
                min = dx;
                best = i;
            }
        }
        best
    }

    /// Whether a press lands in the band the indicator can travel through.
    pub fn contains(&self, x: f64, y: f64, slider_radius: f64) -> bool {
        (self.first() - slider_radius..=self.last() + slider_radius).contains(&x)
            && (self.y - slider_radius..=self.y + slider_radius).contains(&y)
    }
}
