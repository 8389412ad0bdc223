use super::SliderError;
use super::animation::{Easing, Transition};
use super::layout::SlotLayout;
use crate::events::{Point, PointerEvent};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Dragging,
    Animating(Transition),
}

/// What the host should do after feeding an event into the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    pub should_redraw: bool,
    /// Newly settled slot, present only when the index actually changed.
    pub slid: Option<usize>,
}

impl Response {
    pub fn new(should_redraw: bool, slid: Option<usize>) -> Self {
        Self {
            should_redraw,
            slid,
        }
    }

    pub fn redraw() -> Self {
        Self::new(true, None)
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Drag, snap and settle state of the indicator.
///
/// Holds no geometry of its own: every transition takes the current
/// [`SlotLayout`] so positions are always read from a complete layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    phase: Phase,
    current_index: usize,
    current_x: f64,
    current_y: f64,
    animation_start: f64,
    animation_end: f64,
}

impl Default for Gesture {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Gesture {
    pub fn new(index: usize) -> Self {
        Self {
            phase: Phase::Idle,
            current_index: index,
            current_x: 0.0,
            current_y: 0.0,
            animation_start: 0.0,
            animation_end: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_x(&self) -> f64 {
        self.current_x
    }

    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    pub fn animation_start(&self) -> f64 {
        self.animation_start
    }

    pub fn animation_end(&self) -> f64 {
        self.animation_end
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        layout: &SlotLayout,
        slider_radius: f64,
        easing: Option<Easing>,
    ) -> Response {
        match event {
            PointerEvent::Down(p) => self.pointer_down(layout, p, slider_radius),
            PointerEvent::Move(p) => self.pointer_move(layout, p),
            PointerEvent::Up(p) => self.pointer_up(layout, p, easing),
            PointerEvent::Cancel => self.pointer_cancel(layout),
        }
    }

    /// Captures the drag when the press lands in the slider band.
    ///
    /// A press always stops a running animation. If the press captures, the
    /// indicator stays where the animation left it and follows the pointer
    /// from there; otherwise it jumps to the slot it was heading for. A miss
    /// also ends a drag whose release never arrived.
    pub fn pointer_down(&mut self, layout: &SlotLayout, p: Point, slider_radius: f64) -> Response {
        let captured = layout.contains(p.x, p.y, slider_radius);
        let mut redraw = false;

        if let Phase::Animating(transition) = self.phase {
            log::debug!("Animation cancelled at x = {}", self.current_x);
            if !captured {
                self.current_x = transition.end();
            }
            self.phase = Phase::Idle;
            redraw = true;
        }

        if !captured && self.is_dragging() {
            log::debug!("Stale drag dropped, back to slot {}", self.current_index);
            self.phase = Phase::Idle;
            self.settle(layout);
            redraw = true;
        }

        if captured {
            log::debug!("Drag captured at ({}, {})", p.x, p.y);
            self.phase = Phase::Dragging;
            redraw = true;
        }

        Response::new(redraw, None)
    }

    pub fn pointer_move(&mut self, layout: &SlotLayout, p: Point) -> Response {
        if !self.is_dragging() {
            return Response::none();
        }
        self.current_x = layout.clamp(p.x);
        self.current_y = p.y;
        Response::redraw()
    }

    /// Snaps to the nearest slot and either jumps there or starts easing.
    pub fn pointer_up(&mut self, layout: &SlotLayout, p: Point, easing: Option<Easing>) -> Response {
        if !self.is_dragging() {
            return Response::none();
        }

        let x = layout.clamp(p.x);
        let target = layout.nearest(x);
        let slid = (target != self.current_index).then_some(target);

        self.current_index = target;
        self.current_y = p.y;
        self.animation_start = x;
        self.animation_end = layout.position(target).unwrap_or(x);

        let transition = easing
            .map(|e| Transition::new(self.animation_start, self.animation_end, e))
            .filter(|t| !t.is_finished());

        match transition {
            Some(transition) => {
                log::debug!(
                    "Snapping to slot {target}: {} -> {} over {:?}",
                    self.animation_start,
                    self.animation_end,
                    transition.duration()
                );
                self.current_x = self.animation_start;
                self.phase = Phase::Animating(transition);
            }
            None => {
                log::debug!("Snapping to slot {target} at {}", self.animation_end);
                self.current_x = self.animation_end;
                self.phase = Phase::Idle;
            }
        }

        Response::new(true, slid)
    }

    /// Abandons the drag and puts the indicator back on the settled slot.
    pub fn pointer_cancel(&mut self, layout: &SlotLayout) -> Response {
        if !self.is_dragging() {
            return Response::none();
        }
        log::debug!("Drag cancelled, back to slot {}", self.current_index);
        self.phase = Phase::Idle;
        self.settle(layout);
        Response::redraw()
    }

    /// Advances a running animation by one frame.
    pub fn tick(&mut self, delta: Duration) -> Response {
        let Phase::Animating(transition) = &mut self.phase else {
            return Response::none();
        };
        self.current_x = transition.advance(delta);
        if transition.is_finished() {
            log::debug!("Animation settled at x = {}", self.current_x);
            self.phase = Phase::Idle;
        }
        Response::redraw()
    }

    /// Jumps straight to `index`, dropping any drag or animation.
    pub fn set_index(
        &mut self,
        index: usize,
        count: usize,
        layout: Option<&SlotLayout>,
    ) -> Result<(), SliderError> {
        if index >= count {
            return Err(SliderError::Index { index, count });
        }
        self.current_index = index;
        self.phase = Phase::Idle;
        if let Some(layout) = layout {
            self.settle(layout);
        }
        Ok(())
    }

    /// Rests the indicator on the current slot of a fresh layout.
    ///
    /// The index is pulled back into range when the layout has fewer slots.
    pub fn reset(&mut self, layout: &SlotLayout) {
        self.current_index = self.current_index.min(layout.len().saturating_sub(1));
        self.phase = Phase::Idle;
        self.settle(layout);
    }

    fn settle(&mut self, layout: &SlotLayout) {
        self.current_x = layout.position(self.current_index).unwrap_or(layout.first());
        self.current_y = layout.y();
        self.animation_end = self.current_x;
    }
}
