use super::SliderError;
use super::animation::Easing;
use super::config::{Intervals, SliderConfig};
use super::gesture::{Gesture, Response};
use super::layout::{Padding, Radii, Size, SlotLayout};
use super::measure::{self, MeasureSpec};
use super::view::{Compositor, Frame};
use crate::events::PointerEvent;
use crate::gui::theme::Color;
use cairo::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The only state that survives the host recreating the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    pub index: usize,
}

/// A discrete-position slider: configuration, geometry, gesture and
/// compositor in one explicit state record.
///
/// The host drives it with [`Slider::measure`], [`Slider::resize`], pointer
/// events, animation ticks and [`Slider::render`]. Redraw requests and slot
/// changes come back through the `on_invalidate` and `on_slide` callbacks.
pub struct Slider {
    config: SliderConfig,
    padding: Padding,
    size: Option<Size>,
    radii: Radii,
    layout: Option<SlotLayout>,
    gesture: Gesture,
    compositor: Compositor,
    on_slide: Option<Box<dyn FnMut(usize)>>,
    on_invalidate: Option<Box<dyn FnMut()>>,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(SliderConfig::default())
    }
}

impl Slider {
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            padding: Padding::default(),
            size: None,
            radii: Radii::default(),
            layout: None,
            gesture: Gesture::default(),
            compositor: Compositor::new(),
            on_slide: None,
            on_invalidate: None,
        }
    }

    pub fn with_compositor(mut self, compositor: Compositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn set_on_slide(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_slide = Some(Box::new(callback));
    }

    pub fn set_on_invalidate(&mut self, callback: impl FnMut() + 'static) {
        self.on_invalidate = Some(Box::new(callback));
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&SlotLayout> {
        self.layout.as_ref()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn radii(&self) -> Radii {
        self.radii
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn current_index(&self) -> usize {
        self.gesture.current_index()
    }

    pub fn slider_x(&self) -> f64 {
        self.gesture.current_x()
    }

    pub fn is_animating(&self) -> bool {
        self.gesture.is_animating()
    }

    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        measure::measure(&self.config, width, height, self.padding)
    }

    pub fn resize(&mut self, size: Size) {
        self.size = Some(size);
        self.relayout();
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.relayout();
        self.invalidate();
    }

    pub fn set_slot_count(&mut self, count: usize) -> Result<(), SliderError> {
        self.config.set_slot_count(count)?;
        self.relayout();
        self.invalidate();
        Ok(())
    }

    pub fn set_intervals(&mut self, intervals: Option<Intervals>) {
        self.config.set_intervals(intervals);
        self.relayout();
        self.invalidate();
    }

    pub fn set_intervals_str(&mut self, intervals: &str) -> Result<(), SliderError> {
        self.config.set_intervals_str(intervals)?;
        self.relayout();
        self.invalidate();
        Ok(())
    }

    pub fn set_bar_height(&mut self, value: f64) -> Result<(), SliderError> {
        self.config.set_bar_height(value)?;
        self.refresh_radii();
        self.invalidate();
        Ok(())
    }

    pub fn set_slot_radius(&mut self, value: f64) -> Result<(), SliderError> {
        self.config.set_slot_radius(value)?;
        self.refresh_radii();
        self.invalidate();
        Ok(())
    }

    pub fn set_slider_radius(&mut self, value: f64) -> Result<(), SliderError> {
        self.config.set_slider_radius(value)?;
        self.relayout();
        self.invalidate();
        Ok(())
    }

    pub fn set_filled_color(&mut self, color: Color) {
        self.config.set_filled_color(color);
        self.invalidate();
    }

    pub fn set_empty_color(&mut self, color: Color) {
        self.config.set_empty_color(color);
        self.invalidate();
    }

    pub fn set_animate(&mut self, animate: bool) {
        self.config.set_animate(animate);
        self.invalidate();
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.config.set_easing(easing);
        self.invalidate();
    }

    /// Only affects the next measure pass.
    pub fn set_density(&mut self, density: f64) -> Result<(), SliderError> {
        self.config.set_density(density)?;
        self.invalidate();
        Ok(())
    }

    /// Selects `index` immediately, without animation or `on_slide`.
    pub fn set_initial_index(&mut self, index: usize) -> Result<(), SliderError> {
        self.gesture
            .set_index(index, self.config.slot_count(), self.layout.as_ref())?;
        self.invalidate();
        Ok(())
    }

    pub fn save_state(&self) -> SavedState {
        SavedState {
            index: self.current_index(),
        }
    }

    pub fn restore_state(&mut self, state: &SavedState) -> Result<(), SliderError> {
        self.set_initial_index(state.index)
    }

    /// Feeds a pointer event through the gesture. Ignored until the first
    /// [`Slider::resize`], since there are no slots to hit before that.
    pub fn handle(&mut self, event: PointerEvent) -> Response {
        let Some(layout) = &self.layout else {
            return Response::none();
        };
        let response = self.gesture.handle(
            event,
            layout,
            self.radii.slider,
            self.config.release_easing(),
        );
        self.dispatch(response)
    }

    /// One animation frame, `delta` after the previous one.
    pub fn tick(&mut self, delta: Duration) -> Response {
        let response = self.gesture.tick(delta);
        self.dispatch(response)
    }

    pub fn render(&mut self, cr: &Context) -> Result<(), cairo::Error> {
        let (Some(size), Some(layout)) = (self.size, &self.layout) else {
            return Ok(());
        };
        let frame = Frame {
            layout,
            slider_x: self.gesture.current_x(),
            radii: self.radii,
            colors: self.config.colors(),
        };
        self.compositor.render(cr, size, &frame)
    }

    /// Picks up new radius fractions without touching slot spacing.
    fn refresh_radii(&mut self) {
        if let Some(size) = self.size {
            self.radii = Radii::from_height(&self.config, size.height);
        }
    }

    fn relayout(&mut self) {
        let Some(size) = self.size else {
            return;
        };
        self.radii = Radii::from_height(&self.config, size.height);
        let layout = SlotLayout::compute(
            &self.config,
            size.inset(self.padding),
            self.padding,
            self.radii.slider,
        );
        self.gesture.reset(&layout);
        self.layout = Some(layout);
    }

    fn dispatch(&mut self, response: Response) -> Response {
        if let Some(index) = response.slid
            && let Some(on_slide) = self.on_slide.as_mut()
        {
            on_slide(index);
        }
        if response.should_redraw {
            self.invalidate();
        }
        response
    }

    fn invalidate(&mut self) {
        if let Some(on_invalidate) = self.on_invalidate.as_mut() {
            on_invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Point;
    use crate::gui::slider::FRAME_INTERVAL;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn slider() -> Slider {
        let mut slider = Slider::default();
        slider.resize(Size::new(500.0, 80.0));
        slider
    }

    fn record_slides(slider: &mut Slider) -> Rc<RefCell<Vec<usize>>> {
        let slides = Rc::new(RefCell::new(Vec::new()));
        let sink = slides.clone();
        slider.set_on_slide(move |i| sink.borrow_mut().push(i));
        slides
    }

    fn count_invalidations(slider: &mut Slider) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        slider.set_on_invalidate(move || sink.set(sink.get() + 1));
        count
    }

    fn drag(slider: &mut Slider, from: f64, to: f64) {
        slider.handle(PointerEvent::Down(Point::new(from, 40.0)));
        slider.handle(PointerEvent::Move(Point::new(to, 40.0)));
        slider.handle(PointerEvent::Up(Point::new(to, 40.0)));
    }

    #[test]
    fn test_scenario_drag_to_last_slot() {
        let mut slider = slider();
        let slides = record_slides(&mut slider);

        slider.handle(PointerEvent::Down(Point::new(240.0, 40.0)));
        assert!(slider.gesture().is_dragging());
        slider.handle(PointerEvent::Move(Point::new(410.0, 40.0)));
        assert_eq!(slider.slider_x(), 410.0);
        slider.handle(PointerEvent::Up(Point::new(410.0, 40.0)));

        assert_eq!(*slides.borrow(), vec![4]);
        assert_eq!(slider.current_index(), 4);
        assert_eq!(slider.slider_x(), 450.0);
    }

    #[test]
    fn test_on_slide_only_on_change() {
        let mut slider = slider();
        let slides = record_slides(&mut slider);
        drag(&mut slider, 50.0, 70.0);
        drag(&mut slider, 50.0, 260.0);
        drag(&mut slider, 250.0, 240.0);
        drag(&mut slider, 250.0, 130.0);
        assert_eq!(*slides.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_events_before_layout_are_ignored() {
        let mut slider = Slider::default();
        let slides = record_slides(&mut slider);
        let response = slider.handle(PointerEvent::Down(Point::new(240.0, 40.0)));
        assert_eq!(response, Response::none());
        assert!(slides.borrow().is_empty());
    }

    #[test]
    fn test_animated_release_runs_on_ticks() {
        let mut slider = slider();
        slider.set_animate(true);
        let slides = record_slides(&mut slider);
        let invalidations = count_invalidations(&mut slider);

        drag(&mut slider, 50.0, 410.0);
        assert_eq!(*slides.borrow(), vec![4]);
        assert!(slider.is_animating());
        assert_eq!(slider.slider_x(), 410.0);

        let before = invalidations.get();
        let mut frames = 0;
        while slider.is_animating() {
            slider.tick(FRAME_INTERVAL);
            frames += 1;
        }
        // 40 units at 3 ms each
        assert_eq!(frames, 8);
        assert_eq!(invalidations.get(), before + frames);
        assert_eq!(slider.slider_x(), 450.0);
        assert_eq!(*slides.borrow(), vec![4]);
    }

    #[test]
    fn test_set_initial_index() {
        let mut slider = slider();
        let slides = record_slides(&mut slider);
        slider.set_initial_index(3).unwrap();
        assert_eq!(slider.current_index(), 3);
        assert_eq!(slider.slider_x(), 350.0);
        assert!(slides.borrow().is_empty());

        assert_eq!(
            slider.set_initial_index(5),
            Err(SliderError::Index { index: 5, count: 5 })
        );
        assert_eq!(slider.current_index(), 3);
    }

    #[test]
    fn test_save_and_restore_round_trip() {
        let mut slider = slider();
        slider.set_initial_index(2).unwrap();
        let saved = slider.save_state();
        let json = serde_json::to_string(&saved).unwrap();
        assert_eq!(json, r#"{"index":2}"#);

        let mut restored = Slider::default();
        restored
            .restore_state(&serde_json::from_str(&json).unwrap())
            .unwrap();
        restored.resize(Size::new(500.0, 80.0));
        assert_eq!(restored.current_index(), 2);
        assert_eq!(restored.slider_x(), restored.layout().unwrap().positions()[2]);
        assert_eq!(restored.slider_x(), 250.0);
    }

    #[test]
    fn test_restore_rejects_out_of_range_index() {
        let mut slider = slider();
        assert!(slider.restore_state(&SavedState { index: 9 }).is_err());
        assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn test_setters_invalidate_and_reject_bad_values() {
        let mut slider = slider();
        let invalidations = count_invalidations(&mut slider);

        slider.set_filled_color(Color::rgb(0, 0, 255));
        slider.set_slot_radius(0.2).unwrap();
        assert_eq!(invalidations.get(), 2);

        assert!(slider.set_bar_height(1.5).is_err());
        assert!(slider.set_slot_count(1).is_err());
        assert_eq!(invalidations.get(), 2);
        assert_eq!(slider.config().bar_height().get(), 0.10);
    }

    #[test]
    fn test_shape_setters_keep_drag_and_animation() {
        let mut slider = slider();
        slider.handle(PointerEvent::Down(Point::new(50.0, 40.0)));
        slider.handle(PointerEvent::Move(Point::new(300.0, 40.0)));

        slider.set_bar_height(0.2).unwrap();
        slider.set_slot_radius(0.2).unwrap();
        assert!(slider.gesture().is_dragging());
        assert_eq!(slider.slider_x(), 300.0);
        assert_eq!(slider.radii().bar_height, 16.0);
        assert_eq!(slider.radii().slot, 16.0);

        slider.set_animate(true);
        slider.handle(PointerEvent::Up(Point::new(300.0, 40.0)));
        assert!(slider.is_animating());
        slider.set_bar_height(0.1).unwrap();
        assert!(slider.is_animating());
        assert_eq!(slider.slider_x(), 300.0);
    }

    #[test]
    fn test_spacing_changes_recompute_layout() {
        let mut slider = slider();
        slider.set_initial_index(4).unwrap();

        slider.set_slot_count(3).unwrap();
        let layout = slider.layout().unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(slider.current_index(), 2);
        assert_eq!(slider.slider_x(), layout.last());

        slider.set_intervals_str("0.25,0.25,0.5").unwrap();
        assert_eq!(slider.config().slot_count(), 4);
        assert_eq!(slider.layout().unwrap().len(), 4);
        assert!(slider.set_intervals_str("0.2,x").is_err());
        assert_eq!(slider.layout().unwrap().len(), 4);
    }

    #[test]
    fn test_resize_updates_radii_and_slots() {
        let mut slider = slider();
        slider.set_padding(Padding::uniform(10.0));
        slider.resize(Size::new(520.0, 100.0));
        assert_eq!(slider.radii().slider, 25.0);
        let layout = slider.layout().unwrap();
        assert_eq!(layout.first(), 60.0);
        assert_eq!(layout.y(), 50.0);
    }

    #[test]
    fn test_render_draws_frame() {
        let mut slider = slider();
        slider.set_initial_index(2).unwrap();
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 500, 80).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            slider.render(&cr).unwrap();
        }
        let mut painted = false;
        surface
            .with_data(|data| painted = data.iter().any(|&b| b != 0))
            .unwrap();
        assert!(painted);
    }
}
