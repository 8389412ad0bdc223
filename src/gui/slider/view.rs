use super::STROKE_WIDTH;
use super::layout::{Radii, Size, SlotLayout};
use crate::gui::theme::{Color, SliderColors};
use cairo::{Antialias, Context, Format, ImageSurface, Operator};
use std::f64::consts::PI;

/// Everything needed to draw one frame of the slider.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub layout: &'a SlotLayout,
    pub slider_x: f64,
    pub radii: Radii,
    pub colors: SliderColors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStrategy {
    /// Filled shapes go straight onto the target.
    Opaque,
    /// Filled shapes are flattened first, then laid down at their alpha.
    Translucent,
}

impl DrawStrategy {
    pub fn for_color(filled: Color) -> Self {
        if filled.is_opaque() {
            Self::Opaque
        } else {
            Self::Translucent
        }
    }
}

/// Off-screen surface holding only the empty color's alpha.
struct MaskBuffer {
    surface: ImageSurface,
    width: i32,
    height: i32,
    alpha: u8,
}

impl MaskBuffer {
    fn create(width: i32, height: i32, empty: Color) -> Result<Self, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, width.max(1), height.max(1))?;
        {
            let cr = Context::new(&surface)?;
            cr.set_operator(Operator::Source);
            set_source(&cr, empty.alpha_only());
            cr.paint()?;
        }
        surface.flush();
        Ok(Self {
            surface,
            width,
            height,
            alpha: empty.alpha(),
        })
    }

    fn matches(&self, width: i32, height: i32, alpha: u8) -> bool {
        self.width == width && self.height == height && self.alpha == alpha
    }
}

/// Draws the bar, slots and indicator.
///
/// Both layers are built so that overlapping shapes of one color blend
/// against the background exactly once: the empty layer is drawn opaque
/// and then cut down to the empty alpha through a destination-in mask, and
/// a translucent filled layer is flattened before its alpha is applied.
///
/// The mask is cached and rebuilt when the surface size or the empty
/// color's alpha changes.
pub struct Compositor {
    mask: Option<MaskBuffer>,
    antialias: Antialias,
    mask_allocations: usize,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            mask: None,
            antialias: Antialias::Default,
            mask_allocations: 0,
        }
    }

    pub fn with_antialias(mut self, antialias: Antialias) -> Self {
        self.antialias = antialias;
        self
    }

    /// How many times the mask buffer has been (re)built.
    pub fn mask_allocations(&self) -> usize {
        self.mask_allocations
    }

    pub fn render(&mut self, cr: &Context, size: Size, frame: &Frame) -> Result<(), cairo::Error> {
        let strategy = DrawStrategy::for_color(frame.colors.filled);
        self.render_with(cr, size, frame, strategy)
    }

    pub fn render_with(
        &mut self,
        cr: &Context,
        size: Size,
        frame: &Frame,
        strategy: DrawStrategy,
    ) -> Result<(), cairo::Error> {
        let empty = frame.colors.empty;
        let filled = frame.colors.filled;
        self.ensure_mask(size, empty)?;

        cr.save()?;
        cr.set_antialias(self.antialias);

        cr.push_group();
        draw_empty_layer(cr, frame, empty.opaque())?;
        if let Some(mask) = &self.mask {
            cr.set_operator(Operator::DestIn);
            cr.set_source_surface(&mask.surface, 0.0, 0.0)?;
            cr.paint()?;
        }
        cr.pop_group_to_source()?;
        cr.paint()?;

        match strategy {
            DrawStrategy::Opaque => draw_filled_layer(cr, frame, filled)?,
            DrawStrategy::Translucent => {
                cr.push_group();
                draw_filled_layer(cr, frame, filled.opaque())?;
                cr.pop_group_to_source()?;
                cr.paint_with_alpha(f64::from(filled.alpha()) / 255.0)?;
            }
        }

        cr.restore()
    }

    fn ensure_mask(&mut self, size: Size, empty: Color) -> Result<(), cairo::Error> {
        let (width, height) = (size.width.ceil() as i32, size.height.ceil() as i32);
        if self
            .mask
            .as_ref()
            .is_some_and(|m| m.matches(width, height, empty.alpha()))
        {
            return Ok(());
        }
        log::debug!("Allocating {width}x{height} mask buffer");
        self.mask = Some(MaskBuffer::create(width, height, empty)?);
        self.mask_allocations += 1;
        Ok(())
    }
}

fn set_source(cr: &Context, color: Color) {
    let (r, g, b, a) = color.into_f64().into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_and_stroke(cr: &Context) -> Result<(), cairo::Error> {
    cr.fill_preserve()?;
    cr.set_line_width(STROKE_WIDTH);
    cr.stroke()
}

fn draw_bar(cr: &Context, frame: &Frame, from: f64, to: f64) -> Result<(), cairo::Error> {
    let half = frame.radii.bar_height / 2.0;
    cr.rectangle(from, frame.layout.y() - half, to - from, half * 2.0);
    fill_and_stroke(cr)
}

fn draw_circle(cr: &Context, x: f64, y: f64, radius: f64) -> Result<(), cairo::Error> {
    cr.new_sub_path();
    cr.arc(x, y, radius, 0.0, 2.0 * PI);
    fill_and_stroke(cr)
}

fn draw_empty_layer(cr: &Context, frame: &Frame, color: Color) -> Result<(), cairo::Error> {
    let layout = frame.layout;
    set_source(cr, color);
    for &x in layout.positions() {
        draw_circle(cr, x, layout.y(), frame.radii.slot)?;
    }
    draw_bar(cr, frame, layout.first(), layout.last())
}

fn draw_filled_layer(cr: &Context, frame: &Frame, color: Color) -> Result<(), cairo::Error> {
    let layout = frame.layout;
    set_source(cr, color);
    draw_bar(cr, frame, layout.first(), frame.slider_x)?;
    for &x in layout.positions().iter().filter(|&&x| x <= frame.slider_x) {
        draw_circle(cr, x, layout.y(), frame.radii.slot)?;
    }
    draw_circle(cr, frame.slider_x, layout.y(), frame.radii.slider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::slider::config::SliderConfig;
    use crate::gui::slider::layout::Padding;

    const WIDTH: i32 = 500;
    const HEIGHT: i32 = 80;

    fn layout() -> SlotLayout {
        SlotLayout::compute(
            &SliderConfig::default(),
            Size::new(WIDTH as f64, HEIGHT as f64),
            Padding::default(),
            20.0,
        )
    }

    fn frame<'a>(layout: &'a SlotLayout, slider_x: f64, filled: &str, empty: &str) -> Frame<'a> {
        Frame {
            layout,
            slider_x,
            radii: Radii::from_height(&SliderConfig::default(), HEIGHT as f64),
            colors: SliderColors::new(filled.parse().unwrap(), empty.parse().unwrap()),
        }
    }

    fn draw(compositor: &mut Compositor, frame: &Frame, strategy: DrawStrategy) -> ImageSurface {
        let surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            let size = Size::new(WIDTH as f64, HEIGHT as f64);
            compositor.render_with(&cr, size, frame, strategy).unwrap();
        }
        surface.flush();
        surface
    }

    fn pixels(surface: &ImageSurface) -> Vec<u8> {
        let mut out = Vec::new();
        surface.with_data(|data| out.extend_from_slice(data)).unwrap();
        out
    }

    fn pixel(surface: &ImageSurface, x: i32, y: i32) -> u32 {
        let offset = (y * surface.stride() + x * 4) as usize;
        let data = pixels(surface);
        u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    fn aliased() -> Compositor {
        Compositor::new().with_antialias(Antialias::None)
    }

    #[test]
    fn test_strategy_follows_filled_alpha() {
        assert_eq!(DrawStrategy::for_color(Color::rgb(1, 2, 3)), DrawStrategy::Opaque);
        assert_eq!(
            DrawStrategy::for_color(Color::rgba(1, 2, 3, 254)),
            DrawStrategy::Translucent
        );
    }

    #[test]
    fn test_opaque_fill_is_identical_on_both_paths() {
        let layout = layout();
        let frame = frame(&layout, 260.0, "#FFA500FF", "#C3C3C3DD");
        let direct = draw(&mut aliased(), &frame, DrawStrategy::Opaque);
        let layered = draw(&mut aliased(), &frame, DrawStrategy::Translucent);
        assert_eq!(pixels(&direct), pixels(&layered));
    }

    #[test]
    fn test_translucent_fill_does_not_double_blend() {
        let layout = layout();
        let frame = frame(&layout, 250.0, "#FF000080", "#C3C3C3FF");
        let surface = draw(&mut aliased(), &frame, DrawStrategy::Translucent);

        // slot 0 sits under bar, slot circle and filled bar; x = 100 only under bars
        let stacked = pixel(&surface, 50, 40);
        let bar = pixel(&surface, 100, 40);
        assert_eq!(stacked, bar);
        assert_eq!(bar >> 24, 0xFF);

        let unfilled = pixel(&surface, 400, 40);
        assert_ne!(bar, unfilled);
    }

    #[test]
    fn test_empty_layer_alpha_applied_once() {
        let layout = layout();
        let frame = frame(&layout, 50.0, "#FFA500FF", "#C3C3C380");
        let surface = draw(&mut aliased(), &frame, DrawStrategy::Opaque);

        let slot = pixel(&surface, 350, 40);
        let bar = pixel(&surface, 300, 40);
        assert_eq!(slot, bar);
        assert_eq!(bar >> 24, 0x80);
        assert_eq!(pixel(&surface, 300, 2), 0);
    }

    #[test]
    fn test_filled_region_ends_at_slider() {
        let layout = layout();
        let frame = frame(&layout, 300.0, "#0000FFFF", "#C3C3C3FF");
        let surface = draw(&mut aliased(), &frame, DrawStrategy::Opaque);
        let blue = pixel(&surface, 150, 40);
        assert_eq!(blue, 0xFF0000FF);
        // slot 3 lies right of the slider and stays empty
        assert_eq!(pixel(&surface, 350, 40), 0xFFC3C3C3);
    }

    #[test]
    fn test_mask_is_reused_until_size_changes() {
        let layout = layout();
        let frame = frame(&layout, 250.0, "#FFA500FF", "#C3C3C3DD");
        let mut compositor = aliased();
        draw(&mut compositor, &frame, DrawStrategy::Opaque);
        draw(&mut compositor, &frame, DrawStrategy::Opaque);
        assert_eq!(compositor.mask_allocations(), 1);

        let surface = ImageSurface::create(Format::ARgb32, 300, 60).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            compositor
                .render(&cr, Size::new(300.0, 60.0), &frame)
                .unwrap();
        }
        assert_eq!(compositor.mask_allocations(), 2);
    }

    #[test]
    fn test_mask_follows_empty_alpha() {
        let layout = layout();
        let mut compositor = aliased();
        draw(&mut compositor, &frame(&layout, 250.0, "#FFA500FF", "#C3C3C3DD"), DrawStrategy::Opaque);
        draw(&mut compositor, &frame(&layout, 250.0, "#FFA500FF", "#000000DD"), DrawStrategy::Opaque);
        assert_eq!(compositor.mask_allocations(), 1);

        draw(&mut compositor, &frame(&layout, 250.0, "#FFA500FF", "#C3C3C380"), DrawStrategy::Opaque);
        assert_eq!(compositor.mask_allocations(), 2);
    }
}
