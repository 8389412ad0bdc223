//! # slotbar
//!
//! A horizontal slider with a fixed number of slots. The indicator follows
//! the pointer while dragged and snaps to the nearest slot on release,
//! optionally easing into place. Rendering goes through cairo.
//!
//! The widget core knows nothing about a UI toolkit: the host feeds it
//! sizes, pointer events and animation ticks, and hands it a cairo context
//! to draw into.
//!
//! ```rust,no_run
//! use slotbar::events::{Point, PointerEvent};
//! use slotbar::gui::slider::{Size, Slider};
//!
//! let mut slider = Slider::default();
//! slider.set_on_slide(|index| println!("slot {index}"));
//! slider.resize(Size::new(500.0, 80.0));
//! slider.handle(PointerEvent::Down(Point::new(240.0, 40.0)));
//! slider.handle(PointerEvent::Up(Point::new(410.0, 40.0)));
//! assert_eq!(slider.current_index(), 4);
//! ```

pub mod config;
pub mod events;
pub mod gui;
