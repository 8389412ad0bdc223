pub mod slider;
pub mod theme;
