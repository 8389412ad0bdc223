use crate::gui::slider::{
    DEFAULT_BAR_HEIGHT, DEFAULT_SLIDER_RADIUS, DEFAULT_SLOT_COUNT, DEFAULT_SLOT_RADIUS, Easing,
    Intervals, SliderConfig, SliderError,
};
use crate::gui::theme::Color;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// On-disk shape of the slider configuration.
///
/// Values are only checked when turned into a [`SliderConfig`], which runs
/// the same validation as the widget setters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub slot_count: usize,
    pub intervals: Option<Intervals>,
    pub filled_color: Color,
    pub empty_color: Color,
    pub bar_height: f64,
    pub slot_radius: f64,
    pub slider_radius: f64,
    pub animate: bool,
    pub easing: Easing,
    pub density: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let config = SliderConfig::default();
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            intervals: None,
            filled_color: config.filled_color(),
            empty_color: config.empty_color(),
            bar_height: DEFAULT_BAR_HEIGHT,
            slot_radius: DEFAULT_SLOT_RADIUS,
            slider_radius: DEFAULT_SLIDER_RADIUS,
            animate: config.animate(),
            easing: config.easing(),
            density: config.density(),
        }
    }
}

impl TryFrom<Settings> for SliderConfig {
    type Error = SliderError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let mut config = SliderConfig::default();
        config.set_slot_count(settings.slot_count)?;
        // intervals win over an explicit slot count
        config.set_intervals(settings.intervals);
        config.set_bar_height(settings.bar_height)?;
        config.set_slot_radius(settings.slot_radius)?;
        config.set_slider_radius(settings.slider_radius)?;
        config.set_filled_color(settings.filled_color);
        config.set_empty_color(settings.empty_color);
        config.set_animate(settings.animate);
        config.set_easing(settings.easing);
        config.set_density(settings.density)?;
        Ok(config)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid slider settings: {0}")]
    Slider(#[from] SliderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "slotbar", "slotbar").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads settings from `path` (or the user config file) layered under
/// `SLOTBAR_*` environment variables. A missing file yields the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(path.is_some()))
        .add_source(config::Environment::with_prefix("SLOTBAR"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config(path: Option<&Path>) -> Result<SliderConfig, ConfigError> {
    let settings = load_settings(path)?;
    log::debug!("Loaded settings: {settings:?}");
    Ok(SliderConfig::try_from(settings)?)
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
