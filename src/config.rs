// reveal.toml: window, images, ray fan, stroke look and obstacle layout.
// Every field has a default, so an empty (or missing) file gives the stock scene.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::Error;
use crate::mask::StrokeStyle;

pub const DEFAULT_CONFIG_PATH: &str = "reveal.toml";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowSetting {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
}

impl Default for WindowSetting {
    fn default() -> Self {
        Self {
            title: "Raycast Reveal".to_string(),
            width: 1280,
            height: 720,
            target_fps: 60,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ImageSetting {
    /// Shown through the mask at startup.
    pub top: PathBuf,
    /// Always fully drawn underneath at startup.
    pub bottom: PathBuf,
}

impl Default for ImageSetting {
    fn default() -> Self {
        Self { top: PathBuf::from("whitecat.png"), bottom: PathBuf::from("blackcat.png") }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RaySetting {
    pub count: usize,
}

impl Default for RaySetting {
    fn default() -> Self {
        Self { count: 3600 }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StrokeSetting {
    pub alpha: f32,
    pub weight: f32,
}

impl Default for StrokeSetting {
    fn default() -> Self {
        let style = StrokeStyle::default();
        Self { alpha: style.alpha, weight: style.weight }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HudSetting {
    pub show: bool,
}

impl Default for HudSetting {
    fn default() -> Self {
        Self { show: true }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowSetting,
    pub images: ImageSetting,
    pub rays: RaySetting,
    pub stroke: StrokeSetting,
    pub hud: HudSetting,
    /// Obstacles as `[x1, y1, x2, y2]` fractions of the window size.
    pub obstacles: Vec<[f32; 4]>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowSetting::default(),
            images: ImageSetting::default(),
            rays: RaySetting::default(),
            stroke: StrokeSetting::default(),
            hud: HudSetting::default(),
            obstacles: vec![
                [0.1, 0.1, 0.2, 0.2],
                [0.4, 0.1, 0.5, 0.2],
                [0.7, 0.15, 0.85, 0.25],
                [0.2, 0.3, 0.4, 0.35],
                [0.6, 0.4, 0.7, 0.5],
                [0.8, 0.3, 0.9, 0.4],
            ],
        }
    }
}

impl Config {
    /// Read `path`; a missing file means "use the defaults".
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
        let config: Config = toml::from_str(&text)
            .map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })?;
        config.validate()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.rays.count == 0 {
            return Err(Error::Config("rays.count must be > 0".to_string()));
        }
        if !(self.stroke.weight > 0.0) {
            return Err(Error::Config(format!("stroke.weight must be > 0, got {}", self.stroke.weight)));
        }
        if !(0.0..=1.0).contains(&self.stroke.alpha) {
            return Err(Error::Config(format!("stroke.alpha must be in [0,1], got {}", self.stroke.alpha)));
        }
        Ok(())
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle { alpha: self.stroke.alpha, weight: self.stroke.weight }
    }
}
