// Every error the app can surface. Each variant states *where* things went wrong.
// Geometry never fails: degenerate rays/edges are just "no hit".

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// One of the two reveal layers could not be opened/decoded.
    #[error("Image load error ({}): {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The config file exists but could not be read.
    #[error("Config read error ({}): {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `Config`.
    #[error("Config parse error ({}): {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config value is out of range.
    #[error("Config error: {0}")]
    Config(String),

    /// Two buffers that must match in size don't.
    #[error("Size mismatch in {what}: expected {expected_w}x{expected_h}, got {got_w}x{got_h}")]
    SizeMismatch {
        what: &'static str,
        expected_w: usize,
        expected_h: usize,
        got_w: usize,
        got_h: usize,
    },
}
