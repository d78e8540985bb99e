// The two image layers and how one is revealed through the mask over the other.
// Visual: the base image always fills the window; the revealed image shows
// only where the ray strokes landed.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::debug;

use crate::error::Error;
use crate::types::{pack_rgb, unpack_rgb, FrameBuffer, Mask};

/// Source rectangle `(sx, sy, sw, sh)` that fills a `view_w x view_h` viewport
/// without distortion: the centre of the image is cropped to the viewport aspect.
pub fn fill_crop(img_w: u32, img_h: u32, view_w: usize, view_h: usize) -> (u32, u32, u32, u32) {
    let img_aspect = img_w as f64 / img_h.max(1) as f64;
    let view_aspect = view_w as f64 / view_h.max(1) as f64;

    if view_aspect > img_aspect {
        // Wider viewport: keep full width, trim top/bottom.
        let sh = ((img_w as f64 / view_aspect).round() as u32).clamp(1, img_h.max(1));
        (0, (img_h - sh) / 2, img_w, sh)
    } else {
        // Taller viewport: keep full height, trim left/right.
        let sw = ((img_h as f64 * view_aspect).round() as u32).clamp(1, img_w.max(1));
        ((img_w - sw) / 2, 0, sw, img_h)
    }
}

/// Crop + resize an RGB image into a window-sized 0x00RRGGBB buffer.
pub fn layer_from_image(img: &RgbImage, width: usize, height: usize) -> FrameBuffer {
    let (sx, sy, sw, sh) = fill_crop(img.width(), img.height(), width, height);
    let cropped = imageops::crop_imm(img, sx, sy, sw, sh).to_image();
    let scaled = imageops::resize(&cropped, width as u32, height as u32, FilterType::Triangle);

    let pixels = scaled.pixels().map(|p| pack_rgb(p[0], p[1], p[2])).collect();
    FrameBuffer { width, height, pixels }
}

/// Load an image from disk and fit it to the window.
pub fn load_layer(path: &Path, width: usize, height: usize) -> Result<FrameBuffer, Error> {
    let img = image::open(path)
        .map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?
        .to_rgb8();
    debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(layer_from_image(&img, width, height))
}

/// Which image shows through the mask and which sits underneath.
pub struct Layers {
    pub revealed: FrameBuffer,
    pub base: FrameBuffer,
}

impl Layers {
    /// Exchange roles: what was revealed becomes the base and vice versa.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.revealed, &mut self.base);
    }
}

/// Base everywhere, then the revealed layer mixed in by mask alpha.
/// Visual: where strokes overlap the mask is denser and the top image shows more.
pub fn reveal(screen: &mut FrameBuffer, layers: &Layers, mask: &Mask) -> Result<(), Error> {
    for (what, w, h) in [
        ("base layer", layers.base.width, layers.base.height),
        ("revealed layer", layers.revealed.width, layers.revealed.height),
        ("reveal mask", mask.width, mask.height),
    ] {
        if w != screen.width || h != screen.height {
            return Err(Error::SizeMismatch {
                what,
                expected_w: screen.width,
                expected_h: screen.height,
                got_w: w,
                got_h: h,
            });
        }
    }

    screen.pixels.copy_from_slice(&layers.base.pixels);

    for (i, &a) in mask.alpha.iter().enumerate() {
        if a <= 0.0 { continue; }                 // visual: base only
        let top = layers.revealed.pixels[i];
        if a >= 1.0 {                             // visual: fully revealed
            screen.pixels[i] = top;
            continue;
        }

        let (rb, gb, bb) = unpack_rgb(screen.pixels[i]);
        let (rt, gt, bt) = unpack_rgb(top);
        screen.pixels[i] = pack_rgb(mix(rb, rt, a), mix(gb, gt, a), mix(bb, bt, a));
    }
    Ok(())
}

#[inline]
fn mix(bottom: u8, top: u8, a: f32) -> u8 {
    (a * top as f32 + (1.0 - a) * bottom as f32).round().clamp(0.0, 255.0) as u8
}
