// Ring rasterizer: turns (center, radius, mode) into pixel writes.
// Visual: a thin dotted circle outline. At big radii the 360 samples no longer
// cover the whole circumference, so the ring looks dotted; that is the look of the effect.

use crate::error::Result;
use crate::ripple::MAX_FRAMES;
use crate::types::{BACKGROUND, PixelSink, pack_rgb};

/// Number of samples around the ring (one per degree).
pub const RING_SAMPLES: u32 = 360;

/// Peak channel value of a freshly spawned ring.
pub const MAX_BRIGHTNESS: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingMode {
    /// Paint the ring in the background color (removes last frame's ring).
    Erase,
    /// Paint the ring with brightness fading by radius.
    Draw,
}

/// Channel value for a ring of `radius`: full brightness at 0, fading linearly
/// toward black as the radius approaches `MAX_FRAMES`.
pub fn intensity(radius: u32) -> u8 {
    let fade = 1.0 - radius as f32 / MAX_FRAMES as f32;
    (MAX_BRIGHTNESS as f32 * fade).clamp(0.0, MAX_BRIGHTNESS as f32) as u8
}

/// The packed color a ring is painted with.
pub fn ring_color(radius: u32, mode: RingMode) -> u32 {
    match mode {
        RingMode::Erase => BACKGROUND,
        RingMode::Draw => {
            let c = intensity(radius);
            pack_rgb(c, c, c)
        }
    }
}

/// Rasterize one ring into `sink`. Samples that land outside the sink are skipped.
pub fn draw_ring<S: PixelSink + ?Sized>(
    sink: &mut S,
    center_x: i32,
    center_y: i32,
    radius: u32,
    mode: RingMode,
) -> Result<()> {
    let (width, height) = sink.dimensions();
    let color = ring_color(radius, mode);
    let r = radius as f64;

    for deg in 0..RING_SAMPLES {
        let angle = (deg as f64).to_radians();
        let dx = (r * angle.cos()).round() as i64;
        let dy = (r * angle.sin()).round() as i64;
        let x = center_x as i64 + dx;
        let y = center_y as i64 + dy;

        // clip
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            continue;
        }
        sink.put_pixel(x as usize, y as usize, color)?;
    }
    Ok(())
}
