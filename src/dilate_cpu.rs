//! Morphological dilation over premultiplied RGBA8 buffers.
//!
//! Each output channel is the maximum of that channel over the neighborhood of
//! the pixel. Window taps that fall outside the image clamp to the edge, so the
//! border never wraps around. Channels are handled independently, so the
//! result need not be any single neighbor's color.

use crate::{
    core::Canvas,
    error::{BloomError, BloomResult},
    frame::FrameRGBA,
};

/// Shape of the dilation window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Full `(2r+1)^2` window (all 8 directions).
    #[default]
    Square,
    /// Offsets with `dx^2 + dy^2 <= r^2`.
    Disk,
}

pub fn dilate_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    shape: Neighborhood,
) -> BloomResult<Vec<u8>> {
    let expected_len = Canvas::new(width, height).rgba8_len()?;
    if src.len() != expected_len {
        return Err(BloomError::evaluation(
            "dilate_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let mut out = vec![0u8; expected_len];
    match shape {
        Neighborhood::Square => {
            // Max is separable over a box window.
            let mut tmp = vec![0u8; expected_len];
            max_axis(src, &mut tmp, width, height, radius, true);
            max_axis(&tmp, &mut out, width, height, radius, false);
        }
        Neighborhood::Disk => max_disk(src, &mut out, width, height, radius),
    }
    Ok(out)
}

pub fn dilate_frame(frame: &FrameRGBA, radius: u32, shape: Neighborhood) -> BloomResult<FrameRGBA> {
    let data = dilate_rgba8_premul(&frame.data, frame.width, frame.height, radius, shape)?;
    FrameRGBA::from_premul_bytes(frame.width, frame.height, data)
}

fn max_axis(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32, horizontal: bool) {
    let r = i64::from(radius);
    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut best = [0u8; 4];
            for d in -r..=r {
                let (sx, sy) = if horizontal {
                    ((x + d).clamp(0, w - 1), y)
                } else {
                    (x, (y + d).clamp(0, h - 1))
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, b) in best.iter_mut().enumerate() {
                    *b = (*b).max(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            dst[out_idx..out_idx + 4].copy_from_slice(&best);
        }
    }
}

fn max_disk(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let r = i64::from(radius);
    let offsets: Vec<(i64, i64)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx * dx + dy * dy <= r * r)
        .collect();

    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut best = [0u8; 4];
            for &(dx, dy) in &offsets {
                let sx = (x + dx).clamp(0, w - 1);
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, b) in best.iter_mut().enumerate() {
                    *b = (*b).max(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            dst[out_idx..out_idx + 4].copy_from_slice(&best);
        }
    }
}
