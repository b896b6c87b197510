use crate::{
    core::Canvas,
    error::{BloomError, BloomResult},
    frame::FrameRGBA,
};

/// Kernel half-width used when only a standard deviation is given.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    sigma.ceil() as u32
}

/// Separable gaussian blur over a premultiplied RGBA8 buffer.
///
/// Samples outside the image are clamped to the nearest edge pixel.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> BloomResult<Vec<u8>> {
    let expected_len = Canvas::new(width, height).rgba8_len()?;
    if src.len() != expected_len {
        return Err(BloomError::evaluation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    convolve_axis(src, &mut tmp, width, height, &kernel, Axis::X);
    convolve_axis(&tmp, &mut out, width, height, &kernel, Axis::Y);
    Ok(out)
}

pub fn blur_frame(frame: &FrameRGBA, radius: u32, sigma: f32) -> BloomResult<FrameRGBA> {
    let data = blur_rgba8_premul(&frame.data, frame.width, frame.height, radius, sigma)?;
    FrameRGBA::from_premul_bytes(frame.width, frame.height, data)
}

/// Normalized gaussian weights in Q16, summing to exactly 1 << 16.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BloomResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BloomError::validation("blur sigma must be > 0"));
    }

    let r = radius as i64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(BloomError::evaluation("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536) as u32)
        .collect();

    // Rounding drift goes to the center tap.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

fn convolve_axis(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, slot) in acc.iter_mut().enumerate() {
                    *slot += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, &v) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(v);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    u8::try_from((acc + (1 << 15)) >> 16).unwrap_or(u8::MAX)
}
