use crate::{
    blur_cpu::blur_frame,
    dilate_cpu::dilate_frame,
    error::{BloomError, BloomResult},
    frame::FrameRGBA,
    params::BloomParams,
};

/// Copy `src` into a transparent `width x height` frame with its origin at
/// `(dx, dy)`. Pixels that would fall outside the new bounds are dropped.
pub fn translate_into(
    src: &FrameRGBA,
    width: u32,
    height: u32,
    dx: u32,
    dy: u32,
) -> BloomResult<FrameRGBA> {
    let mut out = FrameRGBA::new_transparent(width, height)?;
    if src.data.len() != src.bounds().rgba8_len()? {
        return Err(BloomError::evaluation("translate source has a malformed buffer"));
    }

    let copy_w = src.width.min(width.saturating_sub(dx)) as usize;
    if copy_w == 0 {
        return Ok(out);
    }
    let src_stride = src.width as usize * 4;
    let dst_stride = width as usize * 4;
    for y in 0..src.height {
        let ty = y + dy;
        if ty >= height {
            break;
        }
        let s = y as usize * src_stride;
        let d = ty as usize * dst_stride + dx as usize * 4;
        out.data[d..d + copy_w * 4].copy_from_slice(&src.data[s..s + copy_w * 4]);
    }
    Ok(out)
}

/// Grow `src` by `padding_px` on each side, then dilate and blur it.
///
/// The result is `(W + 2p) x (H + 2p)` and is meant to be drawn at the
/// original origin minus `p`, behind the unfiltered source.
#[tracing::instrument(skip(src), fields(width = src.width, height = src.height))]
pub fn bloom(src: &FrameRGBA, params: &BloomParams) -> BloomResult<FrameRGBA> {
    params.validate()?;
    if src.bounds().is_empty() {
        return Err(BloomError::validation("bloom source must be non-empty"));
    }

    let pad = params.padding_px;
    let size = src.bounds().padded(pad)?;
    let extended = translate_into(src, size.width, size.height, pad, pad)?;
    tracing::debug!(width = size.width, height = size.height, "extended canvas");

    let dilated = dilate_frame(&extended, params.dilate_radius, params.neighborhood)?;

    let radius = params.effective_blur_radius();
    tracing::debug!(radius, sigma = params.sigma, "gaussian blur");
    blur_frame(&dilated, radius, params.sigma)
}
