use crate::{
    error::{BloomError, BloomResult},
    frame::FrameRGBA,
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u8;
    let src = src.map(|c| scale255(c, op));
    if src[3] == 0 {
        return dst;
    }

    let keep = 255 - src[3];
    std::array::from_fn(|i| src[i].saturating_add(scale255(dst[i], keep)))
}

/// Composite `src` over `dst` with its top-left corner at `(dx, dy)`.
///
/// Parts of `src` that land outside `dst` are dropped.
pub fn over_at(
    dst: &mut FrameRGBA,
    src: &FrameRGBA,
    dx: i64,
    dy: i64,
    opacity: f32,
) -> BloomResult<()> {
    if dst.data.len() != dst.bounds().rgba8_len()? || src.data.len() != src.bounds().rgba8_len()? {
        return Err(BloomError::evaluation(
            "over_at expects frames whose byte length matches width*height*4",
        ));
    }

    let dst_w = i64::from(dst.width);
    let dst_h = i64::from(dst.height);
    let src_w = i64::from(src.width);

    let x0 = dx.max(0);
    let y0 = dy.max(0);
    let x1 = (dx + src_w).min(dst_w);
    let y1 = (dy + i64::from(src.height)).min(dst_h);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for y in y0..y1 {
        let sy = y - dy;
        for x in x0..x1 {
            let sx = x - dx;
            let s_idx = ((sy * src_w + sx) as usize) * 4;
            let d_idx = ((y * dst_w + x) as usize) * 4;
            let s = &src.data[s_idx..s_idx + 4];
            let d = &mut dst.data[d_idx..d_idx + 4];
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// `c * f / 255`, rounded.
fn scale255(c: u8, f: u8) -> u8 {
    ((u32::from(c) * u32::from(f) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const STROKE: PremulRgba8 = [147, 112, 219, 255];
    const BACKDROP: PremulRgba8 = [40, 40, 40, 255];

    #[test]
    fn opaque_stroke_hides_backdrop() {
        assert_eq!(over(BACKDROP, STROKE, 1.0), STROKE);
    }

    #[test]
    fn invisible_source_leaves_backdrop() {
        assert_eq!(over(BACKDROP, STROKE, 0.0), BACKDROP);
        assert_eq!(over(BACKDROP, [0, 0, 0, 0], 1.0), BACKDROP);
        assert_eq!(over(BACKDROP, STROKE, f32::NAN), BACKDROP);
    }

    #[test]
    fn half_opacity_stroke_mixes_with_backdrop() {
        assert_eq!(over(BACKDROP, STROKE, 0.5), [94, 76, 130, 255]);
    }

    #[test]
    fn faint_glow_over_empty_canvas_is_unchanged() {
        let glow = [15, 11, 22, 26];
        assert_eq!(over([0, 0, 0, 0], glow, 1.0), glow);
    }

    #[test]
    fn over_at_places_and_clips() {
        let mut dst = FrameRGBA::new_transparent(4, 4).unwrap();
        let src = FrameRGBA::from_premul_bytes(2, 2, [9u8, 8, 7, 255].repeat(4)).unwrap();

        over_at(&mut dst, &src, 3, 3, 1.0).unwrap();
        assert_eq!(dst.pixel(3, 3), Some([9, 8, 7, 255]));
        assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 0]));

        over_at(&mut dst, &src, -1, -1, 1.0).unwrap();
        assert_eq!(dst.pixel(0, 0), Some([9, 8, 7, 255]));
        assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));

        let before = dst.clone();
        over_at(&mut dst, &src, 10, 0, 1.0).unwrap();
        assert_eq!(dst, before);
    }
}
