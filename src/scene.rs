//! The demo scene: a stroked rectangle and circle acting as a light source,
//! bloomed and composited over a flat backdrop.

use crate::{
    bloom::bloom,
    composite_cpu::over_at,
    core::Point,
    draw_cpu::DrawList,
    error::BloomResult,
    frame::FrameRGBA,
    params::{BloomParams, SceneParams, check_output_canvas},
};

/// Draw the unfiltered light source onto a transparent canvas.
pub fn light_source(scene: &SceneParams) -> BloomResult<FrameRGBA> {
    scene.validate()?;
    let [x, y, w, h] = scene.rect;
    let [cx, cy] = scene.circle_center;

    let mut list = DrawList::new();
    list.rectangle(x, y, w, h)
        .circle(Point::new(cx, cy), scene.circle_radius)
        .stroke(scene.line_width, scene.stroke);
    list.render(scene.canvas.width, scene.canvas.height)
}

/// Backdrop, then the bloom at the origin, then the source re-applied on top
/// at `padding_px` so both line up.
pub fn compose(
    original: &FrameRGBA,
    bloomed: &FrameRGBA,
    scene: &SceneParams,
    padding_px: u32,
) -> BloomResult<FrameRGBA> {
    let (w, h) = (bloomed.width, bloomed.height);

    let mut backdrop = DrawList::new();
    backdrop
        .rectangle(0.0, 0.0, f64::from(w), f64::from(h))
        .fill(scene.background);
    let mut out = backdrop.render(w, h)?;

    over_at(&mut out, bloomed, 0, 0, 1.0)?;
    let pad = i64::from(padding_px);
    over_at(&mut out, original, pad, pad, 1.0)?;
    Ok(out)
}

/// Full pipeline: light source, bloom, composition.
#[tracing::instrument(skip_all)]
pub fn render_demo(scene: &SceneParams, params: &BloomParams) -> BloomResult<FrameRGBA> {
    params.validate()?;
    check_output_canvas(scene.canvas, params.padding_px)?;
    let original = light_source(scene)?;
    let bloomed = bloom(&original, params)?;
    let out = compose(&original, &bloomed, scene, params.padding_px)?;
    tracing::info!(width = out.width, height = out.height, "rendered bloom demo");
    Ok(out)
}
