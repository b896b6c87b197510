use kurbo::Shape as _;

use crate::{
    core::{BezPath, Point, Rect, Rgba8},
    error::{BloomError, BloomResult},
    frame::FrameRGBA,
};

/// Flattening tolerance used when turning shapes into paths.
const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillPath { path: BezPath, color: Rgba8 },
    StrokePath { path: BezPath, width: f64, color: Rgba8 },
}

/// Ordered vector draw list for a single raster target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pending: BezPath,
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an axis-aligned rectangle to the pending path.
    pub fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        let rect = Rect::new(x, y, x + w, y + h);
        self.pending.extend(rect.path_elements(PATH_TOLERANCE));
        self
    }

    /// Append a circle to the pending path.
    pub fn circle(&mut self, center: Point, radius: f64) -> &mut Self {
        let circle = kurbo::Circle::new(center, radius);
        self.pending.extend(circle.path_elements(PATH_TOLERANCE));
        self
    }

    /// Stroke and consume the pending path.
    pub fn stroke(&mut self, width: f64, color: Rgba8) -> &mut Self {
        let path = std::mem::take(&mut self.pending);
        self.ops.push(DrawOp::StrokePath { path, width, color });
        self
    }

    /// Fill and consume the pending path.
    pub fn fill(&mut self, color: Rgba8) -> &mut Self {
        let path = std::mem::take(&mut self.pending);
        self.ops.push(DrawOp::FillPath { path, color });
        self
    }

    /// Rasterize every op onto a transparent `width x height` frame.
    #[tracing::instrument(skip(self), fields(ops = self.ops.len()))]
    pub fn render(&self, width: u32, height: u32) -> BloomResult<FrameRGBA> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| BloomError::evaluation("draw target width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| BloomError::evaluation("draw target height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(BloomError::validation("draw target must be non-empty"));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        for op in &self.ops {
            draw_op(&mut ctx, op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        FrameRGBA::from_premul_bytes(width, height, pixmap.data_as_u8_slice().to_vec())
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillPath { path, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath { path, width, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
