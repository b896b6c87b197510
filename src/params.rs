use std::{fs::File, io::BufReader, path::Path};

use crate::{
    core::{Canvas, Rgba8},
    dilate_cpu::Neighborhood,
    error::{BloomError, BloomResult},
};

/// Upper bound on the transparent margin added around the source.
pub const MAX_PADDING_PX: u32 = 4096;

/// Knobs for the bloom transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BloomParams {
    /// Transparent margin added on every side before filtering.
    pub padding_px: u32,
    pub dilate_radius: u32,
    pub neighborhood: Neighborhood,
    /// Gaussian standard deviation.
    pub sigma: f32,
    /// Kernel half-width; `None` means `ceil(sigma)`.
    pub blur_radius: Option<u32>,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            padding_px: 10,
            dilate_radius: 3,
            neighborhood: Neighborhood::Square,
            sigma: 10.0,
            blur_radius: None,
        }
    }
}

impl BloomParams {
    pub fn validate(&self) -> BloomResult<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(BloomError::validation("bloom.sigma must be finite and > 0"));
        }
        if self.padding_px > MAX_PADDING_PX {
            return Err(BloomError::validation(format!(
                "bloom.padding_px must be <= {MAX_PADDING_PX}"
            )));
        }
        if self.dilate_radius > 256 {
            return Err(BloomError::validation("bloom.dilate_radius must be <= 256"));
        }
        if self.effective_blur_radius() > 256 {
            return Err(BloomError::validation("bloom.blur_radius must be <= 256"));
        }
        Ok(())
    }

    pub fn effective_blur_radius(&self) -> u32 {
        self.blur_radius
            .unwrap_or_else(|| crate::blur_cpu::radius_for_sigma(self.sigma))
    }
}

/// The light source and the backdrop it is composited onto.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub canvas: Canvas,
    pub line_width: f64,
    pub stroke: Rgba8,
    /// `[x, y, width, height]`.
    pub rect: [f64; 4],
    pub circle_center: [f64; 2],
    pub circle_radius: f64,
    pub background: Rgba8,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(200, 200),
            line_width: 3.0,
            stroke: Rgba8::rgb(147, 112, 219),
            rect: [10.0, 10.0, 180.0, 180.0],
            circle_center: [100.0, 100.0],
            circle_radius: 50.0,
            background: Rgba8::rgb(40, 40, 40),
        }
    }
}

impl SceneParams {
    pub fn validate(&self) -> BloomResult<()> {
        if self.canvas.is_empty() {
            return Err(BloomError::validation("scene.canvas must be non-empty"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(BloomError::validation("scene.canvas must fit in u16"));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(BloomError::validation(
                "scene.line_width must be finite and > 0",
            ));
        }
        if self.rect.iter().any(|v| !v.is_finite()) || self.rect[2] < 0.0 || self.rect[3] < 0.0 {
            return Err(BloomError::validation(
                "scene.rect must be finite with non-negative size",
            ));
        }
        if self.circle_center.iter().any(|v| !v.is_finite())
            || !self.circle_radius.is_finite()
            || self.circle_radius < 0.0
        {
            return Err(BloomError::validation(
                "scene.circle must be finite with radius >= 0",
            ));
        }
        Ok(())
    }
}

/// Everything the demo binary can be configured with.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub scene: SceneParams,
    pub bloom: BloomParams,
}

impl DemoConfig {
    pub fn from_path(path: &Path) -> BloomResult<Self> {
        let f = File::open(path)?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| BloomError::serde(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BloomResult<()> {
        self.scene.validate()?;
        self.bloom.validate()?;
        check_output_canvas(self.scene.canvas, self.bloom.padding_px)?;
        Ok(())
    }
}

/// The composited frame is the scene canvas grown by the bloom padding and
/// must still fit the rasterizer's u16 target size.
pub fn check_output_canvas(canvas: Canvas, padding_px: u32) -> BloomResult<Canvas> {
    let out = canvas.padded(padding_px)?;
    let max = u32::from(u16::MAX);
    if out.width > max || out.height > max {
        return Err(BloomError::validation(format!(
            "padded output {}x{} exceeds {max}x{max}",
            out.width, out.height
        )));
    }
    Ok(out)
}
