use crate::error::{BloomError, BloomResult};

pub use kurbo::{BezPath, Point, Rect};

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Grow by `pad` pixels on every side.
    pub fn padded(self, pad: u32) -> BloomResult<Self> {
        let grow = pad
            .checked_mul(2)
            .ok_or_else(|| BloomError::validation("padding overflows u32"))?;
        let width = self
            .width
            .checked_add(grow)
            .ok_or_else(|| BloomError::validation("padded width overflows u32"))?;
        let height = self
            .height
            .checked_add(grow)
            .ok_or_else(|| BloomError::validation("padded height overflows u32"))?;
        Ok(Self { width, height })
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte length of an RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> BloomResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BloomError::evaluation("rgba8 buffer size overflow"))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Convert one premultiplied pixel back to straight alpha.
pub fn unpremul(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let unmul = |c: u8| -> u8 {
        let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
        v.min(255) as u8
    };
    [unmul(px[0]), unmul(px[1]), unmul(px[2]), a]
}
