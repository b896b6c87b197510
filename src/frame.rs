use crate::{
    core::Canvas,
    error::{BloomError, BloomResult},
};

/// Row-major RGBA8 raster. `data.len() == width * height * 4` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Allocate a zero-filled (fully transparent) premultiplied frame.
    pub fn new_transparent(width: u32, height: u32) -> BloomResult<Self> {
        let len = Canvas::new(width, height).rgba8_len()?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
            premultiplied: true,
        })
    }

    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> BloomResult<Self> {
        let len = Canvas::new(width, height).rgba8_len()?;
        if data.len() != len {
            return Err(BloomError::validation(format!(
                "frame byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    pub fn bounds(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) -> BloomResult<()> {
        let idx = self.index(x, y).ok_or_else(|| {
            BloomError::evaluation(format!(
                "pixel ({x},{y}) is outside {}x{}",
                self.width, self.height
            ))
        })?;
        self.data[idx..idx + 4].copy_from_slice(&px);
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transparent_is_zeroed() {
        let f = FrameRGBA::new_transparent(3, 2).unwrap();
        assert_eq!(f.data.len(), 24);
        assert!(f.data.iter().all(|&b| b == 0));
        assert!(f.premultiplied);
    }

    #[test]
    fn from_premul_bytes_rejects_wrong_length() {
        assert!(FrameRGBA::from_premul_bytes(2, 2, vec![0; 15]).is_err());
        assert!(FrameRGBA::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn pixel_access_is_bounds_checked() {
        let mut f = FrameRGBA::new_transparent(2, 2).unwrap();
        f.set_pixel(1, 1, [1, 2, 3, 4]).unwrap();
        assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(f.pixel(2, 0), None);
        assert!(f.set_pixel(0, 2, [0; 4]).is_err());
    }
}
