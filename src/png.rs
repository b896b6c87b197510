use std::{
    fs::File,
    io::{BufWriter, Cursor, Write as _},
    path::Path,
};

use crate::{
    core::unpremul,
    error::{BloomError, BloomResult},
    frame::FrameRGBA,
};

/// Straight-alpha RGBA8 bytes suitable for an image encoder.
pub fn to_straight_rgba8(frame: &FrameRGBA) -> Vec<u8> {
    if !frame.premultiplied {
        return frame.data.clone();
    }
    let mut out = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        out.extend_from_slice(&unpremul([px[0], px[1], px[2], px[3]]));
    }
    out
}

pub fn encode_png(frame: &FrameRGBA) -> BloomResult<Vec<u8>> {
    let rgba = to_straight_rgba8(frame);
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| BloomError::evaluation("frame buffer does not match its dimensions"))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode `frame` as PNG and write it to `path`.
///
/// The file handle lives only for the duration of the write.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn save_png(frame: &FrameRGBA, path: &Path) -> BloomResult<()> {
    let bytes = encode_png(frame)?;
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(&bytes)?;
    w.flush()?;
    tracing::debug!(bytes = bytes.len(), "png written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_png_decodes_to_same_size() {
        let frame = FrameRGBA::from_premul_bytes(3, 2, [10u8, 20, 30, 255].repeat(6)).unwrap();
        let bytes = encode_png(&frame).unwrap();
        let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.to_rgba8().get_pixel(1, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn straight_conversion_unpremultiplies() {
        let frame = FrameRGBA::from_premul_bytes(1, 1, vec![64, 0, 0, 128]).unwrap();
        let px = to_straight_rgba8(&frame);
        assert_eq!(px[3], 128);
        assert!((i32::from(px[0]) - 128).abs() <= 1);
    }

    #[test]
    fn save_png_into_missing_dir_is_io_error() {
        let frame = FrameRGBA::new_transparent(1, 1).unwrap();
        let err = save_png(&frame, Path::new("target/no/such/dir/out.png")).unwrap_err();
        assert!(matches!(err, BloomError::Io(_)));
    }
}
