use std::path::PathBuf;

use glowbox::{BloomParams, FrameRGBA, SceneParams, bloom, light_source, render_demo, save_png};

#[test]
fn demo_renders_220_square_opaque_frame() {
    let frame = render_demo(&SceneParams::default(), &BloomParams::default()).unwrap();
    assert_eq!((frame.width, frame.height), (220, 220));
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn glow_reaches_beyond_the_stroke() {
    let frame = render_demo(&SceneParams::default(), &BloomParams::default()).unwrap();
    let background = [40, 40, 40, 255];
    assert_ne!(frame.pixel(12, 110), Some(background));
    assert_eq!(frame.pixel(0, 0).map(|px| px[3]), Some(255));
}

#[test]
fn original_is_redrawn_on_top_of_bloom() {
    let scene = SceneParams::default();
    let params = BloomParams::default();
    let original = light_source(&scene).unwrap();
    let frame = render_demo(&scene, &params).unwrap();

    let mut opaque = 0usize;
    for y in 0..original.height {
        for x in 0..original.width {
            let px = original.pixel(x, y).unwrap();
            if px[3] != 255 {
                continue;
            }
            opaque += 1;
            assert_eq!(frame.pixel(x + 10, y + 10), Some(px), "mismatch at ({x},{y})");
        }
    }
    assert!(opaque > 0);
}

#[test]
fn bloom_output_size_tracks_padding() {
    let src = FrameRGBA::from_premul_bytes(6, 9, [255u8, 255, 255, 255].repeat(54)).unwrap();
    let params = BloomParams {
        padding_px: 4,
        ..BloomParams::default()
    };
    let out = bloom(&src, &params).unwrap();
    assert_eq!((out.width, out.height), (14, 17));
}

#[test]
fn saved_png_decodes_at_full_size() {
    let dir = PathBuf::from("target").join("render_bloom");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("output.png");
    let _ = std::fs::remove_file(&out_path);

    let frame = render_demo(&SceneParams::default(), &BloomParams::default()).unwrap();
    save_png(&frame, &out_path).unwrap();

    let meta = std::fs::metadata(&out_path).unwrap();
    assert!(meta.len() > 0);
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (220, 220));
}
