use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_glowbox")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "glowbox.exe"
            } else {
                "glowbox"
            });
            p
        })
}

#[test]
fn cli_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (220, 220));
}

#[test]
fn cli_applies_config_file() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("small.json");
    let out_path = dir.join("small.png");
    let _ = std::fs::remove_file(&out_path);

    let cfg = serde_json::json!({
        "scene": {
            "canvas": { "width": 40, "height": 30 },
            "rect": [2.0, 2.0, 36.0, 26.0],
            "circle_center": [20.0, 15.0],
            "circle_radius": 8.0
        },
        "bloom": { "padding_px": 5, "sigma": 3.0 }
    });
    std::fs::write(&cfg_path, serde_json::to_vec_pretty(&cfg).unwrap()).unwrap();

    let status = std::process::Command::new(exe())
        .arg("--config")
        .arg(&cfg_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (50, 40));
}

#[test]
fn cli_fails_when_output_dir_is_missing() {
    let status = std::process::Command::new(exe())
        .args(["--out", "target/cli_smoke/missing/dir/out.png"])
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_rejects_padding_that_cannot_be_rasterized() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("huge_padding.json");
    let out_path = dir.join("huge_padding.png");
    let _ = std::fs::remove_file(&out_path);

    let cfg = serde_json::json!({ "bloom": { "padding_px": 1_000_000 } });
    std::fs::write(&cfg_path, serde_json::to_vec(&cfg).unwrap()).unwrap();

    let status = std::process::Command::new(exe())
        .arg("--config")
        .arg(&cfg_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}
