#![forbid(unsafe_code)]

pub mod bloom;
pub mod blur_cpu;
pub mod composite_cpu;
pub mod core;
pub mod dilate_cpu;
pub mod draw_cpu;
pub mod error;
pub mod frame;
pub mod params;
pub mod png;
pub mod scene;

pub use bloom::{bloom, translate_into};
pub use crate::core::{Canvas, Rgba8};
pub use dilate_cpu::Neighborhood;
pub use draw_cpu::{DrawList, DrawOp};
pub use error::{BloomError, BloomResult};
pub use frame::FrameRGBA;
pub use params::{BloomParams, DemoConfig, SceneParams};
pub use png::{encode_png, save_png};
pub use scene::{compose, light_source, render_demo};
