//! Pixels from a [`Scene`]: evaluate, serialize to SVG, rasterize.

mod raster;
mod svg;

pub use raster::Rasterizer;
pub use svg::scene_to_svg;

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::{EncodeConfig, FfmpegEncoder, ensure_parent_dir},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{MergeVizError, MergeVizResult},
    },
    scene::{eval::Evaluator, model::Scene},
};

/// An RGBA8 frame, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Evaluate and rasterize a single frame.
///
/// Returns **premultiplied** RGBA8 pixels.
#[tracing::instrument(skip(scene, rasterizer))]
pub fn render_frame(
    scene: &Scene,
    frame: FrameIndex,
    rasterizer: &Rasterizer,
) -> MergeVizResult<FrameRGBA> {
    let eval = Evaluator::eval_frame(scene, frame)?;
    let svg = scene_to_svg(scene, &eval);
    let out = rasterizer.rasterize(&svg)?;
    if out.width != scene.canvas.width || out.height != scene.canvas.height {
        return Err(MergeVizError::evaluation(format!(
            "rasterized {}x{}, expected {}x{}",
            out.width, out.height, scene.canvas.width, scene.canvas.height
        )));
    }
    Ok(out)
}

/// Render a range of frames (inclusive start, exclusive end).
pub fn render_frames(
    scene: &Scene,
    range: FrameRange,
    rasterizer: &Rasterizer,
) -> MergeVizResult<Vec<FrameRGBA>> {
    if range.is_empty() {
        return Err(MergeVizError::validation("render range must be non-empty"));
    }
    range
        .iter()
        .map(|f| render_frame(scene, f, rasterizer))
        .collect()
}

/// Write a frame as a straight-alpha PNG.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> MergeVizResult<()> {
    ensure_parent_dir(path)?;
    let data = if frame.premultiplied {
        unpremultiply(&frame.data)
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frame range to render (start inclusive, end exclusive). `None` renders the whole scene.
    pub range: Option<FrameRange>,
    /// Whether to overwrite the output if it already exists.
    pub overwrite: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: None,
            overwrite: true,
        }
    }
}

/// Render a scene to MP4 through the system `ffmpeg` binary.
///
/// Frames are flattened over the scene background. Requires an integer frame rate.
#[tracing::instrument(skip(scene, out_path, opts, rasterizer), fields(out = %out_path.as_ref().display()))]
pub fn render_to_mp4(
    scene: &Scene,
    out_path: impl AsRef<Path>,
    opts: RenderToMp4Opts,
    rasterizer: &Rasterizer,
) -> MergeVizResult<()> {
    scene.validate()?;
    let range = opts.range.unwrap_or_else(|| scene.frame_range());
    if range.end.0 > scene.duration.0 {
        return Err(MergeVizError::validation(
            "render_to_mp4 range must be within scene duration",
        ));
    }
    if range.is_empty() {
        return Err(MergeVizError::validation(
            "render_to_mp4 range must be non-empty",
        ));
    }
    if scene.fps.den != 1 {
        return Err(MergeVizError::validation(
            "render_to_mp4 requires integer fps (fps.den == 1)",
        ));
    }

    let cfg = EncodeConfig {
        width: scene.canvas.width,
        height: scene.canvas.height,
        fps: scene.fps.num,
        out_path: PathBuf::from(out_path.as_ref()),
        overwrite: opts.overwrite,
    };
    let mut enc = FfmpegEncoder::new(cfg, scene.background_rgba8)?;
    for f in range.iter() {
        let frame = render_frame(scene, f, rasterizer)?;
        enc.encode_frame(&frame)?;
    }
    enc.finish()?;
    tracing::info!(frames = range.len_frames(), "encoded video");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
