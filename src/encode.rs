//! MP4 output through the system `ffmpeg` binary.
//!
//! Frames are piped as raw RGBA on stdin. Using the binary rather than linking FFmpeg keeps the
//! build free of native dev headers.

use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{MergeVizError, MergeVizResult},
    render::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> MergeVizResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MergeVizError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(MergeVizError::validation("encode fps must be non-zero"));
        }
        // yuv420p subsamples chroma 2x2.
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(MergeVizError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Arguments passed to `ffmpeg`, output path last.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let overwrite = if self.overwrite { "-y" } else { "-n" };
        let mut args: Vec<String> = vec![
            overwrite.into(),
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pix_fmt".into(),
            "rgba".into(),
            "-s".into(),
            format!("{}x{}", self.width, self.height),
            "-r".into(),
            self.fps.to_string(),
            "-i".into(),
            "pipe:0".into(),
            "-an".into(),
            "-c:v".into(),
            "libx264".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-movflags".into(),
            "+faststart".into(),
        ];
        args.push(self.out_path.display().to_string());
        args
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> MergeVizResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// A running `ffmpeg` process accepting frames.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    background: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig, background: [u8; 4]) -> MergeVizResult<Self> {
        cfg.validate()?;
        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(MergeVizError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(MergeVizError::evaluation(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }
        ensure_parent_dir(&cfg.out_path)?;

        let mut child = Command::new("ffmpeg")
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MergeVizError::evaluation(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| MergeVizError::evaluation("ffmpeg stdin was not captured"))?;

        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            out = %cfg.out_path.display(),
            "spawned ffmpeg"
        );
        Ok(Self {
            scratch: vec![0u8; cfg.frame_bytes()],
            cfg,
            background,
            child,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> MergeVizResult<()> {
        if (frame.width, frame.height) != (self.cfg.width, self.cfg.height) {
            return Err(MergeVizError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.background,
        )?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| MergeVizError::evaluation("ffmpeg encoder is already finalized"))?;
        stdin.write_all(&self.scratch).map_err(|e| {
            MergeVizError::evaluation(format!("failed to write frame to ffmpeg: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    /// Close stdin and wait for `ffmpeg` to write the file.
    pub fn finish(mut self) -> MergeVizResult<u64> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| MergeVizError::evaluation(format!("failed to wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            return Err(MergeVizError::evaluation(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(self.frames)
    }
}

/// Composite `src` over an opaque `background`, writing opaque RGBA into `dst`.
pub fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    background: [u8; 4],
) -> MergeVizResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MergeVizError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(u16::from(background[c]), inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../tests/unit/encode.rs"]
mod tests;
