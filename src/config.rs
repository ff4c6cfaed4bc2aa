//! Layout, timing and output settings.
//!
//! Every field has a default matching the classic look of the animation, so a config file only
//! needs the values it changes:
//!
//! ```json
//! { "timing": { "animation_secs": 0.5 }, "output": { "fps": 60 } }
//! ```

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, Fps},
    error::{MergeVizError, MergeVizResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub timing: TimingConfig,
    pub output: OutputConfig,
}

/// Distances in scene units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length of an element box.
    pub box_size: f64,
    /// Gap between neighbouring boxes in a row.
    pub box_spacing: f64,
    /// How far split halves move up.
    pub vertical_shift: f64,
    /// Base sideways move of split halves; the frame's x offset is added on top.
    pub horizontal_shift: f64,
    /// Horizontal distance of each comparison box from the centre line.
    pub compare_dx: f64,
    /// Gap between a comparison box and its caption.
    pub caption_gap: f64,
    /// Padding between a group and its highlight.
    pub highlight_buff: f64,
    /// Merged rows sit this much above `-(y_offset + 1)`.
    pub merge_y_bias: f64,
    /// Height of narration and label text.
    pub text_size: f64,
    /// Margin between narration text and the top-left corner.
    pub text_margin: f64,
    /// Vertical distance between narration rows.
    pub text_row_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_size: 0.8,
            box_spacing: 0.6,
            vertical_shift: 0.4,
            horizontal_shift: 0.2,
            compare_dx: 2.0,
            caption_gap: 0.25,
            highlight_buff: 0.1,
            merge_y_bias: 0.5,
            text_size: 0.25,
            text_margin: 0.5,
            text_row_height: 1.0,
        }
    }
}

/// Durations in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Length of every fade, shift and transform.
    pub animation_secs: f64,
    /// How long a narration line stays fully visible.
    pub text_hold_secs: f64,
    pub after_fade_in_secs: f64,
    pub after_highlight_secs: f64,
    pub after_shift_secs: f64,
    pub compare_hold_secs: f64,
    pub after_transform_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            animation_secs: 1.0,
            text_hold_secs: 0.5,
            after_fade_in_secs: 0.5,
            after_highlight_secs: 0.2,
            after_shift_secs: 0.2,
            compare_hold_secs: 0.5,
            after_transform_secs: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// Pixels per scene unit.
    pub unit_px: f64,
    pub background_rgba8: [u8; 4],
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 1280,
            height: 720,
            unit_px: 90.0,
            background_rgba8: [0, 0, 0, 255],
        }
    }
}

impl OutputConfig {
    pub fn fps(&self) -> MergeVizResult<Fps> {
        Fps::new(self.fps, 1)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> MergeVizResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> MergeVizResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> MergeVizResult<()> {
        let l = &self.layout;
        for (name, v) in [
            ("layout.box_size", l.box_size),
            ("layout.text_size", l.text_size),
            ("layout.text_row_height", l.text_row_height),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(MergeVizError::validation(format!("{name} must be > 0")));
            }
        }
        for (name, v) in [
            ("layout.box_spacing", l.box_spacing),
            ("layout.vertical_shift", l.vertical_shift),
            ("layout.horizontal_shift", l.horizontal_shift),
            ("layout.compare_dx", l.compare_dx),
            ("layout.caption_gap", l.caption_gap),
            ("layout.highlight_buff", l.highlight_buff),
            ("layout.merge_y_bias", l.merge_y_bias),
            ("layout.text_margin", l.text_margin),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(MergeVizError::validation(format!("{name} must be >= 0")));
            }
        }

        let t = &self.timing;
        for (name, v) in [
            ("timing.animation_secs", t.animation_secs),
            ("timing.text_hold_secs", t.text_hold_secs),
            ("timing.after_fade_in_secs", t.after_fade_in_secs),
            ("timing.after_highlight_secs", t.after_highlight_secs),
            ("timing.after_shift_secs", t.after_shift_secs),
            ("timing.compare_hold_secs", t.compare_hold_secs),
            ("timing.after_transform_secs", t.after_transform_secs),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(MergeVizError::validation(format!("{name} must be >= 0")));
            }
        }

        let o = &self.output;
        o.fps()?;
        if o.width == 0 || o.height == 0 {
            return Err(MergeVizError::validation(
                "output width/height must be > 0",
            ));
        }
        if !o.width.is_multiple_of(2) || !o.height.is_multiple_of(2) {
            return Err(MergeVizError::validation(
                "output width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if !(o.unit_px.is_finite() && o.unit_px > 0.0) {
            return Err(MergeVizError::validation("output.unit_px must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
