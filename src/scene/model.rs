use std::{collections::BTreeSet, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange, Point, Vec2},
        error::{MergeVizError, MergeVizResult},
    },
    scene::anim::Keyframes,
};

/// A complete animation timeline.
///
/// Scenes are plain data: the timeline stage builds them, they round-trip through JSON, and the
/// evaluator resolves them one frame at a time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub fps: Fps,
    pub canvas: Canvas,
    /// Pixels per scene unit.
    pub unit_px: f64,
    pub background_rgba8: [u8; 4],
    /// Total length in frames.
    pub duration: FrameIndex,
    /// Drawn in `(z, index)` order.
    pub objects: Vec<SceneObject>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    pub id: String,
    pub kind: ObjectKind,
    /// Extent in scene units (boxes and highlights).
    pub size: Vec2,
    pub z: i32,
    /// Centre for boxes, highlights and captions; top-left anchor for narration text.
    pub position: Keyframes<Vec2>,
    /// Clamped to `[0, 1]` at evaluation time.
    pub opacity: Keyframes<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Box { label: String, text_size: f64 },
    Text {
        content: String,
        text_size: f64,
        align: TextAlign,
    },
    Highlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Position is the top-left corner of the text.
    Start,
    /// Position is the centre of the text.
    Middle,
}

impl Scene {
    pub fn validate(&self) -> MergeVizResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(MergeVizError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MergeVizError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(MergeVizError::validation("duration must be > 0 frames"));
        }
        if !(self.unit_px.is_finite() && self.unit_px > 0.0) {
            return Err(MergeVizError::validation("unit_px must be > 0"));
        }

        let mut ids = BTreeSet::new();
        for obj in &self.objects {
            if !ids.insert(obj.id.as_str()) {
                return Err(MergeVizError::validation(format!(
                    "duplicate object id '{}'",
                    obj.id
                )));
            }
            obj.position
                .validate()
                .map_err(|e| MergeVizError::validation(format!("object '{}': {e}", obj.id)))?;
            obj.opacity
                .validate()
                .map_err(|e| MergeVizError::validation(format!("object '{}': {e}", obj.id)))?;
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> MergeVizResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_path(path: &Path) -> MergeVizResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: self.duration,
        }
    }

    /// Map a scene-unit position (y up, origin centred) to pixels (y down, origin top-left).
    pub fn to_px(&self, pos: Vec2) -> Point {
        let c = self.canvas.center();
        Point::new(c.x + pos.x * self.unit_px, c.y - pos.y * self.unit_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
