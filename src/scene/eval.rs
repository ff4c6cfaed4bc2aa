use crate::{
    foundation::{
        core::{FrameIndex, Point, Vec2},
        error::{MergeVizError, MergeVizResult},
    },
    scene::model::{ObjectKind, Scene},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    /// Visible nodes in draw order.
    pub nodes: Vec<EvaluatedNode>,
}

/// An object resolved at one frame, in pixel space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedNode {
    pub id: String,
    pub kind: ObjectKind,
    pub anchor: Point,
    pub size: Vec2,
    pub opacity: f64,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(scene))]
    pub fn eval_frame(scene: &Scene, frame: FrameIndex) -> MergeVizResult<EvaluatedFrame> {
        scene.validate()?;
        if frame.0 >= scene.duration.0 {
            return Err(MergeVizError::evaluation("frame is out of bounds"));
        }

        let mut nodes_with_key: Vec<((i32, usize), EvaluatedNode)> = Vec::new();
        for (index, obj) in scene.objects.iter().enumerate() {
            let opacity = obj.opacity.sample(frame)?.clamp(0.0, 1.0);
            if opacity <= 0.0 {
                continue;
            }
            let pos = obj.position.sample(frame)?;
            nodes_with_key.push((
                (obj.z, index),
                EvaluatedNode {
                    id: obj.id.clone(),
                    kind: obj.kind.clone(),
                    anchor: scene.to_px(pos),
                    size: obj.size * scene.unit_px,
                    opacity,
                },
            ));
        }

        nodes_with_key.sort_by(|a, b| a.0.cmp(&b.0));
        let nodes = nodes_with_key.into_iter().map(|(_, n)| n).collect();
        Ok(EvaluatedFrame { frame, nodes })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/eval.rs"]
mod tests;
