use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{Point, Vec2},
        error::{MergeVizError, MergeVizResult},
    },
    stage::{Shift, Stage, VisualHandle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Box,
    Text,
    Highlight,
}

/// One call made against a [`RecordingStage`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StageOp {
    MakeBox {
        handle: VisualHandle,
        label: String,
    },
    MakeText {
        handle: VisualHandle,
        content: String,
        at: Point,
    },
    ArrangeRow {
        handles: Vec<VisualHandle>,
        spacing: f64,
    },
    MoveTo {
        handles: Vec<VisualHandle>,
        center: Point,
    },
    Highlight {
        handle: VisualHandle,
        around: Vec<VisualHandle>,
    },
    Shift {
        moves: Vec<(Vec<VisualHandle>, Vec2)>,
    },
    ShowText {
        content: String,
        line: u32,
    },
    FadeIn {
        handles: Vec<VisualHandle>,
    },
    FadeOut {
        handles: Vec<VisualHandle>,
    },
    Transform {
        old: Vec<VisualHandle>,
        new: Vec<VisualHandle>,
    },
    Wait {
        secs: f64,
    },
}

/// Stage that draws nothing and remembers every request in order.
#[derive(Debug, Default)]
pub struct RecordingStage {
    next: u32,
    kinds: BTreeMap<VisualHandle, HandleKind>,
    labels: BTreeMap<VisualHandle, String>,
    ops: Vec<StageOp>,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[StageOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<StageOp> {
        self.ops
    }

    pub fn kind_of(&self, handle: VisualHandle) -> Option<HandleKind> {
        self.kinds.get(&handle).copied()
    }

    /// Label of a box handle.
    pub fn label_of(&self, handle: VisualHandle) -> Option<&str> {
        self.labels.get(&handle).map(String::as_str)
    }

    /// Narration lines shown through [`Stage::show_text`], in order.
    pub fn narration(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                StageOp::ShowText { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Total time spent in explicit waits.
    pub fn waited_secs(&self) -> f64 {
        self.ops
            .iter()
            .map(|op| match op {
                StageOp::Wait { secs } => *secs,
                _ => 0.0,
            })
            .sum()
    }

    fn alloc(&mut self, kind: HandleKind) -> VisualHandle {
        let h = VisualHandle(self.next);
        self.next += 1;
        self.kinds.insert(h, kind);
        h
    }

    fn check(&self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        match handles.iter().find(|h| !self.kinds.contains_key(h)) {
            Some(h) => Err(MergeVizError::stage(format!("unknown visual handle {}", h.0))),
            None => Ok(()),
        }
    }
}

impl Stage for RecordingStage {
    fn make_box(&mut self, label: &str) -> MergeVizResult<VisualHandle> {
        let handle = self.alloc(HandleKind::Box);
        self.labels.insert(handle, label.to_string());
        self.ops.push(StageOp::MakeBox {
            handle,
            label: label.to_string(),
        });
        Ok(handle)
    }

    fn make_text(&mut self, content: &str, at: Point) -> MergeVizResult<VisualHandle> {
        let handle = self.alloc(HandleKind::Text);
        self.ops.push(StageOp::MakeText {
            handle,
            content: content.to_string(),
            at,
        });
        Ok(handle)
    }

    fn arrange_row(&mut self, handles: &[VisualHandle], spacing: f64) -> MergeVizResult<()> {
        self.check(handles)?;
        self.ops.push(StageOp::ArrangeRow {
            handles: handles.to_vec(),
            spacing,
        });
        Ok(())
    }

    fn move_to(&mut self, handles: &[VisualHandle], center: Point) -> MergeVizResult<()> {
        self.check(handles)?;
        self.ops.push(StageOp::MoveTo {
            handles: handles.to_vec(),
            center,
        });
        Ok(())
    }

    fn highlight(&mut self, handles: &[VisualHandle]) -> MergeVizResult<VisualHandle> {
        self.check(handles)?;
        let handle = self.alloc(HandleKind::Highlight);
        self.ops.push(StageOp::Highlight {
            handle,
            around: handles.to_vec(),
        });
        Ok(handle)
    }

    fn shift(&mut self, moves: &[Shift<'_>]) -> MergeVizResult<()> {
        for m in moves {
            self.check(m.handles)?;
        }
        self.ops.push(StageOp::Shift {
            moves: moves.iter().map(|m| (m.handles.to_vec(), m.by)).collect(),
        });
        Ok(())
    }

    fn show_text(&mut self, content: &str, line: u32) -> MergeVizResult<()> {
        self.ops.push(StageOp::ShowText {
            content: content.to_string(),
            line,
        });
        Ok(())
    }

    fn fade_in(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        self.check(handles)?;
        self.ops.push(StageOp::FadeIn {
            handles: handles.to_vec(),
        });
        Ok(())
    }

    fn fade_out(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        self.check(handles)?;
        self.ops.push(StageOp::FadeOut {
            handles: handles.to_vec(),
        });
        Ok(())
    }

    fn transform(&mut self, old: &[VisualHandle], new: &[VisualHandle]) -> MergeVizResult<()> {
        self.check(old)?;
        self.check(new)?;
        if old.len() != new.len() {
            return Err(MergeVizError::invalid_input(format!(
                "transform pairs {} handles with {}",
                old.len(),
                new.len()
            )));
        }
        self.ops.push(StageOp::Transform {
            old: old.to_vec(),
            new: new.to_vec(),
        });
        Ok(())
    }

    fn wait(&mut self, secs: f64) -> MergeVizResult<()> {
        self.ops.push(StageOp::Wait { secs });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/recording.rs"]
mod tests;
