use crate::sort::element::{Element, Sequence};

/// Position of one recursive activation of the sort.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameInfo {
    pub depth: usize,
    /// Horizontal layout hint, passed unchanged to children.
    pub x_offset: f64,
    /// Vertical layout hint, one more than the parent's.
    pub y_offset: u32,
}

impl FrameInfo {
    pub fn root() -> Self {
        Self {
            depth: 0,
            x_offset: 0.0,
            y_offset: 0,
        }
    }

    pub fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            x_offset: self.x_offset,
            y_offset: self.y_offset + 1,
        }
    }

    pub fn indent(self) -> String {
        "  ".repeat(self.depth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One observable step of the merge sort, in the order it happens.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortEvent {
    Called {
        frame: FrameInfo,
        seq: Sequence,
    },
    BaseCase {
        frame: FrameInfo,
        seq: Sequence,
    },
    Split {
        frame: FrameInfo,
        mid: usize,
        left: Sequence,
        right: Sequence,
    },
    MergeStarted {
        frame: FrameInfo,
        left: Sequence,
        right: Sequence,
    },
    Compared {
        frame: FrameInfo,
        left: Element,
        right: Element,
        left_index: usize,
        right_index: usize,
        took: Side,
    },
    AppendedRemaining {
        frame: FrameInfo,
        side: Side,
        rest: Sequence,
    },
    MergeResult {
        frame: FrameInfo,
        merged: Sequence,
    },
    Merged {
        frame: FrameInfo,
        left: Sequence,
        right: Sequence,
        merged: Sequence,
    },
}

impl SortEvent {
    pub fn frame(&self) -> FrameInfo {
        match self {
            Self::Called { frame, .. }
            | Self::BaseCase { frame, .. }
            | Self::Split { frame, .. }
            | Self::MergeStarted { frame, .. }
            | Self::Compared { frame, .. }
            | Self::AppendedRemaining { frame, .. }
            | Self::MergeResult { frame, .. }
            | Self::Merged { frame, .. } => *frame,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Called { .. } => "called",
            Self::BaseCase { .. } => "base_case",
            Self::Split { .. } => "split",
            Self::MergeStarted { .. } => "merge_started",
            Self::Compared { .. } => "compared",
            Self::AppendedRemaining { .. } => "appended_remaining",
            Self::MergeResult { .. } => "merge_result",
            Self::Merged { .. } => "merged",
        }
    }

    /// Human readable narration for this step.
    pub fn narration(&self) -> String {
        let indent = self.frame().indent();
        match self {
            Self::Called { seq, .. } => format!("{indent}mergeSort called on {seq}"),
            Self::BaseCase { seq, .. } => format!("{indent}return (base case) {seq}"),
            Self::Split { left, right, .. } => format!("{indent}Split into {left} and {right}"),
            Self::MergeStarted { left, right, .. } => {
                format!("{indent}merge called on {left} and {right}")
            }
            Self::Compared { left, right, .. } => format!("Comparing {left} < {right}"),
            Self::AppendedRemaining { side, rest, .. } => {
                format!("{indent}Appending remaining from {}: {rest}", side.as_str())
            }
            Self::MergeResult { merged, .. } => format!("{indent}Result of merge: {merged}"),
            Self::Merged {
                left,
                right,
                merged,
                ..
            } => format!("{indent}Merged {left} and {right} into {merged}"),
        }
    }

    /// Narration row for events shown as a text line; comparisons are captions instead.
    pub fn text_line(&self) -> Option<u32> {
        match self {
            Self::Called { .. } | Self::BaseCase { .. } | Self::Split { .. } => Some(0),
            Self::MergeStarted { .. } => Some(1),
            Self::Compared { .. } => None,
            Self::AppendedRemaining { .. } => Some(2),
            Self::MergeResult { .. } => Some(3),
            Self::Merged { .. } => Some(4),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sort/event.rs"]
mod tests;
