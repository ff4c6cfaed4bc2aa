//! The visual collaborator driven by [`crate::MergeSortVisualizer`].
//!
//! A [`Stage`] hands out opaque [`VisualHandle`]s and performs blocking visual requests: each
//! call returns only once its effect (including any animation time) is complete, so the order
//! of calls is the order things appear on screen.
//!
//! Coordinates are scene units with the origin at the centre and y pointing up.

pub mod recording;
pub mod timeline;

use crate::foundation::{
    core::{Point, Vec2},
    error::MergeVizResult,
};

/// Opaque reference to something a stage has drawn (box, caption or highlight).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct VisualHandle(pub u32);

/// An ordered run of handles paired 1:1 with a [`crate::Sequence`].
pub type VisualGroup = Vec<VisualHandle>;

/// One group moved by one offset as part of a simultaneous [`Stage::shift`].
#[derive(Clone, Copy, Debug)]
pub struct Shift<'a> {
    pub handles: &'a [VisualHandle],
    pub by: Vec2,
}

pub trait Stage {
    /// A box showing `label`, not yet visible.
    fn make_box(&mut self, label: &str) -> MergeVizResult<VisualHandle>;

    /// A free-standing caption anchored (centred) at `at`, not yet visible.
    fn make_text(&mut self, content: &str, at: Point) -> MergeVizResult<VisualHandle>;

    /// Lay `handles` out left to right with `spacing` between neighbours, centred on the origin.
    fn arrange_row(&mut self, handles: &[VisualHandle], spacing: f64) -> MergeVizResult<()>;

    /// Move the group so that its bounding box is centred on `center`.
    fn move_to(&mut self, handles: &[VisualHandle], center: Point) -> MergeVizResult<()>;

    /// A marker surrounding the current bounds of `handles`, not yet visible.
    fn highlight(&mut self, handles: &[VisualHandle]) -> MergeVizResult<VisualHandle>;

    /// Move every group by its own offset, all at once.
    fn shift(&mut self, moves: &[Shift<'_>]) -> MergeVizResult<()>;

    /// Show a narration line on row `line`, hold it, then remove it.
    fn show_text(&mut self, content: &str, line: u32) -> MergeVizResult<()>;

    fn fade_in(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()>;

    fn fade_out(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()>;

    /// Animate `old` turning into `new`; afterwards only `new` is visible.
    fn transform(&mut self, old: &[VisualHandle], new: &[VisualHandle]) -> MergeVizResult<()>;

    fn wait(&mut self, secs: f64) -> MergeVizResult<()>;
}

impl<S: Stage + ?Sized> Stage for &mut S {
    fn make_box(&mut self, label: &str) -> MergeVizResult<VisualHandle> {
        (**self).make_box(label)
    }

    fn make_text(&mut self, content: &str, at: Point) -> MergeVizResult<VisualHandle> {
        (**self).make_text(content, at)
    }

    fn arrange_row(&mut self, handles: &[VisualHandle], spacing: f64) -> MergeVizResult<()> {
        (**self).arrange_row(handles, spacing)
    }

    fn move_to(&mut self, handles: &[VisualHandle], center: Point) -> MergeVizResult<()> {
        (**self).move_to(handles, center)
    }

    fn highlight(&mut self, handles: &[VisualHandle]) -> MergeVizResult<VisualHandle> {
        (**self).highlight(handles)
    }

    fn shift(&mut self, moves: &[Shift<'_>]) -> MergeVizResult<()> {
        (**self).shift(moves)
    }

    fn show_text(&mut self, content: &str, line: u32) -> MergeVizResult<()> {
        (**self).show_text(content, line)
    }

    fn fade_in(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        (**self).fade_in(handles)
    }

    fn fade_out(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        (**self).fade_out(handles)
    }

    fn transform(&mut self, old: &[VisualHandle], new: &[VisualHandle]) -> MergeVizResult<()> {
        (**self).transform(old, new)
    }

    fn wait(&mut self, secs: f64) -> MergeVizResult<()> {
        (**self).wait(secs)
    }
}
