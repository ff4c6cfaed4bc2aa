//! Drives a [`Stage`] from the merge sort event stream.
//!
//! The sort engine decides *what* happens; this module decides how each step looks. It keeps
//! one [`ActiveFrame`] per live recursion frame so that every sequence stays paired with the
//! visual group showing it.

use crate::{
    config::{Config, LayoutConfig, TimingConfig},
    foundation::{
        core::{Point, Vec2},
        error::{MergeVizError, MergeVizResult},
    },
    sort::{
        element::Sequence,
        engine::MergeSortEvents,
        event::{FrameInfo, SortEvent},
    },
    stage::{Shift, Stage, VisualGroup, VisualHandle},
};

#[derive(Debug)]
struct ActiveFrame {
    group: VisualGroup,
    /// Groups handed back by finished children, left first.
    returned: Vec<VisualGroup>,
}

pub struct MergeSortVisualizer<S: Stage> {
    stage: S,
    layout: LayoutConfig,
    timing: TimingConfig,
}

impl<S: Stage> MergeSortVisualizer<S> {
    pub fn new(stage: S, config: &Config) -> Self {
        Self {
            stage,
            layout: config.layout.clone(),
            timing: config.timing.clone(),
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn into_stage(self) -> S {
        self.stage
    }

    /// Put `seq` on stage, animate its merge sort, and return the sorted sequence.
    #[tracing::instrument(skip(self, seq), fields(len = seq.len()))]
    pub fn run(&mut self, seq: &Sequence) -> MergeVizResult<Sequence> {
        let mut events = MergeSortEvents::new(seq.clone())?;

        let boxes = seq
            .iter()
            .map(|e| self.stage.make_box(e.label()))
            .collect::<MergeVizResult<VisualGroup>>()?;
        if !boxes.is_empty() {
            self.stage.arrange_row(&boxes, self.layout.box_spacing)?;
            self.stage.move_to(&boxes, Point::ORIGIN)?;
        }
        self.stage.fade_in(&boxes)?;
        self.stage.wait(self.timing.after_fade_in_secs)?;

        let mut pending: Vec<VisualGroup> = vec![boxes];
        let mut active: Vec<ActiveFrame> = Vec::new();
        let mut finished: Option<VisualGroup> = None;

        for event in events.by_ref() {
            tracing::info!(depth = event.frame().depth, "{}", event.narration());
            self.render_event(&event, &mut pending, &mut active, &mut finished)?;
        }

        let sorted = events
            .into_sorted()
            .ok_or_else(|| MergeVizError::invalid_input("sort ended without a result"))?;
        let group = finished
            .ok_or_else(|| MergeVizError::invalid_input("root frame never returned"))?;
        check_paired(&sorted, &group)?;
        Ok(sorted)
    }

    fn render_event(
        &mut self,
        event: &SortEvent,
        pending: &mut Vec<VisualGroup>,
        active: &mut Vec<ActiveFrame>,
        finished: &mut Option<VisualGroup>,
    ) -> MergeVizResult<()> {
        if let Some(line) = event.text_line() {
            self.stage.show_text(&event.narration(), line)?;
        }

        match event {
            SortEvent::Called { seq, .. } => {
                let group = pending.pop().ok_or_else(|| {
                    MergeVizError::invalid_input(format!("no visual group for {seq}"))
                })?;
                check_paired(seq, &group)?;
                active.push(ActiveFrame {
                    group,
                    returned: Vec::new(),
                });
            }
            SortEvent::BaseCase { .. } => {
                let frame = pop_frame(active)?;
                hand_back(frame.group, active, finished);
            }
            SortEvent::Split { frame, mid, .. } => {
                let top = active
                    .last()
                    .ok_or_else(|| MergeVizError::invalid_input("split outside of a frame"))?;
                if *mid > top.group.len() {
                    return Err(MergeVizError::invalid_input(format!(
                        "split point {mid} beyond group of {}",
                        top.group.len()
                    )));
                }
                let (left, right) = top.group.split_at(*mid);
                let (left, right) = (left.to_vec(), right.to_vec());
                self.split(*frame, &left, &right)?;
                pending.push(right);
                pending.push(left);
            }
            SortEvent::MergeStarted { .. }
            | SortEvent::AppendedRemaining { .. }
            | SortEvent::MergeResult { .. } => {}
            SortEvent::Compared {
                frame, left, right, ..
            } => {
                self.compare(*frame, left.label(), right.label(), &event.narration())?;
            }
            SortEvent::Merged { frame, merged, .. } => {
                let top = pop_frame(active)?;
                let old: VisualGroup = top.returned.into_iter().flatten().collect();
                check_paired(merged, &old)?;
                let new = self.merge(*frame, merged, &old)?;
                hand_back(new, active, finished);
            }
        }
        Ok(())
    }

    fn split(
        &mut self,
        frame: FrameInfo,
        left: &[VisualHandle],
        right: &[VisualHandle],
    ) -> MergeVizResult<()> {
        let left_hl = self.stage.highlight(left)?;
        let right_hl = self.stage.highlight(right)?;
        self.stage.fade_in(&[left_hl, right_hl])?;
        self.stage.wait(self.timing.after_highlight_secs)?;

        let up = self.layout.vertical_shift;
        let side = self.layout.horizontal_shift + frame.x_offset;
        let left_all: VisualGroup = left.iter().copied().chain([left_hl]).collect();
        let right_all: VisualGroup = right.iter().copied().chain([right_hl]).collect();
        self.stage.shift(&[
            Shift {
                handles: &left_all,
                by: Vec2::new(-side, up),
            },
            Shift {
                handles: &right_all,
                by: Vec2::new(side, up),
            },
        ])?;
        self.stage.wait(self.timing.after_shift_secs)
    }

    fn compare(
        &mut self,
        frame: FrameInfo,
        left: &str,
        right: &str,
        caption: &str,
    ) -> MergeVizResult<()> {
        let y = -(f64::from(frame.y_offset) + 1.0);
        let dx = self.layout.compare_dx;

        let i_box = self.stage.make_box(left)?;
        self.stage.move_to(&[i_box], Point::new(-dx, y))?;
        let j_box = self.stage.make_box(right)?;
        self.stage.move_to(&[j_box], Point::new(dx, y))?;
        let caption_y = y + self.layout.box_size / 2.0 + self.layout.caption_gap;
        let text = self.stage.make_text(caption, Point::new(-dx, caption_y))?;

        self.stage.fade_in(&[i_box, j_box, text])?;
        self.stage.wait(self.timing.compare_hold_secs)?;
        self.stage.fade_out(&[i_box, j_box, text])
    }

    fn merge(
        &mut self,
        frame: FrameInfo,
        merged: &Sequence,
        old: &[VisualHandle],
    ) -> MergeVizResult<VisualGroup> {
        let new = merged
            .iter()
            .map(|e| self.stage.make_box(e.label()))
            .collect::<MergeVizResult<VisualGroup>>()?;
        self.stage.arrange_row(&new, self.layout.box_spacing)?;
        let center = Point::new(
            frame.x_offset,
            -(f64::from(frame.y_offset) + self.layout.merge_y_bias),
        );
        self.stage.move_to(&new, center)?;
        self.stage.transform(old, &new)?;
        self.stage.wait(self.timing.after_transform_secs)?;
        Ok(new)
    }
}

fn pop_frame(active: &mut Vec<ActiveFrame>) -> MergeVizResult<ActiveFrame> {
    active
        .pop()
        .ok_or_else(|| MergeVizError::invalid_input("return without an active frame"))
}

fn hand_back(group: VisualGroup, active: &mut [ActiveFrame], finished: &mut Option<VisualGroup>) {
    match active.last_mut() {
        Some(parent) => parent.returned.push(group),
        None => *finished = Some(group),
    }
}

fn check_paired(seq: &Sequence, group: &[VisualHandle]) -> MergeVizResult<()> {
    if seq.len() != group.len() {
        return Err(MergeVizError::invalid_input(format!(
            "{seq} has {} elements but its visual group has {}",
            seq.len(),
            group.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/visualizer.rs"]
mod tests;
