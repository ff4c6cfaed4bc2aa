//! A [`Stage`] that records every request as keyframes on a [`Scene`] timeline.
//!
//! The stage keeps a frame clock. Instant requests (creating, arranging, moving) take effect at
//! the current frame; animated ones (fades, shifts, transforms) span
//! `timing.animation_secs` and advance the clock, so the finished scene plays the requests back
//! in exactly the order they were made.

use crate::{
    config::{Config, LayoutConfig, OutputConfig, TimingConfig},
    foundation::{
        core::{Fps, FrameIndex, Point, Rect, Vec2},
        error::{MergeVizError, MergeVizResult},
    },
    scene::{
        anim::Keyframes,
        ease::Ease,
        model::{ObjectKind, Scene, SceneObject, TextAlign},
    },
    stage::{Shift, Stage, VisualHandle},
};

const MOTION_EASE: Ease = Ease::InOutCubic;

const Z_HIGHLIGHT: i32 = 0;
const Z_BOX: i32 = 1;
const Z_TEXT: i32 = 2;

#[derive(Debug)]
pub struct TimelineStage {
    layout: LayoutConfig,
    timing: TimingConfig,
    output: OutputConfig,
    fps: Fps,
    clock: FrameIndex,
    objects: Vec<SceneObject>,
}

impl TimelineStage {
    pub fn new(config: &Config) -> MergeVizResult<Self> {
        config.validate()?;
        Ok(Self {
            layout: config.layout.clone(),
            timing: config.timing.clone(),
            output: config.output.clone(),
            fps: config.output.fps()?,
            clock: FrameIndex(0),
            objects: Vec::new(),
        })
    }

    /// Current position of the frame clock.
    pub fn now(&self) -> FrameIndex {
        self.clock
    }

    /// Close the timeline. The scene lasts until the final animation has settled.
    #[tracing::instrument(skip(self))]
    pub fn finish(self) -> MergeVizResult<Scene> {
        let scene = Scene {
            fps: self.fps,
            canvas: self.output.canvas(),
            unit_px: self.output.unit_px,
            background_rgba8: self.output.background_rgba8,
            duration: FrameIndex(self.clock.0 + 1),
            objects: self.objects,
        };
        scene.validate()?;
        tracing::debug!(
            frames = scene.duration.0,
            objects = scene.objects.len(),
            "timeline finished"
        );
        Ok(scene)
    }

    fn frames(&self, secs: f64) -> u64 {
        self.fps.secs_to_frames(secs)
    }

    fn animation_end(&self) -> FrameIndex {
        FrameIndex(self.clock.0 + self.frames(self.timing.animation_secs))
    }

    fn add(&mut self, prefix: &str, kind: ObjectKind, size: Vec2, z: i32, at: Vec2) -> VisualHandle {
        let index = self.objects.len();
        self.objects.push(SceneObject {
            id: format!("{prefix}{index}"),
            kind,
            size,
            z,
            position: Keyframes::constant(self.clock, at),
            opacity: Keyframes::constant(self.clock, 0.0),
        });
        VisualHandle(index as u32)
    }

    fn object(&self, h: VisualHandle) -> MergeVizResult<&SceneObject> {
        self.objects
            .get(h.0 as usize)
            .ok_or_else(|| MergeVizError::stage(format!("unknown visual handle {}", h.0)))
    }

    fn object_mut(&mut self, h: VisualHandle) -> MergeVizResult<&mut SceneObject> {
        self.objects
            .get_mut(h.0 as usize)
            .ok_or_else(|| MergeVizError::stage(format!("unknown visual handle {}", h.0)))
    }

    fn position(&self, h: VisualHandle) -> MergeVizResult<Vec2> {
        self.object(h)?.position.sample(self.clock)
    }

    fn set_position(&mut self, h: VisualHandle, pos: Vec2) -> MergeVizResult<()> {
        let now = self.clock;
        self.object_mut(h)?.position.set(now, pos)
    }

    fn bounds(&self, handles: &[VisualHandle]) -> MergeVizResult<Rect> {
        let mut out: Option<Rect> = None;
        for &h in handles {
            let obj = self.object(h)?;
            let pos = obj.position.sample(self.clock)?;
            let r = Rect::from_center_size(pos.to_point(), obj.size.to_size());
            out = Some(match out {
                Some(acc) => acc.union(r),
                None => r,
            });
        }
        out.ok_or_else(|| MergeVizError::stage("cannot measure an empty group"))
    }

    fn fade(&mut self, handles: &[VisualHandle], to: f64) -> MergeVizResult<()> {
        let (start, end) = (self.clock, self.animation_end());
        for &h in handles {
            self.object_mut(h)?
                .opacity
                .animate(start, end, to, MOTION_EASE)?;
        }
        self.clock = end;
        Ok(())
    }

    /// Top-left anchor of narration row `line`.
    fn text_row_anchor(&self, line: u32) -> Vec2 {
        let half_w = f64::from(self.output.width) / (2.0 * self.output.unit_px);
        let half_h = f64::from(self.output.height) / (2.0 * self.output.unit_px);
        Vec2::new(
            -half_w + self.layout.text_margin,
            half_h - self.layout.text_margin - f64::from(line) * self.layout.text_row_height,
        )
    }
}

impl Stage for TimelineStage {
    fn make_box(&mut self, label: &str) -> MergeVizResult<VisualHandle> {
        let side = self.layout.box_size;
        Ok(self.add(
            "box",
            ObjectKind::Box {
                label: label.to_string(),
                text_size: self.layout.text_size,
            },
            Vec2::new(side, side),
            Z_BOX,
            Vec2::ZERO,
        ))
    }

    fn make_text(&mut self, content: &str, at: Point) -> MergeVizResult<VisualHandle> {
        Ok(self.add(
            "caption",
            ObjectKind::Text {
                content: content.to_string(),
                text_size: self.layout.text_size,
                align: TextAlign::Middle,
            },
            Vec2::new(0.0, self.layout.text_size),
            Z_TEXT,
            at.to_vec2(),
        ))
    }

    fn arrange_row(&mut self, handles: &[VisualHandle], spacing: f64) -> MergeVizResult<()> {
        let widths = handles
            .iter()
            .map(|&h| self.object(h).map(|o| o.size.x))
            .collect::<MergeVizResult<Vec<_>>>()?;
        let gaps = spacing * handles.len().saturating_sub(1) as f64;
        let mut x = -(widths.iter().sum::<f64>() + gaps) / 2.0;
        for (&h, w) in handles.iter().zip(widths) {
            self.set_position(h, Vec2::new(x + w / 2.0, 0.0))?;
            x += w + spacing;
        }
        Ok(())
    }

    fn move_to(&mut self, handles: &[VisualHandle], center: Point) -> MergeVizResult<()> {
        let delta = center - self.bounds(handles)?.center();
        for &h in handles {
            let pos = self.position(h)?;
            self.set_position(h, pos + delta)?;
        }
        Ok(())
    }

    fn highlight(&mut self, handles: &[VisualHandle]) -> MergeVizResult<VisualHandle> {
        let bounds = self.bounds(handles)?;
        let pad = 2.0 * self.layout.highlight_buff;
        let size = bounds.size().to_vec2() + Vec2::new(pad, pad);
        Ok(self.add(
            "highlight",
            ObjectKind::Highlight,
            size,
            Z_HIGHLIGHT,
            bounds.center().to_vec2(),
        ))
    }

    fn shift(&mut self, moves: &[Shift<'_>]) -> MergeVizResult<()> {
        let (start, end) = (self.clock, self.animation_end());
        for m in moves {
            for &h in m.handles {
                let target = self.position(h)? + m.by;
                self.object_mut(h)?
                    .position
                    .animate(start, end, target, MOTION_EASE)?;
            }
        }
        self.clock = end;
        Ok(())
    }

    fn show_text(&mut self, content: &str, line: u32) -> MergeVizResult<()> {
        let anchor = self.text_row_anchor(line);
        let h = self.add(
            "narration",
            ObjectKind::Text {
                content: content.to_string(),
                text_size: self.layout.text_size,
                align: TextAlign::Start,
            },
            Vec2::new(0.0, self.layout.text_size),
            Z_TEXT,
            anchor,
        );
        self.fade(&[h], 1.0)?;
        self.wait(self.timing.text_hold_secs)?;
        self.fade(&[h], 0.0)
    }

    fn fade_in(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        self.fade(handles, 1.0)
    }

    fn fade_out(&mut self, handles: &[VisualHandle]) -> MergeVizResult<()> {
        self.fade(handles, 0.0)
    }

    fn transform(&mut self, old: &[VisualHandle], new: &[VisualHandle]) -> MergeVizResult<()> {
        if old.len() != new.len() {
            return Err(MergeVizError::invalid_input(format!(
                "transform pairs {} handles with {}",
                old.len(),
                new.len()
            )));
        }

        let (start, end) = (self.clock, self.animation_end());
        for (&from, &to) in old.iter().zip(new) {
            let target = self.position(to)?;
            let src = self.object_mut(from)?;
            src.position.animate(start, end, target, MOTION_EASE)?;
            src.opacity.animate(start, end, 0.0, MOTION_EASE)?;
            self.object_mut(to)?
                .opacity
                .animate(start, end, 1.0, MOTION_EASE)?;
        }
        self.clock = end;
        Ok(())
    }

    fn wait(&mut self, secs: f64) -> MergeVizResult<()> {
        if !(secs.is_finite() && secs >= 0.0) {
            return Err(MergeVizError::stage(format!("cannot wait {secs} seconds")));
        }
        self.clock = FrameIndex(self.clock.0 + self.frames(secs));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/timeline.rs"]
mod tests;
