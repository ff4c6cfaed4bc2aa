use crate::{
    foundation::{
        core::{FrameIndex, Vec2},
        error::{MergeVizError, MergeVizResult},
    },
    scene::ease::Ease,
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub frame: FrameIndex,
    pub value: T,
    pub ease: Ease, // ease applied toward next key
}

/// A track of keyframes sampled by absolute timeline frame.
///
/// Keys sharing a frame form a step: sampling before that frame interpolates toward the
/// first of them, sampling at or after it sees the last.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by frame
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn constant(frame: FrameIndex, value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                frame,
                value,
                ease: Ease::Linear,
            }],
        }
    }

    pub fn validate(&self) -> MergeVizResult<()> {
        if self.keys.is_empty() {
            return Err(MergeVizError::validation(
                "Keyframes must have at least one key",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame.0 <= w[1].frame.0) {
            return Err(MergeVizError::validation(
                "Keyframes keys must be sorted by frame",
            ));
        }
        Ok(())
    }

    pub fn sample(&self, frame: FrameIndex) -> MergeVizResult<T> {
        let Some(first) = self.keys.first() else {
            return Err(MergeVizError::evaluation("Keyframes has no keys"));
        };

        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        let t = ((f - a.frame.0) as f64) / (denom as f64);
        Ok(T::lerp(&a.value, &b.value, a.ease.apply(t)))
    }

    /// Value after the last key.
    pub fn last_value(&self) -> Option<&T> {
        self.keys.last().map(|k| &k.value)
    }

    /// Jump to `value` at `frame`, holding the previous value until then.
    pub fn set(&mut self, frame: FrameIndex, value: T) -> MergeVizResult<()> {
        let held = self.sample(frame)?;
        self.push(frame, held, Ease::Linear)?;
        self.push(frame, value, Ease::Linear)
    }

    /// Animate from the value at `start` to `value` at `end`.
    pub fn animate(
        &mut self,
        start: FrameIndex,
        end: FrameIndex,
        value: T,
        ease: Ease,
    ) -> MergeVizResult<()> {
        if end.0 < start.0 {
            return Err(MergeVizError::validation(
                "animation must not end before it starts",
            ));
        }
        let from = self.sample(start)?;
        self.push(start, from, ease)?;
        self.push(end, value, Ease::Linear)
    }

    fn push(&mut self, frame: FrameIndex, value: T, ease: Ease) -> MergeVizResult<()> {
        if let Some(last) = self.keys.last()
            && last.frame.0 > frame.0
        {
            return Err(MergeVizError::validation(format!(
                "keyframe at {} would precede existing key at {}",
                frame.0, last.frame.0
            )));
        }
        self.keys.push(Keyframe { frame, value, ease });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/anim.rs"]
mod tests;
