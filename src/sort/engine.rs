//! Merge sort as a lazy stream of [`SortEvent`]s.
//!
//! Recursion is kept on an explicit stack of [`RecursionFrame`]s so events can be pulled one at
//! a time. Left subtrees are fully drained before right ones start, and merges take the right
//! element whenever the two heads compare equal.

use crate::{
    foundation::error::MergeVizResult,
    sort::{
        element::Sequence,
        event::{FrameInfo, Side, SortEvent},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Enter,
    BaseCase,
    Split,
    DescendLeft,
    DescendRight,
    MergeStart,
    Comparing,
    Remainder,
    MergeResult,
    Merged,
    Return,
}

/// One activation of the sort over a sub-sequence.
#[derive(Debug)]
struct RecursionFrame {
    info: FrameInfo,
    seq: Sequence,
    phase: Phase,
    left: Sequence,
    right: Sequence,
    left_sorted: Sequence,
    right_sorted: Sequence,
    i: usize,
    j: usize,
    merged: Sequence,
}

enum Step {
    Emit(SortEvent),
    Descend(RecursionFrame),
    Return(Sequence),
}

impl RecursionFrame {
    fn new(info: FrameInfo, seq: Sequence) -> Self {
        Self {
            info,
            seq,
            phase: Phase::Enter,
            left: Sequence::default(),
            right: Sequence::default(),
            left_sorted: Sequence::default(),
            right_sorted: Sequence::default(),
            i: 0,
            j: 0,
            merged: Sequence::default(),
        }
    }

    fn step(&mut self) -> Step {
        let frame = self.info;
        match self.phase {
            Phase::Enter => {
                self.phase = if self.seq.len() <= 1 {
                    Phase::BaseCase
                } else {
                    Phase::Split
                };
                Step::Emit(SortEvent::Called {
                    frame,
                    seq: self.seq.clone(),
                })
            }
            Phase::BaseCase => {
                self.phase = Phase::Return;
                self.merged = self.seq.clone();
                Step::Emit(SortEvent::BaseCase {
                    frame,
                    seq: self.seq.clone(),
                })
            }
            Phase::Split => {
                let mid = self.seq.len() / 2;
                let (left, right) = self.seq.split_at(mid);
                self.left = left.clone();
                self.right = right.clone();
                self.phase = Phase::DescendLeft;
                Step::Emit(SortEvent::Split {
                    frame,
                    mid,
                    left,
                    right,
                })
            }
            Phase::DescendLeft => {
                self.phase = Phase::DescendRight;
                Step::Descend(Self::new(frame.child(), std::mem::take(&mut self.left)))
            }
            Phase::DescendRight => {
                self.phase = Phase::MergeStart;
                Step::Descend(Self::new(frame.child(), std::mem::take(&mut self.right)))
            }
            Phase::MergeStart => {
                self.phase = Phase::Comparing;
                Step::Emit(SortEvent::MergeStarted {
                    frame,
                    left: self.left_sorted.clone(),
                    right: self.right_sorted.clone(),
                })
            }
            Phase::Comparing => {
                let ls = self.left_sorted.as_slice();
                let rs = self.right_sorted.as_slice();
                if self.i >= ls.len() || self.j >= rs.len() {
                    self.phase = Phase::Remainder;
                    return self.step();
                }

                let (a, b) = (&ls[self.i], &rs[self.j]);
                let took = if a.value() < b.value() {
                    Side::Left
                } else {
                    Side::Right
                };
                let event = SortEvent::Compared {
                    frame,
                    left: a.clone(),
                    right: b.clone(),
                    left_index: self.i,
                    right_index: self.j,
                    took,
                };
                match took {
                    Side::Left => {
                        self.merged.push(a.clone());
                        self.i += 1;
                    }
                    Side::Right => {
                        self.merged.push(b.clone());
                        self.j += 1;
                    }
                }
                Step::Emit(event)
            }
            Phase::Remainder => {
                self.phase = Phase::MergeResult;
                let (side, rest) = if self.i < self.left_sorted.len() {
                    (Side::Left, &self.left_sorted.as_slice()[self.i..])
                } else if self.j < self.right_sorted.len() {
                    (Side::Right, &self.right_sorted.as_slice()[self.j..])
                } else {
                    return self.step();
                };
                let rest = Sequence::new(rest.to_vec());
                self.merged.extend_from_slice(rest.as_slice());
                Step::Emit(SortEvent::AppendedRemaining { frame, side, rest })
            }
            Phase::MergeResult => {
                self.phase = Phase::Merged;
                Step::Emit(SortEvent::MergeResult {
                    frame,
                    merged: self.merged.clone(),
                })
            }
            Phase::Merged => {
                self.phase = Phase::Return;
                Step::Emit(SortEvent::Merged {
                    frame,
                    left: self.left_sorted.clone(),
                    right: self.right_sorted.clone(),
                    merged: self.merged.clone(),
                })
            }
            Phase::Return => Step::Return(std::mem::take(&mut self.merged)),
        }
    }

    /// Receive the sorted output of the child that just returned.
    fn accept(&mut self, sorted: Sequence) {
        match self.phase {
            Phase::DescendRight => self.left_sorted = sorted,
            _ => self.right_sorted = sorted,
        }
    }
}

/// Lazy iterator over the events of a merge sort.
///
/// ```
/// use mergeviz::{MergeSortEvents, Sequence};
///
/// let seq = Sequence::from_ints(&[3, 1, 2]);
/// let mut events = MergeSortEvents::new(seq).unwrap();
/// let narration: Vec<String> = events.by_ref().map(|e| e.narration()).collect();
/// assert_eq!(narration[0], "mergeSort called on [3, 1, 2]");
/// assert_eq!(events.sorted().unwrap(), &Sequence::from_ints(&[1, 2, 3]));
/// ```
#[derive(Debug)]
pub struct MergeSortEvents {
    stack: Vec<RecursionFrame>,
    sorted: Option<Sequence>,
}

impl MergeSortEvents {
    /// Validate `seq` and start a sort at the root frame.
    pub fn new(seq: Sequence) -> MergeVizResult<Self> {
        Self::with_frame(seq, FrameInfo::root())
    }

    pub fn with_frame(seq: Sequence, root: FrameInfo) -> MergeVizResult<Self> {
        seq.validate_orderable()?;
        Ok(Self {
            stack: vec![RecursionFrame::new(root, seq)],
            sorted: None,
        })
    }

    /// The sorted result, available once the iterator is exhausted.
    pub fn sorted(&self) -> Option<&Sequence> {
        self.sorted.as_ref()
    }

    pub fn into_sorted(self) -> Option<Sequence> {
        self.sorted
    }
}

impl Iterator for MergeSortEvents {
    type Item = SortEvent;

    fn next(&mut self) -> Option<SortEvent> {
        loop {
            let top = self.stack.last_mut()?;
            match top.step() {
                Step::Emit(event) => return Some(event),
                Step::Descend(child) => self.stack.push(child),
                Step::Return(sorted) => {
                    self.stack.pop();
                    match self.stack.last_mut() {
                        Some(parent) => parent.accept(sorted),
                        None => self.sorted = Some(sorted),
                    }
                }
            }
        }
    }
}

/// Full event log plus the sorted result.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SortTrace {
    pub events: Vec<SortEvent>,
    pub sorted: Sequence,
}

impl SortTrace {
    pub fn max_depth(&self) -> usize {
        self.events
            .iter()
            .map(|e| e.frame().depth)
            .max()
            .unwrap_or(0)
    }

    pub fn narration(&self) -> Vec<String> {
        self.events.iter().map(SortEvent::narration).collect()
    }
}

#[tracing::instrument(skip(seq), fields(len = seq.len()))]
pub fn trace(seq: Sequence) -> MergeVizResult<SortTrace> {
    let mut events = MergeSortEvents::new(seq)?;
    let log: Vec<SortEvent> = events.by_ref().collect();
    let sorted = events.into_sorted().unwrap_or_default();
    tracing::debug!(events = log.len(), "merge sort traced");
    Ok(SortTrace {
        events: log,
        sorted,
    })
}

pub fn merge_sort(seq: Sequence) -> MergeVizResult<Sequence> {
    let mut events = MergeSortEvents::new(seq)?;
    events.by_ref().for_each(drop);
    Ok(events.into_sorted().unwrap_or_default())
}

#[cfg(test)]
#[path = "../../tests/unit/sort/engine.rs"]
mod tests;
