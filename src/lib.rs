//! mergeviz animates merge sort.
//!
//! The sort itself is a lazy stream of [`SortEvent`]s, so the algorithm can be inspected and
//! tested without drawing anything. A [`MergeSortVisualizer`] replays that stream against a
//! [`Stage`]:
//!
//! - [`RecordingStage`] logs every visual request as a [`StageOp`]
//! - [`TimelineStage`] keyframes them into a [`Scene`], which can be rendered to PNG frames or
//!   encoded to MP4 with `ffmpeg`
//!
//! ```
//! use mergeviz::{MergeSortVisualizer, RecordingStage, Config, Sequence};
//!
//! let seq = Sequence::from_ints(&[3, 1, 2]);
//! let mut viz = MergeSortVisualizer::new(RecordingStage::new(), &Config::default());
//! let sorted = viz.run(&seq)?;
//! assert_eq!(sorted.labels(), ["1", "2", "3"]);
//! assert_eq!(viz.stage().narration()[0], "mergeSort called on [3, 1, 2]");
//! # Ok::<(), mergeviz::MergeVizError>(())
//! ```
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod encode;
pub mod render;
pub mod scene;
pub mod sort;
pub mod stage;
pub mod visualizer;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2};
pub use crate::foundation::error::{MergeVizError, MergeVizResult};

pub use crate::config::{Config, LayoutConfig, OutputConfig, TimingConfig};
pub use crate::encode::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
pub use crate::render::{
    FrameRGBA, Rasterizer, RenderToMp4Opts, render_frame, render_frames, render_to_mp4,
    save_png, scene_to_svg,
};
pub use crate::scene::{
    anim::{Keyframe, Keyframes, Lerp},
    ease::Ease,
    eval::{EvaluatedFrame, EvaluatedNode, Evaluator},
    model::{ObjectKind, Scene, SceneObject, TextAlign},
};
pub use crate::sort::{
    element::{Element, Sequence},
    engine::{MergeSortEvents, SortTrace, merge_sort, trace},
    event::{FrameInfo, Side, SortEvent},
};
pub use crate::stage::{
    Shift, Stage, VisualGroup, VisualHandle,
    recording::{HandleKind, RecordingStage, StageOp},
    timeline::TimelineStage,
};
pub use crate::visualizer::MergeSortVisualizer;
