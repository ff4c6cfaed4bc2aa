use super::*;
use crate::{
    sort::{element::Element, engine::trace},
    stage::{
        recording::{HandleKind, RecordingStage, StageOp},
        timeline::TimelineStage,
    },
};

fn sample() -> Sequence {
    Sequence::parse("3, 7, 6, -10, 15, 23.5, 55, -13").unwrap()
}

fn record(seq: &Sequence) -> (Sequence, RecordingStage) {
    let mut viz = MergeSortVisualizer::new(RecordingStage::new(), &Config::default());
    let sorted = viz.run(seq).unwrap();
    (sorted, viz.into_stage())
}

fn transforms(ops: &[StageOp]) -> Vec<(&[VisualHandle], &[VisualHandle])> {
    ops.iter()
        .filter_map(|op| match op {
            StageOp::Transform { old, new } => Some((old.as_slice(), new.as_slice())),
            _ => None,
        })
        .collect()
}

#[test]
fn run_returns_the_sorted_sequence() {
    let (sorted, _) = record(&sample());
    assert_eq!(
        sorted.labels(),
        vec!["-13", "-10", "3", "6", "7", "15", "23.5", "55"]
    );
}

#[test]
fn two_elements_produce_the_expected_op_log() {
    let (_, st) = record(&Sequence::from_ints(&[3, 7]));
    let ops = st.ops();

    assert_eq!(
        ops[..6].iter().map(op_name).collect::<Vec<_>>(),
        vec!["make_box", "make_box", "arrange_row", "move_to", "fade_in", "wait"]
    );
    assert_eq!(
        ops[4],
        StageOp::FadeIn {
            handles: vec![VisualHandle(0), VisualHandle(1)]
        }
    );

    let shift = ops
        .iter()
        .find_map(|op| match op {
            StageOp::Shift { moves } => Some(moves.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(shift.len(), 2);
    assert_eq!(shift[0].0, vec![VisualHandle(0), VisualHandle(2)]);
    assert!((shift[0].1 - Vec2::new(-0.2, 0.4)).hypot() < 1e-9);
    assert_eq!(shift[1].0, vec![VisualHandle(1), VisualHandle(3)]);
    assert!((shift[1].1 - Vec2::new(0.2, 0.4)).hypot() < 1e-9);

    let ts = transforms(ops);
    assert_eq!(ts.len(), 1);
    assert_eq!(ts[0].0, &[VisualHandle(0), VisualHandle(1)]);
    assert_eq!(ts[0].1, &[VisualHandle(7), VisualHandle(8)]);

    assert!(matches!(ops.last(), Some(StageOp::Wait { secs }) if (*secs - 0.5).abs() < 1e-12));
}

#[test]
fn comparison_boxes_and_caption_sit_below_the_frame() {
    let (_, st) = record(&Sequence::from_ints(&[3, 7]));
    let ops = st.ops();

    let caption_at = ops
        .iter()
        .find_map(|op| match op {
            StageOp::MakeText { content, at, .. } if content == "Comparing 3 < 7" => Some(*at),
            _ => None,
        })
        .unwrap();
    assert!((caption_at - Point::new(-2.0, -0.35)).hypot() < 1e-9);

    let single_moves: Vec<Point> = ops
        .iter()
        .filter_map(|op| match op {
            StageOp::MoveTo { handles, center } if handles.len() == 1 => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(single_moves, vec![Point::new(-2.0, -1.0), Point::new(2.0, -1.0)]);

    let merged_center = ops
        .iter()
        .rev()
        .find_map(|op| match op {
            StageOp::MoveTo { center, .. } => Some(*center),
            _ => None,
        })
        .unwrap();
    assert_eq!(merged_center, Point::new(0.0, -0.5));
}

#[test]
fn stage_narration_matches_the_event_narration_without_captions() {
    let seq = sample();
    let expected: Vec<String> = trace(seq.clone())
        .unwrap()
        .events
        .iter()
        .filter(|e| e.text_line().is_some())
        .map(SortEvent::narration)
        .collect();

    let (_, st) = record(&seq);
    assert_eq!(st.narration(), expected);
}

#[test]
fn every_transform_pairs_equal_groups_of_sorted_boxes() {
    let (_, st) = record(&sample());
    let ts = transforms(st.ops());
    assert_eq!(ts.len(), 7);

    for (old, new) in &ts {
        assert_eq!(old.len(), new.len());
        assert!(new.iter().all(|h| st.kind_of(*h) == Some(HandleKind::Box)));
        let values: Vec<f64> = new
            .iter()
            .map(|h| st.label_of(*h).unwrap().parse::<f64>().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    }

    let last = ts.last().unwrap().1;
    let labels: Vec<&str> = last.iter().map(|h| st.label_of(*h).unwrap()).collect();
    assert_eq!(labels, vec!["-13", "-10", "3", "6", "7", "15", "23.5", "55"]);
}

#[test]
fn each_comparison_shows_two_boxes_and_a_caption() {
    let seq = sample();
    let compared = trace(seq.clone())
        .unwrap()
        .events
        .iter()
        .filter(|e| matches!(e, SortEvent::Compared { .. }))
        .count();

    let (_, st) = record(&seq);
    let captions = st
        .ops()
        .iter()
        .filter(|op| matches!(op, StageOp::MakeText { .. }))
        .count();
    let triple_fades = st
        .ops()
        .iter()
        .filter(|op| matches!(op, StageOp::FadeOut { handles } if handles.len() == 3))
        .count();
    assert_eq!(captions, compared);
    assert_eq!(triple_fades, compared);
}

#[test]
fn single_element_only_narrates() {
    let (sorted, st) = record(&Sequence::from_ints(&[42]));
    assert_eq!(sorted.labels(), vec!["42"]);
    assert_eq!(
        st.narration(),
        vec!["mergeSort called on [42]", "return (base case) [42]"]
    );
    assert!(transforms(st.ops()).is_empty());
    assert!(!st.ops().iter().any(|op| matches!(op, StageOp::Highlight { .. })));
}

#[test]
fn empty_sequence_is_a_base_case() {
    let (sorted, st) = record(&Sequence::new(Vec::new()));
    assert!(sorted.is_empty());
    assert_eq!(st.narration().len(), 2);
}

#[test]
fn unorderable_input_fails_before_touching_the_stage() {
    let seq = Sequence::new(vec![Element::int(1), Element::real(f64::NAN)]);
    let mut viz = MergeSortVisualizer::new(RecordingStage::new(), &Config::default());
    let err = viz.run(&seq).unwrap_err();
    assert!(matches!(err, MergeVizError::Comparison(_)));
    assert!(viz.stage().ops().is_empty());
}

#[test]
fn borrowed_stage_can_be_driven() {
    let mut st = RecordingStage::new();
    MergeSortVisualizer::new(&mut st, &Config::default())
        .run(&Sequence::from_ints(&[2, 1]))
        .unwrap();
    assert_eq!(transforms(st.ops()).len(), 1);
}

#[test]
fn timeline_run_yields_a_valid_scene() {
    let cfg = Config::default();
    let mut viz = MergeSortVisualizer::new(TimelineStage::new(&cfg).unwrap(), &cfg);
    viz.run(&Sequence::from_ints(&[3, 1, 2])).unwrap();
    let scene = viz.into_stage().finish().unwrap();

    scene.validate().unwrap();
    assert!(scene.duration.0 > 300, "duration {}", scene.duration.0);
    assert!(scene.objects.iter().any(|o| o.id == "box0"));
    assert!(scene.objects.iter().any(|o| o.id.starts_with("narration")));
}

fn op_name(op: &StageOp) -> &'static str {
    match op {
        StageOp::MakeBox { .. } => "make_box",
        StageOp::MakeText { .. } => "make_text",
        StageOp::ArrangeRow { .. } => "arrange_row",
        StageOp::MoveTo { .. } => "move_to",
        StageOp::Highlight { .. } => "highlight",
        StageOp::Shift { .. } => "shift",
        StageOp::ShowText { .. } => "show_text",
        StageOp::FadeIn { .. } => "fade_in",
        StageOp::FadeOut { .. } => "fade_out",
        StageOp::Transform { .. } => "transform",
        StageOp::Wait { .. } => "wait",
    }
}

#[test]
fn mismatched_group_is_invalid_input() {
    let err = check_paired(&Sequence::from_ints(&[1, 2]), &[VisualHandle(0)]).unwrap_err();
    assert!(matches!(err, MergeVizError::InvalidInput(_)));
    check_paired(&Sequence::from_ints(&[1]), &[VisualHandle(0)]).unwrap();
}
