use super::*;

#[test]
fn labels_keep_integer_and_real_spelling() {
    assert_eq!(Element::int(-10).label(), "-10");
    assert_eq!(Element::real(23.5).label(), "23.5");
    assert_eq!(Element::real(2.0).label(), "2.0");
    assert_eq!(Element::parse("55").unwrap().label(), "55");
    assert_eq!(Element::parse(" -13 ").unwrap().value(), -13.0);
    assert_eq!(Element::parse("23.5").unwrap(), Element::real(23.5));
}

#[test]
fn parse_rejects_non_numbers() {
    let err = Element::parse("seven").unwrap_err();
    assert!(matches!(err, MergeVizError::Validation(_)));
}

#[test]
fn sequence_display_matches_list_notation() {
    let s = Sequence::parse("3, 7, 6, -10, 15, 23.5, 55, -13").unwrap();
    assert_eq!(s.to_string(), "[3, 7, 6, -10, 15, 23.5, 55, -13]");
    assert_eq!(Sequence::default().to_string(), "[]");
}

#[test]
fn sequence_parse_accepts_brackets_and_whitespace() {
    let s: Sequence = "[3 7,  6]".parse().unwrap();
    assert_eq!(s.values(), vec![3.0, 7.0, 6.0]);
    assert!(Sequence::parse("").unwrap().is_empty());
}

#[test]
fn json_input_mixing_strings_is_a_comparison_error() {
    let s = Sequence::from_json_str("[3, 23.5, -1]").unwrap();
    assert_eq!(s.labels(), vec!["3", "23.5", "-1"]);

    let err = Sequence::from_json_str(r#"[3, "x"]"#).unwrap_err();
    assert!(matches!(err, MergeVizError::Comparison(_)));

    let err = Sequence::from_json_str(r#"{"a": 1}"#).unwrap_err();
    assert!(matches!(err, MergeVizError::Validation(_)));
}

#[test]
fn nan_is_not_orderable() {
    let s: Sequence = vec![Element::int(1), Element::real(f64::NAN)].into();
    let err = s.validate_orderable().unwrap_err();
    assert!(matches!(err, MergeVizError::Comparison(_)));
    assert!(err.to_string().contains("element 1"));
}

#[test]
fn split_at_partitions_in_order() {
    let s = Sequence::from_ints(&[1, 2, 3, 4, 5, 6, 7]);
    let (l, r) = s.split_at(3);
    assert_eq!(l, Sequence::from_ints(&[1, 2, 3]));
    assert_eq!(r, Sequence::from_ints(&[4, 5, 6, 7]));
    assert!(l.is_sorted());
    assert!(!Sequence::from_ints(&[2, 1]).is_sorted());
}
