use super::*;

#[test]
fn line_index_finds_first_line() {
    let src = "abc\ndef\nghi";
    let idx = LineIndex::build(src);
    assert_eq!(idx.line_column(0, src), (1, 1));
    assert_eq!(idx.line_column(4, src), (2, 1));
    assert_eq!(idx.line_column(9, src), (3, 2));
}

#[test]
fn line_count_matches_newlines_plus_one() {
    let idx = LineIndex::build("a\nb\nc");
    assert_eq!(idx.line_count(), 3);
}

#[test]
fn position_ordering_by_filename_then_offset() {
    let a = Position::new("a.tu", 1, 1, 5);
    let b = Position::new("a.tu", 1, 1, 10);
    let c = Position::new("b.tu", 1, 1, 0);
    assert!(a < b);
    assert!(a < c);
}

#[test]
fn span_merge_covers_both() {
    let s1 = Span::new(Position::new("a.tu", 1, 1, 0), Position::new("a.tu", 1, 3, 2));
    let s2 = Span::new(Position::new("a.tu", 1, 5, 4), Position::new("a.tu", 1, 7, 6));
    let merged = s1.merge(&s2);
    assert_eq!(merged.start.offset, 0);
    assert_eq!(merged.end.offset, 6);
}
