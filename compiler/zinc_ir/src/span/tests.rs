use super::*;

#[test]
fn test_span_len_and_empty() {
    let span = Span::new(4, 10);
    assert_eq!(span.len(), 6);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
    assert!(Span::DUMMY.is_dummy());
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 12).merge(Span::new(3, 5));
    assert_eq!(merged, Span::new(3, 12));
}

#[test]
fn test_span_display() {
    assert_eq!(Span::new(1, 7).to_string(), "1..7");
}
