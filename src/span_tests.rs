use super::*;

#[test]
fn span_basics_and_conversions() {
    let s = Span::new(10, 20);
    assert_eq!(s.start, 10);
    assert_eq!(s.end, 20);
    assert_eq!(s.len(), 10);

    assert!(Span::new(0, 0).is_empty());
    assert!(!Span::new(0, 1).is_empty());
    assert_eq!(Span::new(5, 3).len(), 0);

    let t: (u32, u32) = Span::new(5, 10).into();
    assert_eq!(t, (5, 10));

    let t: (usize, usize) = Span::new(5, 10).into();
    assert_eq!(t, (5, 10));

    let s: Span = (3u32..7u32).into();
    assert_eq!(s, Span::new(3, 7));

    let r: std::ops::Range<usize> = Span::new(3, 7).into();
    assert_eq!(r, 3usize..7usize);
}

#[test]
fn location_defaults_to_document_start() {
    assert_eq!(Location::default(), Location::new(1, 1));
    assert_eq!(Location::new(3, 14).to_string(), "3:14");
}

#[test]
fn spanned_compares_by_value_only() {
    let a = Spanned::with_location("key", Span::new(0, 3), Location::new(1, 1));
    let b = Spanned::with_location("key", Span::new(10, 13), Location::new(2, 1));
    assert_eq!(a, b);
    assert_eq!(a, "key");

    let s = Spanned::new(42);
    assert!(s.span.is_empty());
    assert_eq!(s.location, Location::new(1, 1));

    let mapped: Spanned<i64> = Spanned::with_span(7i32, Span::new(1, 2)).map();
    assert_eq!(mapped.value, 7i64);
    assert_eq!(mapped.span, Span::new(1, 2));
    assert_eq!(format!("{:?}", mapped), "7");
    assert_eq!(mapped.clone().take(), 7);
}
