use super::*;

#[test]
fn test_pos_orders_by_line_then_column() {
    assert!(SourcePos::new(1, 40) < SourcePos::new(2, 1));
    assert!(SourcePos::new(3, 2) < SourcePos::new(3, 5));
    assert_eq!(SourcePos::new(4, 4), SourcePos::new(4, 4));
}

#[test]
fn test_pos_min() {
    let a = SourcePos::new(2, 9);
    let b = SourcePos::new(2, 3);
    assert_eq!(a.min(b), b);
    assert_eq!(b.min(a), b);
}

#[test]
fn test_pos_display() {
    assert_eq!(SourcePos::new(12, 7).to_string(), "12:7");
    assert_eq!(format!("{:?}", SourcePos::START), "1:1");
}
