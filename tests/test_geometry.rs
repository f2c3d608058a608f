use proptest::prelude::*;
use side_shooter::geometry::{intersects, Rect};

#[test]
fn overlapping_rects_intersect() {
    let a = Rect::new(0, 0, 120, 120);
    let b = Rect::new(100, 100, 20, 10);
    assert!(intersects(&a, &b));
    assert!(a.intersects(&b));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = Rect::new(0, 0, 120, 120);
    // Right edge of `a` is x=120 — exclusive
    assert!(!intersects(&a, &Rect::new(120, 0, 20, 10)));
    // Bottom edge of `a` is y=120 — exclusive
    assert!(!intersects(&a, &Rect::new(0, 120, 20, 10)));
    // One unit of overlap is enough
    assert!(intersects(&a, &Rect::new(119, 119, 20, 10)));
}

#[test]
fn containment_counts_as_intersection() {
    let outer = Rect::new(-800, 150, 800, 120);
    let inner = Rect::new(-400, 200, 10, 10);
    assert!(intersects(&outer, &inner));
}

#[test]
fn empty_rect_never_intersects() {
    let a = Rect::new(0, 0, 120, 120);
    assert!(!intersects(&a, &Rect::new(10, 10, 0, 10)));
    assert!(!intersects(&a, &Rect::new(10, 10, 10, -5)));
}

proptest! {
    #[test]
    fn intersection_is_symmetric(
        ax in -1000i32..1000, ay in -1000i32..1000, aw in 0i32..300, ah in 0i32..300,
        bx in -1000i32..1000, by in -1000i32..1000, bw in 0i32..300, bh in 0i32..300,
    ) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }

    #[test]
    fn non_empty_rect_intersects_itself(x in -1000i32..1000, y in -1000i32..1000, w in 1i32..300, h in 1i32..300) {
        let r = Rect::new(x, y, w, h);
        prop_assert!(intersects(&r, &r));
    }
}
