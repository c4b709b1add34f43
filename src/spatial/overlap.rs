use macroquad::math::{Rect, Vec2};

use crate::object::MapObject;

/// Overlap between two `[origin, size]` rectangles.
///
/// Compares origin deltas against the larger extent on each axis. This is not
/// the interval test `a.overlaps(&b)` performs, and collision results depend on
/// the difference, so keep it as is.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    let clash_x = (a.x - b.x).abs() < a.w.max(b.w);
    let clash_y = (a.y - b.y).abs() < a.h.max(b.h);
    clash_x && clash_y
}

/// Whether `p` lies on or between two rectangle corners, given in any order.
#[inline]
pub fn contains_point(corner_a: Vec2, corner_b: Vec2, p: Vec2) -> bool {
    on_or_between(corner_a.x, corner_b.x, p.x) && on_or_between(corner_a.y, corner_b.y, p.y)
}

#[inline]
fn on_or_between(a: f32, b: f32, v: f32) -> bool {
    a == v || b == v || (a > v && b < v) || (a < v && b > v)
}

/// First candidate, in iteration order, whose rectangle overlaps `area`.
///
/// Candidates without a rectangle shape are skipped.
pub fn first_overlap<'a, I>(area: Rect, candidates: I) -> Option<&'a MapObject>
where
    I: IntoIterator<Item = &'a MapObject>,
{
    candidates
        .into_iter()
        .find(|obj| obj.bounds().is_some_and(|b| overlaps(b, area)))
}
