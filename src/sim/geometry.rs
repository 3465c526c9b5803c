//! Axis-aligned geometry primitives
//!
//! Rectangles are described by their center and full dimensions. None of
//! these tests are exact circle/rect intersection: the game relies on the
//! AABB approximation for its feel, so keep it that way.

use glam::Vec2;

/// Check whether two axis-aligned rectangles overlap
///
/// Comparisons are strict, so rectangles that only share an edge do not
/// overlap.
#[inline]
pub fn rect_overlaps(pos_a: Vec2, dim_a: Vec2, pos_b: Vec2, dim_b: Vec2) -> bool {
    pos_a.x + dim_a.x / 2.0 > pos_b.x - dim_b.x / 2.0
        && pos_a.x - dim_a.x / 2.0 < pos_b.x + dim_b.x / 2.0
        && pos_a.y + dim_a.y / 2.0 > pos_b.y - dim_b.y / 2.0
        && pos_a.y - dim_a.y / 2.0 < pos_b.y + dim_b.y / 2.0
}

/// Check whether a circle overlaps a rectangle
///
/// The rectangle is grown by the radius on both axes, which also counts the
/// rectangle's corner regions as hits.
#[inline]
pub fn circle_overlaps_rect(circle_pos: Vec2, radius: f32, rect_pos: Vec2, rect_dim: Vec2) -> bool {
    circle_pos.x + radius > rect_pos.x - rect_dim.x / 2.0
        && circle_pos.x - radius < rect_pos.x + rect_dim.x / 2.0
        && circle_pos.y + radius > rect_pos.y - rect_dim.y / 2.0
        && circle_pos.y - radius < rect_pos.y + rect_dim.y / 2.0
}

/// Point where the line through `p0`-`p1` crosses the axis-aligned line
/// through `l0`-`l1`
///
/// # Panics
///
/// Panics if `l0`-`l1` is neither vertical nor horizontal. A segment parallel
/// to the queried line divides by zero; callers must not ask for that.
pub fn segment_intersect_axis_aligned_line(p0: Vec2, p1: Vec2, l0: Vec2, l1: Vec2) -> Vec2 {
    let d = p1 - p0;

    if l0.x == l1.x {
        Vec2::new(l0.x, (l0.x - p0.x) * (d.y / d.x) + p0.y)
    } else if l0.y == l1.y {
        Vec2::new((l0.y - p0.y) * (d.x / d.y) + p0.x, l0.y)
    } else {
        panic!("line {l0}-{l1} must be horizontal or vertical");
    }
}
