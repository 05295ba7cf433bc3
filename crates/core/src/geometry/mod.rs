//! Basic 2D geometry in pixel space: points, rectangles, and the handful of
//! containment/intersection tests the hex math is built on.
//!
//! All tests here treat boundaries as inclusive. In particular, a point that
//! falls exactly on the edge of a triangle is *inside* that triangle. Pixel to
//! hex conversion depends on this: the slanted edge between two hexagons is
//! resolved with a single triangle test, so if the boundary belonged to
//! neither side we'd get gaps in the tiling.

mod unit;

pub use self::unit::*;

/// Which side of the directed line `a -> b` the point `(x, y)` is on. This is
/// the sign of the cross product `(b - a) × (p - a)`: `1` and `-1` for the two
/// sides and `0` if the point is exactly collinear.
pub fn side_of_line(a: Point2D, b: Point2D, x: f32, y: f32) -> i8 {
    let cross = (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

/// Is the point inside the triangle `abc`? The winding order of the triangle
/// doesn't matter. Points on an edge or vertex count as inside, i.e. a zero
/// side is compatible with either sign.
pub fn point_in_triangle(
    a: Point2D,
    b: Point2D,
    c: Point2D,
    x: f32,
    y: f32,
) -> bool {
    point_in_convex_polygon(&[a, b, c], x, y)
}

/// Is the point inside the convex polygon? Same rules as [point_in_triangle]:
/// either winding order works, and the boundary is inside. Polygons with fewer
/// than three points contain nothing.
pub fn point_in_convex_polygon(points: &[Point2D], x: f32, y: f32) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut has_positive = false;
    let mut has_negative = false;
    let edges = points.iter().zip(points.iter().cycle().skip(1));
    for (&a, &b) in edges {
        match side_of_line(a, b, x, y) {
            1 => has_positive = true,
            -1 => has_negative = true,
            _ => {}
        }
        if has_positive && has_negative {
            return false;
        }
    }
    true
}

/// Does any part of the segment `p0 -> p1` lie within the rectangle? Uses
/// Cohen–Sutherland clipping: repeatedly clip the outside endpoint to the
/// rectangle's boundary until both ends are inside (hit) or both ends share
/// an outside region (miss). Rectangles with no area never intersect.
pub fn segment_intersects_rect(p0: Point2D, p1: Point2D, rect: &Rect2D) -> bool {
    if rect.is_empty() {
        return false;
    }

    let (mut x0, mut y0) = (p0.x, p0.y);
    let (mut x1, mut y1) = (p1.x, p1.y);
    let mut code0 = rect.outcode(x0, y0);
    let mut code1 = rect.outcode(x1, y1);

    // Each pass moves one endpoint onto a boundary line, and each endpoint can
    // be clipped against at most two boundaries, so 4 passes always settle it.
    // The extra room guards against float noise.
    for _ in 0..8 {
        if (code0 | code1).is_inside() {
            return true;
        }
        if code0.overlaps(code1) {
            return false;
        }

        // At least one endpoint is outside, pick it
        let outside = if code0.is_inside() { code1 } else { code0 };
        let (x, y) = if outside.contains(Outcode::TOP) {
            (x0 + (x1 - x0) * (rect.top - y0) / (y1 - y0), rect.top)
        } else if outside.contains(Outcode::BOTTOM) {
            (x0 + (x1 - x0) * (rect.bottom() - y0) / (y1 - y0), rect.bottom())
        } else if outside.contains(Outcode::RIGHT) {
            (rect.right(), y0 + (y1 - y0) * (rect.right() - x0) / (x1 - x0))
        } else {
            (rect.left, y0 + (y1 - y0) * (rect.left - x0) / (x1 - x0))
        };

        if outside == code0 {
            x0 = x;
            y0 = y;
            code0 = rect.outcode(x0, y0);
        } else {
            x1 = x;
            y1 = y;
            code1 = rect.outcode(x1, y1);
        }
    }
    false
}
