//! Collision detection and response for the ball
//!
//! The load-bearing part of Brickfall: intersection tests between the ball's
//! circle and the axis-aligned rectangles of the paddle and tiles, each
//! returning a penetration vector that pushes the ball back out.
//!
//! Everything here is a pure function over value types. Inputs are assumed
//! well-formed (finite coordinates, positive radius, non-degenerate
//! segments); malformed geometry is a caller bug and is only checked by
//! debug assertions.

use glam::Vec2;

/// Result of an intersection query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Whether the shapes intersect
    pub intersects: bool,
    /// Displacement that moves the circle center out of penetration
    /// (zero when there is no intersection)
    pub resolution: Vec2,
}

impl Hit {
    pub fn miss() -> Self {
        Self {
            intersects: false,
            resolution: Vec2::ZERO,
        }
    }

    pub fn resolved(resolution: Vec2) -> Self {
        Self {
            intersects: true,
            resolution,
        }
    }
}

/// Rotate a vector 90 degrees counter-clockwise (y-down screen basis).
///
/// Turns a segment tangent into its outward normal. Not interchangeable with
/// `Vec2::perp`, which rotates the opposite way in this basis.
#[inline]
pub fn orthogonal(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Reflect a velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Test whether a point lies strictly inside a rectangle.
///
/// Boundary points do not count as inside.
pub fn point_in_rect(p: Vec2, rect_center: Vec2, rect_size: Vec2) -> bool {
    let local = p - rect_center;
    local.x.abs() < 0.5 * rect_size.x && local.y.abs() < 0.5 * rect_size.y
}

/// Test a circle against an axis-aligned rectangle.
///
/// Three stages:
/// 1. Broad-phase point test against the rect expanded by the ball diameter.
///    Over-approximates at the corners; the edge tests below clean that up.
/// 2. If the circle center is strictly inside the rect, push it out along
///    the axis of smaller overlap (ties go vertical).
/// 3. Otherwise test the four edges as line segments, first hit wins.
pub fn circle_rect(
    circle_center: Vec2,
    circle_radius: f32,
    rect_center: Vec2,
    rect_size: Vec2,
) -> Hit {
    // Early-out if the circle is too far away for them to intersect
    if !point_in_rect(
        circle_center,
        rect_center,
        rect_size + Vec2::splat(2.0 * circle_radius),
    ) {
        return Hit::miss();
    }

    // Circle center inside the rect: move it out in the direction that
    // minimizes the overlap.
    if point_in_rect(circle_center, rect_center, rect_size) {
        let d = circle_center - rect_center;
        let half = 0.5 * rect_size;
        let h_overlap = half.x - d.x.abs();
        let v_overlap = half.y - d.y.abs();

        let resolution = if h_overlap < v_overlap {
            Vec2::new(d.x.signum() * h_overlap, 0.0)
        } else {
            Vec2::new(0.0, d.y.signum() * v_overlap)
        };
        return Hit::resolved(resolution);
    }

    // Center is outside but the shapes could still intersect. Walk the four
    // edges in a fixed winding; the first edge that reports a hit decides
    // the response (no closest-edge search, also at corners).
    let half = 0.5 * rect_size;
    let c0 = rect_center + Vec2::new(half.x, half.y);
    let c1 = rect_center + Vec2::new(-half.x, half.y);
    let c2 = rect_center + Vec2::new(-half.x, -half.y);
    let c3 = rect_center + Vec2::new(half.x, -half.y);

    for (start, end) in [(c0, c1), (c1, c2), (c2, c3), (c3, c0)] {
        let hit = circle_segment(circle_center, circle_radius, start, end);
        if hit.intersects {
            return hit;
        }
    }

    Hit::miss()
}

/// Test a circle against a line segment.
///
/// Endpoint captures are checked before the span test, so the projection
/// sign comparison in the middle only ever rejects centers whose
/// perpendicular foot falls outside the segment.
pub fn circle_segment(
    circle_center: Vec2,
    circle_radius: f32,
    seg_start: Vec2,
    seg_end: Vec2,
) -> Hit {
    debug_assert!(circle_radius > 0.0);
    debug_assert!(seg_start != seg_end);

    // Circle contains the start point
    let start_to_center = circle_center - seg_start;
    let start_dist = start_to_center.length();
    if start_dist < circle_radius {
        return Hit::resolved(start_to_center * (circle_radius / start_dist - 1.0));
    }

    // Circle contains the end point
    let end_to_center = circle_center - seg_end;
    let end_dist = end_to_center.length();
    if end_dist < circle_radius {
        return Hit::resolved(end_to_center * (circle_radius / end_dist - 1.0));
    }

    // Center is behind the start point or beyond the end point
    let tangent = (seg_end - seg_start).normalize();
    if start_to_center.dot(tangent).signum() == end_to_center.dot(tangent).signum() {
        return Hit::miss();
    }

    // Perpendicular distance from center to the line
    let normal = orthogonal(tangent);
    let distance = start_to_center.dot(normal);
    if distance.abs() >= circle_radius {
        return Hit::miss();
    }

    Hit::resolved(normal * (distance.signum() * (circle_radius - distance.abs())))
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Distance from a point to the nearest point on a rectangle
    fn rect_distance(p: Vec2, rect_center: Vec2, rect_size: Vec2) -> f32 {
        let half = 0.5 * rect_size;
        let local = p - rect_center;
        let nearest = local.clamp(-half, half);
        (local - nearest).length()
    }

    proptest! {
        /// Whenever the precise test reports contact, the expanded
        /// bounding-box pre-check must pass too.
        #[test]
        fn broad_phase_never_false_negative(
            px in -200.0f32..200.0,
            py in -200.0f32..200.0,
            cx in -50.0f32..50.0,
            cy in -50.0f32..50.0,
            sx in 1.0f32..100.0,
            sy in 1.0f32..100.0,
            radius in 0.5f32..50.0,
        ) {
            let p = Vec2::new(px, py);
            let rect_center = Vec2::new(cx, cy);
            let rect_size = Vec2::new(sx, sy);
            if rect_distance(p, rect_center, rect_size) < radius {
                prop_assert!(point_in_rect(
                    p,
                    rect_center,
                    rect_size + Vec2::splat(2.0 * radius),
                ));
            }
        }

        /// A face-on hit resolves along the face normal, away from the rect,
        /// and a second query after applying the resolution comes up clean.
        #[test]
        fn face_hit_resolves_and_separates(
            cx in -50.0f32..50.0,
            cy in -50.0f32..50.0,
            sx in 40.0f32..120.0,
            sy in 40.0f32..120.0,
            offset_frac in -0.5f32..0.5,
            penetration in 0.5f32..4.5,
            side in 0usize..4,
        ) {
            let radius = 5.0;
            let rect_center = Vec2::new(cx, cy);
            let rect_size = Vec2::new(sx, sy);
            let half = 0.5 * rect_size;

            // Place the center outside one face with a known penetration
            let (center, outward) = match side {
                0 => (
                    rect_center + Vec2::new(half.x + radius - penetration, offset_frac * half.y),
                    Vec2::new(1.0, 0.0),
                ),
                1 => (
                    rect_center + Vec2::new(-(half.x + radius - penetration), offset_frac * half.y),
                    Vec2::new(-1.0, 0.0),
                ),
                2 => (
                    rect_center + Vec2::new(offset_frac * half.x, half.y + radius - penetration),
                    Vec2::new(0.0, 1.0),
                ),
                _ => (
                    rect_center + Vec2::new(offset_frac * half.x, -(half.y + radius - penetration)),
                    Vec2::new(0.0, -1.0),
                ),
            };

            let hit = circle_rect(center, radius, rect_center, rect_size);
            prop_assert!(hit.intersects);
            // Pushes outward, opposing the approach
            prop_assert!(hit.resolution.dot(outward) > 0.0);
            prop_assert!(hit.resolution.dot(-outward) < 0.0);

            let second = circle_rect(center + hit.resolution, radius, rect_center, rect_size);
            prop_assert!(!second.intersects || second.resolution.length() < 1e-3);
        }
    }
}
