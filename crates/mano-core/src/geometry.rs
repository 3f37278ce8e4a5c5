//! Geometry kit - distances, hit tests and perimeter sampling
//!
//! All functions are pure. Coordinates are canvas pixels unless a caller
//! says otherwise; the kit itself is unit-agnostic.

use std::f32::consts::PI;

/// 2D point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        distance(*self, *other)
    }

    /// Linear interpolation
    pub fn lerp(&self, other: &Point2, t: f32) -> Point2 {
        Point2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point2 {
        Point2::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Euclidean distance
#[inline]
pub fn distance(p1: Point2, p2: Point2) -> f32 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}

/// Strictly inside the circle
#[inline]
pub fn point_in_circle(p: Point2, center: Point2, radius: f32) -> bool {
    distance(p, center) < radius
}

/// Near the outline of a circle (within `tolerance` of the rim)
#[inline]
pub fn point_near_circle_edge(p: Point2, center: Point2, radius: f32, tolerance: f32) -> bool {
    (distance(p, center) - radius).abs() < tolerance
}

/// Near the outline of an axis-aligned square of side `size`.
///
/// The point must sit inside the bounding box grown by `tolerance`, and within
/// `tolerance` of at least one of the four edge lines.
pub fn point_near_square_edge(p: Point2, center: Point2, size: f32, tolerance: f32) -> bool {
    let half = size / 2.0;
    let left = center.x - half;
    let right = center.x + half;
    let top = center.y - half;
    let bottom = center.y + half;

    let in_box = p.x > left - tolerance
        && p.x < right + tolerance
        && p.y > top - tolerance
        && p.y < bottom + tolerance;
    if !in_box {
        return false;
    }

    (p.x - left).abs() < tolerance
        || (p.x - right).abs() < tolerance
        || (p.y - top).abs() < tolerance
        || (p.y - bottom).abs() < tolerance
}

/// Traceable outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { center: Point2, radius: f32 },
    /// Axis-aligned square, `size` is the side length
    Square { center: Point2, size: f32 },
}

/// Shape kind without geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
        }
    }
}

impl Shape {
    /// Build a shape centered on `center`; `extent` is the circle radius or
    /// half the square side
    pub fn from_kind(kind: ShapeKind, center: Point2, extent: f32) -> Self {
        match kind {
            ShapeKind::Circle => Shape::Circle {
                center,
                radius: extent,
            },
            ShapeKind::Square => Shape::Square {
                center,
                size: extent * 2.0,
            },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Square { .. } => ShapeKind::Square,
        }
    }

    pub fn center(&self) -> Point2 {
        match self {
            Shape::Circle { center, .. } | Shape::Square { center, .. } => *center,
        }
    }

    /// Is the point on this shape's outline
    pub fn contains_on_outline(&self, p: Point2, tolerance: f32) -> bool {
        match *self {
            Shape::Circle { center, radius } => point_near_circle_edge(p, center, radius, tolerance),
            Shape::Square { center, size } => point_near_square_edge(p, center, size, tolerance),
        }
    }

    /// Sample `n` points on the outline
    pub fn perimeter_sample(&self, n: usize) -> Vec<Point2> {
        perimeter_sample(self, n)
    }
}

/// Sample `n` points on a shape's outline.
///
/// Circles are sampled at angles `2π·i/n`. Squares are sampled uniformly by
/// arc length, clockwise from the top-left corner, covering all four sides.
pub fn perimeter_sample(shape: &Shape, n: usize) -> Vec<Point2> {
    if n == 0 {
        return Vec::new();
    }

    match *shape {
        Shape::Circle { center, radius } => (0..n)
            .map(|i| {
                let angle = 2.0 * PI * i as f32 / n as f32;
                Point2::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect(),
        Shape::Square { center, size } => {
            let half = size / 2.0;
            let corners = [
                Point2::new(center.x - half, center.y - half),
                Point2::new(center.x + half, center.y - half),
                Point2::new(center.x + half, center.y + half),
                Point2::new(center.x - half, center.y + half),
            ];
            let perimeter = size * 4.0;

            (0..n)
                .map(|i| {
                    let s = perimeter * i as f32 / n as f32;
                    let side = ((s / size) as usize).min(3);
                    let t = (s - side as f32 * size) / size;
                    corners[side].lerp(&corners[(side + 1) % 4], t)
                })
                .collect()
        }
    }
}
