use serde::{Deserialize, Serialize};

use crate::landmarks::{FaceRegion, Landmark, NUM_LANDMARKS};

/// A 2D point with floating-point coordinates in frame pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of a set of points. Returns `None` for an empty slice.
    pub fn mean(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f32;
        let sum = points
            .iter()
            .fold(Point::new(0.0, 0.0), |acc, p| Point::new(acc.x + p.x, acc.y + p.y));
        Some(Point::new(sum.x / n, sum.y / n))
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A bounding box defined by top-left corner, width, and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a point from normalized coordinates [0,1] to image coordinates
    /// within this bounding box.
    pub fn denormalize_point(&self, p: Point) -> Point {
        Point::new(self.x + p.x * self.width, self.y + p.y * self.height)
    }
}

/// A facial landmark mesh as produced by an external landmark detector.
///
/// The mesh is only usable for pose estimation when it holds exactly
/// [`NUM_LANDMARKS`] finite points; see [`LandmarkMesh::is_valid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkMesh {
    pub points: Vec<Point>,
}

impl LandmarkMesh {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn num_landmarks(&self) -> usize {
        self.points.len()
    }

    /// True when the mesh follows the 68-point convention and every
    /// coordinate is finite.
    pub fn is_valid(&self) -> bool {
        self.points.len() == NUM_LANDMARKS && self.points.iter().all(Point::is_finite)
    }

    /// Points of a facial region, or `None` if the mesh is not a valid
    /// 68-point mesh.
    pub fn region(&self, region: FaceRegion) -> Option<&[Point]> {
        if !self.is_valid() {
            return None;
        }
        Some(&self.points[region.indices()])
    }

    /// A single named landmark, or `None` if the mesh is not valid.
    pub fn landmark(&self, landmark: Landmark) -> Option<Point> {
        if !self.is_valid() {
            return None;
        }
        Some(self.points[landmark.index()])
    }

    /// Builds a synthetic frontal face (no yaw, no roll) scaled into `bbox`.
    ///
    /// Useful for calibrating thresholds and for exercising the engine
    /// without a landmark detector.
    pub fn reference_frontal(bbox: &BoundingBox) -> Self {
        let points = REFERENCE_FRONTAL_68
            .iter()
            .map(|&(x, y)| bbox.denormalize_point(Point::new(x, y)))
            .collect();
        Self { points }
    }

    /// Returns a copy with every point shifted horizontally by `dx` when its
    /// index falls inside `region`.
    pub fn with_region_shifted(&self, region: FaceRegion, dx: f32) -> Self {
        let range = region.indices();
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if range.contains(&i) {
                    Point::new(p.x + dx, p.y)
                } else {
                    *p
                }
            })
            .collect();
        Self { points }
    }

    /// Returns a copy with one landmark moved to `point`. Out-of-range
    /// indices leave the mesh unchanged.
    pub fn with_landmark(&self, landmark: Landmark, point: Point) -> Self {
        let mut mesh = self.clone();
        if let Some(p) = mesh.points.get_mut(landmark.index()) {
            *p = point;
        }
        mesh
    }
}

impl std::ops::Index<usize> for LandmarkMesh {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl From<Vec<Point>> for LandmarkMesh {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Frontal iBUG 68-point face in normalized [0,1] coordinates.
///
/// Symmetric about x = 0.5, with the eye corners 36 and 45 on the same row.
const REFERENCE_FRONTAL_68: [(f32, f32); NUM_LANDMARKS] = [
    // Jaw line (0-16)
    (0.10, 0.35),
    (0.11, 0.45),
    (0.12, 0.55),
    (0.14, 0.65),
    (0.18, 0.73),
    (0.24, 0.80),
    (0.32, 0.85),
    (0.41, 0.88),
    (0.50, 0.89),
    (0.59, 0.88),
    (0.68, 0.85),
    (0.76, 0.80),
    (0.82, 0.73),
    (0.86, 0.65),
    (0.88, 0.55),
    (0.89, 0.45),
    (0.90, 0.35),
    // Right eyebrow (17-21)
    (0.20, 0.26),
    (0.25, 0.22),
    (0.32, 0.21),
    (0.38, 0.23),
    (0.43, 0.27),
    // Left eyebrow (22-26)
    (0.57, 0.27),
    (0.62, 0.23),
    (0.68, 0.21),
    (0.75, 0.22),
    (0.80, 0.26),
    // Nose bridge (27-30)
    (0.50, 0.32),
    (0.50, 0.40),
    (0.50, 0.48),
    (0.50, 0.55),
    // Nose bottom (31-35)
    (0.40, 0.58),
    (0.45, 0.60),
    (0.50, 0.62),
    (0.55, 0.60),
    (0.60, 0.58),
    // Right eye (36-41)
    (0.24, 0.32),
    (0.28, 0.29),
    (0.34, 0.29),
    (0.38, 0.33),
    (0.34, 0.35),
    (0.28, 0.35),
    // Left eye (42-47)
    (0.62, 0.33),
    (0.66, 0.29),
    (0.72, 0.29),
    (0.76, 0.32),
    (0.72, 0.35),
    (0.66, 0.35),
    // Outer lip (48-59)
    (0.32, 0.72),
    (0.38, 0.68),
    (0.44, 0.66),
    (0.50, 0.67),
    (0.56, 0.66),
    (0.62, 0.68),
    (0.68, 0.72),
    (0.62, 0.78),
    (0.56, 0.80),
    (0.50, 0.81),
    (0.44, 0.80),
    (0.38, 0.78),
    // Inner lip (60-67)
    (0.36, 0.72),
    (0.44, 0.70),
    (0.50, 0.70),
    (0.56, 0.70),
    (0.64, 0.72),
    (0.56, 0.74),
    (0.50, 0.75),
    (0.44, 0.74),
];
