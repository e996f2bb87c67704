//! Named access into the 68-point (iBUG) landmark convention.
//!
//! Pose estimation never indexes a mesh with raw numbers; it asks for a
//! region or a landmark by name, and the lookup refuses meshes that do not
//! follow this layout.

use std::ops::RangeInclusive;

/// Number of points in the supported landmark convention.
pub const NUM_LANDMARKS: usize = 68;

/// Facial regions of the 68-point convention.
///
/// Left/right are subject-relative: `RightEye` is the subject's right eye,
/// which appears on the left of an unmirrored camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceRegion {
    Jaw,
    RightEyebrow,
    LeftEyebrow,
    Nose,
    RightEye,
    LeftEye,
    Mouth,
}

impl FaceRegion {
    pub const ALL: [FaceRegion; 7] = [
        FaceRegion::Jaw,
        FaceRegion::RightEyebrow,
        FaceRegion::LeftEyebrow,
        FaceRegion::Nose,
        FaceRegion::RightEye,
        FaceRegion::LeftEye,
        FaceRegion::Mouth,
    ];

    pub fn indices(self) -> RangeInclusive<usize> {
        match self {
            FaceRegion::Jaw => 0..=16,
            FaceRegion::RightEyebrow => 17..=21,
            FaceRegion::LeftEyebrow => 22..=26,
            FaceRegion::Nose => 27..=35,
            FaceRegion::RightEye => 36..=41,
            FaceRegion::LeftEye => 42..=47,
            FaceRegion::Mouth => 48..=67,
        }
    }
}

/// Individual landmarks used by the pose estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    /// Outer corner of the subject's right eye.
    RightEyeOuterCorner,
    /// Outer corner of the subject's left eye.
    LeftEyeOuterCorner,
    /// Bottom of the nose bridge.
    NoseTip,
}

impl Landmark {
    pub fn index(self) -> usize {
        match self {
            Landmark::RightEyeOuterCorner => 36,
            Landmark::LeftEyeOuterCorner => 45,
            Landmark::NoseTip => 30,
        }
    }
}
