//! Head pose approximation from 2D landmark geometry.
//!
//! Two independent signals are derived from a mesh:
//!
//! - **Yaw proxy**: horizontal offset between the bottom of the nose and the
//!   midpoint of the outer eye bounds. It grows as the head turns away from
//!   the camera.
//! - **Roll**: tilt of the line through the outer eye corners relative to the
//!   horizontal axis.
//!
//! Both are bucketed into a small set of [`SignalTier`]s so detector jitter
//! does not show up in the score. Pitch is not estimated: with 2D landmarks a
//! tilted head is indistinguishable from a poor detection.

use tracing::{debug, trace};

use crate::config::{AttentionConfig, FacingThresholds, TierThresholds};
use crate::landmarks::{FaceRegion, Landmark};
use crate::types::{LandmarkMesh, Point};

/// Confidence tier of a single pose signal.
///
/// Ordered from `Undetected` (no usable mesh) up to `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignalTier {
    Undetected,
    Weak,
    Fair,
    Strong,
    Full,
}

impl SignalTier {
    /// Numeric weight of the tier: 0, 0.3, 0.6, 0.8 or 1.0.
    pub fn value(self) -> f32 {
        f32::from(self.tenths()) / 10.0
    }

    // Weights are summed in tenths so that scores land exactly on the
    // category bounds instead of drifting by float rounding.
    pub(crate) fn tenths(self) -> u8 {
        match self {
            SignalTier::Undetected => 0,
            SignalTier::Weak => 3,
            SignalTier::Fair => 6,
            SignalTier::Strong => 8,
            SignalTier::Full => 10,
        }
    }
}

/// The pair of bucketed pose signals for one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseSignal {
    pub yaw: SignalTier,
    pub roll: SignalTier,
}

impl PoseSignal {
    pub const fn undetected() -> Self {
        Self {
            yaw: SignalTier::Undetected,
            roll: SignalTier::Undetected,
        }
    }

    /// Sum of both signal weights, in [0, 2].
    pub fn score(&self) -> f32 {
        f32::from(self.yaw.tenths() + self.roll.tenths()) / 10.0
    }
}

/// Raw geometry behind the pose signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseMeasurement {
    /// Absolute horizontal distance in pixels between the nose bottom and
    /// the midpoint of the outer eye bounds.
    pub yaw_deviation: f32,
    /// Signed angle in degrees of the line from the right eye outer corner
    /// to the left eye outer corner.
    pub roll_degrees: f32,
}

/// Coarse horizontal facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Front,
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Front => "front",
            Facing::Right => "right",
        }
    }
}

/// Derives pose signals from a [`LandmarkMesh`].
///
/// Holds only calibration values, so one estimator can be shared freely
/// across threads. All operations are total: a mesh that is not a valid
/// 68-point mesh yields [`SignalTier::Undetected`] or `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseEstimator {
    yaw: TierThresholds,
    roll: TierThresholds,
    frame_width: f32,
    facing: FacingThresholds,
}

impl Default for PoseEstimator {
    fn default() -> Self {
        Self::new(&AttentionConfig::default())
    }
}

impl PoseEstimator {
    pub fn new(config: &AttentionConfig) -> Self {
        Self {
            yaw: config.yaw,
            roll: config.roll,
            frame_width: config.frame_width,
            facing: config.facing,
        }
    }

    /// Bucketed yaw proxy.
    pub fn estimate_yaw(&self, mesh: &LandmarkMesh) -> SignalTier {
        match yaw_deviation(mesh) {
            Some(deviation) => self.yaw.tier(deviation),
            None => SignalTier::Undetected,
        }
    }

    /// Bucketed roll, using the absolute inter-ocular angle.
    pub fn estimate_roll(&self, mesh: &LandmarkMesh) -> SignalTier {
        match roll_degrees(mesh) {
            Some(angle) => self.roll.tier(angle.abs()),
            None => SignalTier::Undetected,
        }
    }

    /// Both signals at once.
    pub fn estimate(&self, mesh: &LandmarkMesh) -> PoseSignal {
        let Some(measurement) = self.measure(mesh) else {
            return PoseSignal::undetected();
        };

        let signal = PoseSignal {
            yaw: self.yaw.tier(measurement.yaw_deviation),
            roll: self.roll.tier(measurement.roll_degrees.abs()),
        };
        trace!(
            yaw_deviation = measurement.yaw_deviation,
            roll_degrees = measurement.roll_degrees,
            yaw = ?signal.yaw,
            roll = ?signal.roll,
            "estimated pose"
        );
        signal
    }

    /// Raw yaw deviation and signed roll angle, or `None` for an invalid mesh.
    pub fn measure(&self, mesh: &LandmarkMesh) -> Option<PoseMeasurement> {
        if !mesh.is_valid() {
            debug!(
                landmarks = mesh.num_landmarks(),
                "rejecting mesh: expected 68 finite landmarks"
            );
            return None;
        }

        Some(PoseMeasurement {
            yaw_deviation: yaw_deviation(mesh)?,
            roll_degrees: roll_degrees(mesh)?,
        })
    }

    /// Horizontal facing direction from the eye and nose centroids.
    ///
    /// The offset between the eye midpoint and the nose centroid is
    /// normalized by the configured frame width and rounded to two decimals
    /// before comparison.
    pub fn facing(&self, mesh: &LandmarkMesh) -> Option<Facing> {
        let right_eye = Point::mean(mesh.region(FaceRegion::RightEye)?)?;
        let left_eye = Point::mean(mesh.region(FaceRegion::LeftEye)?)?;
        let nose = Point::mean(mesh.region(FaceRegion::Nose)?)?;

        let eye_mid_x = right_eye.x + (left_eye.x - right_eye.x) / 2.0;
        let offset = (eye_mid_x - nose.x) / self.frame_width;
        let offset = (offset * 100.0).round() / 100.0;

        let facing = if offset < self.facing.left {
            Facing::Left
        } else if offset >= self.facing.right {
            Facing::Right
        } else {
            Facing::Front
        };
        Some(facing)
    }
}

/// `|midpoint(outer eye bounds).x - nose_bottom.x|` in pixels.
fn yaw_deviation(mesh: &LandmarkMesh) -> Option<f32> {
    let left_eye = mesh.region(FaceRegion::LeftEye)?;
    let right_eye = mesh.region(FaceRegion::RightEye)?;
    let nose = mesh.region(FaceRegion::Nose)?;

    let left_outer_x = left_eye
        .iter()
        .map(|p| p.x)
        .fold(f32::NEG_INFINITY, f32::max);
    let right_outer_x = right_eye
        .iter()
        .map(|p| p.x)
        .fold(f32::INFINITY, f32::min);

    // Lowest nose point on screen; the first one wins on ties.
    let nose_bottom = nose
        .iter()
        .copied()
        .reduce(|lowest, p| if p.y > lowest.y { p } else { lowest })?;

    let center = (right_outer_x + left_outer_x) / 2.0;
    Some((center - nose_bottom.x).abs())
}

/// Signed angle in degrees from landmark 36 to landmark 45.
fn roll_degrees(mesh: &LandmarkMesh) -> Option<f32> {
    let right_corner = mesh.landmark(Landmark::RightEyeOuterCorner)?;
    let left_corner = mesh.landmark(Landmark::LeftEyeOuterCorner)?;
    let d = left_corner - right_corner;
    Some(d.y.atan2(d.x).to_degrees())
}
