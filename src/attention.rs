//! Attention score and category.
//!
//! The score is the sum of the yaw and roll signal weights, so it ranges over
//! [0, 2]. Categories are assigned from half-open intervals, first match wins:
//!
//! | score                      | category    | color  |
//! |----------------------------|-------------|--------|
//! | `0`                        | NotDetected | red    |
//! | `0 < s <= low_max`         | Low         | orange |
//! | `low_max < s < good_min`   | Normal      | yellow |
//! | `s >= good_min`            | Good        | green  |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AttentionConfig, CategoryBounds};
use crate::pose::{PoseEstimator, PoseSignal};
use crate::types::LandmarkMesh;

/// Output of the external face detector for one frame.
///
/// A detection without landmarks is treated the same as no detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub landmarks: Option<LandmarkMesh>,
}

impl Detection {
    pub fn new(landmarks: LandmarkMesh) -> Self {
        Self {
            landmarks: Some(landmarks),
        }
    }
}

/// Discrete attention level, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionCategory {
    NotDetected,
    Low,
    Normal,
    Good,
}

impl AttentionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AttentionCategory::NotDetected => "Not detected",
            AttentionCategory::Low => "Low attention",
            AttentionCategory::Normal => "Normal attention",
            AttentionCategory::Good => "Good attention",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AttentionCategory::NotDetected => "red",
            AttentionCategory::Low => "orange",
            AttentionCategory::Normal => "yellow",
            AttentionCategory::Good => "green",
        }
    }
}

/// Result of classifying one detection tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attention {
    /// Sum of the yaw and roll weights, in [0, 2].
    pub score: f32,
    pub category: AttentionCategory,
    /// The signals the score was built from. Both are `Undetected` when no
    /// face was found.
    pub pose: PoseSignal,
}

impl Attention {
    pub const fn not_detected() -> Self {
        Self {
            score: 0.0,
            category: AttentionCategory::NotDetected,
            pose: PoseSignal::undetected(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// Turns detections into attention scores and categories.
///
/// Stateless: every call depends only on its own input, so a classifier can
/// be shared between threads and called from overlapping ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttentionClassifier {
    estimator: PoseEstimator,
    bounds: CategoryBounds,
}

impl Default for AttentionClassifier {
    fn default() -> Self {
        Self::new(&AttentionConfig::default())
    }
}

impl AttentionClassifier {
    pub fn new(config: &AttentionConfig) -> Self {
        Self {
            estimator: PoseEstimator::new(config),
            bounds: config.categories,
        }
    }

    pub fn estimator(&self) -> &PoseEstimator {
        &self.estimator
    }

    /// Classify one detector result. `None`, or a detection without
    /// landmarks, short-circuits to [`AttentionCategory::NotDetected`]
    /// without running pose estimation.
    pub fn classify(&self, detection: Option<&Detection>) -> Attention {
        match detection.and_then(|d| d.landmarks.as_ref()) {
            Some(mesh) => self.classify_mesh(mesh),
            None => {
                debug!("no face detected");
                Attention::not_detected()
            }
        }
    }

    /// Classify a landmark mesh directly.
    pub fn classify_mesh(&self, mesh: &LandmarkMesh) -> Attention {
        let pose = self.estimator.estimate(mesh);
        let score = pose.score();
        Attention {
            score,
            category: self.category_for(score),
            pose,
        }
    }

    /// Map a score onto a category using the configured bounds.
    pub fn category_for(&self, score: f32) -> AttentionCategory {
        if score.is_nan() || score <= 0.0 {
            AttentionCategory::NotDetected
        } else if score <= self.bounds.low_max {
            AttentionCategory::Low
        } else if score < self.bounds.good_min {
            AttentionCategory::Normal
        } else {
            AttentionCategory::Good
        }
    }
}

/// Classify with the default calibration.
pub fn classify(detection: Option<&Detection>) -> Attention {
    AttentionClassifier::default().classify(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::FaceRegion;
    use crate::pose::SignalTier;
    use crate::types::{BoundingBox, Point};

    fn frontal() -> LandmarkMesh {
        LandmarkMesh::reference_frontal(&BoundingBox::new(200.0, 100.0, 240.0, 280.0))
    }

    #[test]
    fn category_boundaries() {
        let c = AttentionClassifier::default();
        assert_eq!(c.category_for(0.0), AttentionCategory::NotDetected);
        assert_eq!(c.category_for(0.3), AttentionCategory::Low);
        assert_eq!(c.category_for(1.0), AttentionCategory::Low);
        assert_eq!(c.category_for(1.01), AttentionCategory::Normal);
        assert_eq!(c.category_for(1.59), AttentionCategory::Normal);
        assert_eq!(c.category_for(1.6), AttentionCategory::Good);
        assert_eq!(c.category_for(2.0), AttentionCategory::Good);
        assert_eq!(c.category_for(f32::NAN), AttentionCategory::NotDetected);
    }

    #[test]
    fn every_tier_pair_scores_in_range() {
        let tiers = [
            SignalTier::Weak,
            SignalTier::Fair,
            SignalTier::Strong,
            SignalTier::Full,
        ];
        for yaw in tiers {
            for roll in tiers {
                let score = PoseSignal { yaw, roll }.score();
                assert!(score > 0.0 && score <= 2.0);
            }
        }
        // 1.6 is reachable two ways and must land on Good both times.
        let c = AttentionClassifier::default();
        let a = PoseSignal {
            yaw: SignalTier::Strong,
            roll: SignalTier::Strong,
        };
        let b = PoseSignal {
            yaw: SignalTier::Full,
            roll: SignalTier::Fair,
        };
        assert_eq!(c.category_for(a.score()), AttentionCategory::Good);
        assert_eq!(c.category_for(b.score()), AttentionCategory::Good);
    }

    #[test]
    fn no_face_is_not_detected() {
        let c = AttentionClassifier::default();
        for attention in [c.classify(None), c.classify(Some(&Detection::default()))] {
            assert_eq!(attention.score, 0.0);
            assert_eq!(attention.category, AttentionCategory::NotDetected);
            assert_eq!(attention.color(), "red");
            assert_eq!(attention.pose, PoseSignal::undetected());
        }
    }

    #[test]
    fn invalid_mesh_collapses_to_zero() {
        let mut mesh = frontal();
        mesh.points.truncate(67);
        let attention = classify(Some(&Detection::new(mesh)));
        assert_eq!(attention.score, 0.0);
        assert_eq!(attention.category, AttentionCategory::NotDetected);
    }

    #[test]
    fn frontal_face_is_good() {
        let attention = classify(Some(&Detection::new(frontal())));
        assert_eq!(attention.score, 2.0);
        assert_eq!(attention.category, AttentionCategory::Good);
        assert_eq!(attention.label(), "Good attention");
        assert_eq!(attention.color(), "green");
    }

    #[test]
    fn turned_head_lowers_category() {
        let c = AttentionClassifier::default();
        let turned = frontal().with_region_shifted(FaceRegion::Nose, 20.0);
        let attention = c.classify_mesh(&turned);
        assert_eq!(attention.pose.yaw, SignalTier::Weak);
        assert!((attention.score - 1.3).abs() < 1e-6);
        assert_eq!(attention.category, AttentionCategory::Normal);
    }

    #[test]
    fn categories_are_ordered() {
        assert!(AttentionCategory::NotDetected < AttentionCategory::Low);
        assert!(AttentionCategory::Low < AttentionCategory::Normal);
        assert!(AttentionCategory::Normal < AttentionCategory::Good);
    }

    #[test]
    fn detection_json() {
        let none: Detection = serde_json::from_str("{}").unwrap();
        assert!(none.landmarks.is_none());

        let some: Detection =
            serde_json::from_str(r#"{ "landmarks": [{ "x": 1.0, "y": 2.0 }] }"#).unwrap();
        assert_eq!(some.landmarks.unwrap().points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn classifier_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AttentionClassifier>();

        let classifier = std::sync::Arc::new(AttentionClassifier::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let classifier = classifier.clone();
                std::thread::spawn(move || classifier.classify_mesh(&frontal()).category)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), AttentionCategory::Good);
        }
    }
}
