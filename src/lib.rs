//! # attention-score
//!
//! Estimate how attentive a viewer is toward the camera from the geometry of
//! a 68-point facial landmark mesh.
//!
//! This crate provides:
//! - **Pose signals**: a yaw proxy (nose offset from the eye midpoint) and the
//!   roll angle of the eye line, each bucketed into confidence tiers
//! - **Attention score**: the sum of both tiers, in [0, 2]
//! - **Categories**: Not detected / Low / Normal / Good, with a display label
//!   and color
//!
//! Face detection and landmark prediction are out of scope: feed the crate
//! whatever your landmark detector produces, once per frame. Every call is
//! pure and independent of previous frames; scheduling, smoothing and
//! rendering belong to the caller.
//!
//! ## Algorithm Overview
//!
//! 1. Reject meshes that do not hold exactly 68 finite points
//! 2. Yaw: `|midpoint(min x of right eye, max x of left eye) - x of lowest
//!    nose point|`, bucketed at 4 / 8 / 13 px
//! 3. Roll: `|atan2(dy, dx)|` between the outer eye corners (36, 45),
//!    bucketed at 10 / 20 / 30 degrees
//! 4. Tiers weigh 1.0 / 0.8 / 0.6 / 0.3 (0 when undetected); the score is
//!    yaw + roll
//!
//! ## Quick Start
//!
//! ```rust
//! use attention_score::{
//!     AttentionCategory, AttentionClassifier, BoundingBox, Detection, LandmarkMesh,
//! };
//!
//! let classifier = AttentionClassifier::default();
//!
//! // A synthetic frontal face; normally this comes from a landmark detector.
//! let mesh = LandmarkMesh::reference_frontal(&BoundingBox::new(200.0, 100.0, 240.0, 280.0));
//!
//! let attention = classifier.classify(Some(&Detection::new(mesh)));
//! assert_eq!(attention.category, AttentionCategory::Good);
//! println!("{} ({:.1}) -> {}", attention.label(), attention.score, attention.color());
//!
//! // No face in the frame
//! let attention = classifier.classify(None);
//! assert_eq!(attention.category, AttentionCategory::NotDetected);
//! ```
//!
//! ## Calibration
//!
//! The default thresholds assume a 640x480 capture. Load your own from JSON:
//!
//! ```rust,no_run
//! use attention_score::{AttentionClassifier, AttentionConfig};
//!
//! let config = AttentionConfig::load("attention.json").unwrap();
//! let classifier = AttentionClassifier::new(&config);
//! ```

mod attention;
mod config;
mod error;
pub mod landmarks;
mod pose;
mod types;

pub use attention::{classify, Attention, AttentionCategory, AttentionClassifier, Detection};
pub use config::{AttentionConfig, CategoryBounds, FacingThresholds, TierThresholds};
pub use error::{Error, Result};
pub use landmarks::{FaceRegion, Landmark, NUM_LANDMARKS};
pub use pose::{Facing, PoseEstimator, PoseMeasurement, PoseSignal, SignalTier};
pub use types::{BoundingBox, LandmarkMesh, Point};
