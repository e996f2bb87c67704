//! End-to-end scoring scenarios on hand-built landmark meshes.

use attention_score::{
    classify, AttentionCategory, AttentionClassifier, BoundingBox, Detection, FaceRegion,
    Landmark, LandmarkMesh, Point, PoseEstimator, SignalTier, NUM_LANDMARKS,
};

/// Build a 68-point mesh from a per-index generator.
fn mesh_from(f: impl Fn(usize) -> Point) -> LandmarkMesh {
    (0..NUM_LANDMARKS).map(f).collect::<Vec<_>>().into()
}

/// Every point parked at (150, 300) except the two outer eye corners.
fn eye_corners(right: Point, left: Point) -> LandmarkMesh {
    mesh_from(|i| match i {
        36 => right,
        45 => left,
        _ => Point::new(150.0, 300.0),
    })
}

/// Eyes bounded at x = 250 and x = 390 (center 320), the left outer corner
/// rotated `roll_deg` around the right one, and the nose bottom `yaw_px`
/// right of center.
fn posed(yaw_px: f32, roll_deg: f32) -> LandmarkMesh {
    let (sin, cos) = roll_deg.to_radians().sin_cos();
    mesh_from(|i| match i {
        36 => Point::new(250.0, 200.0),
        37..=41 => Point::new(270.0, 200.0),
        45 => Point::new(250.0 + 100.0 * cos, 200.0 + 100.0 * sin),
        42..=47 => Point::new(390.0, 200.0),
        33 => Point::new(320.0 + yaw_px, 280.0),
        27..=35 => Point::new(320.0 + yaw_px, 250.0),
        _ => Point::new(320.0, 300.0),
    })
}

#[test]
fn horizontal_eye_line_is_full_roll() {
    let mesh = eye_corners(Point::new(100.0, 200.0), Point::new(200.0, 200.0));
    assert_eq!(PoseEstimator::default().estimate_roll(&mesh), SignalTier::Full);
}

#[test]
fn twenty_degree_tilt_is_strong_roll() {
    let mesh = eye_corners(Point::new(100.0, 200.0), Point::new(200.0, 236.0));
    let estimator = PoseEstimator::default();

    let angle = estimator.measure(&mesh).unwrap().roll_degrees;
    assert!((angle - 19.799).abs() < 0.01, "angle = {}", angle);
    assert_eq!(estimator.estimate_roll(&mesh), SignalTier::Strong);
}

#[test]
fn centered_nose_and_level_eyes_is_good() {
    let mesh = mesh_from(|i| match i {
        36 | 45 => Point::new(300.0, 200.0),
        37..=41 => Point::new(300.0 + (i - 36) as f32, 200.0),
        42..=47 => Point::new(300.0 - (48 - i) as f32, 200.0),
        33 => Point::new(300.0, 260.0),
        27..=35 => Point::new(300.0, 240.0),
        _ => Point::new(300.0, 320.0),
    });
    // Right eye outer bound (min x) and left eye outer bound (max x) are both 300.
    let estimator = PoseEstimator::default();
    assert_eq!(estimator.estimate_yaw(&mesh), SignalTier::Full);

    let attention = classify(Some(&Detection::new(mesh)));
    assert_eq!(attention.score, 2.0);
    assert_eq!(attention.category, AttentionCategory::Good);
    assert_eq!(attention.color(), "green");
}

#[test]
fn moderate_yaw_and_roll_is_normal() {
    let mesh = posed(10.0, 25.0);
    let estimator = PoseEstimator::default();

    let m = estimator.measure(&mesh).unwrap();
    assert!((m.yaw_deviation - 10.0).abs() < 1e-3);
    assert!((m.roll_degrees - 25.0).abs() < 1e-3);

    let attention = classify(Some(&Detection::new(mesh)));
    assert_eq!(attention.pose.yaw, SignalTier::Fair);
    assert_eq!(attention.pose.roll, SignalTier::Fair);
    assert!((attention.score - 1.2).abs() < 1e-6);
    assert_eq!(attention.category, AttentionCategory::Normal);
    assert_eq!(attention.color(), "yellow");
}

#[test]
fn no_detection_is_red() {
    let attention = classify(None);
    assert_eq!(attention.score, 0.0);
    assert_eq!(attention.category, AttentionCategory::NotDetected);
    assert_eq!(attention.color(), "red");
    assert_eq!(attention.label(), "Not detected");
}

#[test]
fn wrong_landmark_count_is_zero_roll() {
    let estimator = PoseEstimator::default();
    for n in [67, 69] {
        let mesh = LandmarkMesh::new(vec![Point::new(1.0, 1.0); n]);
        assert_eq!(estimator.estimate_roll(&mesh), SignalTier::Undetected);
        assert_eq!(estimator.estimate_roll(&mesh).value(), 0.0);
        assert_eq!(
            classify(Some(&Detection::new(mesh))).category,
            AttentionCategory::NotDetected
        );
    }
}

#[test]
fn classification_is_deterministic() {
    let classifier = AttentionClassifier::default();
    for (yaw, roll) in [(0.0, 0.0), (6.0, 12.0), (10.0, 25.0), (30.0, 45.0)] {
        let mesh = posed(yaw, roll);
        let first = classifier.classify_mesh(&mesh);
        let second = classifier.classify_mesh(&mesh);
        assert_eq!(first, second);
    }
}

#[test]
fn score_stays_in_range() {
    let classifier = AttentionClassifier::default();
    for yaw in (0..60).map(|v| v as f32 * 0.5) {
        for roll in (-85..=85).step_by(5).map(|v| v as f32) {
            let score = classifier.classify_mesh(&posed(yaw, roll)).score;
            assert!(
                (0.0..=2.0).contains(&score),
                "score {} at {} / {}",
                score,
                yaw,
                roll
            );
        }
    }
}

#[test]
fn yaw_signal_never_rises_with_deviation() {
    let estimator = PoseEstimator::default();
    let mut previous = SignalTier::Full;
    for step in 0..120 {
        let dx = step as f32 * 0.25;
        let tier = estimator.estimate_yaw(&posed(dx, 0.0));
        assert!(tier <= previous, "yaw rose at {}px", dx);
        previous = tier;
    }
    assert_eq!(previous, SignalTier::Weak);
}

#[test]
fn roll_signal_never_rises_with_tilt() {
    let estimator = PoseEstimator::default();
    let mut previous = SignalTier::Full;
    for degrees in 0..90 {
        let tier = estimator.estimate_roll(&posed(0.0, degrees as f32));
        let mirrored = estimator.estimate_roll(&posed(0.0, -(degrees as f32)));
        assert_eq!(tier, mirrored);
        assert!(tier <= previous, "roll rose at {} degrees", degrees);
        previous = tier;
    }
    assert_eq!(previous, SignalTier::Weak);
}

#[test]
fn score_boundaries_in_both_directions() {
    let classifier = AttentionClassifier::default();
    assert_eq!(classifier.category_for(0.99), AttentionCategory::Low);
    assert_eq!(classifier.category_for(1.0), AttentionCategory::Low);
    assert_eq!(classifier.category_for(1.000_001), AttentionCategory::Normal);
    assert_eq!(classifier.category_for(1.599_999), AttentionCategory::Normal);
    assert_eq!(classifier.category_for(1.6), AttentionCategory::Good);
}

#[test]
fn reference_face_turned_away() {
    let classifier = AttentionClassifier::default();
    let mesh = LandmarkMesh::reference_frontal(&BoundingBox::new(200.0, 100.0, 240.0, 280.0));

    let turned = mesh.with_region_shifted(FaceRegion::Nose, 15.0);
    let corner = turned
        .landmark(Landmark::RightEyeOuterCorner)
        .expect("valid mesh");
    let tilted = turned.with_landmark(
        Landmark::LeftEyeOuterCorner,
        Point::new(corner.x + 100.0, corner.y + 100.0),
    );

    let attention = classifier.classify_mesh(&tilted);
    assert_eq!(attention.pose.yaw, SignalTier::Weak);
    assert_eq!(attention.pose.roll, SignalTier::Weak);
    assert_eq!(attention.category, AttentionCategory::Low);
}
