use {
    analyzer::{AnalyzerError, Pipeline},
    base::Vec2,
    image::PixelFormat,
    inference::{CannedClassifier, InferError, LabelTable},
    std::time::Duration,
    video::{DecodeMode, Plane, RawFrame, VideoError},
};

fn four_labels() -> LabelTable {
    LabelTable::new(["A", "B", "C", "D"]).unwrap()
}

#[test]
fn test_label_count_must_match_outputs() {
    let classifier = CannedClassifier::new(16, vec![0.25; 4]);
    let labels = LabelTable::new(["A", "B", "C"]).unwrap();
    let result = Pipeline::new(Box::new(classifier), labels);
    assert!(matches!(
        result,
        Err(AnalyzerError::Infer(InferError::LabelTableMismatch {
            labels: 3,
            outputs: 4
        }))
    ));
}

#[test]
fn test_run_produces_top_label() {
    let classifier = CannedClassifier::new(16, vec![0.1, 0.9, 0.05, 0.05]);
    let mut pipeline = Pipeline::new(Box::new(classifier), four_labels()).unwrap();
    let frame = RawFrame::uniform(Duration::ZERO, Vec2::new(64, 48), 90);
    let result = pipeline.run(&frame, DecodeMode::Direct).unwrap();
    assert_eq!(result.label, "B");
    assert_eq!(result.confidence, 0.9);
    assert_eq!(result.distribution.len(), 4);
}

#[test]
fn test_run_with_jpeg_round_trip() {
    let classifier = CannedClassifier::new(8, vec![0.7, 0.1, 0.1, 0.1]);
    let mut pipeline = Pipeline::new(Box::new(classifier), four_labels()).unwrap();
    let frame = RawFrame::uniform(Duration::ZERO, Vec2::new(32, 24), 128);
    assert_eq!(pipeline.run(&frame, DecodeMode::jpeg()).unwrap().label, "A");
}

#[test]
fn test_run_rejects_unsupported_format() {
    let classifier = CannedClassifier::new(8, vec![0.25; 4]);
    let mut pipeline = Pipeline::new(Box::new(classifier), four_labels()).unwrap();
    let frame = RawFrame::new(
        Duration::ZERO,
        Vec2::new(4, 4),
        PixelFormat::Rgb8,
        vec![Plane::packed(vec![0; 48], 12)],
    );
    assert!(matches!(
        pipeline.run(&frame, DecodeMode::Direct),
        Err(AnalyzerError::Video(VideoError::UnsupportedFormat(PixelFormat::Rgb8)))
    ));
}

#[test]
fn test_uniform_gray_is_deterministic() {
    let classifier = CannedClassifier::new(16, vec![0.2, 0.3, 0.4, 0.1]);
    let mut pipeline = Pipeline::new(Box::new(classifier), four_labels()).unwrap();
    let first = pipeline
        .run(
            &RawFrame::uniform(Duration::ZERO, Vec2::new(40, 30), 128),
            DecodeMode::Direct,
        )
        .unwrap();
    for i in 1..5 {
        let frame = RawFrame::uniform(Duration::from_millis(i * 33), Vec2::new(40, 30), 128);
        assert_eq!(pipeline.run(&frame, DecodeMode::Direct).unwrap(), first);
    }
}
