use {
    analyzer::{Analyzer, AnalyzerConfig, AnalyzerError, Offer, Pipeline, ResultSink},
    base::{Tensor, Vec2},
    image::PixelFormat,
    inference::{ClassificationResult, Classifier, InferError, LabelTable, check_input},
    std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
            mpsc as std_mpsc,
        },
        time::Duration,
    },
    tokio::sync::mpsc,
    video::{DecodeMode, Plane, RawFrame},
};

const SIDE: usize = 8;
const WAIT: Duration = Duration::from_secs(5);

// scores the mean input value, so brighter frames give larger scores
struct MeanClassifier {
    calls: Arc<AtomicUsize>,
}

impl Classifier for MeanClassifier {
    fn input_side(&self) -> usize {
        SIDE
    }

    fn output_len(&self) -> usize {
        2
    }

    fn classify(&mut self, input: &Tensor<f32>) -> Result<Vec<f32>, InferError> {
        check_input(input, SIDE)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mean = input.data.iter().sum::<f32>() / input.data.len() as f32;
        Ok(vec![mean, 1.0 - mean])
    }
}

// reports entry, then blocks until the test opens the gate
struct GatedClassifier {
    entered: std_mpsc::Sender<()>,
    gate: std_mpsc::Receiver<()>,
}

impl Classifier for GatedClassifier {
    fn input_side(&self) -> usize {
        SIDE
    }

    fn output_len(&self) -> usize {
        2
    }

    fn classify(&mut self, _input: &Tensor<f32>) -> Result<Vec<f32>, InferError> {
        let _ = self.entered.send(());
        self.gate
            .recv()
            .map_err(|_| InferError::Engine("gate closed".to_string()))?;
        Ok(vec![0.5, 0.5])
    }
}

// keeps a copy of every input tensor it sees
struct RecordingClassifier {
    inputs: Arc<Mutex<Vec<Vec<f32>>>>,
}

impl Classifier for RecordingClassifier {
    fn input_side(&self) -> usize {
        SIDE
    }

    fn output_len(&self) -> usize {
        2
    }

    fn classify(&mut self, input: &Tensor<f32>) -> Result<Vec<f32>, InferError> {
        check_input(input, SIDE)?;
        self.inputs.lock().unwrap().push(input.data.clone());
        Ok(vec![0.5, 0.5])
    }
}

#[derive(Clone, Default)]
struct Collected {
    results: Arc<Mutex<Vec<ClassificationResult>>>,
    diagnostics: Arc<Mutex<Vec<String>>>,
}

struct CollectingSink(Collected);

impl ResultSink for CollectingSink {
    fn on_result(&mut self, result: ClassificationResult) {
        self.0.results.lock().unwrap().push(result);
    }

    fn on_diagnostic(&mut self, error: &AnalyzerError) {
        self.0.diagnostics.lock().unwrap().push(error.to_string());
    }
}

fn labels() -> LabelTable {
    LabelTable::new(["bright", "dark"]).unwrap()
}

fn mean_pipeline() -> (Pipeline, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = MeanClassifier {
        calls: Arc::clone(&calls),
    };
    (Pipeline::new(Box::new(classifier), labels()).unwrap(), calls)
}

fn frame(luma: u8, released: &Arc<AtomicUsize>) -> RawFrame {
    let released = Arc::clone(released);
    RawFrame::uniform(Duration::ZERO, Vec2::new(16, 12), luma).with_release(move || {
        released.fetch_add(1, Ordering::SeqCst);
    })
}

async fn next_result(rx: &mut mpsc::UnboundedReceiver<ClassificationResult>) -> ClassificationResult {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for result")
        .expect("sink closed")
}

// offers fresh frames until one is accepted; returns how many were offered
fn offer_until_accepted(analyzer: &Analyzer, luma: u8, released: &Arc<AtomicUsize>) -> usize {
    let mut offered = 0;
    loop {
        offered += 1;
        match analyzer.offer(frame(luma, released)) {
            Offer::Accepted => return offered,
            Offer::Stopped => panic!("session stopped"),
            Offer::Busy | Offer::Skipped => std::thread::sleep(Duration::from_millis(1)),
        }
    }
}

#[tokio::test]
async fn test_default_interval_skips_first_frame() {
    let (pipeline, _) = mean_pipeline();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let analyzer = Analyzer::start(pipeline, tx, AnalyzerConfig::default());
    let released = Arc::new(AtomicUsize::new(0));

    assert_eq!(analyzer.offer(frame(100, &released)), Offer::Skipped);
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert_eq!(analyzer.offer(frame(100, &released)), Offer::Accepted);
    next_result(&mut rx).await;

    analyzer.stop().await.unwrap();
    assert_eq!(released.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_single_frame_in_flight() {
    let (entered_tx, entered_rx) = std_mpsc::channel();
    let (gate_tx, gate_rx) = std_mpsc::channel();
    let classifier = GatedClassifier {
        entered: entered_tx,
        gate: gate_rx,
    };
    let pipeline = Pipeline::new(Box::new(classifier), labels()).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = AnalyzerConfig::default().with_sample_interval(1);
    let analyzer = Analyzer::start(pipeline, tx, config);
    let released = Arc::new(AtomicUsize::new(0));

    assert_eq!(analyzer.offer(frame(50, &released)), Offer::Accepted);
    entered_rx.recv_timeout(WAIT).unwrap();
    for _ in 0..5 {
        assert_eq!(analyzer.offer(frame(50, &released)), Offer::Busy);
    }
    assert_eq!(released.load(Ordering::SeqCst), 5);
    assert_eq!(analyzer.throttle().frame_count(), 1);

    gate_tx.send(()).unwrap();
    next_result(&mut rx).await;
    analyzer.stop().await.unwrap();

    assert_eq!(released.load(Ordering::SeqCst), 6);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_results_follow_acceptance_order() {
    let (pipeline, calls) = mean_pipeline();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = AnalyzerConfig::default().with_sample_interval(1);
    let analyzer = Analyzer::start(pipeline, tx, config);
    let released = Arc::new(AtomicUsize::new(0));

    let lumas = [20u8, 60, 100, 140, 180, 220];
    let mut offered = 0;
    let mut confidences = Vec::new();
    for luma in lumas {
        offered += offer_until_accepted(&analyzer, luma, &released);
        let result = next_result(&mut rx).await;
        confidences.push(result.distribution[0]);
    }

    analyzer.stop().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), lumas.len());
    assert!(confidences.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(released.load(Ordering::SeqCst), offered);
}

#[tokio::test]
async fn test_uniform_gray_results_identical() {
    let (pipeline, _) = mean_pipeline();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let analyzer = Analyzer::start(pipeline, tx, AnalyzerConfig::default());
    let released = Arc::new(AtomicUsize::new(0));

    let mut results = Vec::new();
    for _ in 0..4 {
        offer_until_accepted(&analyzer, 128, &released);
        results.push(next_result(&mut rx).await);
    }
    analyzer.stop().await.unwrap();

    assert!(results.iter().all(|result| *result == results[0]));
    assert_eq!(results[0].label, "bright");
}

#[tokio::test]
async fn test_bad_frame_reported_and_session_continues() {
    let (pipeline, calls) = mean_pipeline();
    let collected = Collected::default();
    let config = AnalyzerConfig::default().with_sample_interval(1);
    let analyzer = Analyzer::start(pipeline, CollectingSink(collected.clone()), config);
    let released = Arc::new(AtomicUsize::new(0));

    let bad = {
        let released = Arc::clone(&released);
        RawFrame::new(
            Duration::ZERO,
            Vec2::new(4, 4),
            PixelFormat::Rgb8,
            vec![Plane::packed(vec![0xff; 16], 16)],
        )
        .with_release(move || {
            released.fetch_add(1, Ordering::SeqCst);
        })
    };
    assert_eq!(analyzer.offer(bad), Offer::Accepted);
    let mut offered = 1;
    offered += offer_until_accepted(&analyzer, 90, &released);

    // wait until the good frame has been processed
    let deadline = std::time::Instant::now() + WAIT;
    while collected.results.lock().unwrap().is_empty() {
        assert!(std::time::Instant::now() < deadline, "timed out");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    analyzer.stop().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let diagnostics = collected.diagnostics.lock().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("unsupported"), "{}", diagnostics[0]);
    assert_eq!(released.load(Ordering::SeqCst), offered);
}

#[tokio::test]
async fn test_stop_returns_pipeline_for_new_session() {
    let (pipeline, calls) = mean_pipeline();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let analyzer = Analyzer::start(pipeline, tx.clone(), AnalyzerConfig::default());
    let released = Arc::new(AtomicUsize::new(0));

    assert_eq!(analyzer.offer(frame(10, &released)), Offer::Skipped);
    assert_eq!(analyzer.offer(frame(10, &released)), Offer::Accepted);
    next_result(&mut rx).await;
    let pipeline = analyzer.stop().await.unwrap();

    // throttle state starts over
    let analyzer = Analyzer::start(pipeline, tx, AnalyzerConfig::default());
    assert_eq!(analyzer.throttle().frame_count(), 0);
    assert_eq!(analyzer.offer(frame(10, &released)), Offer::Skipped);
    assert_eq!(analyzer.offer(frame(10, &released)), Offer::Accepted);
    next_result(&mut rx).await;
    analyzer.stop().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(released.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_dropped_session_releases_queued_frame() {
    let (entered_tx, entered_rx) = std_mpsc::channel();
    let (gate_tx, gate_rx) = std_mpsc::channel::<()>();
    let classifier = GatedClassifier {
        entered: entered_tx,
        gate: gate_rx,
    };
    let pipeline = Pipeline::new(Box::new(classifier), labels()).unwrap();
    let collected = Collected::default();
    let config = AnalyzerConfig::default().with_sample_interval(1);
    let analyzer = Analyzer::start(pipeline, CollectingSink(collected.clone()), config);
    let released = Arc::new(AtomicUsize::new(0));

    assert_eq!(analyzer.offer(frame(70, &released)), Offer::Accepted);
    entered_rx.recv_timeout(WAIT).unwrap();
    drop(analyzer);

    // the in-flight frame finishes, then the worker exits
    drop(gate_tx);
    let deadline = std::time::Instant::now() + WAIT;
    while released.load(Ordering::SeqCst) < 1 {
        assert!(std::time::Instant::now() < deadline, "timed out");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert!(collected.results.lock().unwrap().is_empty());
    assert_eq!(collected.diagnostics.lock().unwrap().len(), 1);
}

fn checkerboard(size: Vec2<usize>) -> RawFrame {
    let luma = (0..size.y)
        .flat_map(|y| (0..size.x).map(move |x| if (x + y) % 2 == 0 { 0 } else { 255 }))
        .collect();
    let chroma = size.x.div_ceil(2) * size.y.div_ceil(2);
    RawFrame::yuv420(Duration::ZERO, size, luma, vec![128; chroma], vec![128; chroma])
}

#[tokio::test]
async fn test_session_decodes_with_configured_mode() {
    let size = Vec2::new(16, 16);
    let inputs = Arc::new(Mutex::new(Vec::new()));
    let record = |inputs: &Arc<Mutex<Vec<Vec<f32>>>>| {
        Pipeline::new(
            Box::new(RecordingClassifier {
                inputs: Arc::clone(inputs),
            }),
            labels(),
        )
        .unwrap()
    };

    // reference tensors for both decode paths
    let mut reference = record(&inputs);
    reference.run(&checkerboard(size), DecodeMode::Direct).unwrap();
    reference.run(&checkerboard(size), DecodeMode::jpeg()).unwrap();
    let (direct, jpeg) = {
        let mut recorded = inputs.lock().unwrap();
        let jpeg = recorded.pop().unwrap();
        let direct = recorded.pop().unwrap();
        (direct, jpeg)
    };
    assert_ne!(direct, jpeg);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = AnalyzerConfig::default()
        .with_sample_interval(1)
        .with_decode_mode(DecodeMode::jpeg());
    let analyzer = Analyzer::start(record(&inputs), tx, config);
    assert_eq!(analyzer.offer(checkerboard(size)), Offer::Accepted);
    next_result(&mut rx).await;
    analyzer.stop().await.unwrap();

    assert_eq!(*inputs.lock().unwrap(), vec![jpeg]);
}
