use {
    analyzer::{Analyzer, AnalyzerConfig, Pipeline},
    anyhow::{Context, anyhow},
    base::Vec2,
    inference::{ClassificationResult, LabelTable, ModelConfig, OnnxClassifier},
    std::{env, sync::Arc, time::Duration},
    video::{DecodeMode, SyntheticCamera, VideoIn},
};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;
const FRAME_INTERVAL_MS: u64 = 33;

fn model_config() -> anyhow::Result<ModelConfig> {
    let mut config = match env::var("CLASSIFY_MODEL_CONFIG") {
        Ok(path) => ModelConfig::from_json_file(&path)
            .with_context(|| format!("loading model config {path}"))?,
        Err(_) => ModelConfig::default(),
    };
    if let Ok(path) = env::var("CLASSIFY_MODEL_PATH") {
        config = config.with_model_path(path);
    }
    if let Ok(path) = env::var("CLASSIFY_LABELS") {
        config = config.with_labels_path(path);
    }
    if let Ok(threads) = env::var("CLASSIFY_THREADS") {
        let threads = threads
            .parse()
            .with_context(|| format!("CLASSIFY_THREADS={threads}"))?;
        config = config.with_threads(threads);
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    base::init_stdout_logger()?;

    let config = model_config()?;
    log::info!("model: {}", config.model_path().display());

    let labels: LabelTable = config.label_table()?;
    let classifier = OnnxClassifier::load(&config)?;
    let pipeline = Pipeline::new(Box::new(classifier), labels)?;

    let analyzer = Arc::new(Analyzer::start(
        pipeline,
        |result: ClassificationResult| println!("{result}\n"),
        AnalyzerConfig::default().with_decode_mode(DecodeMode::jpeg()),
    ));

    let camera = SyntheticCamera::new(Vec2::new(WIDTH, HEIGHT))
        .with_frame_interval(Duration::from_millis(FRAME_INTERVAL_MS));
    let video_in = VideoIn::open(Box::new(camera), {
        let analyzer = Arc::clone(&analyzer);
        move |frame| {
            analyzer.offer(frame);
        }
    })
    .await?;

    log::info!("running, press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;

    video_in.close().await?;
    let analyzer = Arc::try_unwrap(analyzer).map_err(|_| anyhow!("analyzer still shared"))?;
    analyzer.stop().await?;
    Ok(())
}
