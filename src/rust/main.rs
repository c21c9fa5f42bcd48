use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use component_detector::predictions::DEFAULT_THRESHOLD;
use component_detector::render::{render_analysis, render_suggestions, RenderOptions};
use component_detector::{
    suggest_projects, Analysis, Detector, DetectorConfig, ImageInput, RuntimeConfig,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify images and suggest projects for the detected components
    Detect {
        #[command(flatten)]
        model: ModelArgs,
        /// Predictions below this confidence are dimmed and not used for suggestions
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Disable coloured output
        #[arg(long)]
        no_color: bool,
        /// Image files to analyze
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Look up project suggestions for component names
    Suggest {
        #[arg(required = true)]
        components: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a model and print its labels and fingerprint
    Info {
        #[command(flatten)]
        model: ModelArgs,
    },
}

#[derive(clap::Args)]
struct ModelArgs {
    /// Teachable Machine model URL or local export directory
    #[arg(short, long)]
    model_url: Option<String>,
    /// ONNX export of the model (defaults to model.onnx next to model.json)
    #[arg(long)]
    onnx: Option<String>,
    /// ONNX Runtime graph optimization level (0-3)
    #[arg(long, default_value_t = 3)]
    optimization: u8,
    /// ONNX Runtime intra-op threads (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

impl ModelArgs {
    fn to_config(&self) -> anyhow::Result<DetectorConfig> {
        let runtime = RuntimeConfig::default()
            .with_optimization(self.optimization)?
            .with_intra_threads(self.threads);
        let mut config = DetectorConfig::default().with_runtime_config(runtime);
        if let Some(url) = &self.model_url {
            config = config.with_model_url(url.clone());
        }
        if let Some(onnx) = &self.onnx {
            config = config.with_onnx_location(onnx.clone());
        }
        Ok(config)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageReport {
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn load_detector(config: DetectorConfig) -> anyhow::Result<Detector> {
    let mut detector = Detector::new(config);
    let start_time = Instant::now();
    if let Err(e) = detector.load().await {
        eprintln!("{}", e);
        eprintln!("Check the model URL, or create your own model at https://teachablemachine.withgoogle.com/train/image");
        bail!("model could not be loaded");
    }
    info!("Model ready (took {:.2?})", start_time.elapsed());
    Ok(detector)
}

async fn run_detect(
    model: ModelArgs,
    threshold: f32,
    json: bool,
    no_color: bool,
    images: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let config = model.to_config()?.with_threshold(threshold)?;
    let detector = load_detector(config).await?;
    let options = RenderOptions {
        color: !no_color && !json && std::io::stdout().is_terminal(),
        ..RenderOptions::default()
    };

    let mut reports = Vec::with_capacity(images.len());
    for path in &images {
        let name = path.display().to_string();
        info!("Analyzing {}", name);
        let result = match ImageInput::open(path).await {
            Ok(image) => detector.analyze(&image).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(analysis) => {
                if !json {
                    println!("== {}", name);
                    print!("{}", render_analysis(&analysis, &options));
                    if !analysis.projects.is_empty() {
                        println!();
                        print!("{}", render_suggestions(&analysis.projects, &options));
                    }
                    println!();
                }
                reports.push(ImageReport { image: name, analysis: Some(analysis), error: None });
            }
            Err(e) => {
                eprintln!("Failed to analyze {}: {}", name, e);
                reports.push(ImageReport { image: name, analysis: None, error: Some(e.to_string()) });
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        bail!("{} of {} images could not be analyzed", failed, reports.len());
    }
    Ok(())
}

fn run_suggest(components: Vec<String>, json: bool) -> anyhow::Result<()> {
    let projects = suggest_projects(&components);
    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if projects.is_empty() {
        println!("No project suggestions for: {}", components.join(", "));
    } else {
        let options = RenderOptions {
            color: std::io::stdout().is_terminal(),
            ..RenderOptions::default()
        };
        print!("{}", render_suggestions(&projects, &options));
    }
    Ok(())
}

async fn run_info(model: ModelArgs) -> anyhow::Result<()> {
    let detector = load_detector(model.to_config()?).await?;
    let info = detector.info().context("model reported as loaded without info")?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Detect { model, threshold, json, no_color, images } => {
            run_detect(model, threshold, json, no_color, images).await
        }
        Command::Suggest { components, json } => run_suggest(components, json),
        Command::Info { model } => run_info(model).await,
    }
}
