use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use feedback_insights::{split_feedback_lines, AnalysisResult, Analyzer, AppConfig, FeedbackItem, SAMPLE_FEEDBACK};

/// Analyze feedback lines from a file or stdin and print the report as JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File with one feedback item per line (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Analyze the built-in demo feedback instead of reading input
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Include every classified item in the output
    #[arg(long)]
    items: bool,
}

#[derive(Serialize)]
struct Output {
    report: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<FeedbackItem>>,
}

fn read_lines(args: &Args) -> Result<Vec<String>> {
    if args.sample {
        return Ok(SAMPLE_FEEDBACK.iter().map(|s| s.to_string()).collect());
    }

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    Ok(split_feedback_lines(&raw))
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?;
    let analyzer = Analyzer::new(config.load_lexicon()?, config.thresholds);

    let lines = read_lines(&args)?;
    info!("🧠 Analyzing {} feedback lines", lines.len());

    let (report, items) = analyzer.analyze_detailed(&lines);
    let output = Output {
        report,
        items: args.items.then_some(items),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
