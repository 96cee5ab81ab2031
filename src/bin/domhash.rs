//! domhash CLI
//!
//! Fingerprints one HTML input, or compares two, and prints the result.
//! Inputs may be raw HTML, a file path, or an http(s) URL (requires the `chrome` feature).

use anyhow::{Context, Result};
use clap::Parser;
use domhash::{
    CompareOptions, DomHashOptions, DomHashResult, HashAlgorithm, OutputFormat, ShapeMetric, compare_results,
    domhash, format_result, load_element,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "domhash")]
#[command(version)]
#[command(about = "Structure-aware fingerprinting of HTML/DOM trees", long_about = None)]
struct Cli {
    /// HTML string, file path or URL
    input: String,

    /// Comma-separated attribute names to keep in the canonical form
    #[arg(long, short = 'i', value_delimiter = ',', value_name = "ATTRS")]
    include_attributes: Vec<String>,

    /// Keep data-* and aria-* attributes
    #[arg(long)]
    data_aria: bool,

    /// Hash algorithm: sha256, murmur3, blake3, simhash, minhash
    #[arg(long, short = 'a', value_name = "ALGORITHM")]
    algorithm: Option<HashAlgorithm>,

    /// Emit the compressed shape vector
    #[arg(long, short = 's')]
    shape: bool,

    /// Shape similarity metric: jaccard, lcs, cosine, ted
    #[arg(long, short = 'm', value_name = "METRIC")]
    metric: Option<ShapeMetric>,

    /// Layout similarity metric
    #[arg(long, value_name = "METRIC")]
    layout_metric: Option<ShapeMetric>,

    /// Compute the layout-aware fingerprint
    #[arg(long, short = 'l')]
    layout: bool,

    /// Compute the resilience score
    #[arg(long, short = 'r')]
    resilience: bool,

    /// Compute the structural score
    #[arg(long)]
    structural: bool,

    /// Emit the collapsed structure tree
    #[arg(long)]
    tree: bool,

    /// Include text content in the canonical form
    #[arg(long)]
    text: bool,

    /// Second input to compare against
    #[arg(long, short = 'c', value_name = "INPUT")]
    compare: Option<String>,

    /// Show a structural diff when comparing
    #[arg(long, short = 'd')]
    diff: bool,

    /// Output format: json, markdown, html
    #[arg(long, short = 'o', value_name = "FORMAT")]
    output: Option<OutputFormat>,

    /// JSON file with fingerprint options; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn hash_options(&self) -> Result<DomHashOptions> {
        let mut options = match &self.config {
            Some(path) => DomHashOptions::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => DomHashOptions::default(),
        };

        if let Some(algorithm) = self.algorithm {
            options.algorithm = algorithm;
        }
        if !self.include_attributes.is_empty() {
            options.include_attributes = self.include_attributes.clone();
        }
        options.include_data_and_aria_attributes |= self.data_aria;
        options.include_text |= self.text;
        options.layout_aware |= self.layout;
        options.resilience |= self.resilience;
        options.structural |= self.structural;
        options.structure_tree |= self.tree;
        // shape similarity needs both shape vectors
        options.shape_vector |= self.shape || (self.compare.is_some() && self.metric.is_some());

        Ok(options)
    }

    fn compare_options(&self) -> CompareOptions {
        CompareOptions::default()
            .shape_metric(self.metric.unwrap_or_default())
            .layout_metric(self.layout_metric.unwrap_or_default())
            .diff(self.diff)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.hash_options()?;
    let first = fingerprint(&cli.input, &options)?;

    let Some(other) = &cli.compare else {
        return print_single(&first, cli.output);
    };

    let second = fingerprint(other, &options)?;
    let comparison = compare_results(&first, &second, &cli.compare_options());

    if let Some(format) = cli.output {
        println!("{}", format_result(&comparison, format)?);
        return Ok(());
    }

    println!("Hash A: {}", comparison.hash_a);
    println!("Hash B: {}", comparison.hash_b);
    println!("Structural similarity: {}", domhash::format::percent(comparison.similarity));
    if let (Some(value), Some(metric)) = (comparison.shape_similarity, comparison.shape_metric) {
        println!("Shape similarity ({}): {}", metric.label(), domhash::format::percent(value));
    }
    if let (Some(value), Some(metric)) = (comparison.layout_similarity, comparison.layout_metric) {
        println!("Layout similarity ({}): {}", metric.label(), domhash::format::percent(value));
    }
    if let Some(diff) = &comparison.diff {
        println!();
        println!("Structural diff:");
        for line in diff {
            println!("{}", line);
        }
    }
    Ok(())
}

fn fingerprint(input: &str, options: &DomHashOptions) -> Result<DomHashResult> {
    let root = load_element(input).with_context(|| format!("Failed to load {}", summarize(input)))?;
    log::info!("Fingerprinting {} ({})", summarize(input), options.algorithm);
    Ok(domhash(&root, options)?)
}

fn print_single(result: &DomHashResult, output: Option<OutputFormat>) -> Result<()> {
    match output {
        Some(OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(result)?);
            return Ok(());
        }
        Some(format) => anyhow::bail!("--output {} requires --compare", format),
        None => {}
    }

    println!("Hash: {}", result.hash);
    println!("Tags: {}  Depth: {}", result.stats.tag_count, result.stats.depth);
    if let Some(shape) = &result.shape {
        println!("Shape: [{}]", shape.join(", "));
    }
    if let Some(layout_hash) = &result.layout_hash {
        println!("Layout hash: {}", layout_hash);
    }
    if let Some(layout_shape) = &result.layout_shape {
        println!("Layout shape: [{}]", layout_shape.join(", "));
    }
    if let Some(score) = &result.resilience {
        println!("Resilience: {} {:.2} ({})", score.emoji, score.score, score.label);
    }
    if let Some(score) = &result.structural {
        println!("Structural: {} {:.2} ({})", score.emoji, score.score, score.label);
    }
    if let Some(tree) = &result.structure_tree {
        println!("Structure tree:");
        println!("{}", serde_json::to_string_pretty(tree)?);
    }
    Ok(())
}

/// Short label for log and error messages; raw HTML can be long
fn summarize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('<') {
        let head: String = trimmed.chars().take(32).collect();
        if head.len() < trimmed.len() {
            format!("{}...", head)
        } else {
            head
        }
    } else {
        trimmed.to_string()
    }
}
