//! Extract command - read identity fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use aadhaar_core::{AadhaarExtractor, IdentityFields};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Local path or http(s) URL of a PDF or image
    #[arg(required = true)]
    reference: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing document: {}", args.reference);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting fields from {}...", args.reference));

    // The pipeline blocks on downloads and subprocesses
    let reference = args.reference.clone();
    let fields = tokio::task::spawn_blocking(move || {
        AadhaarExtractor::from_config(&config).extract(&reference)
    })
    .await?;

    pb.finish_and_clear();

    let output = format_fields(&fields, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Saved to {} in {:.2}s",
            style("✓").green(),
            output_path.display(),
            start.elapsed().as_secs_f64()
        );
    } else {
        println!("{}", output);
    }

    if fields.is_empty() {
        eprintln!("{} No fields could be extracted", style("!").yellow());
    }

    Ok(())
}

fn format_fields(fields: &IdentityFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_csv(fields: &IdentityFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.serialize(fields)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(fields: &IdentityFields) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name:           {}\n", fields.name));
    output.push_str(&format!("Gender:         {}\n", fields.gender));
    output.push_str(&format!("DOB/Year:       {}\n", fields.dob));
    output.push_str(&format!("Aadhaar Number: {}", fields.aadhaar_number));

    output
}
