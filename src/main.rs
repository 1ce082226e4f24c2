//! Cardiorisk: cardiovascular risk assessment from the command line.
//!
//! ```bash
//! cardiorisk <patient.json> [--scan <image> | --finding <finding.json>] [--json]
//! ```
//!
//! `--scan` runs the placeholder classifier over an image file; `--finding`
//! reads a condition → probability map produced by an external classifier.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::json_input::{load_patient, load_scan_finding};
use cardiorisk::adapters::placeholder::PlaceholderScanClassifier;
use cardiorisk::adapters::redact::RedactingMakeWriter;
use cardiorisk::application::{render_text, AssessmentService};

const USAGE: &str =
    "Usage: cardiorisk <patient.json> [--scan <image> | --finding <finding.json>] [--json]";

struct Args {
    patient: PathBuf,
    scan: Option<PathBuf>,
    finding: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut patient = None;
    let mut scan = None;
    let mut finding = None;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scan" => {
                let path = args.next().with_context(|| format!("--scan needs a path\n{USAGE}"))?;
                scan = Some(PathBuf::from(path));
            }
            "--finding" => {
                let path = args
                    .next()
                    .with_context(|| format!("--finding needs a path\n{USAGE}"))?;
                finding = Some(PathBuf::from(path));
            }
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("Unknown arg: {other}\n{USAGE}"),
            other => {
                if patient.is_some() {
                    bail!("Only one patient file may be given\n{USAGE}");
                }
                patient = Some(PathBuf::from(other));
            }
        }
    }

    if scan.is_some() && finding.is_some() {
        bail!("--scan and --finding are mutually exclusive\n{USAGE}");
    }
    let patient = patient.with_context(|| USAGE.to_string())?;

    Ok(Args {
        patient,
        scan,
        finding,
        json,
    })
}

fn main() -> Result<()> {
    // Logs default to stderr so the report on stdout stays clean.
    let log_mode = std::env::var("CARDIORISK_LOG_MODE").unwrap_or_else(|_| "stderr".to_string());

    let (writer, _guard) = match log_mode.as_str() {
        "file" => {
            let log_file = std::env::var("CARDIORISK_LOG_FILE")
                .unwrap_or_else(|_| "cardiorisk.log".to_string());
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .with_context(|| format!("Failed to open log file {log_file}"))?;
            tracing_appender::non_blocking(file)
        }
        "stdout" => tracing_appender::non_blocking(std::io::stdout()),
        _ => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(RedactingMakeWriter::new(writer)),
        )
        .init();

    let args = parse_args()?;

    let record = load_patient(&args.patient)
        .with_context(|| format!("Failed to load patient from {}", args.patient.display()))?;

    let service = AssessmentService::new(Arc::new(PlaceholderScanClassifier::new()));

    let finding = match (&args.scan, &args.finding) {
        (Some(path), _) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read scan {}", path.display()))?;
            Some(service.classify_scan(&bytes)?)
        }
        (None, Some(path)) => Some(
            load_scan_finding(path)
                .with_context(|| format!("Failed to load finding from {}", path.display()))?,
        ),
        (None, None) => {
            tracing::info!("No scan supplied. Proceeding with risk factor analysis only.");
            None
        }
    };

    let assessment = service.assess(&record, finding.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", render_text(&assessment));
    }

    Ok(())
}
