//! Command-line adapter for S3 Exposure Watch.
//!
//! `scan` classifies a CloudTrail log delivery locally and publishes nothing;
//! `process` runs one full invocation against AWS: fetch the delivery from
//! S3, classify its records, and publish one SNS alert per public verdict.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::debug;

use s3_exposure_watch_detection::{
    scan_log, ExposureWatchService, ObjectRef, S3EventNotification, ScanReport, WatchConfig,
};

#[derive(Parser)]
#[command(name = "s3-exposure-watch", version, about, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a log delivery from a file or stdin; publishes nothing.
    Scan {
        /// Log file, gzipped or plain JSON. Reads stdin when omitted.
        path: Option<PathBuf>,
        /// Print the full report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Fetch a delivery from S3, classify it, and publish alerts to SNS.
    Process {
        /// S3 event-notification JSON naming the log objects. Reads stdin
        /// when omitted and no --bucket is given.
        #[arg(conflicts_with_all = ["bucket", "key"])]
        path: Option<PathBuf>,
        /// Bucket holding the log object, bypassing the event notification.
        #[arg(long, requires = "key")]
        bucket: Option<String>,
        /// Key of the log object within --bucket.
        #[arg(long, requires = "bucket")]
        key: Option<String>,
        /// SNS topic the alerts are published to.
        #[arg(long, env = "SNS_TOPIC_ARN")]
        topic_arn: String,
    },
}

/// Exit code 2 marks input rejected before any AWS call; 1 marks a failure
/// at the AWS stage.
struct Failure {
    code: u8,
    source: anyhow::Error,
}

impl Failure {
    fn usage(source: anyhow::Error) -> Self {
        Self { code: 2, source }
    }

    fn runtime(source: anyhow::Error) -> Self {
        Self { code: 1, source }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("Error: {:#}", failure.source);
            ExitCode::from(failure.code)
        }
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    match cli.command {
        Commands::Scan { path, json } => scan(path.as_deref(), json),
        Commands::Process {
            path,
            bucket,
            key,
            topic_arn,
        } => process(path.as_deref(), bucket, key, topic_arn).await,
    }
}

fn scan(path: Option<&Path>, json: bool) -> Result<(), Failure> {
    let bytes = read_input(path).map_err(Failure::usage)?;
    let report = scan_log(&bytes)
        .context("input is not a CloudTrail log delivery")
        .map_err(Failure::usage)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .context("failed to render the report as JSON")
            .map_err(Failure::runtime)?;
        println!("{rendered}");
    } else {
        print_report(&report);
    }
    Ok(())
}

async fn process(
    path: Option<&Path>,
    bucket: Option<String>,
    key: Option<String>,
    topic_arn: String,
) -> Result<(), Failure> {
    let objects = match (bucket, key) {
        (Some(bucket), Some(key)) => vec![ObjectRef::new(bucket, key)],
        _ => {
            let text = read_input_text(path).map_err(Failure::usage)?;
            let event = S3EventNotification::from_json(&text)
                .context("input is not an S3 event notification")
                .map_err(Failure::usage)?;
            event
                .objects()
                .context("event notification names no log objects")
                .map_err(Failure::usage)?
        }
    };

    let service = ExposureWatchService::with_config(WatchConfig::new(topic_arn))
        .await
        .context("failed to initialize AWS clients")
        .map_err(Failure::runtime)?;
    let summary = service
        .process_objects(&objects)
        .await
        .map_err(|e| Failure::runtime(e.into()))?;

    println!(
        "{} log object(s) processed: {} records seen, {} skipped, {} alert(s) published",
        summary.objects_processed,
        summary.records_seen,
        summary.records_skipped,
        summary.alerts_published
    );
    Ok(())
}

fn print_report(report: &ScanReport) {
    println!(
        "{} records scanned, {} skipped, {} public exposure(s) found",
        report.records_seen,
        report.records_skipped,
        report.findings.len()
    );
    for finding in &report.findings {
        println!();
        println!("{}", finding.alert.subject);
        println!("{}", finding.alert.body);
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            debug!("read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            debug!("read {} bytes from stdin", bytes.len());
            Ok(bytes)
        }
    }
}

fn read_input_text(path: Option<&Path>) -> anyhow::Result<String> {
    let bytes = read_input(path)?;
    String::from_utf8(bytes).context("input is not UTF-8")
}
