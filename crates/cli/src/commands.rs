use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tally_core::{RejectedLine, Transaction};
use tally_import::{Pipeline, PipelineConfig, Report};

use crate::cli::Cli;

/// Everything ingested from one directory.
#[derive(Debug, Default)]
pub struct Ingested {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedLine>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let stdout = std::io::stdout();
    run_to(cli, &mut stdout.lock())
}

/// Runs the command, writing the summary and JSON report to `out`.
pub fn run_to(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(cutoff) = cli.bucket_cut_off {
        config.outlier_cutoff = cutoff;
    }
    let pipeline = Pipeline::new(config).context("invalid pipeline configuration")?;

    let ingested = process_directory(&pipeline, &cli.directory)?;

    if let Some(path) = &cli.rejects {
        write_rejects(&ingested.rejected, path)
            .with_context(|| format!("failed to write rejects to {}", path.display()))?;
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        tally_import::export_csv(&ingested.transactions, pipeline.labels(), BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote {} transactions to {}", ingested.transactions.len(), path.display());
    }

    if cli.buckets || cli.json {
        let report = pipeline.report(&ingested.transactions);
        if cli.buckets {
            write!(out, "{}", render_summary(&report))?;
        }
        if cli.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        out.flush()?;
    }

    Ok(())
}

/// Statement files in `dir`, ordered by file name.
pub fn list_statements(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Processes every statement in `dir`. The first failing file aborts the run.
pub fn process_directory(pipeline: &Pipeline, dir: &Path) -> Result<Ingested> {
    let mut ingested = Ingested::default();

    for path in list_statements(dir)? {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
        let doc = pipeline
            .process_document(&name, BufReader::new(file))
            .with_context(|| format!("failed to process {name}"))?;

        tracing::info!(
            "{name}: {} transactions, {} rejected lines",
            doc.transactions.len(),
            doc.rejected.len()
        );
        ingested.transactions.extend(doc.transactions);
        ingested.rejected.extend(doc.rejected);
    }

    Ok(ingested)
}

pub fn write_rejects(rejected: &[RejectedLine], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in rejected {
        writeln!(out, "{}", line.text)?;
    }
    out.flush()?;
    Ok(())
}

/// Review list, classified percentage, then one `label<TAB>total` line per
/// bucket.
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();
    for tx in &report.review {
        let _ = writeln!(out, "{tx}");
    }
    match report.classified_pct {
        Some(pct) => {
            let _ = writeln!(out, "{pct:.2}% classified");
        }
        None => {
            let _ = writeln!(out, "n/a% classified");
        }
    }
    for bucket in &report.buckets {
        let _ = writeln!(out, "{}\t{}", bucket.label, bucket.total);
    }
    out
}
