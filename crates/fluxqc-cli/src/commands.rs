use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fluxqc_ingest::{IngestOptions, read_flux_table};
use fluxqc_model::InMemoryDictionary;
use fluxqc_report::{ProcessReport, ReportMeta, write_raw_statuses, write_report};
use fluxqc_standards::{
    MessageCatalog, load_catalog, load_default_catalog, load_default_dictionary, load_dictionary,
};
use fluxqc_validate::{CheckContext, CheckRunner, StatusBuilder, ValidationMode};

use crate::config::Settings;
use crate::types::CheckOutcome;

/// Load the message table named in the settings, or the bundled one.
pub fn load_messages(path: Option<&Path>) -> Result<MessageCatalog> {
    match path {
        Some(path) => {
            load_catalog(path).with_context(|| format!("load message table {}", path.display()))
        }
        None => load_default_catalog().context("load bundled message table"),
    }
}

fn load_variables(path: Option<&Path>) -> Result<InMemoryDictionary> {
    match path {
        Some(path) => load_dictionary(path)
            .with_context(|| format!("load variable dictionary {}", path.display())),
        None => load_default_dictionary().context("load bundled variable dictionary"),
    }
}

fn process_type(mode: ValidationMode) -> &'static str {
    match mode {
        ValidationMode::Format => "File Format",
        ValidationMode::Base => "BASE Generation",
    }
}

fn default_output_dir(file: &Path) -> PathBuf {
    file.parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
        .join("output")
}

/// Run every check over one file and, unless `dry_run`, write the report
/// and raw statuses.
///
/// Configuration and input problems are errors; anything the checks find
/// is part of the returned outcome.
pub fn run_check(
    file: &Path,
    settings: &Settings,
    upload_filename: Option<String>,
    dry_run: bool,
) -> Result<CheckOutcome> {
    let span = info_span!("run", file = %file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let catalog = load_messages(settings.messages.as_deref())?;
    let dictionary = load_variables(settings.dictionary.as_deref())?;
    info!(
        messages = catalog.len(),
        variables = dictionary.len(),
        "resources loaded"
    );

    let dataset = read_flux_table(file, &IngestOptions::default())
        .with_context(|| format!("read {}", file.display()))?;
    info!(
        rows = dataset.height(),
        columns = dataset.headers().len(),
        "table loaded"
    );

    let ctx = CheckContext {
        dataset: &dataset,
        dictionary: &dictionary,
        builder: StatusBuilder::new(&catalog),
        options: &settings.options,
    };
    let statuses = CheckRunner::with_default_checks()
        .run(&ctx)
        .context("build check statuses")?;

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let meta = ReportMeta {
        process_type: process_type(settings.options.mode).to_string(),
        processor: settings.processor.clone(),
        file_name: file_name.clone(),
        headers: dataset.headers(),
        upload_filename,
    };
    let report = ProcessReport::build(&meta, &statuses);

    let (report_path, status_path) = if dry_run {
        (None, None)
    } else {
        let dir = settings
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(file));
        let report_path = write_report(&dir, &report).context("write report")?;
        let status_path =
            write_raw_statuses(&dir, &file_name, &statuses).context("write raw statuses")?;
        (Some(report_path), Some(status_path))
    };

    info!(
        status_code = report.process_confirmation.status_code,
        duration_ms = start.elapsed().as_millis(),
        "run finished"
    );
    Ok(CheckOutcome {
        file: file.to_path_buf(),
        rows: dataset.height(),
        columns: dataset.headers().len(),
        statuses,
        report,
        report_path,
        status_path,
    })
}
