//! Classify command - Classify and assemble workbooks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use specsheet_core::{FileDocumentSource, SheetConfig, WorkbookAssembler, WorkbookModel};
use specsheet_schema::{SchemaRegistry, WorkbookKind};

use super::CommandError;

/// Suffixes of workbook exports picked up when walking a directory.
pub const WORKBOOK_SUFFIXES: &[&str] = &["-spreadsheet.json", "-spreadsheet.yaml", "-spreadsheet.yml"];

/// Template workbooks are never real definitions.
pub const DEFAULT_EXCLUDE: &str = "**/templates/**";

#[derive(Args)]
pub struct ClassifyArgs {
    /// Workbook files, or directories to search for *-spreadsheet.json|yaml|yml
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Configuration file (.yaml, .yml or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Glob of paths to skip while walking directories
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    exclude: Vec<String>,

    /// Workbook kind, instead of inferring it (data-type, resource, profile)
    #[arg(long)]
    kind: Option<WorkbookKind>,

    /// FHIR maturity level to report
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    maturity: Option<u8>,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,

    /// Fail when a workbook has unknown tabs or field issues
    #[arg(long)]
    strict: bool,
}

/// Outcome for one workbook file.
#[derive(Debug, Serialize)]
pub struct WorkbookReport {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<WorkbookModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkbookReport {
    fn needs_attention(&self) -> bool {
        self.model
            .as_ref()
            .is_some_and(|m| m.has_unknown_tabs() || !m.diagnostics.issues.is_empty())
    }
}

pub async fn execute(args: ClassifyArgs) -> Result<()> {
    let config = load_config(&args)?;
    let files = collect_workbooks(&args.paths, &args.exclude)?;

    if files.is_empty() {
        warn!("No workbooks found");
        println!("⚠️  No workbooks found");
        return Ok(());
    }
    info!("Classifying {} workbook(s)", files.len());

    let reports = assemble_all(files, Arc::new(config)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let failed_loads = reports.iter().filter(|r| r.error.is_some()).count();
    if failed_loads > 0 {
        anyhow::bail!("{} workbook(s) could not be assembled", failed_loads);
    }

    let failed = reports.iter().filter(|r| r.needs_attention()).count();
    if args.strict && failed > 0 {
        return Err(CommandError::ValidationFailed {
            failed,
            total: reports.len(),
        }
        .into());
    }

    Ok(())
}

fn load_config(args: &ClassifyArgs) -> Result<SheetConfig> {
    let mut config = match &args.config {
        Some(path) => SheetConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => SheetConfig::default(),
    };
    if let Some(kind) = args.kind {
        config = config.with_workbook_kind(kind);
    }
    if let Some(level) = args.maturity {
        config = config.with_maturity_level(level);
    }
    Ok(config)
}

/// Whether the file name looks like a workbook export.
pub fn is_workbook_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| WORKBOOK_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Expand the given paths into workbook files, sorted.
///
/// Files are taken as given. Directories are walked, and entries whose path
/// relative to the directory matches an exclusion glob are skipped.
pub fn collect_workbooks(paths: &[PathBuf], excludes: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = excludes
        .iter()
        .map(|p| {
            glob::Pattern::new(p)
                .map_err(|e| CommandError::InvalidArgument(format!("exclude glob '{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(CommandError::InvalidArgument(format!("path not found: {}", path.display())).into());
        }

        for entry in WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| {
                let relative = e.path().strip_prefix(path).unwrap_or(e.path());
                !patterns.iter().any(|p| p.matches_path(relative))
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_workbook_file(e.path()))
        {
            debug!("Found workbook {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Assemble every file on the blocking pool, sharing one registry and one
/// configuration.
async fn assemble_all(files: Vec<PathBuf>, config: Arc<SheetConfig>) -> Result<Vec<WorkbookReport>> {
    let registry = SchemaRegistry::register();
    let mut tasks = JoinSet::new();

    for path in files {
        let registry = Arc::clone(&registry);
        let config = Arc::clone(&config);
        tasks.spawn_blocking(move || {
            let result = WorkbookAssembler::new(&registry, &config)
                .and_then(|assembler| assembler.assemble_from(&FileDocumentSource::new(), &path));
            match result {
                Ok(model) => WorkbookReport {
                    path,
                    model: Some(model),
                    error: None,
                },
                Err(e) => WorkbookReport {
                    path,
                    model: None,
                    error: Some(e.to_string()),
                },
            }
        });
    }

    let mut reports = Vec::new();
    while let Some(report) = tasks.join_next().await {
        reports.push(report?);
    }
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(reports)
}

fn print_report(report: &WorkbookReport) {
    println!("📘 {}", report.path.display());

    let model = match (&report.model, &report.error) {
        (Some(model), _) => model,
        (None, error) => {
            println!("   ❌ {}", error.as_deref().unwrap_or("unknown error"));
            println!();
            return;
        }
    };

    println!(
        "   {} workbook '{}', maturity {}",
        model.kind, model.name, model.maturity_level
    );
    println!();
    print!("{}", model.render_tab_table());
    println!();

    if model.diagnostics.issues.is_empty() {
        println!("   ✅ No field issues");
    } else {
        println!("   ❌ {} field issue(s):", model.diagnostics.issues.len());
        for issue in &model.diagnostics.issues {
            println!("      - {}", issue);
        }
    }
    for warning in &model.diagnostics.applicability {
        println!("   ⚠️  {}", warning);
    }
    println!();
}
