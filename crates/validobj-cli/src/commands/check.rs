//! Check command: validate documents against an expression

use super::{OutputFormat, EXIT_INVALID};
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use validobj::{Engine, EngineConfig, Expression, Value};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding the validation expression
    #[arg(short, long)]
    pub schema: PathBuf,

    /// JSON documents to validate (reads stdin when omitted)
    pub files: Vec<PathBuf>,

    /// Name of the root location in messages (defaults to $VALIDOBJ_ROOT or "it")
    #[arg(long)]
    pub root: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct DocumentReport {
    source: String,
    valid: bool,
    errors: Vec<String>,
}

pub fn check(args: CheckArgs) -> Result<ExitCode> {
    let mut config = EngineConfig::from_env();
    if let Some(root) = args.root {
        config.root = root;
    }
    let engine = Engine::builder().config(config).build();

    let expr = load_expression(&engine, &args.schema)?;
    tracing::debug!(schema = %args.schema.display(), kind = expr.kind_name(), "compiled expression");

    let sources: Vec<Option<PathBuf>> = if args.files.is_empty() {
        vec![None]
    } else {
        args.files.into_iter().map(Some).collect()
    };

    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let (name, text) = read_source(source.as_deref())?;
        let json: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("{name} is not valid JSON"))?;
        let errors = engine
            .has_errors(&Value::from(json), &expr)
            .with_context(|| format!("cannot validate {name}"))?
            .map(|errors| errors.into_vec())
            .unwrap_or_default();

        tracing::debug!(source = %name, errors = errors.len(), "validated document");
        reports.push(DocumentReport {
            source: name,
            valid: errors.is_empty(),
            errors,
        });
    }

    match args.format {
        OutputFormat::Text => print_text(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    if reports.iter().all(|r| r.valid) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INVALID))
    }
}

fn load_expression(engine: &Engine, path: &Path) -> Result<Expression> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read schema {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("schema {} is not valid JSON", path.display()))?;
    engine
        .compile(&json)
        .with_context(|| format!("schema {} is not a valid expression", path.display()))
}

fn read_source(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            Ok(("-".to_string(), text))
        }
    }
}

fn print_text(reports: &[DocumentReport]) {
    for report in reports {
        if report.valid {
            println!("{}: {}", report.source, style("ok").green());
            continue;
        }
        for error in &report.errors {
            println!("{}: {}", report.source, style(error).red());
        }
    }
}
