//! List command: show registered checks

use super::OutputFormat;
use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::process::ExitCode;
use validobj::Registry;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct CheckInfo<'a> {
    name: &'a str,
    needs_params: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<String>,
}

pub fn list(args: ListArgs) -> Result<ExitCode> {
    let registry = Registry::with_builtins();
    let infos: Vec<CheckInfo<'_>> = registry
        .entries()
        .into_iter()
        .map(|entry| CheckInfo {
            name: entry.name(),
            needs_params: entry.needs_params(),
            usage: entry.needs_params().then(|| entry.usage()),
        })
        .collect();

    match args.format {
        OutputFormat::Text => {
            for info in &infos {
                match &info.usage {
                    Some(usage) => println!("{} {}", style(info.name).bold(), style(usage).dim()),
                    None => println!("{}", style(info.name).bold()),
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
    }

    Ok(ExitCode::SUCCESS)
}
