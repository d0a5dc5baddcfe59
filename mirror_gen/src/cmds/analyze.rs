/* Analyze command - print the field descriptors of every declared type */

use super::common::load_types;
use crate::analyze;
use anyhow::Context;
use clap::ValueEnum;
use mirror_types::{FieldDescriptor, OwnerSemantics, TypeDecl};
use serde_derive::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct TypeReport {
    name: String,
    semantics: OwnerSemantics,
    fields: Vec<FieldDescriptor>,
}

/* Execute the analyze command */
pub fn run(files: Vec<PathBuf>, format: ReportFormat) -> anyhow::Result<()> {
    let types = load_types(&files)?;
    print!("{}", render(&types, format)?);
    Ok(())
}

/// Analyzes every type and renders the report in `format`.
pub fn render(types: &[TypeDecl], format: ReportFormat) -> anyhow::Result<String> {
    let mut reports = Vec::with_capacity(types.len());
    for decl in types {
        let fields =
            analyze(&decl.members).with_context(|| format!("analyzing type '{}'", decl.name))?;
        reports.push(TypeReport {
            name: decl.name.clone(),
            semantics: decl.kind.semantics(),
            fields,
        });
    }

    let rendered = match format {
        ReportFormat::Text => render_text(&reports)?,
        ReportFormat::Json => format!("{}\n", serde_json::to_string_pretty(&reports)?),
        ReportFormat::Yaml => serde_yml::to_string(&reports)?,
    };
    Ok(rendered)
}

fn render_text(reports: &[TypeReport]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for report in reports {
        writeln!(out, "{} ({:?} semantics)", report.name, report.semantics)?;
        if report.fields.is_empty() {
            writeln!(out, "  (no fields)")?;
        }
        for field in &report.fields {
            let mode = if field.is_readonly { "readonly" } else { "read-write" };
            let kind = if field.is_computed() { "computed" } else { "stored" };
            writeln!(out, "  - {:<24} {:<10} {}", field.name, mode, kind)?;
        }
        writeln!(out)?;
    }
    Ok(out)
}
