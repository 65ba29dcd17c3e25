//! Inspect command handler

use super::utils::load_document;
use crate::cli::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::{format_value_compact, OutputWriter};
use presenter_core::{join_path, Entry, GetterPattern, Specification, ValueSpec};
use serde::Serialize;

/// One row of a transformer outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry {
    /// `$`-rooted output path
    pub path: String,
    /// Entry kind: property, template, literal, specification, ...
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Properties a template reads through the getter pattern
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<String>,
}

/// Handle the inspect command
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let spec = Specification::from_json(load_document(&args.transformer)?)?;
    let pattern = config.presenter.getter_pattern()?;

    let entries = outline(&spec, &pattern);

    if output.format() != OutputFormat::Human {
        return output.data(&entries);
    }

    output.section(&format!("Transformer {}", args.transformer.display()))?;
    let rows = entries
        .iter()
        .map(|entry| {
            let mut detail = entry.detail.clone().unwrap_or_default();
            if !entry.placeholders.is_empty() {
                detail.push_str(&format!("  <- {}", entry.placeholders.join(", ")));
            }
            vec![entry.path.clone(), entry.kind.to_string(), detail]
        })
        .collect();
    output.table(&["KEY", "KIND", "DETAIL"], rows)?;
    output.info(&format!("{} entries", entries.len()))
}

/// Flatten a specification into outline rows, nested entries included
pub fn outline(spec: &Specification, pattern: &GetterPattern) -> Vec<OutlineEntry> {
    let mut rows = Vec::new();
    collect(spec, "$", pattern, &mut rows);
    rows
}

fn collect(
    spec: &Specification,
    prefix: &str,
    pattern: &GetterPattern,
    rows: &mut Vec<OutlineEntry>,
) {
    for entry in spec {
        let path = join_path(prefix, entry.key());
        match entry {
            Entry::Property(_) => rows.push(OutlineEntry {
                path,
                kind: "property",
                detail: None,
                placeholders: Vec::new(),
            }),
            Entry::Field(_, value) => {
                let (detail, placeholders) = match value {
                    ValueSpec::Template(template) => (
                        Some(template.clone()),
                        pattern
                            .placeholders(template)
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    ),
                    ValueSpec::Literal(literal) => {
                        (Some(format_value_compact(literal)), Vec::new())
                    }
                    ValueSpec::Spec(nested) => {
                        (Some(format!("{} entries", nested.len())), Vec::new())
                    }
                    ValueSpec::Opaque(opaque) => {
                        (Some(opaque.type_name().to_string()), Vec::new())
                    }
                    ValueSpec::Callable(_) => (None, Vec::new()),
                };
                rows.push(OutlineEntry {
                    path: path.clone(),
                    kind: value.kind(),
                    detail,
                    placeholders,
                });

                if let ValueSpec::Spec(nested) = value {
                    collect(nested, &path, pattern, rows);
                }
            }
        }
    }
}
