//! Output formatting for CLI commands.

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use charm_events::{CharmBase, GroupKeys};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?,
    };

    writeln!(writer, "{output}")?;
    Ok(())
}

/// Print formatted output to stdout
pub fn print_output<T: FormattedOutput>(format: OutputFormat, value: &T) -> Result<(), CliError> {
    write_output(format, value, std::io::stdout().lock())
}

#[derive(Debug, Serialize)]
pub struct DeclarationRow {
    pub key: String,
    pub kind: String,
    pub path: String,
}

/// Everything `inspect` reports about a charm.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub name: String,
    pub handle_path: String,
    pub subordinate: bool,
    pub declarations: Vec<DeclarationRow>,
    pub relations: Vec<GroupKeys>,
    pub storage: Vec<GroupKeys>,
}

impl InspectReport {
    pub fn new(charm: &CharmBase) -> Self {
        let on = charm.on();
        Self {
            name: charm.metadata().name.clone(),
            handle_path: charm.handle_path().to_string(),
            subordinate: charm.metadata().subordinate,
            declarations: on
                .events()
                .map(|(key, decl)| DeclarationRow {
                    key: key.to_string(),
                    kind: decl.kind().to_string(),
                    path: decl.path().to_string(),
                })
                .collect(),
            relations: on.by_relation().values().map(GroupKeys::from).collect(),
            storage: on.by_storage().values().map(GroupKeys::from).collect(),
        }
    }
}

fn write_groups(out: &mut String, title: &str, groups: &[GroupKeys]) {
    if groups.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for group in groups {
        let _ = writeln!(out, "  {}: {}", group.name, group.keys.join(", "));
    }
}

impl FormattedOutput for InspectReport {
    fn format_text(&self) -> String {
        let mut out = String::new();
        let name = if self.name.is_empty() { "<unnamed>" } else { &self.name };
        let _ = writeln!(out, "charm: {name} ({})", self.handle_path);
        if self.subordinate {
            let _ = writeln!(out, "subordinate: true");
        }

        let width = self.declarations.iter().map(|d| d.key.len()).max().unwrap_or(0);
        let _ = writeln!(out, "declarations: {}", self.declarations.len());
        for decl in &self.declarations {
            let _ = writeln!(out, "  {:width$}  {}", decl.key, decl.kind);
        }

        write_groups(&mut out, "relations", &self.relations);
        write_groups(&mut out, "storage", &self.storage);
        out.trim_end().to_string()
    }
}

/// Result of `validate`.
#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub path: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub relations: usize,
    pub storage: usize,
    pub resources: usize,
    pub payloads: usize,
    pub declarations: usize,
}

impl FormattedOutput for ValidateReport {
    fn format_text(&self) -> String {
        match &self.error {
            Some(error) => format!("{}: invalid\n  {error}", self.path),
            None => format!(
                "{}: ok ({} relations, {} storage, {} resources, {} payloads, {} events)",
                self.path, self.relations, self.storage, self.resources, self.payloads, self.declarations
            ),
        }
    }
}

/// One event delivered to the logging observer.
#[derive(Debug, Clone, Serialize)]
pub struct FiredEvent {
    pub key: String,
    pub kind: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct EmitReport {
    pub fired: Vec<FiredEvent>,
}

impl FormattedOutput for EmitReport {
    fn format_text(&self) -> String {
        self.fired
            .iter()
            .map(|e| format!("{} -> {} ({})", e.path, e.kind, e.key))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charm_framework::Framework;
    use charm_metadata::Metadata;
    use charm_test_utils::SMALL_METADATA;

    fn report() -> InspectReport {
        let framework = Framework::new();
        let metadata = Metadata::from_yaml_str(SMALL_METADATA).unwrap();
        let charm = CharmBase::new(&framework, None, metadata).unwrap();
        InspectReport::new(&charm)
    }

    #[test]
    fn test_inspect_text_lists_groups() {
        let text = report().format_text();
        assert!(text.starts_with("charm: small (charm)"));
        assert!(text.contains("declarations: 20"));
        assert!(text.contains(
            "  db: db_relation_joined, db_relation_changed, db_relation_departed, db_relation_broken"
        ));
        assert!(text.contains("  logs: logs_storage_attached, logs_storage_detaching"));
    }

    #[test]
    fn test_inspect_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&report().format_json().unwrap()).unwrap();
        assert_eq!(json["name"], "small");
        assert_eq!(json["declarations"].as_array().unwrap().len(), 20);
        assert_eq!(json["relations"][0]["name"], "cache");
        assert_eq!(json["storage"][0]["keys"][1], "logs_storage_detaching");
    }

    #[test]
    fn test_write_output_text() {
        let report = EmitReport {
            fired: vec![FiredEvent {
                key: "start".into(),
                kind: "start".into(),
                path: "charm/start".into(),
            }],
        };
        let mut buf = Vec::new();
        write_output(OutputFormat::Text, &report, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "charm/start -> start (start)\n");
    }

    #[test]
    fn test_validate_error_omits_counts_text() {
        let report = ValidateReport {
            path: "metadata.yaml".into(),
            valid: false,
            error: Some("relation 'db' is missing required field 'interface'".into()),
            relations: 0,
            storage: 0,
            resources: 0,
            payloads: 0,
            declarations: 0,
        };
        assert_eq!(
            report.format_text(),
            "metadata.yaml: invalid\n  relation 'db' is missing required field 'interface'"
        );
    }
}
