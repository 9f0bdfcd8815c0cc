//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::display::{Summary, UNKNOWN};
use crate::error::Result;
use colored::*;
use sca_domain::{GroundTruth, Verdict};
use sca_store::{DuplicateGroup, StoredRecord};
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a list of records.
    pub fn format_records(&self, records: &[StoredRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(Self::format_records_quiet(records)),
        }
    }

    fn format_records_json(&self, records: &[StoredRecord]) -> Result<String> {
        let json_records: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.name,
                    "path": r.path,
                    "record": r.record,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_records)?)
    }

    fn format_records_table(&self, records: &[StoredRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Record", "Timestamp", "File", "Language", "Verdict", "License risk", "Hash"]);

        for stored in records {
            let record = &stored.record;
            builder.push_record([
                stored.stem().to_string(),
                record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                record.file_path.clone(),
                record.language.clone(),
                record.verdict_text().unwrap_or(UNKNOWN).to_string(),
                record.license_risk_text().unwrap_or(UNKNOWN).to_string(),
                record.code_hash.short().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_records_quiet(records: &[StoredRecord]) -> String {
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.join("\n")
    }

    /// Format one record with its ground truth.
    pub fn format_record(
        &self,
        stored: &StoredRecord,
        ground_truth: Option<&GroundTruth>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(stored.name.clone()),
            _ => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "name": stored.name,
                "path": stored.path,
                "record": stored.record,
                "ground_truth": ground_truth,
            }))?),
        }
    }

    /// Format groups of records sharing a code hash.
    pub fn format_duplicates(&self, groups: &[DuplicateGroup]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_groups: Vec<serde_json::Value> = groups
                    .iter()
                    .map(|g| {
                        serde_json::json!({
                            "code_hash": g.code_hash,
                            "records": g.records.iter().map(|r| &r.name).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_groups)?)
            }
            OutputFormat::Quiet => Ok(groups
                .iter()
                .map(|g| g.code_hash.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if groups.is_empty() {
                    return Ok(self.colorize("No duplicate snippets found.", "green"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Hash", "Count", "Files"]);
                for group in groups {
                    let mut files: Vec<&str> = group
                        .records
                        .iter()
                        .map(|r| r.record.file_path.as_str())
                        .collect();
                    files.dedup();
                    builder.push_record([
                        group.code_hash.short().to_string(),
                        group.records.len().to_string(),
                        files.join("\n"),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Summary notification for a completed analysis.
    pub fn notification(&self, summary: &Summary) -> String {
        let message = summary.message();
        match summary.known_verdict() {
            Some(Verdict::Violation) => self.error(&message),
            Some(Verdict::HighRisk) | Some(Verdict::MediumRisk) => self.warning(&message),
            Some(Verdict::Safe) | Some(Verdict::LowRisk) => self.success(&message),
            _ => self.info(&message),
        }
    }

    /// Header line above the detail panel.
    pub fn panel_header(&self, file_path: &str) -> String {
        self.colorize(&format!("── SCA analysis: {} ──", file_path), "cyan")
    }

    /// Format a written record path.
    pub fn record_written(&self, path: &Path) -> String {
        self.success(&format!("Record saved: {}", path.display()))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
