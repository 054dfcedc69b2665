//! Output formatting for the mosaic CLI (table, json, plain)

use clap::ValueEnum;
use colored::Colorize;
use mosaic_client::UploadResponse;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// One result path per line, for scripts
    Plain,
}

impl OutputFormat {
    /// Parse a format name from the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("{}", msg.green());
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print upload outcomes in the configured format
    pub fn print_uploads(&self, rows: &[UploadRow]) {
        match self.format {
            OutputFormat::Table => {
                if !rows.is_empty() {
                    println!("{}", Table::new(rows));
                }
            }
            // The server's response body, one object per line; failures go to stderr
            OutputFormat::Json => {
                for response in rows.iter().filter_map(|r| r.response.as_ref()) {
                    if let Ok(line) = serde_json::to_string(response) {
                        println!("{}", line);
                    }
                }
            }
            OutputFormat::Plain => {
                for response in rows.iter().filter_map(|r| r.response.as_ref()) {
                    println!("{}", response.result_path);
                }
            }
        }
    }
}

/// One uploaded file
#[derive(Debug, Tabled)]
pub struct UploadRow {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Result")]
    pub result: String,
    /// Server body, absent when the upload failed
    #[tabled(skip)]
    pub response: Option<UploadResponse>,
}

impl UploadRow {
    pub fn converted(file: String, response: UploadResponse) -> Self {
        Self {
            file,
            result: response.result_path.clone(),
            response: Some(response),
        }
    }

    pub fn failed(file: String, error: &impl std::fmt::Display) -> Self {
        Self {
            file,
            result: format!("error: {}", error),
            response: None,
        }
    }
}
