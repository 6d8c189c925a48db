//! Incremental Markdown report writing.
//!
//! The report is append-only: a header, one table row per successful
//! caption, and a trailing summary. Every write opens the file in append
//! mode and closes it on return, so rows hit disk as they are produced
//! and an interrupted run leaves a valid, parseable file.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Markdown table report for a captioning run.
pub struct MarkdownReport {
    path: PathBuf,
}

impl MarkdownReport {
    /// Create the report file and write the header.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut file = File::create(path)?;
        writeln!(file, "# Image Alt Text Results")?;
        writeln!(file)?;
        writeln!(
            file,
            "Generated on: {}",
            Local::now().format("%Y-%m-%d at %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "| Image File | Alt Text |")?;
        writeln!(file, "|------------|----------|")?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Append one result row.
    pub fn append_row(&self, file_name: &str, alt_text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "| {} | {} |", file_name, escape_pipes(alt_text))?;
        Ok(())
    }

    /// Append the trailing summary section.
    pub fn append_summary(&self, total: usize, succeeded: usize, failed: usize) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file)?;
        writeln!(file)?;
        writeln!(file, "## Summary")?;
        writeln!(file)?;
        writeln!(file, "- Total images processed: {total}")?;
        writeln!(file, "- Successfully generated alt text: {succeeded}")?;
        writeln!(file, "- Failed: {failed}")?;
        Ok(())
    }

    /// The report file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Escape literal `|` characters so they can't break the table format.
///
/// No other character is altered.
pub fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
