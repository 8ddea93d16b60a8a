//! Display and output formatting utilities

use crate::bits::BitMatrix;
use crate::config::OutputFormat;
use crate::gf2::ProgressSink;
use crate::lights_off::SolveReport;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// Format solve reports for display
pub struct ReportFormatter;

impl ReportFormatter {
    /// The press grid as '0'/'1' rows, or `0` when the field cannot be cleared
    pub fn format_presses(report: &SolveReport) -> String {
        match &report.presses {
            Some(presses) => presses.to_string(),
            None => "0\n".to_string(),
        }
    }

    /// Press grid and a blank line, then the size/solutions/weight/time block when `info` is set
    pub fn format_report(report: &SolveReport, info: bool) -> String {
        let mut output = Self::format_presses(report);
        output.push('\n');
        if info {
            output.push_str(&report.to_string());
            output.push('\n');
        }
        output
    }

    /// One line per report, for batch runs
    pub fn format_summary_line(name: &str, report: &SolveReport) -> String {
        if report.is_solvable() {
            format!(
                "{:<16} {:>3}x{:<3} solutions: {:<8} weight: {:<4} time: {:.3}s",
                name,
                report.rows,
                report.cols,
                report.solution_count,
                report.weight,
                report.elapsed.as_secs_f64()
            )
        } else {
            format!(
                "{:<16} {:>3}x{:<3} no solution          time: {:.3}s",
                name,
                report.rows,
                report.cols,
                report.elapsed.as_secs_f64()
            )
        }
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &BitMatrix) -> String {
        let mut output = String::new();

        output.push_str("   ");
        output.push_str(&(0..grid.n_cols()).map(|x| format!("{:2}", x % 10)).join(""));
        output.push('\n');

        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row.iter() {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Save a report to `output_dir` in the configured format, returning the path written
    pub fn save_report<P: AsRef<Path>>(
        report: &SolveReport,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let stem = format!("lightsoff_{}x{}", report.rows, report.cols);
        let (path, content) = match format {
            OutputFormat::Text => (
                output_dir.join(format!("{stem}.txt")),
                Self::format_report(report, true),
            ),
            OutputFormat::Json => (
                output_dir.join(format!("{stem}.json")),
                report.to_json().context("Failed to serialize report")?,
            ),
        };

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(path)
    }
}

/// Terminal progress bar for the elimination phase
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template("{msg:<20} [{bar:40}] {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn report(&mut self, message: &str, percent: u32) {
        self.bar.set_message(message.to_string());
        self.bar.set_position(u64::from(percent));
    }
}

/// Kind of console message, each with its own ANSI colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn ansi_code(self) -> u8 {
        match self {
            Tone::Error => 31,
            Tone::Success => 32,
            Tone::Warning => 33,
            Tone::Info => 34,
        }
    }
}

/// ANSI-coloured console messages, plain when `NO_COLOR` is set or `TERM=dumb`
pub struct ColorOutput;

impl ColorOutput {
    pub fn paint(text: &str, tone: Tone) -> String {
        let no_color = std::env::var_os("NO_COLOR");
        let term = std::env::var("TERM").ok();
        Self::paint_with(text, tone, no_color.is_none() && term.as_deref() != Some("dumb"))
    }

    fn paint_with(text: &str, tone: Tone, enabled: bool) -> String {
        if enabled {
            format!("\x1b[{}m{text}\x1b[0m", tone.ansi_code())
        } else {
            text.to_string()
        }
    }

    pub fn success(text: &str) -> String {
        Self::paint(text, Tone::Success)
    }

    pub fn error(text: &str) -> String {
        Self::paint(text, Tone::Error)
    }

    pub fn warning(text: &str) -> String {
        Self::paint(text, Tone::Warning)
    }

    pub fn info(text: &str) -> String {
        Self::paint(text, Tone::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf2::{NoProgress, ProgressTracker, StopCondition};
    use crate::lights_off::{parse_field, solve};
    use tempfile::tempdir;

    fn report(text: &str) -> SolveReport {
        solve(&parse_field(text).unwrap(), &mut NoProgress, &StopCondition::none()).unwrap()
    }

    #[test]
    fn test_format_presses() {
        assert_eq!(ReportFormatter::format_presses(&report("010\n111\n010\n")), "000\n010\n000\n");
        assert_eq!(
            ReportFormatter::format_presses(&report("10000\n00000\n00000\n00000\n00000\n")),
            "0\n"
        );
    }

    #[test]
    fn test_format_report_with_info() {
        let text = ReportFormatter::format_report(&report("1111\n1111\n1111\n1111\n"), true);
        assert!(text.starts_with("0010\n1000\n0001\n0100\n\nSize      : 4 x 4\n"));
        assert!(text.contains("Solutions : 16"));
        assert!(text.contains("Weight    : 4"));

        let text = ReportFormatter::format_report(&report("10000\n00000\n00000\n00000\n00000\n"), false);
        assert_eq!(text, "0\n\n");
    }

    #[test]
    fn test_summary_line() {
        let line = ReportFormatter::format_summary_line("plus", &report("010\n111\n010\n"));
        assert!(line.starts_with("plus"));
        assert!(line.contains("solutions: 1"));

        let line = ReportFormatter::format_summary_line(
            "corner",
            &report("10000\n00000\n00000\n00000\n00000\n"),
        );
        assert!(line.contains("no solution"));
    }

    #[test]
    fn test_grid_formatting() {
        let grid = parse_field("101\n010\n101\n").unwrap();

        let with_coords = ReportFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));
    }

    #[test]
    fn test_save_report() {
        let temp_dir = tempdir().unwrap();
        let report = report("1\n");

        let text_path = ReportFormatter::save_report(&report, temp_dir.path(), OutputFormat::Text).unwrap();
        assert!(std::fs::read_to_string(text_path).unwrap().starts_with("1\n"));

        let json_path = ReportFormatter::save_report(&report, temp_dir.path(), OutputFormat::Json).unwrap();
        assert_eq!(json_path.file_name().unwrap(), "lightsoff_1x1.json");
        let json = std::fs::read_to_string(json_path).unwrap();
        assert!(json.contains("\"weight\": 1"));
    }

    #[test]
    fn test_terminal_progress() {
        let mut progress = ProgressTracker::new(TerminalProgress::new());
        progress.report("Gaussing system", 50);
        progress.report("Gaussing system", 50);
        assert_eq!(progress.sink().bar.position(), 50);
        progress.sink().finish();
    }

    #[test]
    fn test_color_output() {
        assert_eq!(ColorOutput::paint_with("ok", Tone::Success, true), "\x1b[32mok\x1b[0m");
        assert_eq!(ColorOutput::paint_with("bad", Tone::Error, true), "\x1b[31mbad\x1b[0m");
        assert_eq!(ColorOutput::paint_with("plain", Tone::Info, false), "plain");
        assert!(ColorOutput::warning("careful").contains("careful"));
    }
}
