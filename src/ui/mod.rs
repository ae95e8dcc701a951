use anyhow::Error;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::core::{Category, Report};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub color: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "next:");
    let _ = writeln!(stderr, "  - re-run with `--verbose` for more detail");
    let _ = writeln!(
        stderr,
        "  - see `sosindex --help` for available commands and options"
    );
}

/// Diagnostic line on stderr, shown only with `--verbose`.
pub fn verbose(cfg: &UiConfig, message: impl AsRef<str>) {
    if cfg.verbose && !cfg.quiet {
        let _ = writeln!(io::stderr().lock(), "{}", message.as_ref());
    }
}

/// Writes to stdout, treating a closed pipe as success.
pub fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(bytes) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err),
    }
    match stdout.flush() {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err),
    }
}

pub fn print_summary(report: &Report, cfg: &UiConfig) -> io::Result<()> {
    write_stdout(format_summary(report, cfg.color).as_bytes())
}

const SUMMARY_COLUMNS: [(Category, &str); 5] = [
    (Category::Commands, "commands"),
    (Category::CopiedFiles, "copied"),
    (Category::CreatedFiles, "created"),
    (Category::Alerts, "alerts"),
    (Category::Notes, "notes"),
];

/// Per-section entry counts as an aligned table.
pub fn format_summary(report: &Report, color: bool) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    if report.is_empty() {
        let _ = writeln!(out, "no sections");
        return out;
    }

    let name_width = report
        .sections()
        .map(|(name, _)| name.width())
        .chain(std::iter::once("section".width()))
        .max()
        .unwrap_or(0);

    let _ = write!(out, "{}", pad_end_display("section", name_width));
    for (_, label) in SUMMARY_COLUMNS {
        let _ = write!(out, "  {label:>8}");
    }
    let _ = writeln!(out);

    for (name, data) in report.sections() {
        let _ = write!(out, "{}", pad_end_display(name, name_width));
        for (category, _) in SUMMARY_COLUMNS {
            let count = data.get(&category).map(Vec::len).unwrap_or(0);
            let cell = format!("{count:>8}");
            if color && category == Category::Alerts && count > 0 {
                let _ = write!(out, "  \x1b[31m{cell}\x1b[0m");
            } else {
                let _ = write!(out, "  {cell}");
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "total: {} sections, {} entries",
        report.len(),
        report.entry_count()
    );
    out
}

fn pad_end_display(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}
