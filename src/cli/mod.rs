use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use time::OffsetDateTime;

use crate::config::{EffectiveConfig, OutputFormat};
use crate::core::Report;
use crate::logs::RunRecord;
use crate::manifest::Manifest;
use crate::ui::UiConfig;

#[derive(Debug, Parser)]
#[command(
    name = "sosindex",
    version,
    about = "Build and render the index of a diagnostic collection run"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a structural-data index (JSON) as plain text
    Render(RenderArgs),
    /// Build an index from a section manifest (TOML or JSON)
    Build(BuildArgs),
    /// Print per-section entry counts
    Summary(SummaryArgs),
    Completion(CompletionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Index file, or `-` for stdin
    pub input: String,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    pub manifest: PathBuf,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Index file, or `-` for stdin
    pub input: String,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stdout_is_tty = io::stdout().is_terminal();
    let home_dir = crate::config::effective_home_dir()?;

    let env_config_path = std::env::var_os("SOSINDEX_CONFIG").map(PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;

    let ui_cfg = UiConfig {
        color: stdout_is_tty && cfg.ui.color && !cli.no_color,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cfg.render.format
    };

    match cli.command {
        Commands::Render(args) => {
            let started_at = OffsetDateTime::now_utc();
            let result = load_index(&args.input);
            let report = finish_run(
                &home_dir,
                &cfg,
                &ui_cfg,
                "render",
                &args.input,
                started_at,
                result,
            )?;
            write_report(&report, format, &cfg)?;
        }
        Commands::Build(args) => {
            let started_at = OffsetDateTime::now_utc();
            let input = args.manifest.display().to_string();
            let result = Manifest::load(&args.manifest)
                .map_err(crate::exit::input_failed_err)
                .and_then(Manifest::into_report);
            let report = finish_run(
                &home_dir, &cfg, &ui_cfg, "build", &input, started_at, result,
            )?;
            write_report(&report, format, &cfg)?;
        }
        Commands::Summary(args) => {
            let report = load_index(&args.input)?;
            if cli.json {
                let counts = summary_counts(&report);
                write_json_value(&counts, cfg.render.pretty_json)?;
            } else {
                crate::ui::print_summary(&report, &ui_cfg)
                    .context("failed to write summary")
                    .map_err(crate::exit::output_failed_err)?;
            }
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "sosindex", &mut out);
        }
        Commands::Config(args) => {
            if args.show {
                if cli.json {
                    write_json_value(&cfg, true)?;
                } else {
                    let s = toml::to_string_pretty(&cfg)?;
                    crate::ui::write_stdout(format!("{s}\n").as_bytes())
                        .map_err(|e| crate::exit::output_failed_err(e.into()))?;
                }
            } else if !ui_cfg.quiet {
                eprintln!("config: use `sosindex config --show`");
            }
        }
    }

    Ok(())
}

/// Reads a structural-data index from a file or stdin (`-`).
pub fn load_index(input: &str) -> Result<Report> {
    let s = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .context("failed to read index from stdin")
            .map_err(crate::exit::input_failed_err)?;
        buf
    } else {
        let path = Path::new(input);
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read index: {}", path.display()))
            .map_err(crate::exit::input_failed_err)?
    };

    crate::render::json::from_str(&s)
        .with_context(|| format!("failed to parse index (JSON): {input}"))
        .map_err(crate::exit::input_failed_err)
}

fn finish_run(
    home_dir: &Path,
    cfg: &EffectiveConfig,
    ui_cfg: &UiConfig,
    command: &str,
    input: &str,
    started_at: OffsetDateTime,
    result: Result<Report>,
) -> Result<Report> {
    let finished_at = OffsetDateTime::now_utc();

    if let Ok(report) = &result {
        crate::ui::verbose(
            ui_cfg,
            format!(
                "{command}: {} sections, {} entries",
                report.len(),
                report.entry_count()
            ),
        );
    }

    if cfg.log.enabled {
        let (report, error) = match &result {
            Ok(report) => (Some(report), None),
            Err(err) => (None, Some(format!("{err:#}"))),
        };
        let record = RunRecord {
            command,
            input,
            started_at,
            finished_at,
            report,
            error,
        };
        match crate::logs::write_run_log(home_dir, &record) {
            Ok(path) => crate::ui::verbose(ui_cfg, format!("log: {}", path.display())),
            Err(err) if result.is_ok() => return Err(crate::exit::output_failed_err(err)),
            Err(err) => crate::ui::verbose(ui_cfg, format!("log write also failed: {err:#}")),
        }
    }

    result
}

fn write_report(report: &Report, format: OutputFormat, cfg: &EffectiveConfig) -> Result<()> {
    match format {
        OutputFormat::Json => write_json_value(report, cfg.render.pretty_json),
        OutputFormat::Text => {
            let mut text = crate::render::plain_text(report);
            if !text.is_empty() {
                text.push('\n');
            }
            crate::ui::write_stdout(text.as_bytes())
                .context("failed to write rendered text")
                .map_err(crate::exit::output_failed_err)
        }
    }
}

fn write_json_value<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let mut buf = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    buf.push(b'\n');
    crate::ui::write_stdout(&buf)
        .context("failed to write JSON")
        .map_err(crate::exit::output_failed_err)
}

fn summary_counts(report: &Report) -> serde_json::Value {
    let mut sections = serde_json::Map::new();
    for (name, data) in report.sections() {
        let counts: serde_json::Map<String, serde_json::Value> = data
            .iter()
            .map(|(category, items)| (category.to_string(), items.len().into()))
            .collect();
        sections.insert(name.to_string(), counts.into());
    }
    serde_json::json!({
        "sections": sections,
        "total_sections": report.len(),
        "total_entries": report.entry_count(),
    })
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (expected bash|zsh|fish)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Leaf, Section};
    use serde_json::json;

    #[test]
    fn summary_counts_lists_populated_categories_only() {
        let mut section = Section::new("s");
        section.add([Leaf::note("a"), Leaf::note("b"), Leaf::created_file("f")]);
        let mut report = Report::new();
        report.add([section, Section::new("empty")]);

        assert_eq!(
            summary_counts(&report),
            json!({
                "sections": {"empty": {}, "s": {"created_files": 1, "notes": 2}},
                "total_sections": 2,
                "total_entries": 3,
            })
        );
    }

    #[test]
    fn parse_shell_rejects_unknown_shells_as_invalid_args() {
        assert!(parse_shell(" Bash ").is_ok());
        let err = parse_shell("nope").unwrap_err();
        assert_eq!(crate::exit::exit_code(&err), 2);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
