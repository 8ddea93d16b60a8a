//! Main CLI application for the Lights Off solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lights_off_solver::{
    bits::BitMatrix,
    config::{CliOverrides, OutputFormat, Settings},
    gf2::{NoProgress, ProgressTracker, StopCondition},
    lights_off::{
        self, all_lit, apply_presses, create_example_fields, load_field_from_file,
        load_fields_from_directory, read_field, save_image, LightsOffProblem, SolveSummary,
    },
    utils::{ColorOutput, ReportFormatter, TerminalProgress},
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lights_off")]
#[command(about = "Lights Off puzzle solver over GF(2)")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the minimum number of presses that switch every light off
    Solve {
        /// Configuration file path
        #[arg(long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Field file, read from stdin when neither a file nor a size is given
        #[arg(short, long)]
        field: Option<PathBuf>,

        /// Rows of an all-lit field (square when only one side is given)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Columns of an all-lit field
        #[arg(short, long)]
        cols: Option<usize>,

        /// Save the press grid as a PNG image
        #[arg(short = 'p', long)]
        image: bool,

        /// Print size, number of solutions, weight and time
        #[arg(short, long)]
        info: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Output directory for images and reports (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Give up after this many seconds, 0 for no limit (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Show elimination progress
        #[arg(long)]
        progress: bool,
    },

    /// Apply a press grid to an all-lit field of the same size
    Apply {
        /// Press grid file, read from stdin when neither a file nor a size is given
        #[arg(short, long)]
        field: Option<PathBuf>,

        /// Rows of an all-ones press grid (square when only one side is given)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Columns of an all-ones press grid
        #[arg(short, long)]
        cols: Option<usize>,

        /// Save the press grid as a PNG image
        #[arg(short = 'p', long)]
        image: bool,

        /// Output directory for the image
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Check that a press grid switches every light of a field off
    Verify {
        /// Field file
        #[arg(short, long)]
        field: PathBuf,

        /// Press grid file
        #[arg(short, long)]
        presses: PathBuf,
    },

    /// Solve every field in a directory
    Batch {
        /// Directory of `*.txt` fields
        #[arg(short, long)]
        directory: PathBuf,

        /// Configuration file path
        #[arg(long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Per-field timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Print the reports as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            config,
            field,
            rows,
            cols,
            image,
            info,
            json,
            output,
            timeout,
            progress,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                field_file: field,
                output_dir: output.clone(),
                timeout_seconds: timeout,
                save_image: image,
                print_info: info,
                show_progress: progress,
                json,
            };
            solve_command(config, overrides, output.is_some())
        }
        Commands::Apply {
            field,
            rows,
            cols,
            image,
            output,
        } => {
            let mut settings = Settings::default();
            settings.merge_with_cli(&CliOverrides {
                rows,
                cols,
                field_file: field,
                ..CliOverrides::default()
            });
            apply_command(&settings, image, output)
        }
        Commands::Verify { field, presses } => verify_command(field, presses),
        Commands::Batch {
            directory,
            config,
            timeout,
            json,
        } => batch_command(directory, config, timeout, json),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Log to stderr so stdout carries only grids and reports
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides, save_report: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;
    debug!(?settings, "configuration");

    let problem = LightsOffProblem::new(settings.clone()).context("Failed to create problem")?;

    let report = if settings.solver.show_progress {
        let mut progress = ProgressTracker::new(TerminalProgress::new());
        let report = problem.solve(&mut progress);
        progress.sink().finish();
        report?
    } else {
        problem.solve(&mut NoProgress)?
    };

    match settings.output.format {
        OutputFormat::Json => println!("{}", report.to_json().context("Failed to serialize report")?),
        OutputFormat::Text => print!(
            "{}",
            ReportFormatter::format_report(&report, settings.output.print_info)
        ),
    }

    let output_dir = &settings.output.output_directory;
    if settings.output.save_image {
        match &report.presses {
            Some(presses) => {
                let path = save_image(presses, output_dir)?;
                eprintln!("{}", ColorOutput::success(&format!("Saved image to {}", path.display())));
            }
            None => eprintln!("{}", ColorOutput::warning("No solution, skipping image")),
        }
    }

    if save_report {
        let path = ReportFormatter::save_report(&report, output_dir, settings.output.format)
            .context("Failed to save report")?;
        eprintln!("{}", ColorOutput::success(&format!("Saved report to {}", path.display())));
    }

    Ok(())
}

/// Switch an all-lit field of the same size through `presses`
fn apply_to_lit(presses: &BitMatrix) -> Result<BitMatrix> {
    let mut field = all_lit(presses.n_rows(), presses.n_cols())?;
    apply_presses(&mut field, presses)?;
    Ok(field)
}

/// Press grid for `apply`: all ones when a size is given, else the field file, else stdin
fn load_press_grid(settings: &Settings) -> Result<BitMatrix> {
    if let Some((rows, cols)) = settings.field_size() {
        return Ok(all_lit(rows, cols)?);
    }
    match &settings.input.field_file {
        Some(path) => load_field_from_file(path),
        None => read_field(std::io::stdin().lock()).context("Failed to read press grid from stdin"),
    }
}

fn apply_command(settings: &Settings, image: bool, output_dir: PathBuf) -> Result<()> {
    settings.validate().context("Invalid apply arguments")?;
    let presses = load_press_grid(settings)?;

    let field = apply_to_lit(&presses)?;
    println!("{field}");

    if image {
        let path = save_image(&presses, &output_dir)?;
        eprintln!("{}", ColorOutput::success(&format!("Saved image to {}", path.display())));
    }

    Ok(())
}

fn verify_command(field_path: PathBuf, presses_path: PathBuf) -> Result<()> {
    let field = load_field_from_file(&field_path)
        .with_context(|| format!("Failed to load field from {}", field_path.display()))?;
    let presses = load_field_from_file(&presses_path)
        .with_context(|| format!("Failed to load presses from {}", presses_path.display()))?;

    let result = lights_off::pressed(&field, &presses).context("Verification failed")?;

    if result.is_zero() {
        println!("{}", ColorOutput::success("✅ Every light is off"));
        Ok(())
    } else {
        println!("{}", ReportFormatter::format_grid_with_coords(&result));
        println!("{}", ColorOutput::error("❌ Presses leave lights on"));
        anyhow::bail!("{} light(s) still on", result.count_ones())
    }
}

#[derive(Serialize)]
struct BatchEntry {
    name: String,
    #[serde(flatten)]
    summary: SolveSummary,
}

fn batch_command(directory: PathBuf, config_path: PathBuf, timeout: Option<u64>, json: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        timeout_seconds: timeout,
        ..CliOverrides::default()
    });

    let fields = load_fields_from_directory(&directory)?;
    if fields.is_empty() {
        println!("{}", ColorOutput::warning("No fields found"));
        return Ok(());
    }

    let timeout_seconds = settings.solver.timeout_seconds;
    let results: Vec<_> = fields
        .par_iter()
        .map(|(name, field)| {
            let stop = StopCondition::from_timeout_seconds(timeout_seconds);
            (name, lights_off::solve(field, &mut NoProgress, &stop))
        })
        .collect();

    if json {
        let mut entries = Vec::new();
        for (name, result) in results {
            match result {
                Ok(report) => entries.push(BatchEntry {
                    name: name.clone(),
                    summary: report.summary(),
                }),
                Err(e) => tracing::warn!(field = %name, error = %e, "solve failed"),
            }
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("Failed to serialize reports")?
        );
        return Ok(());
    }

    for (name, result) in results {
        match result {
            Ok(report) => println!("{}", ReportFormatter::format_summary_line(name, &report)),
            Err(e) => println!("{}", ColorOutput::error(&format!("{name:<16} {e}"))),
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/fields");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut default_settings = Settings::default();
        default_settings.output.output_directory = PathBuf::from("output");
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_fields(&input_dir).context("Failed to create example fields")?;
    println!("Created example fields in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Classic all-lit 5x5 board
    let mut classic_config = Settings::default();
    classic_config.input.rows = Some(5);
    classic_config.output.print_info = true;
    classic_config.to_file(&examples_dir.join("classic.yaml"))?;

    // Field from file, with image output
    let mut file_config = Settings::default();
    file_config.input.field_file = Some(PathBuf::from("input/fields/plus.txt"));
    file_config.output.save_image = true;
    file_config.output.output_directory = PathBuf::from("output");
    file_config.to_file(&examples_dir.join("from_file.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your fields to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml --field input/fields/plus.txt");

    Ok(())
}
