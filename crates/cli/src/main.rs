//! riverbed CLI - river-bed elevation surfaces from cross-sections and soundings

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use riverbed_algorithms::grid::{grid_dimensions, GridParams};
use riverbed_algorithms::interpolation::{IdwParams, MapParams};
use riverbed_algorithms::pipeline::Pipeline;
use riverbed_algorithms::section::{river_outline, CrossSectionSeries};
use riverbed_core::crs::{check_crs, CrsCheck};
use riverbed_core::io::{read_cross_sections, read_samples, write_elevation_field, write_outline};
use riverbed_core::{CrossSection, Observer, SamplePoint, Stage, StageSummary, CRS};

use config::Parameters;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "riverbed")]
#[command(author, version, about = "River-bed elevation surfaces from cross-sections", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full interpolation described by a parameter file
    Run {
        /// Parameter file
        #[arg(short, long, default_value = "parameters.json")]
        params: PathBuf,
    },
    /// Interpolate a river bed from explicit inputs
    Interpolate {
        /// Cross-section GeoJSON (LineString per section, left bank first)
        #[arg(long)]
        sections: PathBuf,
        /// Elevation sample GeoJSON (Point features)
        #[arg(long)]
        points: PathBuf,
        /// Output GeoJSON of interpolated grid points
        output: PathBuf,
        /// Property ordering the cross-sections along the river
        #[arg(long, default_value = "s")]
        order_field: String,
        /// Property holding the sample elevation
        #[arg(long, default_value = "z")]
        z_field: String,
        /// Grid spacing in map units
        #[arg(long)]
        dx: f64,
        /// Along-river distance divisor
        #[arg(short, long, default_value = "20")]
        anisotropy: f64,
        /// Maximum number of samples per cell
        #[arg(short, long, default_value = "10")]
        neighbours: usize,
        /// IDW power parameter
        #[arg(short, long, default_value = "1.0")]
        power: f64,
        /// Also write the channel outline polygon here
        #[arg(long)]
        outline: Option<PathBuf>,
    },
    /// Show information about a set of cross-sections
    Info {
        /// Cross-section GeoJSON
        sections: PathBuf,
        /// Property ordering the cross-sections along the river
        #[arg(long, default_value = "s")]
        order_field: String,
        /// Report the grid this spacing would produce
        #[arg(long)]
        dx: Option<f64>,
    },
}

/// Everything needed for one interpolation run
struct Job {
    sections: PathBuf,
    order_field: String,
    points: PathBuf,
    z_field: String,
    outline: Option<PathBuf>,
    output: PathBuf,
    pipeline: Pipeline,
}

// ─── Stage reporting ────────────────────────────────────────────────────

/// Logs stage boundaries and shows a spinner while a stage runs
struct TracingObserver {
    current: RefCell<Option<ProgressBar>>,
}

impl TracingObserver {
    fn new() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }
}

impl Observer for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        debug!("entered {}", stage);
        *self.current.borrow_mut() = Some(spinner(&format!("{}...", stage)));
    }

    fn stage_finished(&self, stage: Stage, summary: &StageSummary) {
        if let Some(pb) = self.current.borrow_mut().take() {
            pb.finish_and_clear();
        }
        info!("{}: {}", stage, summary);
        debug!("exited {}", stage);
    }
}

impl Drop for TracingObserver {
    fn drop(&mut self) {
        if let Some(pb) = self.current.get_mut().take() {
            pb.finish_and_clear();
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_sections(path: &Path, order_field: &str) -> Result<(Vec<CrossSection>, Option<CRS>)> {
    let pb = spinner("Reading cross-sections...");
    let result = read_cross_sections(path, order_field)
        .with_context(|| format!("Failed to read cross-sections from {}", path.display()))?;
    pb.finish_and_clear();
    info!("Cross-sections: {}", result.0.len());
    Ok(result)
}

fn read_points(path: &Path, z_field: &str) -> Result<(Vec<SamplePoint>, Option<CRS>)> {
    let pb = spinner("Reading samples...");
    let result = read_samples(path, z_field)
        .with_context(|| format!("Failed to read samples from {}", path.display()))?;
    pb.finish_and_clear();
    info!("Samples: {}", result.0.len());
    Ok(result)
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn execute(job: Job) -> Result<()> {
    let (sections, sections_crs) = read_sections(&job.sections, &job.order_field)?;
    let (samples, points_crs) = read_points(&job.points, &job.z_field)?;

    match check_crs(sections_crs.as_ref(), points_crs.as_ref())
        .context("Cross-sections and samples must share a CRS")?
    {
        CrsCheck::Match => {}
        CrsCheck::Partial => warn!("Only one input declares a CRS; assuming both share it"),
        CrsCheck::Undeclared => debug!("Neither input declares a CRS"),
    }
    let crs = sections_crs.or(points_crs);

    let start = Instant::now();
    let out = {
        let observer = TracingObserver::new();
        job.pipeline
            .run(&sections, &samples, &observer)
            .context("Interpolation failed")?
    };
    let elapsed = start.elapsed();

    if out.dropped > 0 {
        info!("{} samples outside the channel were ignored", out.dropped);
    }

    if let Some(outline_path) = &job.outline {
        let start = Instant::now();
        write_outline(river_outline(&out.series), outline_path, crs.as_ref())
            .context("Failed to write river outline")?;
        done("River outline", outline_path, start.elapsed());
    }

    let pb = spinner("Writing output...");
    write_elevation_field(&out.field, &job.output, crs.as_ref())
        .context("Failed to write output")?;
    pb.finish_and_clear();

    let (rows, cols) = out.field.shape();
    let stats = out.field.statistics();
    println!("Grid: {} rows x {} cols ({} cells)", rows, cols, out.field.len());
    if let (Some(min), Some(max), Some(mean)) = (stats.min, stats.max, stats.mean) {
        println!("  Elevation: min {:.3}, max {:.3}, mean {:.3}", min, max, mean);
    }
    done("Bed elevation", &job.output, elapsed);
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run { params } => {
            let p = Parameters::from_file(&params)?;
            info!("Parameters: {}", params.display());
            execute(Job {
                pipeline: p.pipeline(),
                sections: p.cross_section_file_name,
                order_field: p.cross_section_order_field_name,
                points: p.points_file_name,
                z_field: p.points_z_field_name,
                outline: p.river_outline_file_name,
                output: p.results_file_name,
            })?;
        }

        Commands::Interpolate {
            sections,
            points,
            output,
            order_field,
            z_field,
            dx,
            anisotropy,
            neighbours,
            power,
            outline,
        } => {
            execute(Job {
                sections,
                order_field,
                points,
                z_field,
                outline,
                output,
                pipeline: Pipeline {
                    grid: GridParams { dx },
                    map: MapParams::default(),
                    idw: IdwParams {
                        anisotropy,
                        neighbour_cap: neighbours,
                        power,
                    },
                },
            })?;
        }

        Commands::Info {
            sections,
            order_field,
            dx,
        } => {
            let (raw, crs) = read_sections(&sections, &order_field)?;
            let series = CrossSectionSeries::new(raw).context("Invalid cross-sections")?;

            println!("File: {}", sections.display());
            println!("Cross-sections: {}", series.len());
            println!("Total length: {:.3}", series.total_length());
            println!("Average width: {:.3}", series.average_width());
            if let Some(crs) = crs {
                println!("CRS: {}", crs);
            }
            if let Some(dx) = dx {
                let (rows, cols) = grid_dimensions(&series, dx).context("Invalid spacing")?;
                println!("Grid at dx = {}: {} rows x {} cols ({} cells)", dx, rows, cols, rows * cols);
            }
        }
    }

    Ok(())
}
