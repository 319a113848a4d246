//! CLI for venue seat layouts.
//!
//! Provides:
//! - `generate`: lay out seats for every section that has a row table entry
//! - `validate`: audit an existing seat list against a row table

mod render;
mod venue;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use rayon::prelude::*;

use seatgen_core::{
    deg::Deg,
    generate, parse_log_level, validate, validate_along, GeneratedSeat, Layout, LayoutOptions,
    NotchPolicy, Numbering, RowOrder, RowSpec, Section,
};

use render::{render_svg, Drawn, RenderConfig};
use venue::{load_json, row_specs, rows_for, RowTable, SeatDoc, VenueLayout};

#[derive(Parser)]
#[command(name = "seatgen")]
#[command(about = "Polygon-constrained seat layout generator", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SEATGEN_BUILD_SHA"), ")"))]
struct Cli {
    /// Log level; overrides RUST_LOG
    #[arg(short, long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate seats for sections of a venue layout
    Generate {
        /// Venue layout (JSON: {"sections": [{"name", "polygonPoints", ...}]})
        #[arg(short, long)]
        venue: PathBuf,

        /// Row table (JSON: section name → rows)
        #[arg(short, long)]
        rows: PathBuf,

        /// Only these sections (by name); default: every section with rows
        #[arg(short, long)]
        section: Vec<String>,

        #[command(flatten)]
        options: OptionArgs,

        /// Output file for seats (JSON); default stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write an SVG preview
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write output even if some sections fail their checks
        #[arg(long)]
        accept: bool,
    },

    /// Check a seat list (e.g. exported from the database) against a row table
    Validate {
        /// Seats (JSON array of {section?, row, seatNumber, x?, y?})
        #[arg(short = 'S', long)]
        seats: PathBuf,

        /// Row table (JSON: section name → rows)
        #[arg(short, long)]
        rows: PathBuf,

        /// Only these sections (by name); default: every section in the row table
        #[arg(short, long)]
        section: Vec<String>,

        /// Also check numbering direction along this row axis (degrees)
        #[arg(short, long, allow_negative_numbers = true)]
        axis_deg: Option<f64>,
    },
}

/// Layout options: an optional JSON file, with flags applied on top.
#[derive(Args)]
struct OptionArgs {
    /// LayoutOptions (JSON, camelCase fields)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Fraction of each row left empty at both ends
    #[arg(short, long)]
    margin: Option<f64>,

    /// Fraction of the section depth left empty before the first and after the last row
    #[arg(long)]
    row_margin: Option<f64>,

    /// Put the first row at the far side of the section
    #[arg(long)]
    far_to_near: bool,

    /// Row axis (degrees); default: longest polygon edge
    #[arg(short, long, allow_negative_numbers = true)]
    axis_deg: Option<f64>,

    /// Split rows around concave notches instead of nudging seats
    #[arg(long)]
    split_notches: bool,

    /// Reverse numbering direction on every other row
    #[arg(long)]
    serpentine: bool,
}

impl OptionArgs {
    fn resolve(&self) -> Result<LayoutOptions> {
        let mut options: LayoutOptions = match &self.options {
            Some(path) => load_json(path)?,
            None => LayoutOptions::default(),
        };
        if let Some(margin) = self.margin {
            options.margin_fraction = margin;
        }
        if let Some(row_margin) = self.row_margin {
            options.row_margin_fraction = row_margin;
        }
        if self.far_to_near {
            options.row_order = RowOrder::FarToNear;
        }
        if let Some(deg) = self.axis_deg {
            options.axis = Some(deg.rad());
        }
        if self.split_notches {
            options.notch_policy = NotchPolicy::SplitAroundGaps;
        }
        if self.serpentine {
            options.numbering = Numbering::Serpentine;
        }
        options.check()?;
        Ok(options)
    }
}

struct Job {
    section: Section,
    rows: Vec<RowSpec>,
    color: Option<String>,
}

fn wanted(filter: &[String], name: &str) -> bool {
    filter.is_empty() || filter.iter().any(|f| f == name)
}

fn jobs(venue: &VenueLayout, table: &RowTable, filter: &[String]) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for vs in venue.sections.iter().filter(|s| wanted(filter, &s.name)) {
        let Some(entries) = rows_for(table, &vs.name) else {
            if !filter.is_empty() {
                bail!("no rows for section {:?}", vs.name);
            }
            info!("skipping section {:?}: no rows", vs.name);
            continue;
        };
        let section = vs.to_section()?;
        if section.polygon.is_self_intersecting() {
            warn!("section {:?}: polygon is self-intersecting; seats may land oddly", section.name);
        }
        if let Some(capacity) = vs.capacity {
            let total: u32 = entries.iter().map(|e| e.seat_count).sum();
            if total != capacity {
                warn!("section {:?}: rows hold {} seats, capacity says {}", section.name, total, capacity);
            }
        }
        jobs.push(Job { section, rows: row_specs(entries), color: vs.color.clone() });
    }
    for name in filter {
        if !venue.sections.iter().any(|s| &s.name == name) {
            bail!("section {:?} not found in venue", name);
        }
    }
    Ok(jobs)
}

/// Nudged seats are reported but acceptable; failed self-checks and seats left outside are not.
fn acceptable(layout: &Layout) -> bool {
    layout.diagnostics.self_check_ok && layout.diagnostics.outside_count() == 0
}

/// Per-section results of one `generate` run; a failing section never stops its siblings.
struct Batch<'a> {
    layouts: Vec<(&'a Job, Layout)>,
    /// Sections that hit a hard error.
    errored: Vec<String>,
    /// Sections that generated but failed their checks.
    unchecked: Vec<String>,
}

impl Batch<'_> {
    /// Whether output may be written: always when everything passed, only with `accept` otherwise.
    fn gate(&self, accept: bool) -> Result<()> {
        if self.layouts.is_empty() {
            bail!("generation failed for every section: {:?}", self.errored);
        }
        if self.errored.is_empty() && self.unchecked.is_empty() {
            return Ok(());
        }
        if !accept {
            bail!(
                "generation failed for {:?}, checks failed for {:?}; rerun with --accept to write the remaining sections",
                self.errored,
                self.unchecked
            );
        }
        warn!(
            "writing {} section(s); skipped {:?} (errors), kept despite failed checks {:?}",
            self.layouts.len(),
            self.errored,
            self.unchecked
        );
        Ok(())
    }
}

fn generate_all<'a>(jobs: &'a [Job], options: &LayoutOptions) -> Batch<'a> {
    let results: Vec<_> = jobs
        .par_iter()
        .map(|job| generate(&job.section, &job.rows, options))
        .collect();

    let mut batch = Batch { layouts: Vec::with_capacity(jobs.len()), errored: vec![], unchecked: vec![] };
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(layout) => {
                println!("{} ({}): {} seats", job.section.name, job.section.id, layout.seats.len());
                println!("{}", layout.diagnostics);
                if !layout.diagnostics.self_check_ok {
                    println!("{}", validate(&layout.seats, &job.rows));
                }
                if !acceptable(&layout) {
                    batch.unchecked.push(job.section.name.clone());
                }
                batch.layouts.push((job, layout));
            }
            Err(e) => {
                eprintln!("{}: {}", job.section.name, e);
                batch.errored.push(job.section.name.clone());
            }
        }
    }
    batch
}

fn run_generate(
    venue: PathBuf,
    rows: PathBuf,
    filter: Vec<String>,
    options: OptionArgs,
    output: Option<PathBuf>,
    svg: Option<PathBuf>,
    accept: bool,
) -> Result<()> {
    let venue: VenueLayout = load_json(&venue)?;
    let table: RowTable = load_json(&rows)?;
    let options = options.resolve()?;
    let jobs = jobs(&venue, &table, &filter)?;
    if jobs.is_empty() {
        bail!("no sections to generate");
    }

    let batch = generate_all(&jobs, &options);
    batch.gate(accept)?;
    let layouts = batch.layouts;

    let seats: Vec<&GeneratedSeat> = layouts.iter().flat_map(|(_, l)| &l.seats).collect();
    let json = serde_json::to_string_pretty(&seats)?;
    match &output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} seats to {}", seats.len(), path.display());
        }
        None => println!("{}", json),
    }

    if let Some(path) = svg {
        let drawn: Vec<Drawn> = layouts
            .iter()
            .map(|(job, layout)| Drawn {
                section: &job.section,
                seats: &layout.seats,
                color: job.color.as_deref(),
            })
            .collect();
        fs::write(&path, render_svg(&drawn, &RenderConfig::default()))
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote preview to {}", path.display());
    }
    Ok(())
}

fn run_validate(seats: PathBuf, rows: PathBuf, filter: Vec<String>, axis_deg: Option<f64>) -> Result<()> {
    let seats: Vec<SeatDoc> = load_json(&seats)?;
    let table: RowTable = load_json(&rows)?;
    let names: Vec<&String> = table.keys().filter(|name| wanted(&filter, name)).collect();
    if names.is_empty() {
        bail!("no sections to validate");
    }
    let only = names.len() == 1;

    let mut failed = Vec::new();
    for name in names {
        let specs = row_specs(&table[name]);
        let section_seats: Vec<SeatDoc> = seats.iter().filter(|s| s.in_section(name, only)).cloned().collect();
        let report = match axis_deg {
            Some(deg) => validate_along(&section_seats, &specs, deg.rad()),
            None => validate(&section_seats, &specs),
        };
        println!("{} ({} seats)", name, section_seats.len());
        println!("{}\n", report);
        if !report.overall_ok {
            failed.push(name.clone());
        }
    }

    if !failed.is_empty() {
        bail!("validation failed for {:?}", failed);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = cli.log_level.as_deref() {
        logger.filter_level(parse_log_level(Some(level)));
    }
    logger.init();

    match cli.command {
        Commands::Generate { venue, rows, section, options, output, svg, accept } => {
            run_generate(venue, rows, section, options, output, svg, accept)
        }
        Commands::Validate { seats, rows, section, axis_deg } => run_validate(seats, rows, section, axis_deg),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use seatgen_core::RowSpacing;

    use super::*;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_option_overrides() {
        let cli = Cli::parse_from([
            "seatgen", "generate", "-v", "venue.json", "-r", "rows.json",
            "--margin", "0.1", "--far-to-near", "--axis-deg", "-90", "--serpentine",
        ]);
        let Commands::Generate { options, .. } = cli.command else {
            panic!("expected generate");
        };
        let resolved = options.resolve().unwrap();
        assert_eq!(resolved.margin_fraction, 0.1);
        assert_eq!(resolved.row_order, RowOrder::FarToNear);
        assert_eq!(resolved.numbering, Numbering::Serpentine);
        assert_eq!(resolved.notch_policy, NotchPolicy::OuterSpan);
        assert!((resolved.axis.unwrap() + std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let cli = Cli::parse_from(["seatgen", "generate", "-v", "v", "-r", "r", "--margin", "0.6"]);
        let Commands::Generate { options, .. } = cli.command else {
            panic!("expected generate");
        };
        assert!(options.resolve().is_err());
    }

    #[test]
    fn test_infeasible_section_spares_siblings() {
        let venue: VenueLayout = serde_json::from_str(
            r#"{"sections":[
                {"name":"Platea","polygonPoints":[{"x":0,"y":0},{"x":100,"y":0},{"x":100,"y":50},{"x":0,"y":50}]},
                {"name":"Palco","polygonPoints":[{"x":0,"y":100},{"x":100,"y":100},{"x":100,"y":120},{"x":0,"y":120}]}
            ]}"#,
        )
        .unwrap();
        let table: RowTable = serde_json::from_str(
            r#"{"Platea":[{"seatCount":5,"direction":"leftToRight"}],"Palco":[{"seatCount":5,"direction":"leftToRight"}]}"#,
        )
        .unwrap();
        let jobs = jobs(&venue, &table, &[]).unwrap();
        // 30 units in: inside Platea (50 deep), past the back of Palco (20 deep)
        let options = LayoutOptions { row_spacing: RowSpacing::Offsets(vec![30.]), ..LayoutOptions::default() };

        let batch = generate_all(&jobs, &options);
        assert_eq!(batch.layouts.len(), 1);
        assert_eq!(batch.layouts[0].0.section.name, "Platea");
        assert_eq!(batch.layouts[0].1.seats.len(), 5);
        assert_eq!(batch.errored, vec!["Palco".to_string()]);
        assert!(batch.unchecked.is_empty());

        assert!(batch.gate(false).is_err());
        assert!(batch.gate(true).is_ok());
    }

    #[test]
    fn test_gate_all_failed() {
        let batch = Batch { layouts: vec![], errored: vec!["Palco".into()], unchecked: vec![] };
        assert!(batch.gate(true).is_err());
    }

    #[test]
    fn test_jobs() {
        let venue: VenueLayout = serde_json::from_str(
            r#"{"sections":[
                {"name":"Platea1","polygonPoints":[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10},{"x":0,"y":10}],"capacity":4},
                {"name":"Palco","polygonPoints":[{"x":20,"y":0},{"x":30,"y":0},{"x":30,"y":10}]}
            ]}"#,
        )
        .unwrap();
        let table: RowTable = serde_json::from_str(r#"{"Platea1":[{"seatCount":4,"direction":"leftToRight"}]}"#).unwrap();

        let all = jobs(&venue, &table, &[]).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].section.id, "platea1");
        assert_eq!(all[0].rows[0].label, "A");

        assert!(jobs(&venue, &table, &["Palco".to_string()]).is_err());
        assert!(jobs(&venue, &table, &["Anfiteatro".to_string()]).is_err());

        let layout = generate(&all[0].section, &all[0].rows, &LayoutOptions::default()).unwrap();
        assert!(acceptable(&layout));
    }
}
