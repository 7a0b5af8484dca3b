//! staffline - detect and trace the staves of a scanned score page

mod error;

use clap::Parser;
use error::{CliError, CliResult};
use staffline_core::Raster;
use staffline_io::ImageFormat;
use staffline_recog::render::render_traced_lines;
use staffline_recog::{StaffDetectOptions, StaffGeometry, detect_staves};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "staffline", version, about = "Detect, trace and erase the staff lines of a score page")]
struct Cli {
    /// Input image (PNG, PNM or JPEG)
    input: PathBuf,

    /// Halve the image before detection
    #[arg(long)]
    half_scale: bool,

    /// Binarization threshold; overrides the config file
    #[arg(long, value_name = "N")]
    threshold: Option<u8>,

    /// JSON file with detection options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the staff geometry as JSON
    #[arg(long)]
    json: bool,

    /// Write every staff with its traced lines painted gray into DIR
    #[arg(long, value_name = "DIR")]
    print_lines: Option<PathBuf>,

    /// Erase the staff lines and write every cleaned staff into DIR
    #[arg(long, value_name = "DIR")]
    erase: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    let options = load_options(cli)?;

    let mut page = staffline_io::read_image(&cli.input).map_err(|source| CliError::Input {
        path: cli.input.clone(),
        source,
    })?;
    log::info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        page.width(),
        page.height()
    );
    if cli.half_scale {
        page = page.scale_half()?;
        log::info!("scaled to {}x{}", page.width(), page.height());
    }

    let geometry = detect_staves(&page, &options)?;

    if let Some(dir) = &cli.print_lines {
        fs::create_dir_all(dir)?;
        for staff in &geometry.staves {
            let path = dir.join(format!("staff_{:02}_lines.png", staff.id));
            write_png(&render_traced_lines(staff), &path)?;
        }
    }
    if let Some(dir) = &cli.erase {
        fs::create_dir_all(dir)?;
        for staff in &geometry.staves {
            let Some(cleaned) = &staff.cleaned else {
                continue;
            };
            let path = dir.join(format!("staff_{:02}_erased.png", staff.id));
            write_png(cleaned, &path)?;
        }
    }

    let mut out = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &geometry)?;
        writeln!(out)?;
    } else {
        print_summary(&mut out, &page, &geometry)?;
    }
    Ok(())
}

/// Options from the config file, if any, with command line overrides applied.
fn load_options(cli: &Cli) -> CliResult<StaffDetectOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| CliError::Config {
                path: path.clone(),
                message: e.to_string(),
            })?;
            serde_json::from_str(&text).map_err(|e| CliError::Config {
                path: path.clone(),
                message: e.to_string(),
            })?
        }
        None => StaffDetectOptions::default(),
    };
    if let Some(threshold) = cli.threshold {
        options = options.with_threshold(threshold);
    }
    if cli.erase.is_some() {
        options = options.with_erase_lines(true);
    }
    options.validate()?;
    Ok(options)
}

fn write_png(raster: &Raster, path: &Path) -> CliResult<()> {
    staffline_io::write_image(raster, path, ImageFormat::Png).map_err(|source| CliError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn print_summary(out: &mut impl Write, page: &Raster, geometry: &StaffGeometry) -> CliResult<()> {
    writeln!(
        out,
        "page {}x{}: skew {:.3} deg (h_max {})",
        page.width(),
        page.height(),
        geometry.skew_angle,
        geometry.h_max
    )?;
    writeln!(
        out,
        "interline {}, line thickness {} (avg {:.2})",
        geometry.interline, geometry.thickness0, geometry.thickness_avg
    )?;
    writeln!(
        out,
        "{} staves, {} traced",
        geometry.staves.len(),
        geometry.traced_count()
    )?;
    for staff in &geometry.staves {
        let center = staff
            .center_row
            .map_or_else(|| "-".to_string(), |c| (c + staff.origin_row).to_string());
        let bounds = match (staff.left_bound, staff.right_bound) {
            (Some(l), Some(r)) => format!("{}..={}", l, r),
            _ => "undetermined".to_string(),
        };
        let state = if staff.is_traced() { "traced" } else { "not traced" };
        writeln!(
            out,
            "staff {:2}: center row {}, columns {}, {}",
            staff.id, center, bounds, state
        )?;
    }
    Ok(())
}
