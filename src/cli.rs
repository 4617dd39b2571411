use crate::config::{Config, Variant, load_config};
use crate::fixtures::{
    delimited_string, generate_sensor_series, generate_signal_series, preview, write_delimited,
    write_deployment_page,
};
use crate::logging::{LoggingConfig, init_logging};
use crate::logo::build_logo;
use crate::random::{RandomSource, make_rng};
use crate::render::{render_svg, write_output};
use crate::tree_dump::write_tree_dump;
use anyhow::{Context, Result};
use chrono::{Duration, Local};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "electromos-gen",
    version,
    about = "Generate the ElectroMos logo and demo datasets"
)]
pub struct Args {
    /// Directory the artifacts are written to
    #[arg(short = 'o', long = "out-dir", default_value = ".", global = true)]
    pub out_dir: PathBuf,

    /// Config file (JSON, or JSON5 by extension)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the random jitter; omit for a fresh draw every run
    #[arg(short = 's', long = "seed", global = true)]
    pub seed: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Animated SVG logo
    Logo(LogoArgs),
    /// Mock IoT sensor readings
    Sensors(SensorArgs),
    /// Composite 50/100/150 Hz signal
    Signal(SignalArgs),
    /// Deployment confirmation page
    Page,
    /// Everything above, with config defaults
    All,
}

#[derive(ClapArgs, Debug, Default)]
pub struct LogoArgs {
    #[arg(long = "variant", value_enum)]
    pub variant: Option<Variant>,

    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    /// Also write the drawing tree as JSON
    #[arg(long = "dump-tree")]
    pub dump_tree: Option<PathBuf>,

    /// Also rasterize the logo to this PNG file
    #[cfg(feature = "png")]
    #[arg(long = "png")]
    pub png: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct SensorArgs {
    #[arg(short = 'n', long = "count")]
    pub count: Option<usize>,

    #[arg(long = "interval-minutes", value_parser = clap::value_parser!(u32).range(1..))]
    pub interval_minutes: Option<u32>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct SignalArgs {
    #[arg(long = "sample-rate")]
    pub sample_rate: Option<u32>,

    #[arg(long = "duration")]
    pub duration: Option<u32>,
}

pub fn run() -> Result<()> {
    let Args {
        out_dir,
        config: config_path,
        seed,
        verbose,
        command,
    } = Args::parse();
    init_logging(LoggingConfig {
        verbosity: verbose,
        ..LoggingConfig::default()
    });

    let mut config = load_config(config_path.as_deref())?;
    let mut rng = make_rng(seed);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    match command {
        Command::Logo(args) => {
            apply_logo_args(&mut config, &args);
            generate_logo(&config, &out_dir, &mut rng, &args)?;
        }
        Command::Sensors(args) => {
            apply_sensor_args(&mut config, &args);
            generate_sensors(&config, &out_dir, &mut rng)?;
        }
        Command::Signal(args) => {
            apply_signal_args(&mut config, &args);
            generate_signal(&config, &out_dir, &mut rng)?;
        }
        Command::Page => {
            generate_page(&config, &out_dir)?;
        }
        Command::All => {
            generate_all(&config, &out_dir, &mut rng)?;
        }
    }

    Ok(())
}

pub fn apply_logo_args(config: &mut Config, args: &LogoArgs) {
    if let Some(v) = args.width {
        config.logo.width = v;
    }
    if let Some(v) = args.height {
        config.logo.height = v;
    }
    if let Some(v) = args.variant {
        config.logo = config.logo.clone().with_variant(v);
    }
}

pub fn apply_sensor_args(config: &mut Config, args: &SensorArgs) {
    if let Some(v) = args.count {
        config.sensors.count = v;
    }
    if let Some(v) = args.interval_minutes {
        config.sensors.interval_minutes = v;
    }
}

pub fn apply_signal_args(config: &mut Config, args: &SignalArgs) {
    if let Some(v) = args.sample_rate {
        config.signal.sample_rate = v;
    }
    if let Some(v) = args.duration {
        config.signal.duration_seconds = v;
    }
}

/// Builds, serializes and writes the logo, plus whichever extra artifacts
/// `args` asks for; returns the SVG path.
pub fn generate_logo(
    config: &Config,
    out_dir: &Path,
    rng: &mut impl RandomSource,
    args: &LogoArgs,
) -> Result<PathBuf> {
    let doc = build_logo(&config.logo, &config.theme, rng)?;
    let svg = render_svg(&doc)?;
    let path = out_dir.join(&config.output.logo_file);
    write_output(&svg, &path)?;
    log::info!("Generated ElectroMos animated logo ({})", path.display());
    if let Some(dump_path) = args.dump_tree.as_deref() {
        write_tree_dump(dump_path, &doc)?;
        log::info!("Wrote drawing tree ({})", dump_path.display());
    }
    #[cfg(feature = "png")]
    {
        if let Some(png) = args.png.as_deref() {
            crate::render::write_output_png(&svg, png, &config.render)?;
            log::info!("Rasterized logo ({})", png.display());
        }
    }
    Ok(path)
}

/// Logs the leading rows of a dataset the way they appear in the file.
fn log_preview<T: serde::Serialize>(records: &[T], rows: usize) -> Result<()> {
    let text = delimited_string(preview(records, rows))?;
    for line in text.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

pub fn generate_sensors(
    config: &Config,
    out_dir: &Path,
    rng: &mut impl RandomSource,
) -> Result<PathBuf> {
    let start = config
        .sensors
        .start
        .unwrap_or_else(|| Local::now().naive_local() - Duration::hours(24));
    let readings = generate_sensor_series(
        config.sensors.count,
        config.sensors.interval_minutes,
        start,
        rng,
    )?;
    let path = out_dir.join(&config.output.sensor_file);
    write_delimited(&readings, &path)?;
    log::info!("Generated sample sensor data ({})", path.display());
    log_preview(&readings, config.output.preview_rows)?;
    Ok(path)
}

pub fn generate_signal(
    config: &Config,
    out_dir: &Path,
    rng: &mut impl RandomSource,
) -> Result<PathBuf> {
    let samples = generate_signal_series(
        config.signal.sample_rate,
        config.signal.duration_seconds,
        rng,
    );
    let path = out_dir.join(&config.output.signal_file);
    write_delimited(&samples, &path)?;
    log::info!("Generated sample signal data ({})", path.display());
    log_preview(&samples, config.output.preview_rows)?;
    Ok(path)
}

pub fn generate_page(config: &Config, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(&config.output.page_file);
    write_deployment_page(&path)?;
    log::info!("Wrote deployment page ({})", path.display());
    Ok(path)
}

pub fn generate_all(
    config: &Config,
    out_dir: &Path,
    rng: &mut impl RandomSource,
) -> Result<Vec<PathBuf>> {
    Ok(vec![
        generate_logo(config, out_dir, rng, &LogoArgs::default())?,
        generate_sensors(config, out_dir, rng)?,
        generate_signal(config, out_dir, rng)?,
        generate_page(config, out_dir)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Icon;

    #[test]
    fn parses_logo_flags() {
        let args = Args::try_parse_from([
            "electromos-gen",
            "logo",
            "--variant",
            "simple",
            "-w",
            "640",
            "--seed",
            "7",
        ])
        .expect("parse");
        assert_eq!(args.seed, Some(7));
        let Command::Logo(logo) = args.command else {
            panic!("expected logo command");
        };
        let mut config = Config::default();
        apply_logo_args(&mut config, &logo);
        assert_eq!(config.logo.width, 640);
        assert_eq!(config.logo.height, 500);
        assert_eq!(config.logo.icons, vec![Icon::CenterChip]);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args =
            Args::try_parse_from(["electromos-gen", "sensors", "-n", "12", "-o", "out", "-vv"])
                .expect("parse");
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.verbose, 2);
        let Command::Sensors(sensors) = args.command else {
            panic!("expected sensors command");
        };
        let mut config = Config::default();
        apply_sensor_args(&mut config, &sensors);
        assert_eq!(config.sensors.count, 12);
        assert_eq!(config.sensors.interval_minutes, 15);
    }

    #[test]
    fn interval_must_be_positive() {
        for bad in ["0", "-5"] {
            let parsed =
                Args::try_parse_from(["electromos-gen", "sensors", "--interval-minutes", bad]);
            assert!(parsed.is_err(), "accepted --interval-minutes {bad}");
        }
        let args = Args::try_parse_from(["electromos-gen", "sensors", "--interval-minutes", "5"])
            .expect("parse");
        let Command::Sensors(sensors) = args.command else {
            panic!("expected sensors command");
        };
        assert_eq!(sensors.interval_minutes, Some(5));
    }

    #[test]
    fn logo_writes_requested_tree_dump() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dump = dir.path().join("tree.json");
        let args = LogoArgs {
            dump_tree: Some(dump.clone()),
            ..LogoArgs::default()
        };
        let path = generate_logo(&Config::default(), dir.path(), &mut make_rng(Some(1)), &args)
            .expect("generate");
        assert!(path.ends_with("electromos_logo.svg"));
        assert!(dump.exists());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["electromos-gen"]).is_err());
    }

    #[test]
    fn generate_all_writes_every_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        config.signal.sample_rate = 100;
        let written =
            generate_all(&config, dir.path(), &mut make_rng(Some(3))).expect("generate");
        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect();
        assert_eq!(
            names,
            vec![
                "electromos_logo.svg",
                "sensor_data.csv",
                "signal_data.csv",
                "deployment.html"
            ]
        );
        let signal = std::fs::read_to_string(dir.path().join("signal_data.csv")).expect("read");
        assert_eq!(signal.lines().count(), 101);
    }
}
