use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use camstamp::{
    DirSink, FileSink, OutputFormat, PhotoSink as _, ResampleFilter, ScaleFactor, Size,
    StampConfig,
};

#[derive(Parser, Debug)]
#[command(name = "camstamp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watermark a single photo.
    Stamp(StampArgs),
    /// Watermark many photos in parallel into one directory.
    Batch(BatchArgs),
    /// Print where the watermark lands in an aspect-fit preview, as JSON.
    PreviewRect(PreviewRectArgs),
    /// Apply the EXIF orientation and write upright pixels.
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
struct StampOpts {
    /// Config JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watermark image.
    #[arg(long)]
    watermark: Option<PathBuf>,

    /// Watermark box side as a fraction of image width, in [0, 1].
    #[arg(long)]
    scale: Option<f64>,

    /// Resample filter for scaling the watermark.
    #[arg(long)]
    filter: Option<ResampleFilter>,
}

#[derive(Parser, Debug)]
struct StampArgs {
    /// Input photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; `.jpg`/`.jpeg` writes JPEG, anything else PNG.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    opts: StampOpts,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input photos.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Appended to each input stem.
    #[arg(long, default_value = "_stamped")]
    suffix: String,

    /// Fail instead of replacing existing outputs.
    #[arg(long)]
    no_overwrite: bool,

    #[command(flatten)]
    opts: StampOpts,
}

#[derive(Parser, Debug)]
struct PreviewRectArgs {
    /// Preview view size, `WxH` in points.
    #[arg(long)]
    container: Dims,

    /// Image display size, `WxH` in points.
    #[arg(long)]
    image: Dims,

    /// Watermark aspect (width / height) when no watermark image is given.
    #[arg(long, default_value_t = 1.0)]
    aspect: f64,

    #[command(flatten)]
    opts: StampOpts,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Jpeg => OutputFormat::Jpeg,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Dims(Size);

impl FromStr for Dims {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
        let w: f64 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
        let h: f64 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
        if !(w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0) {
            return Err(format!("dimensions must be finite and >= 0, got '{s}'"));
        }
        Ok(Self(Size::new(w, h)))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Stamp(args) => cmd_stamp(args),
        Command::Batch(args) => cmd_batch(args),
        Command::PreviewRect(args) => cmd_preview_rect(args),
        Command::Normalize(args) => cmd_normalize(args),
    }
}

fn resolve_config(opts: &StampOpts) -> anyhow::Result<StampConfig> {
    let mut cfg = match &opts.config {
        Some(path) => StampConfig::load(path)?,
        None => StampConfig::default(),
    };
    if let Some(wm) = &opts.watermark {
        cfg.watermark = Some(wm.clone());
    }
    if let Some(scale) = opts.scale {
        cfg.scale = ScaleFactor::new(scale)?;
    }
    if let Some(filter) = opts.filter {
        cfg.resample = filter;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string())
}

fn cmd_stamp(args: StampArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.opts)?;
    let compositor = cfg.build_compositor()?;

    let photo = camstamp::load_photo(&args.in_path)?;
    let stamped = compositor
        .composite(&photo, cfg.scale)
        .with_context(|| format!("stamp '{}'", args.in_path.display()))?;

    FileSink::new(&args.out).commit(&stem_of(&args.in_path), &stamped)?;
    tracing::info!(out = %args.out.display(), "wrote stamped photo");
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.opts)?;
    let compositor = cfg.build_compositor()?;

    let sink = DirSink::new(&args.out_dir, args.format.into())
        .with_suffix(args.suffix)
        .with_overwrite(!args.no_overwrite);
    let stems: Vec<String> = args.inputs.iter().map(|p| stem_of(p)).collect();
    let names = camstamp::unique_names(&stems);

    // Each composite is written and dropped inside its own task.
    let failed = args
        .inputs
        .par_iter()
        .zip(names.par_iter())
        .map(|(path, name)| {
            camstamp::load_photo(path)
                .and_then(|photo| compositor.composite(&photo, cfg.scale))
                .and_then(|stamped| sink.write(name, &stamped))
                .with_context(|| format!("stamp '{}'", path.display()))
        })
        .filter(|res| match res {
            Ok(out) => {
                tracing::debug!(out = %out.display(), "wrote stamped photo");
                false
            }
            Err(err) => {
                tracing::error!("{err:#}");
                true
            }
        })
        .count();

    tracing::info!(
        written = args.inputs.len() - failed,
        failed,
        out_dir = %args.out_dir.display(),
        "batch finished"
    );
    if failed > 0 {
        anyhow::bail!("{failed} of {} photos failed", args.inputs.len());
    }
    Ok(())
}

fn cmd_preview_rect(args: PreviewRectArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.opts)?;
    let rect = match cfg.watermark {
        Some(_) => cfg
            .build_compositor()?
            .preview_rect(args.container.0, args.image.0, cfg.scale),
        None => {
            if !(args.aspect.is_finite() && args.aspect > 0.0) {
                anyhow::bail!("--aspect must be finite and > 0");
            }
            camstamp::preview_rect(
                args.container.0,
                args.image.0,
                cfg.scale,
                &cfg.geometry,
                args.aspect,
            )
        }
    };
    println!("{}", serde_json::to_string(&rect)?);
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let photo = camstamp::load_photo(&args.in_path)?;
    let upright = camstamp::normalize(&photo)?;
    camstamp::save_photo(&upright, &args.out, OutputFormat::from_path(&args.out))?;
    tracing::info!(
        out = %args.out.display(),
        from = ?photo.orientation(),
        "wrote upright photo"
    );
    Ok(())
}
