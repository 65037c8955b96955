use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rasterfx::{
    DisplayMode, Effect, KernelPreset, LayerSpec, Offset, Pipeline, PipelineConfig,
    PipelineEvent, PipelineState, Reducer,
};

/// Pixels a layer moves per key press.
const LAYER_STEP: i32 = 8;

#[derive(Parser, Debug)]
#[command(name = "rasterfx", version)]
struct Cli {
    /// Log pipeline stages to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render frames and write the last displayed buffer as a PNG.
    Frame(FrameArgs),
    /// Print the convolution presets as JSON.
    Presets,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Raw RGB source (size*size triplets). Overrides the config's source.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Pipeline config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Extra raw RGBA layer, optionally placed with `path@x,y`.
    #[arg(long = "layer")]
    layers: Vec<String>,

    /// Raster edge length. Overrides the config.
    #[arg(long)]
    size: Option<usize>,

    /// Layer edge length. Overrides the config.
    #[arg(long)]
    layer_size: Option<usize>,

    #[arg(long)]
    mode: Option<DisplayMode>,

    #[arg(long)]
    effect: Option<Effect>,

    #[arg(long)]
    reducer: Option<Reducer>,

    /// Key presses replayed before the first frame (m, q..i, 1..6, a/d/s/x).
    #[arg(long, default_value = "")]
    keys: String,

    /// Number of frames to render.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Process rows on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for the random dither.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Presets => cmd_presets(),
    }
}

fn build_config(args: &FrameArgs) -> anyhow::Result<PipelineConfig> {
    let mut cfg = match &args.config {
        Some(path) => PipelineConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(path) = &args.in_path {
        cfg.source = Some(path.clone());
    }
    if let Some(size) = args.size {
        cfg.size = size;
    }
    if let Some(size) = args.layer_size {
        cfg.layer_size = size;
    }
    for spec in &args.layers {
        cfg.layers.push(parse_layer_spec(spec)?);
    }
    if let Some(mode) = args.mode {
        cfg.mode = mode;
    }
    if let Some(effect) = args.effect {
        cfg.effect = effect;
    }
    if let Some(reducer) = args.reducer {
        cfg.reducer = reducer;
    }
    if args.parallel {
        cfg.threading.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threading.threads = args.threads;
    }
    if args.seed.is_some() {
        cfg.reduce.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn parse_layer_spec(spec: &str) -> anyhow::Result<LayerSpec> {
    let Some((path, at)) = spec.rsplit_once('@') else {
        return Ok(LayerSpec {
            path: PathBuf::from(spec),
            offset: Offset::default(),
        });
    };
    let (x, y) = at
        .split_once(',')
        .with_context(|| format!("layer offset '{at}' must be 'x,y'"))?;
    let offset = Offset::new(
        x.trim().parse().with_context(|| format!("layer x '{x}'"))?,
        y.trim().parse().with_context(|| format!("layer y '{y}'"))?,
    );
    Ok(LayerSpec {
        path: PathBuf::from(path),
        offset,
    })
}

/// Map one key of the interactive layout to a pipeline event.
fn key_event(key: char) -> Option<PipelineEvent> {
    let event = match key {
        'm' => PipelineEvent::NextMode,
        'q' => PipelineEvent::SelectEffect(Effect::Blur),
        'w' => PipelineEvent::SelectEffect(Effect::Blur5),
        'e' => PipelineEvent::SelectEffect(Effect::Sharpen),
        'r' => PipelineEvent::SelectEffect(Effect::Edge1),
        't' => PipelineEvent::SelectEffect(Effect::Edge2),
        'z' => PipelineEvent::SelectEffect(Effect::Emboss),
        'u' => PipelineEvent::SelectEffect(Effect::Grayscale),
        'i' => PipelineEvent::SelectEffect(Effect::Identity),
        '1' => PipelineEvent::SelectReducer(Reducer::Threshold),
        '2' => PipelineEvent::SelectReducer(Reducer::ThresholdUnweighted),
        '3' => PipelineEvent::SelectReducer(Reducer::Truncate),
        '4' => PipelineEvent::SelectReducer(Reducer::Random),
        '5' => PipelineEvent::SelectReducer(Reducer::Ordered),
        '6' => PipelineEvent::SelectReducer(Reducer::ErrorDiffusion),
        'a' => PipelineEvent::MoveAllLayers {
            dx: -LAYER_STEP,
            dy: 0,
        },
        'd' => PipelineEvent::MoveAllLayers {
            dx: LAYER_STEP,
            dy: 0,
        },
        's' => PipelineEvent::MoveAllLayers {
            dx: 0,
            dy: -LAYER_STEP,
        },
        'x' => PipelineEvent::MoveAllLayers {
            dx: 0,
            dy: LAYER_STEP,
        },
        _ => return None,
    };
    Some(event)
}

fn replay_keys(state: &mut PipelineState, keys: &str) {
    for key in keys.chars().filter(|c| !c.is_whitespace()) {
        match key_event(key) {
            Some(event) => state.apply(event),
            None => tracing::warn!(%key, "unbound key ignored"),
        }
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = build_config(&args)?;
    let mut pipeline = Pipeline::load(cfg).context("load pipeline resources")?;
    let mut state = pipeline.initial_state();
    replay_keys(&mut state, &args.keys);

    let size = pipeline.size();
    let mut rgb = Vec::new();
    for _ in 0..args.frames.max(1) {
        rgb = pipeline.render(&mut state).to_rgb_bytes();
    }

    write_png(&args.out, &rgb, size)?;
    eprintln!(
        "wrote {} (mode={}, effect={}, reducer={})",
        args.out.display(),
        state.mode.name(),
        state.effect.name(),
        state.reducer.name()
    );
    Ok(())
}

fn write_png(out: &Path, rgb: &[u8], size: usize) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let side = u32::try_from(size).context("raster size exceeds u32")?;
    image::save_buffer_with_format(
        out,
        rgb,
        side,
        side,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    let presets = KernelPreset::ALL
        .iter()
        .map(|p| (*p, p.kernel()))
        .collect::<Vec<_>>();
    let json = serde_json::to_string_pretty(&presets).context("serialize presets")?;
    println!("{json}");
    Ok(())
}
