use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cardfx::{
    AnimationContext, Canvas, CpuSurface, EffectKind, FestivalCatalog, ManualClock,
    ParticleEngine, ParticleRng, Point, Rgb8, builtin_relationship,
};

#[derive(Parser, Debug)]
#[command(name = "cardfx", version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the animation context derived for a festival and relationship.
    Context(ContextArgs),
    /// Render an effect as a numbered PNG sequence.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct ContextArgs {
    #[arg(long)]
    festival: String,

    /// Relationship identifier (parent, sibling, colleague, ...).
    #[arg(long)]
    relationship: String,

    /// Festival catalog JSON replacing the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[arg(long)]
    festival: String,

    #[arg(long)]
    relationship: String,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Effect override (firework, sparkle, confetti, steam). Defaults to the festival's signature effect.
    #[arg(long)]
    effect: Option<EffectKind>,

    /// Frame count. Defaults to the context duration.
    #[arg(long)]
    frames: Option<u32>,

    /// Number of bursts spread across the animation.
    #[arg(long, default_value_t = 3)]
    bursts: usize,

    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Context(args) => cmd_context(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<FestivalCatalog> {
    let Some(path) = path else {
        return Ok(FestivalCatalog::builtin());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read festival catalog '{}'", path.display()))?;
    FestivalCatalog::from_json(&json)
        .with_context(|| format!("parse festival catalog '{}'", path.display()))
}

fn derive_context(
    catalog: &FestivalCatalog,
    festival: &str,
    relationship: &str,
) -> anyhow::Result<(AnimationContext, EffectKind)> {
    let festival = catalog.get(festival)?;
    let ctx = AnimationContext::derive(festival, &builtin_relationship(relationship));
    Ok((ctx, festival.signature_effect))
}

fn cmd_context(args: ContextArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let (ctx, _) = derive_context(&catalog, &args.festival, &args.relationship)?;
    let json = serde_json::to_string_pretty(&ctx).context("serialize animation context")?;
    println!("{json}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");

    let catalog = load_catalog(args.catalog.as_deref())?;
    let (ctx, signature) = derive_context(&catalog, &args.festival, &args.relationship)?;
    let kind = args.effect.unwrap_or(signature);

    let surface = CpuSurface::new(args.width, args.height)?.with_background(Rgb8::new(18, 20, 28));
    let clock = ManualClock::new();
    let mut engine = ParticleEngine::with_parts(
        surface,
        kind.system_config(&ctx),
        ParticleRng::seeded(args.seed),
        clock.clone(),
    )?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let frame_ms = 1000.0 / f64::from(args.fps);
    let frames = args
        .frames
        .unwrap_or_else(|| (ctx.duration_ms / frame_ms).ceil() as u32);
    let count = engine.scaled_count(ctx.scale_count(kind.base_count())).max(1) as usize;
    let burst = kind.burst(&ctx, count);
    let launches = kind.launch_times(&ctx, args.bursts);
    let mut placement = ParticleRng::seeded(args.seed.wrapping_add(1));
    let canvas = engine.canvas_dimensions();

    if matches!(kind, EffectKind::Sparkle | EffectKind::Steam) {
        let origin = burst_origin(kind, canvas, &mut placement);
        engine.emit_stream_with(origin.x, origin.y, 20.0, ctx.duration_ms, kind.burst(&ctx, 1))?;
    }

    engine.start();
    let mut next_launch = 0;
    for frame in 0..frames {
        let t = f64::from(frame) * frame_ms;
        while next_launch < launches.len() && launches[next_launch] <= t {
            let origin = burst_origin(kind, canvas, &mut placement);
            engine.emit_burst(origin.x, origin.y, &burst)?;
            next_launch += 1;
        }

        clock.advance_ms(frame_ms);
        engine.pump();

        let path = args.out.join(format!("frame_{frame:04}.png"));
        engine.surface().save_png(&path)?;
    }
    engine.dispose();

    eprintln!("wrote {frames} frames to {}", args.out.display());
    Ok(())
}

fn burst_origin(kind: EffectKind, canvas: Canvas, rng: &mut ParticleRng) -> Point {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let x = rng.range(0.2 * w, 0.8 * w);
    let y = match kind {
        EffectKind::Firework => rng.range(0.2 * h, 0.45 * h),
        EffectKind::Sparkle => rng.range(0.3 * h, 0.7 * h),
        EffectKind::Confetti => 0.9 * h,
        EffectKind::Steam => 0.85 * h,
    };
    Point::new(x, y)
}
