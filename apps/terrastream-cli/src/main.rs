use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use terrastream_common::DrawMode;
use terrastream_input::{Control, FlightScript};
use terrastream_kernel::{Session, SessionConfig};
use terrastream_render::HeadlessBackend;
use terrastream_stream::RefreshOutcome;
use terrastream_terrain::{ChunkCoord, ChunkStore, HeightField};
use terrastream_tools::{ChunkReport, Telemetry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terrastream", about = "Headless procedural terrain streamer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Session configuration (YAML)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Triangles,
    Lines,
    Points,
}

impl From<ModeArg> for DrawMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Triangles => DrawMode::Triangles,
            ModeArg::Lines => DrawMode::Lines,
            ModeArg::Points => DrawMode::Points,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Fly a scripted session against a headless backend
    Fly {
        /// Height field seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u32>,
        /// Frames to run; defaults to the script length
        #[arg(short, long)]
        frames: Option<u64>,
        /// Held controls per segment, e.g. "40:accelerate,90:pitch-up+yaw-left"
        #[arg(long, default_value = "60:accelerate,240:idle")]
        script: String,
        /// View distance slider, 0-100
        #[arg(long)]
        view_distance: Option<f32>,
        /// Fudge factor slider, 0-100
        #[arg(long)]
        fudge: Option<f32>,
        /// Fog density
        #[arg(long)]
        fog: Option<f32>,
        #[arg(long, value_enum)]
        draw_mode: Option<ModeArg>,
        /// Print telemetry every N frames
        #[arg(long, default_value = "30")]
        every: u64,
    },
    /// Bake a single chunk and summarize it
    Chunk {
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        x: i32,
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        z: i32,
        #[arg(short, long)]
        seed: Option<u32>,
    },
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    SessionConfig::from_yaml_str(&src).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("terrastream v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", terrastream_common::crate_info());
            println!("terrain: {}", terrastream_terrain::crate_info());
            println!("stream: {}", terrastream_stream::crate_info());
            println!("render: {}", terrastream_render::crate_info());
            println!("tools: {}", terrastream_tools::crate_info());
            println!("controls:");
            for control in Control::ALL {
                println!("  {:<6} {}", control.default_key(), control.name());
            }
        }
        Commands::Fly {
            seed,
            frames,
            script,
            view_distance,
            fudge,
            fog,
            draw_mode,
            every,
        } => {
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            if let Some(p) = view_distance {
                config.view.set_view_distance_percent(p);
            }
            if let Some(p) = fudge {
                config.view.set_fudge_percent(p);
            }
            if let Some(density) = fog {
                config.view.fog_density = density;
            }
            if let Some(mode) = draw_mode {
                config.view.draw_mode = mode.into();
            }

            let mut input = FlightScript::parse(&script)?;
            let frames = frames.unwrap_or_else(|| input.total_frames());
            let mut session = Session::new(config)?;
            let mut backend = HeadlessBackend::new();

            println!(
                "Flying: seed={}, frames={frames}, mode={}",
                session.seed(),
                session.settings().draw_mode.label()
            );
            for _ in 0..frames {
                let report = session.frame(&mut input, &mut backend);
                if let RefreshOutcome::Rebuilt { center, generated } = &report.terrain {
                    println!(
                        "frame {:>5}: entered chunk {center}, generated {}",
                        report.frame,
                        generated.len()
                    );
                }
                if every > 0 && report.frame % every == 0 {
                    println!("{}", Telemetry::capture(&session));
                }
            }

            tracing::info!(frames, finished = input.is_finished(), "flight complete");

            let stats = session.streamer().stats();
            let timer = session.timer();
            println!("{}", Telemetry::capture(&session));
            println!(
                "Stream: refreshes={}, cached={}, active=({} vertices, {} triangles)",
                stats.refreshes, stats.cached_chunks, stats.active_vertices, stats.active_triangles
            );
            println!(
                "Frame time: avg={:?} min={:?} max={:?} over {} frames",
                timer.average(),
                timer.min(),
                timer.max(),
                timer.count()
            );
            println!("Backend: {}", backend.describe());
        }
        Commands::Chunk { x, z, seed } => {
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            let seed = config.resolve_seed();
            let field = HeightField::with_shape(seed, config.noise)?;
            let mut store = ChunkStore::with_parts(config.terrain, field, Default::default())?;
            let bands = *store.bands();
            let water = store.config().water_level;
            let chunk = store.ensure(ChunkCoord::new(x, z));
            println!("Seed: {seed}");
            println!("{}", ChunkReport::of(chunk, &bands, water));
        }
    }

    Ok(())
}
