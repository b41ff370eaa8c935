mod config;
mod scene;
mod scripts;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cubeworks_assets::{MeshTable, ProceduralLoader};
use cubeworks_input::{InputSource, InputState, Key, ScriptedInput};
use cubeworks_kernel::{FrameClock, FrameMailbox, GameLoop, LoopStats};
use cubeworks_render::{DrawStats, HeadlessRenderer, PlaneSide, Renderer};
use cubeworks_tools::{ObjectInfo, SceneInspector, SceneSummary};
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use config::EngineConfig;

#[derive(Parser)]
#[command(name = "cubeworks-cli", about = "Headless host for the cubeworks demo scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Engine config file (JSON)
    #[arg(short, long, default_value = "cubeworks.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, config, key bindings and mesh table
    Info {
        /// Write the mesh manifest to this path
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Run the demo scene for a number of frames
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Fixed frame delta in seconds; real time when omitted
        #[arg(long)]
        dt: Option<f32>,
        /// Key press as FRAME:KEY, e.g. 10:Space (repeatable)
        #[arg(short, long)]
        press: Vec<String>,
        /// Run the game loop on its own thread
        #[arg(long)]
        threaded: bool,
        /// Print the last frame's draw report
        #[arg(long)]
        report: bool,
        /// Print every object after the run
        #[arg(long)]
        objects: bool,
        /// Emit the final summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Test a point, sphere or cube against the configured frustum
    Cull {
        x: f32,
        y: f32,
        z: f32,
        /// Sphere radius
        #[arg(long, conflicts_with = "half")]
        radius: Option<f32>,
        /// Cube half size
        #[arg(long)]
        half: Option<f32>,
    },
}

#[derive(Serialize)]
struct RunReport {
    summary: SceneSummary,
    game: LoopStats,
    draw: DrawStats,
    frames_drawn: u64,
    objects: Vec<ObjectInfo>,
}

/// Where each frame's delta comes from.
enum Pacing {
    Fixed(f32),
    RealTime { clock: FrameClock, period: Duration },
}

impl Pacing {
    fn new(dt: Option<f32>, config: &EngineConfig) -> anyhow::Result<Self> {
        match dt {
            Some(dt) if !dt.is_finite() || dt < 0.0 => bail!("invalid frame delta {dt}"),
            Some(dt) if dt > config.max_frame_delta => {
                tracing::warn!(dt, cap = config.max_frame_delta, "clamping frame delta");
                Ok(Self::Fixed(config.max_frame_delta))
            }
            Some(dt) => Ok(Self::Fixed(dt)),
            None => Ok(Self::RealTime {
                clock: FrameClock::new(config.max_frame_delta),
                period: Duration::from_secs_f64(1.0 / config.fixed_tick_hz.max(1.0)),
            }),
        }
    }

    fn next(&mut self) -> f32 {
        match self {
            Self::Fixed(dt) => *dt,
            Self::RealTime { clock, period } => {
                thread::sleep(*period);
                clock.tick()
            }
        }
    }
}

fn parse_press(spec: &str) -> anyhow::Result<(u64, Key)> {
    let (frame, key) = spec
        .split_once(':')
        .with_context(|| format!("expected FRAME:KEY, got {spec:?}"))?;
    let frame = frame
        .trim()
        .parse()
        .with_context(|| format!("bad frame in {spec:?}"))?;
    let key = key.trim().parse::<Key>()?;
    Ok((frame, key))
}

fn scripted_input(presses: &[String]) -> anyhow::Result<ScriptedInput> {
    presses.iter().try_fold(ScriptedInput::new(), |input, spec| {
        let (frame, key) = parse_press(spec)?;
        Ok(input.press_at(frame, key))
    })
}

fn load_scene(config: &EngineConfig) -> anyhow::Result<(MeshTable, GameLoop)> {
    let mut meshes = MeshTable::new();
    scene::load_models(&mut meshes, &ProceduralLoader)?;
    let state = scene::build_demo_scene(&meshes)?;
    let game = GameLoop::new(state, InputState::new(config.bindings()?))
        .with_tick_rate(config.fixed_tick_hz)?;
    Ok((meshes, game))
}

fn make_renderer(config: &EngineConfig, meshes: &MeshTable) -> anyhow::Result<HeadlessRenderer> {
    let mut renderer =
        HeadlessRenderer::new(config.window_width, config.window_height, config.render_view())?;
    renderer.set_vsync(config.vsync);
    renderer.set_fxaa(config.fxaa);
    for mesh in meshes.iter() {
        renderer.load_mesh(mesh)?;
    }
    Ok(renderer)
}

/// Game loop and renderer on one thread, one draw per update.
fn run_inline(
    game: &mut GameLoop,
    renderer: &mut HeadlessRenderer,
    input: &mut ScriptedInput,
    pacing: &mut Pacing,
    frames: u64,
) {
    for _ in 0..frames {
        let dt = pacing.next();
        game.update(input.poll(), dt);
        renderer.draw(&game.snapshot());
    }
}

/// Game loop on a worker thread publishing snapshots; the calling thread
/// draws whichever snapshot is newest and drops the rest.
fn run_threaded(
    mut game: GameLoop,
    renderer: &mut HeadlessRenderer,
    mut input: ScriptedInput,
    mut pacing: Pacing,
    frames: u64,
) -> anyhow::Result<GameLoop> {
    let mailbox = FrameMailbox::new();
    let producer = mailbox.clone();
    thread::scope(|s| {
        let worker = s.spawn(move || {
            for _ in 0..frames {
                let dt = pacing.next();
                game.update(input.poll(), dt);
                if producer.publish(game.snapshot()).is_some() {
                    tracing::trace!("renderer fell behind, dropped a snapshot");
                }
            }
            game
        });

        while !worker.is_finished() {
            match mailbox.take_latest() {
                Some(snapshot) => {
                    renderer.draw(&snapshot);
                }
                None => thread::sleep(Duration::from_millis(1)),
            }
        }
        if let Some(snapshot) = mailbox.take_latest() {
            renderer.draw(&snapshot);
        }
        worker
            .join()
            .map_err(|_| anyhow::anyhow!("game loop thread panicked"))
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = EngineConfig::load(&cli.config)?;

    match cli.command {
        Commands::Info { manifest } => {
            println!("cubeworks-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "window: {}x{} vsync={} fxaa={} tick={}Hz",
                config.window_width,
                config.window_height,
                config.vsync,
                config.fxaa,
                config.fixed_tick_hz
            );
            println!("bindings:");
            for (action, key) in config.bindings()?.iter() {
                println!("  {action:<16} {key}");
            }

            let (meshes, game) = load_scene(&config)?;
            println!("meshes:");
            let table = meshes.manifest();
            for entry in &table.meshes {
                println!(
                    "  {:<8} id={} vertices={} indices={} radius={:.3}",
                    entry.name, entry.id, entry.vertex_count, entry.index_count, entry.bounds.radius
                );
            }
            println!("scene: {} objects", game.state().len());
            if let Some(path) = manifest {
                table.save(&path)?;
                println!("manifest written to {}", path.display());
            }
        }
        Commands::Run {
            frames,
            dt,
            press,
            threaded,
            report,
            objects,
            json,
        } => {
            let (meshes, mut game) = load_scene(&config)?;
            let mut renderer = make_renderer(&config, &meshes)?;
            let mut input = scripted_input(&press)?;
            let mut pacing = Pacing::new(dt, &config)?;

            if threaded {
                game = run_threaded(game, &mut renderer, input, pacing, frames)?;
            } else {
                run_inline(&mut game, &mut renderer, &mut input, &mut pacing, frames);
            }

            let scene = game.snapshot();
            let summary = SceneInspector::summary(&scene, renderer.stats(), game.stats());
            let infos: Vec<ObjectInfo> = if objects {
                SceneInspector::list_objects(&scene)
                    .into_iter()
                    .filter_map(|id| SceneInspector::inspect_object(&scene, id))
                    .collect()
            } else {
                Vec::new()
            };

            if json {
                let out = RunReport {
                    summary,
                    game: game.stats(),
                    draw: renderer.stats(),
                    frames_drawn: renderer.frames_drawn(),
                    objects: infos,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{summary}");
                println!("frames drawn: {}", renderer.frames_drawn());
                for info in &infos {
                    println!("{info}");
                }
                if report {
                    print!("{}", renderer.frame_report());
                }
            }
        }
        Commands::Cull {
            x,
            y,
            z,
            radius,
            half,
        } => {
            let aspect = config.window_width.max(1) as f32 / config.window_height.max(1) as f32;
            let frustum = config.render_view().frustum(aspect)?;
            let center = Vec3::new(x, y, z);
            for side in PlaneSide::ALL {
                let distance = frustum.plane(side).distance(center);
                println!("  {:<6} {distance:+.3}", format!("{side:?}"));
            }
            let (shape, visible) = match (radius, half) {
                (Some(r), _) => (format!("sphere r={r}"), frustum.check_sphere(center, r)),
                (None, Some(h)) => (format!("cube half={h}"), frustum.check_cube(center, h)),
                (None, None) => ("point".to_string(), frustum.check_point(center)),
            };
            println!(
                "{shape} at ({x}, {y}, {z}): {}",
                if visible { "visible" } else { "culled" }
            );
        }
    }

    Ok(())
}
