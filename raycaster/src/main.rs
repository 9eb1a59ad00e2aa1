use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use clap::{App, Arg};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Level, info};

use cub_raycaster::assets::load_textures;
use cub_raycaster::config::RendererConfig;
use cub_raycaster::input::InputScript;
use cub_raycaster::renderer::FrameRenderer;
use cub_raycaster::scene::Scene;
use cub_raycaster::texture::TextureSet;
use cub_raycaster::{DumpMode, GameLoop, PngSink, TimeStep};
use cubfile::SceneDescription;

/// Texture size used by `--checker-textures`.
const CHECKER_SIZE: u32 = 64;

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn parse_count(
    matches: &clap::ArgMatches,
    name: &str,
    flag: &str,
) -> anyhow::Result<Option<usize>> {
    matches
        .value_of(name)
        .map(|v| {
            v.parse::<usize>()
                .with_context(|| format!("invalid value for {flag}: {v:?}"))
        })
        .transpose()
}

fn default_output(map_path: &Path) -> PathBuf {
    map_path.with_extension("png")
}

fn main() -> anyhow::Result<()> {
    let matches = App::new("cub3d")
        .about("Renders a cub3d scene with a grid DDA raycaster and minimap overlay")
        .arg(
            Arg::with_name("MAP")
                .help("The .cub scene file to render")
                .required_unless("GENERATE_CONFIG")
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Output PNG path (defaults to the map path with a .png extension)")
                .short("o")
                .long("output")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("CONFIG")
                .help("Path to a TOML config file")
                .short("c")
                .long("config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("FRAMES")
                .help("Number of frames to run (defaults to the input script length, at least 1)")
                .long("frames")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Held keys per frame, e.g. 'w*30,l*10,-*5' (w/s forward/back, a/d strafe, l/r turn)")
                .long("input")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("DUMP_EVERY")
                .help("Write every K-th frame as a numbered PNG instead of only the last frame")
                .long("dump-every")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("DUMP_FRAME")
                .help("Write only frame N (0-based) instead of the last frame")
                .long("dump-frame")
                .takes_value(true)
                .conflicts_with("DUMP_EVERY"),
        )
        .arg(
            Arg::with_name("CHECKER_TEXTURES")
                .help("Use procedural checkerboard textures instead of loading the scene's texture files")
                .long("checker-textures"),
        )
        .arg(
            Arg::with_name("FIXED_DT")
                .help("Advance movement by exactly 1/fps per frame and skip the frame cap")
                .long("fixed-dt"),
        )
        .arg(
            Arg::with_name("NO_MINIMAP")
                .help("Hide the minimap overlay")
                .long("no-minimap"),
        )
        .arg(
            Arg::with_name("NO_RAYS")
                .help("Hide the field-of-view ray fan on the minimap")
                .long("no-rays"),
        )
        .arg(
            Arg::with_name("GENERATE_CONFIG")
                .help("Print a default config file and exit")
                .long("generate-config"),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .short("v")
                .multiple(true),
        )
        .get_matches();

    if matches.is_present("GENERATE_CONFIG") {
        print!("{}", RendererConfig::generate_default_toml());
        return Ok(());
    }

    init_logging(matches.occurrences_of("VERBOSE"));

    let mut config = match matches.value_of("CONFIG") {
        Some(path) => RendererConfig::load(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => RendererConfig::default(),
    };
    config.apply_cli_overrides(&matches);

    let map_path = PathBuf::from(
        matches
            .value_of("MAP")
            .ok_or_else(|| anyhow!("no scene file given"))?,
    );
    let output = matches
        .value_of("OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(&map_path));

    let input: InputScript = match matches.value_of("INPUT") {
        Some(script) => script.parse()?,
        None => InputScript::default(),
    };
    let frames = parse_count(&matches, "FRAMES", "--frames")?
        .unwrap_or_else(|| input.total_frames())
        .max(1);
    let dump_mode = DumpMode::from_flags(
        parse_count(&matches, "DUMP_FRAME", "--dump-frame")?,
        parse_count(&matches, "DUMP_EVERY", "--dump-every")?,
    );
    if let DumpMode::Frame(n) = dump_mode {
        if n >= frames {
            bail!("--dump-frame {n} is past the last frame; only {frames} frame(s) will run");
        }
    }

    info!("Parsing scene {}...", map_path.display());
    let desc = SceneDescription::load(&map_path)
        .with_context(|| format!("failed to load scene {}", map_path.display()))?;
    info!(
        "Map is {}x{} tiles, spawn at {:?} facing {:?}",
        desc.map.width(),
        desc.map.height(),
        desc.map.spawn(),
        desc.map.facing()
    );

    let textures = if matches.is_present("CHECKER_TEXTURES") {
        info!("Using {CHECKER_SIZE}x{CHECKER_SIZE} checkerboard textures");
        TextureSet::checkerboard(CHECKER_SIZE)
    } else {
        let base_dir = map_path.parent().unwrap_or_else(|| Path::new("."));
        load_textures(&desc, base_dir).context("failed to load wall textures")?
    };

    let mut scene = Scene::new(&desc, textures, config.plane_length);
    let time_step = if matches.is_present("FIXED_DT") {
        TimeStep::Fixed(config.frame_budget().max(Duration::from_millis(1)))
    } else {
        TimeStep::Measured
    };
    let speeds = config.speeds();
    let budget = config.frame_budget();
    let renderer =
        FrameRenderer::new(config.width, config.height, config.into_render_options());
    let mut sink = PngSink::new(output, dump_mode);

    info!("Rendering {frames} frame(s)...");
    let progress = ProgressBar::new(frames as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} frames ({elapsed})") {
        progress.set_style(style);
    }

    let mut game = GameLoop::new(&mut scene, renderer, input, speeds, time_step, budget);
    game.run(frames, &mut sink, |_| progress.inc(1))?;
    progress.finish_and_clear();

    let player = &game.scene().player;
    info!(
        "Finished at ({:.2}, {:.2}) facing ({:.2}, {:.2}); wrote {} file(s)",
        player.pos.x,
        player.pos.y,
        player.dir.x,
        player.dir.y,
        sink.written().len()
    );
    Ok(())
}
