use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    time::Duration,
};
use vmouse_client::{
    actuator::{DryRunActuator, HttpActuator},
    feedback::LogFeedbackSink,
    provider::JsonLinesProvider,
    runner::{RunOptions, Runner},
};
use vmouse_core::{BoundaryPolicy, GestureController, MouseConfig, PointerActuator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hand-gesture virtual mouse", long_about = None)]
struct Args {
    /// Landmark stream, one JSON packet per line ('-' reads stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Pointer server URL (e.g., http://192.168.1.100). Dry run when omitted
    #[arg(short, long)]
    server: Option<String>,

    #[arg(long, default_value_t = 1920.0)]
    screen_width: f32,

    #[arg(long, default_value_t = 1080.0)]
    screen_height: f32,

    #[arg(long, default_value_t = 640)]
    camera_width: u32,

    #[arg(long, default_value_t = 480)]
    camera_height: u32,

    /// Camera margin excluded from the active region, in pixels
    #[arg(long, default_value_t = 100.0)]
    margin: f32,

    /// Higher values move the pointer more smoothly but with more lag
    #[arg(long, default_value_t = 7.0)]
    smoothing: f32,

    /// Index-to-middle fingertip distance that triggers a click, in pixels
    #[arg(long, default_value_t = 40.0)]
    click_threshold: f32,

    /// Pin targets outside the active region to the screen edge
    #[arg(long)]
    clamp: bool,

    /// Jump straight to the fingertip when the hand reappears
    #[arg(long)]
    reset_on_reacquire: bool,

    /// Which detected hand to follow
    #[arg(long, default_value_t = 0)]
    hand: usize,

    /// Read landmarks on a separate thread, dropping frames while busy
    #[arg(short, long)]
    threaded: bool,

    /// Per-frame processing budget in milliseconds
    #[arg(long, default_value_t = 50)]
    frame_budget_ms: u64,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn mouse_config(&self) -> MouseConfig {
        MouseConfig {
            camera_width: self.camera_width as f32,
            camera_height: self.camera_height as f32,
            active_region_margin: self.margin,
            smoothing_factor: self.smoothing,
            click_distance_threshold: self.click_threshold,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            boundary_policy: if self.clamp {
                BoundaryPolicy::Clamp
            } else {
                BoundaryPolicy::Extrapolate
            },
            reset_on_reacquire: self.reset_on_reacquire,
        }
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            frame_budget: Duration::from_millis(self.frame_budget_ms),
            max_frames: self.max_frames,
        }
    }
}

fn open_input(input: &str) -> Result<Box<dyn BufRead + Send>> {
    if input == "-" {
        log::info!("Reading landmarks from stdin");
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(input).with_context(|| format!("Failed to open {}", input))?;
    log::info!("Reading landmarks from {}", input);
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Virtual mouse starting...");

    let config = args.mouse_config();
    let controller = GestureController::new(config).context("Invalid configuration")?;
    log::info!(
        "Camera {}x{} (margin {}), screen {}x{}, smoothing {}",
        config.camera_width,
        config.camera_height,
        config.active_region_margin,
        config.screen_width,
        config.screen_height,
        config.smoothing_factor
    );

    let actuator: Box<dyn PointerActuator + Send> = match &args.server {
        Some(server) => {
            log::info!("Sending pointer commands to {}", server);
            Box::new(HttpActuator::new(server).context("Failed to create HTTP client")?)
        }
        None => {
            log::info!("No server given, running dry");
            Box::new(DryRunActuator::new(config.screen_width, config.screen_height))
        }
    };

    let provider = JsonLinesProvider::new(
        open_input(&args.input)?,
        (args.camera_width, args.camera_height),
    )
    .with_hand(args.hand);

    let mut runner = Runner::new(controller, actuator, LogFeedbackSink::new(), args.run_options());
    let result = if args.threaded {
        runner.run_threaded(provider)
    } else {
        let mut provider = provider;
        runner.run(&mut provider)
    };
    let summary = result.context("Landmark stream error")?;

    log::info!(
        "Processed {} frames ({} with a hand): {} moves, {} clicks, {} actuator failures, {} dropped, {} stale, {} slow",
        summary.frames,
        summary.hands,
        summary.moves,
        summary.clicks,
        summary.actuator_failures,
        summary.dropped,
        summary.stale,
        summary.slow
    );

    Ok(())
}
