use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use slider::{ConfigError, DragEvent, Phase, ScriptedDrag, Slider, SliderConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid slider config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid step `{0}` (expected open, close, tap, wait:N, drag:DX, cancel:DX)")]
    InvalidStep(String),
    #[error("slider still animating after {0} frames")]
    DidNotSettle(usize),
}

#[derive(Parser, Debug)]
#[command(name = "slider-cli", about = "Headless slide-in panel simulator")]
struct Cli {
    /// Panel width in pixels.
    #[arg(long, conflicts_with_all = ["screen_width", "config"])]
    width: Option<f64>,

    /// Screen width; the panel takes 75% of it.
    #[arg(long, conflicts_with = "config")]
    screen_width: Option<f64>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted sequence of directives and gestures.
    Simulate(SimulateArgs),
    /// Print the resolved config as JSON.
    Config,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Steps: open, close, tap, wait:N (frames), drag:DX (swipe and release),
    /// cancel:DX (swipe then platform cancel).
    #[arg(required = true)]
    steps: Vec<Step>,

    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Give up when still animating after this many trailing frames.
    #[arg(long, default_value_t = 2_000)]
    max_frames: usize,

    /// The simulated owner ignores close requests instead of closing.
    #[arg(long, default_value_t = false)]
    ignore_close: bool,

    /// Emit one JSON line per frame instead of a summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Open,
    Close,
    Tap,
    Wait(usize),
    Drag(f64),
    Cancel(f64),
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidStep(raw.to_owned());
        match raw.split_once(':') {
            None => match raw {
                "open" => Ok(Self::Open),
                "close" => Ok(Self::Close),
                "tap" => Ok(Self::Tap),
                _ => Err(invalid()),
            },
            Some(("wait", n)) => n.parse().map(Self::Wait).map_err(|_| invalid()),
            Some(("drag", dx)) => dx.parse().map(Self::Drag).map_err(|_| invalid()),
            Some(("cancel", dx)) => dx.parse().map(Self::Cancel).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
        }
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    offset: f64,
    #[serde(flatten)]
    phase: Phase,
    open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<&'a str>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::info!(width = config.width, threshold = config.close_threshold(), "config resolved");

    match cli.command {
        Command::Simulate(args) => run_simulate(config, &args),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<SliderConfig, CliError> {
    if let Some(path) = &cli.config {
        let raw = fs::read_to_string(path)?;
        return Ok(SliderConfig::from_json(&raw)?);
    }
    if let Some(width) = cli.width {
        return Ok(SliderConfig::new(width)?);
    }
    if let Some(screen) = cli.screen_width {
        return Ok(SliderConfig::for_screen(screen)?);
    }
    Ok(SliderConfig::from_env()?)
}

struct Simulation<'a> {
    slider: Slider,
    close_requested: Rc<Cell<bool>>,
    args: &'a SimulateArgs,
    frame: usize,
    close_count: usize,
}

impl<'a> Simulation<'a> {
    fn new(config: SliderConfig, args: &'a SimulateArgs) -> Result<Self, CliError> {
        let close_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&close_requested);
        let slider = Slider::new(config)?.with_on_close(move || flag.set(true));
        Ok(Self { slider, close_requested, args, frame: 0, close_count: 0 })
    }

    fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.args.frame_ms)
    }

    fn run_step(&mut self, step: Step, label: &str) -> Result<(), CliError> {
        match step {
            Step::Open => {
                self.slider.set_open(true);
            }
            Step::Close => {
                self.slider.set_open(false);
            }
            Step::Tap => {
                self.slider.on_backdrop_tap();
            }
            Step::Wait(frames) => {
                for _ in 0..frames {
                    self.tick()?;
                }
            }
            Step::Drag(dx) => {
                self.slider.pump(&mut ScriptedDrag::swipe(dx, 8));
            }
            Step::Cancel(dx) => {
                let mut drag = ScriptedDrag::new([DragEvent::Start, DragEvent::Move { dx }, DragEvent::Cancel]);
                self.slider.pump(&mut drag);
            }
        }
        self.answer_close_request();
        self.record(Some(label))
    }

    /// Act as the owner: a close request flips the directive unless ignored.
    fn answer_close_request(&mut self) {
        if !self.close_requested.replace(false) {
            return;
        }
        self.close_count += 1;
        if self.args.ignore_close {
            tracing::info!("owner ignored close request");
        } else {
            self.slider.set_open(false);
        }
    }

    fn tick(&mut self) -> Result<(), CliError> {
        self.frame += 1;
        self.slider.tick(self.frame_duration());
        self.record(None)
    }

    fn settle(&mut self) -> Result<(), CliError> {
        for _ in 0..self.args.max_frames {
            if !self.slider.is_animating() {
                return Ok(());
            }
            self.tick()?;
        }
        Err(CliError::DidNotSettle(self.args.max_frames))
    }

    fn record(&self, step: Option<&str>) -> Result<(), CliError> {
        if !self.args.json {
            return Ok(());
        }
        let record = FrameRecord {
            frame: self.frame,
            offset: self.slider.offset(),
            phase: self.slider.core.phase(),
            open: self.slider.is_open(),
            step,
        };
        println!("{}", serde_json::to_string(&record)?);
        Ok(())
    }
}

fn run_simulate(config: SliderConfig, args: &SimulateArgs) -> Result<(), CliError> {
    let mut sim = Simulation::new(config, args)?;
    sim.record(Some("init"))?;

    for (i, step) in args.steps.iter().enumerate() {
        let label = format!("step {i}: {step:?}");
        tracing::debug!(%label, "running step");
        sim.run_step(*step, &label)?;
    }
    sim.settle()?;

    if !args.json {
        println!("width:          {}", config.width);
        println!("threshold:      {:.1}", config.close_threshold());
        println!("final offset:   {:.1}", sim.slider.offset());
        println!("open:           {}", sim.slider.is_open());
        println!("close requests: {}", sim.close_count);
        println!("frames:         {}", sim.frame);
    }
    Ok(())
}
