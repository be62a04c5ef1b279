use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kodano_motion::{
    AnimationLoop, CapabilityProvider, CapabilitySignals, DeviceProfile, HeadlessRun, HostEvent,
    ManualScheduler, ObserverSupport, Orchestrator, PhaseClock, ScrollSignal, TimelineConfig,
    VisibilityGate, contact, payment_flow_targets, render_static_poster,
};

#[derive(Parser, Debug)]
#[command(name = "kodano-motion", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the phase and progress at an elapsed time.
    Sample(SampleArgs),
    /// Run the frame loop headlessly and print one JSON line per rendered frame.
    Simulate(SimulateArgs),
    /// Print the default payment-flow timeline as JSON.
    Preset,
    /// Write the static-tier poster as a PNG.
    Poster(PosterArgs),
    /// Validate a contact submission and print the email that would be sent.
    Contact(ContactArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Timeline JSON (defaults to the payment-flow preset).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Elapsed seconds.
    #[arg(long)]
    t: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Timeline JSON (defaults to the payment-flow preset).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device profile JSON; overrides the capability flags below.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Host frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Host seconds to simulate.
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Normalized scroll depth (clamped by the orchestrator).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    scroll: f64,

    #[arg(long)]
    reduced_motion: bool,

    #[arg(long)]
    mobile: bool,

    #[arg(long)]
    low_end: bool,

    /// Scroll the element out of view at this host time.
    #[arg(long)]
    hide_at: Option<f64>,

    /// Scroll it back into view at this host time.
    #[arg(long)]
    show_at: Option<f64>,

    /// Seed for particle route selection.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct PosterArgs {
    /// Timeline JSON (defaults to the payment-flow preset).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 630)]
    height: u32,
}

#[derive(Parser, Debug)]
struct ContactArgs {
    /// Submission JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Preset => cmd_preset(),
        Command::Poster(args) => cmd_poster(args),
        Command::Contact(args) => cmd_contact(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<TimelineConfig> {
    match path {
        Some(p) => TimelineConfig::from_path(p)
            .with_context(|| format!("load timeline '{}'", p.display())),
        None => Ok(TimelineConfig::payment_flow()),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let clock = PhaseClock::new(&config)?;
    let pos = clock.position_at(args.t);
    let out = serde_json::json!({
        "t": args.t,
        "phase": pos.phase,
        "name": config.phase_name(pos.phase),
        "progress": pos.progress,
        "loop_iteration": clock.loop_iteration(args.t),
    });
    println!("{out}");
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let capability = match &args.profile {
        Some(p) => {
            let s = std::fs::read_to_string(p)
                .with_context(|| format!("read device profile '{}'", p.display()))?;
            let profile: DeviceProfile =
                serde_json::from_str(&s).with_context(|| "parse device profile JSON")?;
            CapabilityProvider::probe(&profile)
        }
        None => CapabilityProvider::from_signals(CapabilitySignals {
            reduced_motion: args.reduced_motion,
            mobile: args.mobile,
            low_end: args.low_end,
        }),
    };
    tracing::info!(tier = ?capability.tier(), "capability tier");

    let scroll = ScrollSignal::new(args.scroll);
    let mut gate = VisibilityGate::new(ObserverSupport::all());
    gate.set_viewport_visible(true);
    let orchestrator = Orchestrator::new(&config, capability, scroll.reader())?
        .with_gate(gate)
        .with_targets(payment_flow_targets(args.seed));
    let mut anim = AnimationLoop::new(orchestrator, ManualScheduler::new());

    let mut run = HeadlessRun::new(args.fps, args.seconds);
    if let Some(at_secs) = args.hide_at {
        run = run.with_event(HostEvent::Viewport {
            at_secs,
            visible: false,
        });
    }
    if let Some(at_secs) = args.show_at {
        run = run.with_event(HostEvent::Viewport {
            at_secs,
            visible: true,
        });
    }
    let report = run.drive(&mut anim, &scroll)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for frame in &report.frames {
        serde_json::to_writer(&mut out, frame).with_context(|| "write frame JSON")?;
        writeln!(out)?;
    }
    out.flush()?;

    tracing::info!(
        frames = report.frames.len(),
        idle = report.idle_vsyncs,
        throttled = report.throttled,
        "simulation finished"
    );
    Ok(())
}

fn cmd_preset() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&TimelineConfig::payment_flow())?;
    println!("{json}");
    Ok(())
}

fn cmd_poster(args: PosterArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let img = render_static_poster(&config, args.width, args.height)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &img.data,
        img.width,
        img.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_contact(args: ContactArgs) -> anyhow::Result<()> {
    let s = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read submission '{}'", args.in_path.display()))?;
    let sub = contact::submission::ContactSubmission::parse_json(&s)?;

    let relay = contact::relay::ContactRelay::new(contact::relay::RelayConfig::default())?;
    let email = relay.compose(&sub, &relay.config().primary_from);
    println!("{}", serde_json::to_string_pretty(&email)?);
    Ok(())
}
