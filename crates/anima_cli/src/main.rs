//! `anima`: run an affective-state engine from the terminal.
//!
//! Two modes:
//! - stepped (default): `--ticks` deterministic ticks of `--dt`, printing
//!   snapshots as text or JSON lines
//! - `--realtime SECS`: a live heartbeat for SECS seconds, printing the
//!   published snapshot once per second
//!
//! Logs go to stderr so JSON output on stdout stays machine-readable.

use anima_core::{Context, Engine, EngineConfig, Stimulus};
use anima_limbic::{HeartbeatConfig, LimbicSystem};
use anyhow::Context as _;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML engine config (defaults are used if missing)
    #[arg(short, long, env = "ANIMA_CONFIG")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 10)]
    ticks: u64,

    /// Time step per tick
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Starting age (overrides the config)
    #[arg(long)]
    age: Option<f64>,

    /// Seed for randomized starting traits (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Context signal applied on every tick, as NAME=STRENGTH (repeatable)
    #[arg(short, long = "signal", value_parser = parse_signal)]
    signals: Vec<(String, f32)>,

    /// Stimulus fired before a tick, as TICK:EVENT[:STRENGTH] (repeatable).
    /// In realtime mode TICK is the second at which it fires.
    #[arg(long = "trigger", value_parser = parse_trigger)]
    triggers: Vec<ScheduledTrigger>,

    /// Print every Nth snapshot (the final one is always printed)
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Print snapshots as JSON lines
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Run a live heartbeat for this many seconds instead of stepping
    #[arg(long)]
    realtime: Option<u64>,
}

#[derive(Debug, Clone)]
struct ScheduledTrigger {
    tick: u64,
    stimulus: Stimulus,
}

fn parse_signal(s: &str) -> Result<(String, f32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=STRENGTH, got `{s}`"))?;
    let strength: f32 = value
        .trim()
        .parse()
        .map_err(|e| format!("bad strength `{value}`: {e}"))?;
    if name.trim().is_empty() {
        return Err("signal name is empty".to_string());
    }
    Ok((name.trim().to_string(), strength))
}

fn parse_trigger(s: &str) -> Result<ScheduledTrigger, String> {
    let mut parts = s.splitn(3, ':');
    let tick = parts
        .next()
        .and_then(|t| t.trim().parse::<u64>().ok())
        .ok_or_else(|| format!("expected TICK:EVENT[:STRENGTH], got `{s}`"))?;
    let name = parts
        .next()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| format!("missing event name in `{s}`"))?;
    let mut stimulus = Stimulus::new(name);
    if let Some(strength) = parts.next() {
        let strength: f32 = strength
            .trim()
            .parse()
            .map_err(|e| format!("bad strength `{strength}`: {e}"))?;
        stimulus = stimulus.with_strength(strength);
    }
    Ok(ScheduledTrigger { tick, stimulus })
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(args: &Args) -> EngineConfig {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_or_default(path),
        None => EngineConfig::default(),
    };
    if let Some(age) = args.age {
        config = config.with_initial_age(age);
    }
    if let Some(seed) = args.seed {
        let spread = config
            .randomize
            .as_ref()
            .map(|r| r.spread)
            .unwrap_or_else(|| anima_core::RandomizeConfig::default().spread);
        config.randomize = Some(anima_core::RandomizeConfig { seed, spread });
    }
    config
}

fn print_snapshot(snapshot: &anima_core::AgentSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string(snapshot).context("Failed to serialize snapshot")?
        );
    } else {
        println!("{}", snapshot.describe());
    }
    Ok(())
}

fn run_stepped(args: &Args, config: EngineConfig, context: &Context) -> anyhow::Result<()> {
    let mut engine = Engine::new(config).context("Invalid engine configuration")?;
    let every = args.every.max(1);

    for t in 0..args.ticks {
        for scheduled in args.triggers.iter().filter(|s| s.tick == t) {
            match engine.trigger(scheduled.stimulus.clone()) {
                Some(r) => info!(
                    tick = t,
                    stimulus = %scheduled.stimulus.name,
                    kind = %r.kind,
                    intensity = r.intensity,
                    "Stimulus fired"
                ),
                None => info!(tick = t, stimulus = %scheduled.stimulus.name, "Stimulus had no effect"),
            }
        }
        engine.tick(context, args.dt);

        let done = t + 1;
        if done % every == 0 || done == args.ticks {
            print_snapshot(&engine.snapshot(), args.json)?;
        }
    }

    if args.ticks == 0 {
        print_snapshot(&engine.snapshot(), args.json)?;
    }
    Ok(())
}

async fn run_realtime(
    args: &Args,
    config: EngineConfig,
    context: Context,
    seconds: u64,
) -> anyhow::Result<()> {
    // One engine `dt` per second of wall time
    let heartbeat = HeartbeatConfig {
        interval: Duration::from_millis(100),
        dt: args.dt / 10.0,
    };
    let limbic =
        LimbicSystem::with_config(config, heartbeat).context("Invalid engine configuration")?;
    limbic.set_context(context).await;

    let mut clock = tokio::time::interval(Duration::from_secs(1));
    for second in 0..=seconds {
        clock.tick().await;
        for scheduled in args.triggers.iter().filter(|s| s.tick == second) {
            match limbic.receive_stimulus(scheduled.stimulus.clone()).await? {
                Some(r) => info!(
                    second,
                    stimulus = %scheduled.stimulus.name,
                    kind = %r.kind,
                    intensity = r.intensity,
                    "Stimulus fired"
                ),
                None => info!(second, stimulus = %scheduled.stimulus.name, "Stimulus had no effect"),
            }
        }
        if second > 0 {
            print_snapshot(&limbic.snapshot(), args.json)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    let config = load_config(&args);
    let context: Context = args.signals.iter().cloned().collect();
    info!(
        ticks = args.ticks,
        dt = args.dt,
        age = config.maturity.initial_age,
        signals = args.signals.len(),
        triggers = args.triggers.len(),
        "anima starting"
    );

    match args.realtime {
        Some(seconds) => run_realtime(&args, config, context, seconds).await,
        None => run_stepped(&args, config, &context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal() {
        assert_eq!(parse_signal("heat=0.7"), Ok(("heat".to_string(), 0.7)));
        assert!(parse_signal("heat").is_err());
        assert!(parse_signal("heat=warm").is_err());
        assert!(parse_signal("=0.5").is_err());
    }

    #[test]
    fn test_parse_trigger() {
        let t = parse_trigger("3:praise").unwrap();
        assert_eq!(t.tick, 3);
        assert_eq!(t.stimulus, Stimulus::new("praise"));

        let t = parse_trigger("0:insult:0.5").unwrap();
        assert_eq!(t.stimulus.strength, Some(0.5));

        assert!(parse_trigger("praise").is_err());
        assert!(parse_trigger("1:").is_err());
        assert!(parse_trigger("1:praise:loud").is_err());
    }
}
