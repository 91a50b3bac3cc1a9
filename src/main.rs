//! capacity CLI
//!
//! Usage:
//!   capacity --request req.json                 # Evaluate one request
//!   capacity < req.json --json                  # Request from stdin, JSON out
//!   capacity --config policy.toml --request r.json
//!   capacity --batch < requests.jsonl           # One JSON result per line
//!   capacity --request req.json --verbose       # Signal and score breakdown

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use capacity_engine::core::{evaluate_lines, CapacityEngine, DecisionTrace};
use capacity_engine::types::{ConfigOverrides, DecisionRequest, DecisionResult};
use capacity_engine::{EngineError, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "capacity",
    version = VERSION,
    about = "Capacity Decision Engine - rank governance capacities for an indicator reading",
    long_about = "Reads a decision request (JSON) and recommends which governance capacity\n\
                  should act, in what order, over what review horizon.\n\n\
                  Capacities:\n  \
                  responsive    - stabilize a reading outside its band\n  \
                  reflexive     - retune the controller\n  \
                  deliberative  - consult stakeholders\n  \
                  anticipatory  - act on early warnings\n  \
                  structural    - redesign for persistent error"
)]
struct Args {
    /// Request file (JSON); stdin when omitted
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Policy file (TOML) used as the base policy
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Batch mode - one JSON request per stdin line, one JSON result per stdout line
    #[arg(short, long)]
    batch: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show signal and score breakdown
    #[arg(short, long)]
    verbose: bool,

    /// Print the audit fingerprint of the result
    #[arg(long)]
    fingerprint: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let engine = match load_engine(&args) {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };

    let outcome = if args.batch {
        run_batch(&engine)
    } else {
        run_single(&engine, &args)
    };

    if let Err(e) = outcome {
        fail(&e);
    }
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn fail(e: &EngineError) -> ! {
    eprintln!("{} {}", "error:".red().bold(), e);
    process::exit(1);
}

fn load_engine(args: &Args) -> Result<CapacityEngine> {
    match &args.config {
        Some(path) => {
            let overrides = ConfigOverrides::load(path)?;
            debug!(path = %path.display(), "loaded policy file");
            Ok(CapacityEngine::with_overrides(&overrides))
        }
        None => Ok(CapacityEngine::default()),
    }
}

/// Evaluate one request from a file or stdin
fn run_single(engine: &CapacityEngine, args: &Args) -> Result<()> {
    let json = match &args.request {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request = DecisionRequest::from_json(&json)?;
    let trace = engine.trace(&request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&trace.result)?);
    } else if args.verbose {
        print_verbose(&trace);
    } else if args.no_color {
        println!("{}", trace.result.to_parseable_string());
    } else {
        print_summary(&trace.result);
    }

    if args.fingerprint {
        println!("fingerprint={}", trace.result.fingerprint()?);
    }
    Ok(())
}

/// JSON-lines in, JSON-lines out; bad lines are reported and skipped
fn run_batch(engine: &CapacityEngine) -> Result<()> {
    let stdin = io::stdin();
    let summary = evaluate_lines(engine, stdin.lock(), &mut io::stdout(), &mut io::stderr())?;
    if summary.rejected > 0 {
        warn!(rejected = summary.rejected, "batch had malformed lines");
    }
    Ok(())
}

/// Colored terminal summary
fn print_summary(result: &DecisionResult) {
    let Some(primary) = result.primary() else {
        println!("{} {}", "primary".bold(), "none".dimmed());
        return;
    };
    print!(
        "{} {}",
        "primary".bold(),
        primary.name().to_uppercase().color(primary.color()).bold()
    );
    if let Some(secondary) = result.secondary() {
        print!(
            " + {}",
            secondary.name().to_uppercase().color(secondary.color())
        );
    }
    println!();

    let order: Vec<String> = result
        .order
        .iter()
        .map(|c| c.name().color(c.color()).to_string())
        .collect();
    println!("  order:        {}", order.join(" → "));
    println!(
        "  review:       {} / {}",
        result.srt.horizon, result.srt.cadence
    );
    match &result.guardrails {
        Some(g) => println!(
            "  guardrails:   {} ({} days)",
            g.caps.join("; "),
            g.timebox_days
        ),
        None => println!("  guardrails:   {}", "none".dimmed()),
    }
    println!(
        "  consent:      {} (gap {:.2})",
        result.consent.transparency, result.consent.leg_gap
    );
    for block in &result.template_actions {
        println!(
            "  {}. {} [{}]",
            block.order,
            block.capacity.name().color(block.capacity.color()),
            block.sprint_level
        );
        for action in &block.actions {
            println!("     - {}", action);
        }
    }
    println!("  {}", result.rationale.dimmed());
}

/// Full breakdown of every stage
fn print_verbose(trace: &DecisionTrace) {
    let s = &trace.signals;
    println!("┌──────────────────────────────────────────────");
    println!("│ Signals (normalized):");
    println!("│   severity:            {:.4}", s.severity);
    println!("│   trend_slope:         {:.4}", s.trend_slope);
    println!("│   inverse_buffer:      {:.4}", s.inverse_buffer);
    println!("│   early_warning:       {:.4}", s.early_warning_prob);
    println!("│   oscillation:         {:.4}", s.oscillation);
    println!("│   guardrail_violation: {:.4}", s.guardrail_violation);
    println!("│   controller_error:    {:.4}", s.relative_controller_error);
    println!("│   dispersion:          {:.4}", s.dispersion);
    println!("│   hub_saturation:      {:.4}", s.hub_saturation);
    println!("│   legitimacy_gap:      {:.4}", s.legitimacy_gap);
    println!("│   lead_time:           {:.4}", s.lead_time_weight);
    println!("│   persistence:         {:.4}", s.persistence_fraction);
    println!("│   integral_error:      {:.4}", s.integral_error);
    println!("│   data_penalty:        {:.4}", s.data_quality_penalty);
    println!("├──────────────────────────────────────────────");
    println!(
        "│ Policy: near_tie_delta={:.2} primary_cutoff={:.2}",
        trace.config.near_tie_delta, trace.config.primary_cutoff
    );
    println!("│ Ranking:");
    for (capacity, score) in &trace.composition.ranked {
        let bar = "█".repeat((score * 20.0).round() as usize);
        println!(
            "│   {:<13} {:.4} {}",
            capacity.name(),
            score,
            bar.color(capacity.color())
        );
    }
    if trace.composition.consent_override {
        match trace.composition.displaced {
            Some(displaced) => println!(
                "│ Consent override: deliberative replaced {}",
                displaced
            ),
            None => println!("│ Consent override: deliberative added"),
        }
    }
    println!("├──────────────────────────────────────────────");
    println!("│ {}", trace.result.to_parseable_string());
    println!("│ {}", trace.result.rationale);
    println!("└──────────────────────────────────────────────");
}
