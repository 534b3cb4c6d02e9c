// src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use clap::Parser;

use crate::rollout::{NoopSink, RolloutSink, Runner, RunnerConfig, TableSink};
use duel_engine::Difficulty;

#[derive(Parser, Debug)]
#[command(name = "duel_cli", about = "Headless human-vs-AI duel rollouts")]
struct Args {
    // ---------------- rollout sizing ----------------
    /// Total placements to execute across duels (both seats count).
    #[arg(long, default_value_t = 200)]
    steps: u64,

    /// Base RNG seed (duels use base_seed + duel_id). If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty of the AI seat: easy | medium | hard
    #[arg(long, default_value_t = Difficulty::Medium)]
    ai: Difficulty,

    /// Difficulty of the automated player in the human seat: easy | medium | hard
    #[arg(long, default_value_t = Difficulty::Hard)]
    opponent: Difficulty,

    // ---------------- visualization ----------------
    /**
     * Render both boards as ASCII after every placement; value is sleep in ms.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 30   (sleep 30ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N steps (only used with --verbosity 2).
    #[arg(long, default_value_t = 2000)]
    report_every: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Duel seeds are derived from this base seed.
    let base_seed = args.seed.unwrap_or(12345);

    // Rollout configuration (data only; no logic).
    let cfg = RunnerConfig {
        steps: args.steps,
        base_seed,

        ai: args.ai,
        opponent: args.opponent,

        render_ms: args.render,

        verbosity: args.verbosity,
        report_every: args.report_every,
    };

    let sink: Box<dyn RolloutSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(cfg, sink);
    let report = runner.run();

    println!(
        "DONE: ai={} opponent={} steps_done={} elapsed={:.3}s steps/s={:.1} duels_finished={} ai_wins={} opponent_wins={} avg_duel_len={:.2} max_duel_len={} rejected_moves={} gifts={} hearts={} ai_score={} opponent_score={} ai_lines={} opponent_lines={} avg_max_h={:.2} avg_holes={:.2} (last_duel_len={} last_duel_over={})",
        report.ai,
        report.opponent,
        report.steps_done,
        report.elapsed_s,
        report.steps_per_s,
        report.duels_finished,
        report.ai_wins,
        report.opponent_wins,
        report.avg_duel_len,
        report.max_duel_len,
        report.rejected_moves,
        report.gifts_sent,
        report.hearts_spawned,
        report.ai_score,
        report.opponent_score,
        report.ai_lines,
        report.opponent_lines,
        report.avg_max_h,
        report.avg_holes,
        report.last_duel_len,
        report.last_duel_over,
    );
}
