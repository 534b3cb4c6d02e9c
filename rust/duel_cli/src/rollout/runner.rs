// src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use duel_engine::{
    Difficulty, DifficultyPolicy, LockReport, Policy, Seat, SeededSource, Session, SessionConfig,
    SessionError,
};

use super::sinks::{ReportRow, RolloutSink};
use super::stats::{FinalReport, RolloutStats, Totals};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 200;

/// Salts keeping the two policy RNG streams apart from the piece stream.
const AI_RNG_SALT: u64 = 0x0A1;
const OPPONENT_RNG_SALT: u64 = 0x0B2;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Total placements to execute across duels.
    pub steps: u64,
    /// Base seed; each duel uses base_seed + duel_id.
    pub base_seed: u64,

    // ---------------- players ----------------
    pub ai: Difficulty,
    /// Automated stand-in for the human seat.
    pub opponent: Difficulty,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N steps (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    // ---------------- rendering ----------------
    /// If Some(ms): render every step; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

/// Virtual clock interleaving the seats by their decision delay.
///
/// Each seat acts when its due time is the earliest; ties go to the human seat.
#[derive(Clone, Copy, Debug)]
struct Pacing {
    human_due: Duration,
    ai_due: Duration,
    human_delay: Duration,
    ai_delay: Duration,
}

impl Pacing {
    fn new(opponent: Difficulty, ai: Difficulty) -> Self {
        Self {
            human_due: opponent.move_delay(),
            ai_due: ai.move_delay(),
            human_delay: opponent.move_delay(),
            ai_delay: ai.move_delay(),
        }
    }

    fn next_seat(&mut self) -> Seat {
        if self.human_due <= self.ai_due {
            self.human_due += self.human_delay;
            Seat::Human
        } else {
            self.ai_due += self.ai_delay;
            Seat::Ai
        }
    }
}

/// Outcome of one placement.
struct Turn {
    report: LockReport,
    /// The policy's move did not fit; the piece was dropped where it spawned.
    rejected: bool,
}

/// Ask `policy` for a move on a copy of the seat's state and commit it.
///
/// Weak difficulty levels may return moves that do not fit. Those are logged and
/// the piece is hard-dropped in place so the duel keeps going.
fn play_turn(
    session: &mut Session,
    seat: Seat,
    policy: &mut dyn Policy,
) -> Result<Turn, SessionError> {
    let (shape, grid) = session.snapshot(seat);
    let mv = policy.choose_move(&shape, &grid);

    match session.apply_move(seat, mv) {
        Ok(report) => Ok(Turn {
            report,
            rejected: false,
        }),
        Err(err @ SessionError::IllegalPlacement { .. }) => {
            debug!("{seat}: {err}; hard-dropping in place");
            let report = session.hard_drop(seat)?;
            Ok(Turn {
                report,
                rejected: true,
            })
        }
        Err(err) => Err(err),
    }
}

/// Both boards side by side, human on the left.
fn render_duel(session: &Session) -> String {
    let left = session.render_ascii(Seat::Human);
    let right = session.render_ascii(Seat::Ai);
    let mut out = String::with_capacity(left.len() + right.len() + 64);
    for (l, r) in left.lines().zip(right.lines()) {
        out.push_str(&format!("{l:<14}  {r}\n"));
    }
    out
}

fn add_totals(totals: &mut Totals, session: &Session) {
    let human = session.player(Seat::Human);
    let ai = session.player(Seat::Ai);
    totals.opponent_score += human.score;
    totals.opponent_lines += human.lines_cleared;
    totals.ai_score += ai.score;
    totals.ai_lines += ai.lines_cleared;
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    fn new_duel(cfg: &RunnerConfig, duel_id: u64) -> (Session, Pacing) {
        let session = Session::new(SessionConfig {
            seed: cfg.base_seed.wrapping_add(duel_id),
        });
        (session, Pacing::new(cfg.opponent, cfg.ai))
    }

    pub fn run(&mut self) -> FinalReport {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.steps);
            if let Ok(style) = ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
            ) {
                pb.set_style(style.progress_chars("=>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut stats = RolloutStats::new();

        let mut ai_policy = DifficultyPolicy::new(
            cfg.ai,
            SeededSource::new(cfg.base_seed.wrapping_add(AI_RNG_SALT)),
        );
        let mut opponent_policy = DifficultyPolicy::new(
            cfg.opponent,
            SeededSource::new(cfg.base_seed.wrapping_add(OPPONENT_RNG_SALT)),
        );

        let mut duel_id: u64 = 0;
        let (mut session, mut pacing) = Self::new_duel(&cfg, duel_id);

        // Totals across completed duels (live totals add the current duel).
        let mut finished = Totals::default();

        if cfg.render_ms.is_some() {
            print!("{}", render_duel(&session));
        }

        while stats.steps_done < cfg.steps {
            // ------------------------------------------------------------
            // Duel boundary: finalize counters, then reset.
            // ------------------------------------------------------------
            if session.is_over() {
                let winner = session.winner();
                info!(
                    "duel {} finished after {} placements: winner={} human_score={} ai_score={}",
                    duel_id,
                    stats.duel_len,
                    winner.map_or_else(|| "none".to_string(), |s| s.to_string()),
                    session.player(Seat::Human).score,
                    session.player(Seat::Ai).score,
                );
                stats.on_duel_end(winner);
                add_totals(&mut finished, &session);

                duel_id += 1;
                (session, pacing) = Self::new_duel(&cfg, duel_id);

                if cfg.render_ms.is_some() {
                    println!(
                        "=== reset: duels_finished={} ai_wins={} opponent_wins={} ===",
                        stats.duels_finished, stats.ai_wins, stats.opponent_wins
                    );
                    print!("{}", render_duel(&session));
                }
                continue;
            }

            // ------------------------------------------------------------
            // One placement by whichever seat is due.
            // ------------------------------------------------------------
            let seat = pacing.next_seat();
            let policy: &mut dyn Policy = match seat {
                Seat::Ai => &mut ai_policy,
                Seat::Human => &mut opponent_policy,
            };

            let turn = match play_turn(&mut session, seat, policy) {
                Ok(t) => t,
                Err(err) => {
                    debug!("{err}; ending duel {duel_id}");
                    break;
                }
            };

            let heart = !turn.report.topped_out && session.player(seat).active.kind.is_special();
            stats.on_step(&session.player(seat).grid, &turn.report, turn.rejected, heart);

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            if let Some(ms) = cfg.render_ms {
                println!(
                    "step={} seat={} lines={} rejected={}",
                    stats.steps_done, seat, turn.report.cleared_lines, turn.rejected
                );
                print!("{}", render_duel(&session));
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            }

            // ------------------------------------------------------------
            // Periodic table report (verbosity == 2 only).
            // ------------------------------------------------------------
            if cfg.verbosity == 2
                && cfg.report_every > 0
                && (stats.steps_done % cfg.report_every == 0)
            {
                let row = ReportRow {
                    step: stats.steps_done,
                    steps_total: cfg.steps,
                    sps: stats.steps_per_sec(),

                    duels_finished: stats.duels_finished,
                    avg_duel_len: stats.avg_duel_len(),
                    max_duel_len: stats.duel_len_max,
                    ai_win_rate: stats.ai_win_rate(),

                    rejected_per_step: stats.rejected_per_step(),

                    max_h_worst: stats.max_h_worst,
                    avg_max_h: stats.avg_max_h(),
                    avg_agg_h: stats.avg_agg_h(),
                    avg_holes: stats.avg_holes(),
                    avg_bump: stats.avg_bump(),
                };

                self.sink.on_report_row(&row, pb.as_ref());
            }

            if cfg.verbosity >= 1 && (stats.steps_done % LIVE_EVERY == 0) {
                if let Some(ref pb) = pb {
                    pb.set_message(stats.live_msg());
                }
            }
        }

        // Include the duel in progress.
        let mut totals = finished;
        add_totals(&mut totals, &session);

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        stats.final_report(cfg.ai, cfg.opponent, totals, session.is_over())
    }
}
