// src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use duel_engine::engine::{compute_grid_features, Grid};
use duel_engine::{Difficulty, LockReport, Seat};

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub duels_finished: u64,
    pub duel_len: u64,
    pub duel_len_sum: u64,
    pub duel_len_max: u64,

    pub ai_wins: u64,
    pub opponent_wins: u64,

    pub steps_done: u64,

    // move quality
    pub rejected_moves: u64,
    pub gifts_sent: u64,
    pub hearts_spawned: u64,

    // grid feature aggregates (board of the seat that just moved)
    pub sum_max_h: f64,
    pub max_h_worst: u32,
    pub sum_agg_h: f64,
    pub sum_holes: f64,
    pub sum_bump: f64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            duels_finished: 0,
            duel_len: 0,
            duel_len_sum: 0,
            duel_len_max: 0,
            ai_wins: 0,
            opponent_wins: 0,
            steps_done: 0,
            rejected_moves: 0,
            gifts_sent: 0,
            hearts_spawned: 0,
            sum_max_h: 0.0,
            max_h_worst: 0,
            sum_agg_h: 0.0,
            sum_holes: 0.0,
            sum_bump: 0.0,
            t0: Instant::now(),
        }
    }

    /// Call once per placement with the mover's board after the lock.
    pub fn on_step(&mut self, grid: &Grid, report: &LockReport, rejected: bool, heart: bool) {
        self.steps_done += 1;
        self.duel_len += 1;

        if rejected {
            self.rejected_moves += 1;
        }
        if report.gift_sent {
            self.gifts_sent += 1;
        }
        if heart {
            self.hearts_spawned += 1;
        }

        let f = compute_grid_features(grid);
        self.sum_max_h += f.max_h as f64;
        self.max_h_worst = self.max_h_worst.max(f.max_h);
        self.sum_agg_h += f.agg_h as f64;
        self.sum_holes += f.holes as f64;
        self.sum_bump += f.bump as f64;
    }

    /// Call when a duel ends, before starting the next one.
    pub fn on_duel_end(&mut self, winner: Option<Seat>) {
        self.duels_finished += 1;
        self.duel_len_sum += self.duel_len;
        self.duel_len_max = self.duel_len_max.max(self.duel_len);
        match winner {
            Some(Seat::Ai) => self.ai_wins += 1,
            Some(Seat::Human) => self.opponent_wins += 1,
            None => {}
        }

        self.duel_len = 0;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    fn per_step(&self, v: f64) -> f64 {
        if self.steps_done > 0 {
            v / self.steps_done as f64
        } else {
            0.0
        }
    }

    pub fn steps_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.steps_done as f64 / dt
        } else {
            0.0
        }
    }

    pub fn avg_duel_len(&self) -> f64 {
        if self.duels_finished > 0 {
            self.duel_len_sum as f64 / self.duels_finished as f64
        } else {
            0.0
        }
    }

    pub fn ai_win_rate(&self) -> f64 {
        if self.duels_finished > 0 {
            self.ai_wins as f64 / self.duels_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_max_h(&self) -> f64 {
        self.per_step(self.sum_max_h)
    }

    pub fn avg_agg_h(&self) -> f64 {
        self.per_step(self.sum_agg_h)
    }

    pub fn avg_holes(&self) -> f64 {
        self.per_step(self.sum_holes)
    }

    pub fn avg_bump(&self) -> f64 {
        self.per_step(self.sum_bump)
    }

    pub fn rejected_per_step(&self) -> f64 {
        self.per_step(self.rejected_moves as f64)
    }

    pub fn live_msg(&self) -> String {
        format!(
            "sps={:.1} duels={} ai_wins={} opp_wins={} avg_duel={:.1} max_duel={} rej/step={:.3} maxH={} avgHol={:.2}",
            self.steps_per_sec(),
            self.duels_finished,
            self.ai_wins,
            self.opponent_wins,
            self.avg_duel_len(),
            self.duel_len_max,
            self.rejected_per_step(),
            self.max_h_worst,
            self.avg_holes(),
        )
    }

    pub fn final_report(
        &self,
        ai: Difficulty,
        opponent: Difficulty,
        totals: Totals,
        last_duel_over: bool,
    ) -> FinalReport {
        FinalReport {
            ai,
            opponent,

            steps_done: self.steps_done,
            elapsed_s: self.elapsed_secs(),
            steps_per_s: self.steps_per_sec(),

            duels_finished: self.duels_finished,
            ai_wins: self.ai_wins,
            opponent_wins: self.opponent_wins,
            avg_duel_len: self.avg_duel_len(),
            max_duel_len: self.duel_len_max,

            rejected_moves: self.rejected_moves,
            gifts_sent: self.gifts_sent,
            hearts_spawned: self.hearts_spawned,

            max_h_worst: self.max_h_worst,
            avg_max_h: self.avg_max_h(),
            avg_agg_h: self.avg_agg_h(),
            avg_holes: self.avg_holes(),
            avg_bump: self.avg_bump(),

            ai_score: totals.ai_score,
            opponent_score: totals.opponent_score,
            ai_lines: totals.ai_lines,
            opponent_lines: totals.opponent_lines,

            last_duel_len: self.duel_len,
            last_duel_over,
        }
    }
}

/// Score and line totals per seat, summed over duels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Totals {
    pub ai_score: u64,
    pub opponent_score: u64,
    pub ai_lines: u64,
    pub opponent_lines: u64,
}

#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct FinalReport {
    pub ai: Difficulty,
    pub opponent: Difficulty,

    pub steps_done: u64,
    pub elapsed_s: f64,
    pub steps_per_s: f64,

    pub duels_finished: u64,
    pub ai_wins: u64,
    pub opponent_wins: u64,
    pub avg_duel_len: f64,
    pub max_duel_len: u64,

    pub rejected_moves: u64,
    pub gifts_sent: u64,
    pub hearts_spawned: u64,

    pub max_h_worst: u32,
    pub avg_max_h: f64,
    pub avg_agg_h: f64,
    pub avg_holes: f64,
    pub avg_bump: f64,

    pub ai_score: u64,
    pub opponent_score: u64,
    pub ai_lines: u64,
    pub opponent_lines: u64,

    pub last_duel_len: u64,
    pub last_duel_over: bool,
}
