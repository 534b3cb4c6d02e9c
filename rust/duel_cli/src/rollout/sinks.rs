// src/rollout/sinks.rs
#![forbid(unsafe_code)]

use indicatif::ProgressBar;

/// Aggregate snapshot handed to sinks at the report cadence.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub step: u64,
    pub steps_total: u64,
    pub sps: f64,

    pub duels_finished: u64,
    pub avg_duel_len: f64,
    pub max_duel_len: u64,
    pub ai_win_rate: f64,

    pub rejected_per_step: f64,

    pub max_h_worst: u32,
    pub avg_max_h: f64,
    pub avg_agg_h: f64,
    pub avg_holes: f64,
    pub avg_bump: f64,
}

pub trait RolloutSink {
    /// `pb` is passed so output does not tear the progress bar.
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&ProgressBar>);
}

pub struct NoopSink;

impl RolloutSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&ProgressBar>) {}
}

/// Fixed-width table on stdout; repeats the header every `header_every` rows.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: header_every.max(1),
            rows_printed: 0,
        }
    }

    fn header() -> String {
        format!(
            "{:>10} {:>6} {:>9} {:>7} {:>8} {:>7} {:>6} {:>8} {:>5} {:>7} {:>7} {:>7} {:>7}",
            "step", "%", "sps", "duels", "avg_len", "max_len", "ai_win", "rej/st", "maxH",
            "avgMaxH", "avgAgg", "avgHol", "avgBum",
        )
    }

    fn format_row(row: &ReportRow) -> String {
        let pct = if row.steps_total > 0 {
            100.0 * row.step as f64 / row.steps_total as f64
        } else {
            0.0
        };
        format!(
            "{:>10} {:>6.1} {:>9.1} {:>7} {:>8.1} {:>7} {:>6.2} {:>8.3} {:>5} {:>7.2} {:>7.1} {:>7.2} {:>7.2}",
            row.step,
            pct,
            row.sps,
            row.duels_finished,
            row.avg_duel_len,
            row.max_duel_len,
            row.ai_win_rate,
            row.rejected_per_step,
            row.max_h_worst,
            row.avg_max_h,
            row.avg_agg_h,
            row.avg_holes,
            row.avg_bump,
        )
    }

    fn emit(line: &str, pb: Option<&ProgressBar>) {
        match pb {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }
}

impl RolloutSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&ProgressBar>) {
        if self.rows_printed % self.header_every == 0 {
            Self::emit(&Self::header(), pb);
        }
        Self::emit(&Self::format_row(row), pb);
        self.rows_printed += 1;
    }
}
