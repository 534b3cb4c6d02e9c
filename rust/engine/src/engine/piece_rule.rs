// rust/engine/src/engine/piece_rule.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::pieces::Kind;

/// Score window that hands out a heart: `score % HEART_EVERY < HEART_WINDOW`.
pub const HEART_EVERY: u64 = 3000;
pub const HEART_WINDOW: u64 = 100;

/// What the spawn stream needs to know about the player receiving the piece.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawContext {
    pub score: u64,
    /// The piece being replaced was a heart (no two hearts in a row).
    pub current_special: bool,
    /// The opponent just cleared two lines.
    pub gift_pending: bool,
}

#[derive(Clone)]
pub struct PieceRule {
    // RNG lives here (spawn stream responsibility)
    rng: StdRng,
}

impl PieceRule {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Priority: heart milestone, then a pending gift, then a uniform standard piece.
    pub fn draw(&mut self, ctx: DrawContext) -> Kind {
        if heart_due(ctx.score) && !ctx.current_special {
            return Kind::Heart;
        }
        let pool = if ctx.gift_pending {
            Kind::gifts()
        } else {
            Kind::standard()
        };
        pool.choose(&mut self.rng).copied().unwrap_or(Kind::I)
    }
}

#[inline]
pub fn heart_due(score: u64) -> bool {
    score > 0 && score % HEART_EVERY < HEART_WINDOW
}
