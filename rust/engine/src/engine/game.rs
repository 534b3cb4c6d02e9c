// rust/engine/src/engine/game.rs
#![forbid(unsafe_code)]

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::engine::constants::{empty_grid, Grid, MAX_ROTS};
use crate::engine::grid::{clear_lines, fits_with_overhang, place, render_ascii};
use crate::engine::piece_rule::{DrawContext, PieceRule};
use crate::engine::pieces::{Kind, Piece};
use crate::engine::scoring::{lock_points, GIFT_LINES};
use crate::engine::shape::Shape;
use crate::policy::Move;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Seat {
    Human,
    Ai,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Human => Seat::Ai,
            Seat::Ai => Seat::Human,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human => f.write_str("human"),
            Seat::Ai => f.write_str("ai"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SessionError {
    #[error("move (offset {offset}, rotations {rotations}) does not fit the board")]
    IllegalPlacement { offset: i32, rotations: u8 },
    #[error("{0} player has already topped out")]
    PlayerFinished(Seat),
}

/// What happened when a piece settled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LockReport {
    pub cleared_lines: u32,
    pub points: u64,
    /// The opponent's next piece will be a gift.
    pub gift_sent: bool,
    /// The replacement piece did not fit; this player is finished.
    pub topped_out: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DropOutcome {
    Moved,
    Locked(LockReport),
}

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Seed of the shared piece stream.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 12345 }
    }
}

/// One side of the duel.
#[derive(Clone, Debug)]
pub struct Player {
    /// Settled cells, encoded with `Kind::idx()`.
    pub grid: Grid,
    pub active: Piece,
    pub score: u64,
    pub lines_cleared: u64,
    pub pieces_locked: u64,
    pub gift_pending: bool,
    pub finished: bool,
}

impl Player {
    fn new(kind: Kind) -> Self {
        Self {
            grid: empty_grid(),
            active: Piece::spawn(kind),
            score: 0,
            lines_cleared: 0,
            pieces_locked: 0,
            gift_pending: false,
            finished: false,
        }
    }

    #[inline]
    fn fits(&self, shape: &Shape, x: i32, y: i32) -> bool {
        fits_with_overhang(&self.grid, shape, x, y)
    }

    fn draw_context(&self, current_special: bool) -> DrawContext {
        DrawContext {
            score: self.score,
            current_special,
            gift_pending: self.gift_pending,
        }
    }

    /// Write the active piece into the grid, clear rows, and score.
    fn settle(&mut self) -> LockReport {
        let p = self.active;
        let locked = place(&self.grid, &p.shape, p.x, p.y, p.kind.idx());
        let (cleared_grid, cleared_lines) = clear_lines(&locked);
        let points = lock_points(cleared_lines, &cleared_grid);

        self.grid = cleared_grid;
        self.score += points;
        self.lines_cleared += u64::from(cleared_lines);
        self.pieces_locked += 1;

        LockReport {
            cleared_lines,
            points,
            gift_sent: cleared_lines == GIFT_LINES,
            topped_out: false,
        }
    }
}

/// Authoritative duel state: both boards, the piece stream and the human preview.
///
/// The search never sees this type; it receives copies through `ai_snapshot`.
#[derive(Clone)]
pub struct Session {
    human: Player,
    ai: Player,
    /// Human preview piece (the AI has none).
    next: Kind,
    piece_rule: PieceRule,
}

impl Session {
    pub fn new(cfg: SessionConfig) -> Self {
        let mut piece_rule = PieceRule::new(cfg.seed);
        let fresh = DrawContext::default();

        // Draw order is fixed: human active, human preview, ai active.
        let human_kind = piece_rule.draw(fresh);
        let next = piece_rule.draw(fresh);
        let ai_kind = piece_rule.draw(fresh);

        Self {
            human: Player::new(human_kind),
            ai: Player::new(ai_kind),
            next,
            piece_rule,
        }
    }

    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::Human => &self.human,
            Seat::Ai => &self.ai,
        }
    }

    /// Direct access for the game loop (and fixtures); movement should go through the
    /// methods below so the active piece stays legal.
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::Human => &mut self.human,
            Seat::Ai => &mut self.ai,
        }
    }

    fn live_player_mut(&mut self, seat: Seat) -> Result<&mut Player, SessionError> {
        let p = self.player_mut(seat);
        if p.finished {
            return Err(SessionError::PlayerFinished(seat));
        }
        Ok(p)
    }

    pub fn next_kind(&self) -> Kind {
        self.next
    }

    pub fn is_over(&self) -> bool {
        self.human.finished || self.ai.finished
    }

    /// The seat still standing once the other one topped out.
    pub fn winner(&self) -> Option<Seat> {
        match (self.human.finished, self.ai.finished) {
            (true, false) => Some(Seat::Ai),
            (false, true) => Some(Seat::Human),
            _ => None,
        }
    }

    /// Copies handed to the move search: active orientation and 0/1-agnostic grid.
    pub fn snapshot(&self, seat: Seat) -> (Shape, Grid) {
        let p = self.player(seat);
        (p.active.shape, p.grid)
    }

    pub fn ai_snapshot(&self) -> (Shape, Grid) {
        self.snapshot(Seat::Ai)
    }

    // -------------------------------------------------------------------------
    // Piece movement
    // -------------------------------------------------------------------------

    pub fn shift(&mut self, seat: Seat, dx: i32) -> Result<bool, SessionError> {
        let p = self.live_player_mut(seat)?;
        let a = p.active;
        if p.fits(&a.shape, a.x + dx, a.y) {
            p.active.x += dx;
            return Ok(true);
        }
        Ok(false)
    }

    /// Clockwise turn with simple wall kicks: in place, one right, one left.
    pub fn rotate(&mut self, seat: Seat) -> Result<bool, SessionError> {
        let p = self.live_player_mut(seat)?;
        let a = p.active;
        let turned = a.shape.rotate_cw();
        for x in [a.x, a.x + 1, a.x - 1] {
            if p.fits(&turned, x, a.y) {
                p.active.shape = turned;
                p.active.x = x;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// One row of gravity; locks the piece when it cannot fall.
    pub fn soft_drop(&mut self, seat: Seat) -> Result<DropOutcome, SessionError> {
        let p = self.live_player_mut(seat)?;
        let a = p.active;
        if p.fits(&a.shape, a.x, a.y + 1) {
            p.active.y += 1;
            return Ok(DropOutcome::Moved);
        }
        Ok(DropOutcome::Locked(self.lock(seat)))
    }

    pub fn hard_drop(&mut self, seat: Seat) -> Result<LockReport, SessionError> {
        let p = self.live_player_mut(seat)?;
        let a = p.active;
        let mut y = a.y;
        while p.fits(&a.shape, a.x, y + 1) {
            y += 1;
        }
        p.active.y = y;
        Ok(self.lock(seat))
    }

    /// Commit a search decision. The move is re-checked against the live board first:
    /// search output (easy mode, medium perturbation) may be off the board or colliding.
    pub fn apply_move(&mut self, seat: Seat, mv: Move) -> Result<LockReport, SessionError> {
        let p = self.live_player_mut(seat)?;
        let illegal = SessionError::IllegalPlacement {
            offset: mv.offset,
            rotations: mv.rotations,
        };
        if mv.rotations >= MAX_ROTS {
            return Err(illegal);
        }
        let shape = p.active.shape.rotated(mv.rotations);
        if !p.fits(&shape, mv.offset, p.active.y) {
            return Err(illegal);
        }
        p.active.shape = shape;
        p.active.x = mv.offset;
        self.hard_drop(seat)
    }

    // -------------------------------------------------------------------------
    // Locking and spawning
    // -------------------------------------------------------------------------

    fn lock(&mut self, seat: Seat) -> LockReport {
        let mut report = self.player_mut(seat).settle();
        if report.gift_sent {
            self.player_mut(seat.opponent()).gift_pending = true;
        }
        report.topped_out = !self.spawn(seat);
        report
    }

    /// Bring in the next piece. Returns false (and finishes the player) when it does not fit.
    fn spawn(&mut self, seat: Seat) -> bool {
        let Session {
            human,
            ai,
            next,
            piece_rule,
        } = self;

        let p = match seat {
            Seat::Human => {
                human.active = Piece::spawn(*next);
                *next = piece_rule.draw(human.draw_context(human.active.kind.is_special()));
                human
            }
            Seat::Ai => {
                let kind = piece_rule.draw(ai.draw_context(ai.active.kind.is_special()));
                ai.active = Piece::spawn(kind);
                ai
            }
        };
        p.gift_pending = false;

        let a = p.active;
        if !p.fits(&a.shape, a.x, a.y) {
            p.finished = true;
            debug!("{seat} topped out with score {}", p.score);
            return false;
        }
        true
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// Board with the falling piece drawn in, as the UI would show it.
    pub fn display_grid(&self, seat: Seat) -> Grid {
        let p = self.player(seat);
        let a = p.active;
        place(&p.grid, &a.shape, a.x, a.y, a.kind.idx())
    }

    pub fn render_ascii(&self, seat: Seat) -> String {
        let p = self.player(seat);
        let mut s = render_ascii(&self.display_grid(seat));
        s.push_str(&format!(
            "seat={} active={} score={} lines={} pieces={} over={}\n",
            seat,
            p.active.kind.glyph(),
            p.score,
            p.lines_cleared,
            p.pieces_locked,
            p.finished
        ));
        s
    }
}
